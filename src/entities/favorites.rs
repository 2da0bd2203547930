use sea_orm::entity::prelude::*;

/// Favorite marker, independent of the four exclusive categories.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "favorites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub watch_list_id: i32,

    pub profile_id: i32,

    pub anime_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::watch_lists::Entity",
        from = "Column::WatchListId",
        to = "super::watch_lists::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    WatchList,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ProfileId",
        to = "super::profiles::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Profile,
    #[sea_orm(
        belongs_to = "super::anime::Entity",
        from = "Column::AnimeId",
        to = "super::anime::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Anime,
}

impl Related<super::anime::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Anime.def()
    }
}

impl Related<super::watch_lists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WatchList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
