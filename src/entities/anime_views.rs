use sea_orm::entity::prelude::*;

/// Existence of an (anime, ip) pair is what counts as one view.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "anime_views")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub anime_id: i32,

    #[sea_orm(primary_key, auto_increment = false)]
    pub ip_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::anime::Entity",
        from = "Column::AnimeId",
        to = "super::anime::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Anime,
    #[sea_orm(
        belongs_to = "super::visitor_ips::Entity",
        from = "Column::IpId",
        to = "super::visitor_ips::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    VisitorIp,
}

impl Related<super::anime::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Anime.def()
    }
}

impl Related<super::visitor_ips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VisitorIp.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
