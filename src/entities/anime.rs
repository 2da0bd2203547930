use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anime")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub second_title: Option<String>,

    #[sea_orm(unique)]
    pub slug: String,

    pub description: String,

    /// Poster URL or path; image storage is handled elsewhere.
    pub poster: Option<String>,

    pub studio_id: i32,

    /// ISO date (YYYY-MM-DD); lexicographic order matches chronological.
    pub release_date: String,

    pub episode_count: i32,

    /// released | ongoing | announced
    pub status: String,

    /// 6+ | 13+ | 16+ | 18+
    pub age_rating: String,

    /// winter | spring | summer | autumn
    pub season: String,

    /// series | movie | short | ova | ona | special
    pub kind: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::studios::Entity",
        from = "Column::StudioId",
        to = "super::studios::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Studio,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
    #[sea_orm(has_many = "super::ratings::Entity")]
    Ratings,
    #[sea_orm(has_many = "super::anime_views::Entity")]
    Views,
}

impl Related<super::studios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Studio.def()
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::anime_genres::Relation::Genre.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::anime_genres::Relation::Anime.def().rev())
    }
}

impl Related<super::directors::Entity> for Entity {
    fn to() -> RelationDef {
        super::anime_directors::Relation::Director.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::anime_directors::Relation::Anime.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
