use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "directors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    #[sea_orm(unique)]
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::anime::Entity> for Entity {
    fn to() -> RelationDef {
        super::anime_directors::Relation::Anime.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::anime_directors::Relation::Director.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
