use sea_orm::entity::prelude::*;

/// One row per distinct client IP ever seen; views link against these.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "visitor_ips")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub ip: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::anime_views::Entity")]
    Views,
}

impl ActiveModelBehavior for ActiveModel {}
