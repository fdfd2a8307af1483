use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub photo_url: Option<String>,
    pub release_date: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub rating: f64,
    pub reference_url: Option<String>,
    pub genre: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
