use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub body: String,

    pub created_at: DateTimeWithTimeZone,

    /// One of `OPEN`, `CLOSED`, `UNDER_REVIEW`
    pub status: String,

    pub author_id: i64,

    pub course_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Entity",
        from = "Column::AuthorId",
        to = "crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Column::Id"
    )]
    Author,

    #[sea_orm(
        belongs_to = "crate::modules::course::adapter::outgoing::sea_orm_entity::courses::Entity",
        from = "Column::CourseId",
        to = "crate::modules::course::adapter::outgoing::sea_orm_entity::courses::Column::Id"
    )]
    Course,
}

impl ActiveModelBehavior for ActiveModel {}
