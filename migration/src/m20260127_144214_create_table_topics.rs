use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Create topics table
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Topics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Topics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Topics::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Topics::Body).text().not_null())
                    .col(
                        ColumnDef::new(Topics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Topics::Status)
                            .string_len(20)
                            .not_null()
                            .default("OPEN")
                            .check(Expr::col(Topics::Status).is_in([
                                "OPEN",
                                "CLOSED",
                                "UNDER_REVIEW",
                            ])),
                    )
                    .col(ColumnDef::new(Topics::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Topics::CourseId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_topics_author_id")
                            .from(Topics::Table, Topics::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_topics_course_id")
                            .from(Topics::Table, Topics::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================

        // Backstop for the duplicate-topic check. The body is unbounded
        // TEXT, so it is indexed through its digest.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX idx_topics_title_body_unique
                ON topics (title, md5(body));
                "#,
            )
            .await?;

        // Default listing order and the year filter
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_topics_created_at_id
                ON topics (created_at ASC, id ASC);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_topics_course_id ON topics (course_id);
                CREATE INDEX idx_topics_author_id ON topics (author_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS idx_topics_title_body_unique;
                DROP INDEX IF EXISTS idx_topics_created_at_id;
                DROP INDEX IF EXISTS idx_topics_course_id;
                DROP INDEX IF EXISTS idx_topics_author_id;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Topics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Topics {
    Table,
    Id,
    Title,
    Body,
    CreatedAt,
    Status,
    AuthorId,
    CourseId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
}
