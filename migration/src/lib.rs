pub use sea_orm_migration::prelude::*;

mod m20250304_105428_create_users_table;
mod m20250305_090112_create_courses_table;
mod m20260127_144214_create_table_topics;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250304_105428_create_users_table::Migration),
            Box::new(m20250305_090112_create_courses_table::Migration),
            Box::new(m20260127_144214_create_table_topics::Migration),
        ]
    }
}
