pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_catalog_tables;
mod m20250901_000002_create_student_tables;
mod m20250901_000003_create_table_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_catalog_tables::Migration),
            Box::new(m20250901_000002_create_student_tables::Migration),
            Box::new(m20250901_000003_create_table_users::Migration),
        ]
    }
}
