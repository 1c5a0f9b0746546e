pub use sea_orm_migration::prelude::*;

mod m20250604_000001_create_auth_user_table;
mod m20250604_133500_create_core_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        // The core tables reference auth_user, so the user table goes first.
        vec![
            Box::new(m20250604_000001_create_auth_user_table::Migration),
            Box::new(m20250604_133500_create_core_tables::Migration),
        ]
    }
}
