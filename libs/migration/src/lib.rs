pub use sea_orm_migration::prelude::*;

mod m20250301_000000_bootstrap;
mod m20250301_000001_create_users;
mod m20250301_000002_create_auth_tokens;
mod m20250301_000003_create_addresses;
mod m20250301_000004_create_catalog;
mod m20250301_000005_create_carts;
mod m20250301_000006_create_orders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000000_bootstrap::Migration),
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_auth_tokens::Migration),
            Box::new(m20250301_000003_create_addresses::Migration),
            Box::new(m20250301_000004_create_catalog::Migration),
            Box::new(m20250301_000005_create_carts::Migration),
            Box::new(m20250301_000006_create_orders::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_names_are_ordered_and_unique() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 7);
    }
}
