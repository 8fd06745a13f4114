//! Test support for the shop crates.
//!
//! - [`TestDatabase`]: a throwaway PostgreSQL 18 container with every shop
//!   migration applied, plus fixture inserts for users, catalog, addresses
//!   and carts (feature `postgres`, on by default)
//! - [`TestDataBuilder`]: per-test deterministic emails and names, so tests
//!   that share a database never collide on unique columns
//! - [`assertions`]: small helpers with readable failure messages
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestDatabase};
//!
//! #[tokio::test]
//! async fn checkout_flow() {
//!     let db = TestDatabase::new().await;
//!     let data = TestDataBuilder::from_test_name("checkout_flow");
//!
//!     let buyer = db.create_test_user().await;
//!     let coffee = db.create_test_category(&data.category_name("coffee")).await;
//!     let beans = db.create_test_product(coffee, 12.5, 10).await;
//!     db.add_to_cart(buyer, beans, 2).await;
//! }
//! ```

use std::hash::{DefaultHasher, Hash, Hasher};

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::{TEST_PASSWORD_HASH, TestDatabase};

/// Values derived from a seed; the same test name always yields the same data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test's own name.
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `local-<seed>@example.com`, valid for the email validator
    pub fn email(&self, local: &str) -> String {
        format!("{}-{}@example.com", local, self.seed)
    }

    pub fn full_name(&self, first: &str) -> String {
        format!("{} Tester{}", first, self.seed % 10_000)
    }

    /// Category names must be at least three characters
    pub fn category_name(&self, base: &str) -> String {
        format!("{}-{}", base, self.seed % 100_000)
    }

    pub fn product_name(&self, base: &str) -> String {
        format!("{} #{}", base, self.seed % 100_000)
    }
}

pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Unwrap `value`, naming `context` in the panic.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Compare prices stored as `DOUBLE PRECISION` to the cent.
    pub fn assert_money_eq(actual: f64, expected: f64, context: &str) {
        assert!(
            (actual - expected).abs() < 0.005,
            "{}: expected {:.2}, got {:.2}",
            context,
            expected,
            actual
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_data() {
        let a = TestDataBuilder::from_test_name("checkout");
        let b = TestDataBuilder::from_test_name("checkout");
        assert_eq!(a.email("buyer"), b.email("buyer"));
        assert_eq!(a.product_name("Mug"), b.product_name("Mug"));
    }

    #[test]
    fn test_different_names_do_not_collide() {
        let a = TestDataBuilder::from_test_name("first");
        let b = TestDataBuilder::from_test_name("second");
        assert_ne!(a.email("buyer"), b.email("buyer"));
    }

    #[test]
    fn test_email_shape() {
        assert_eq!(TestDataBuilder::new(7).email("buyer"), "buyer-7@example.com");
    }

    #[test]
    fn test_category_name_is_long_enough() {
        assert!(TestDataBuilder::new(0).category_name("ab").len() >= 3);
    }

    #[test]
    fn test_money_within_a_cent() {
        assertions::assert_money_eq(0.1 + 0.2, 0.3, "sum");
    }

    #[test]
    #[should_panic(expected = "total")]
    fn test_money_mismatch_panics() {
        assertions::assert_money_eq(10.0, 10.5, "total");
    }
}
