//! Transaction coordinator.
//!
//! A unit of work is a closure that receives the open transaction and returns
//! a boxed future. [`with_transaction`] commits when the future resolves to
//! `Ok`, rolls back when it resolves to `Err`, and rolls back before resuming
//! the unwind when it panics.
//!
//! ```ignore
//! let order_id = with_transaction(&db, |txn| {
//!     Box::pin(async move {
//!         let id = orders.insert_order(txn, &draft).await?;
//!         carts.clear_in(txn, user_id).await?;
//!         Ok::<_, OrderError>(id)
//!     })
//! })
//! .await?;
//! ```

use futures::FutureExt;
use sea_orm::{DatabaseTransaction, DbErr, TransactionTrait};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use tracing::{debug, error, warn};

/// Future returned by a unit of work, borrowing the transaction for `'t`.
pub type UnitOfWork<'t, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 't>>;

/// Run `work` inside a single database transaction.
///
/// The error type only has to absorb [`DbErr`], which covers failures of
/// `BEGIN` and `COMMIT` themselves. A failed rollback is logged and the
/// original error (or panic) wins.
pub async fn with_transaction<C, T, E, F>(db: &C, work: F) -> Result<T, E>
where
    C: TransactionTrait<Transaction = DatabaseTransaction>,
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> UnitOfWork<'t, T, E> + Send,
    T: Send,
    E: From<DbErr> + Send,
{
    let txn = db.begin().await?;
    debug!("Transaction started");

    let outcome = AssertUnwindSafe(work(&txn)).catch_unwind().await;

    match outcome {
        Ok(Ok(value)) => {
            txn.commit().await?;
            debug!("Transaction committed");
            Ok(value)
        }
        Ok(Err(err)) => {
            rollback(txn).await;
            Err(err)
        }
        Err(payload) => {
            warn!("Unit of work panicked, rolling back");
            rollback(txn).await;
            panic::resume_unwind(payload)
        }
    }
}

async fn rollback(txn: DatabaseTransaction) {
    match txn.rollback().await {
        Ok(()) => debug!("Transaction rolled back"),
        Err(e) => error!(error = %e, "Transaction rollback failed"),
    }
}
