//! # adv-store
//!
//! Verdict persistence for the L ≡ T adversary.
//!
//! Every verdict is written with a single insert-or-replace keyed by its id:
//! - [`CosmosStore`] talks to the Cosmos DB SQL API over REST with master-key auth
//! - [`MemoryStore`] keeps documents in process (dry runs and tests)

mod auth;
mod cosmos;
mod error;
mod memory;

pub use cosmos::CosmosStore;
pub use error::StoreError;
pub use memory::MemoryStore;

use std::future::Future;

use adv_core::entities::Verdict;

/// A document store that verdicts are upserted into.
pub trait DocumentStore {
    /// Insert `verdict`, or replace the document that already has its id.
    fn upsert(&self, verdict: &Verdict) -> impl Future<Output = Result<(), StoreError>> + Send;
}
