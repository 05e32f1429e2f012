//! # Repositories
//!
//! Data access for the two persisted record collections. Repositories are
//! generic over [`sea_orm::ConnectionTrait`] so the same methods run against
//! the pool or inside a transaction.

pub mod call;
pub mod state;

pub use call::CallRepository;
pub use state::StateRepository;
