//! Core types shared across the SellerLink workspace.

pub mod error;
pub mod store;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use store::TokenStore;
pub use types::Session;
