//! SellerLink server library: application state and the REST auxiliary
//! surface (liveness, readiness, login/logout aliases).

pub mod app_state;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod restapi;

pub use app_state::AppState;
pub use error::{ServerError, ServerResult};
