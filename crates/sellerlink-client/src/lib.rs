//! Session lifecycle management and authenticated outbound calls.

pub mod api;
pub mod error;
pub mod session;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use session::SessionManager;
