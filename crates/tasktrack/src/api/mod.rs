//! HTTP API module.
//!
//! REST endpoints for accounts, tasks and administration.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ApiResult, ErrorResponse, INTERNAL_ERROR_MESSAGE};
pub use handlers::{HealthResponse, LoginRequest, MessageResponse, TaskResponse};
pub use routes::create_router;
pub use state::AppState;
