//! Payments: a stub payments API.
//!
//! Validates `currency`, `value` and `customer_id` on `POST /payments` and
//! either approves every valid request or simulates declines with a coin
//! flip. `GET /health` is a liveness probe.

pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod middleware;
pub mod payments;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
