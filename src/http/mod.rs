//! HTTP server module.
//!
//! The server includes graceful shutdown on SIGTERM/SIGINT: new connections
//! stop being accepted and in-flight requests get a configurable grace period.
//! TLS is expected to be terminated by a reverse proxy.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
