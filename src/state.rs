//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::payments::PaymentProcessor;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds no mutable data; every request is handled independently.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub processor: Arc<PaymentProcessor>,
}

impl AppState {
    /// Creates a new application state from the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let processor = PaymentProcessor::new(&config.payments);
        Self {
            config: Arc::new(config),
            processor: Arc::new(processor),
        }
    }
}
