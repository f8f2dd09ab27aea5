//! Payment validation and simulated processing.
//!
//! A request passes through three checks in order, each short-circuiting:
//! presence of every required parameter, a non-negative numeric value, and
//! (in coin-flip mode) a random approval. Approved payments get an opaque
//! hex token as their id. Nothing is stored.

use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;

use crate::config::{PaymentsConfig, ProcessingMode};
use crate::error::AppError;

pub const CURRENCY: &str = "currency";
pub const VALUE: &str = "value";
pub const CUSTOMER_ID: &str = "customer_id";

/// Raw payment parameters as sent by the client.
///
/// `None` means the key was absent. An empty string counts as present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentParams {
    pub currency: Option<String>,
    pub value: Option<String>,
    pub customer_id: Option<String>,
}

impl PaymentParams {
    pub fn from_map(mut params: HashMap<String, String>) -> Self {
        Self {
            currency: params.remove(CURRENCY),
            value: params.remove(VALUE),
            customer_id: params.remove(CUSTOMER_ID),
        }
    }

    /// Check presence first, then the value.
    pub fn validate(self) -> Result<PaymentRequest, AppError> {
        let (Some(currency), Some(value), Some(customer_id)) =
            (self.currency, self.value, self.customer_id)
        else {
            return Err(AppError::MissingParameter);
        };

        Ok(PaymentRequest {
            currency,
            value: parse_value(&value)?,
            customer_id,
        })
    }
}

/// A payment request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub currency: String,
    pub value: f64,
    pub customer_id: String,
}

/// Parse a decimal amount. Zero is allowed; negatives and non-finite values are not.
pub fn parse_value(raw: &str) -> Result<f64, AppError> {
    let value: f64 = raw.trim().parse().map_err(|_| AppError::InvalidValue)?;
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidValue);
    }
    Ok(value)
}

/// Success body for a created payment.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceipt {
    pub id: String,
    pub result: bool,
}

/// Hex encoding of `bytes` random bytes.
pub fn generate_token<R: Rng + ?Sized>(rng: &mut R, bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rng.fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Decides validated payments and issues their ids.
#[derive(Debug, Clone)]
pub struct PaymentProcessor {
    mode: ProcessingMode,
    token_bytes: usize,
}

impl PaymentProcessor {
    pub fn new(config: &PaymentsConfig) -> Self {
        Self {
            mode: config.mode,
            token_bytes: config.token_bytes,
        }
    }

    /// Process with the calling thread's RNG.
    pub fn process(&self, request: &PaymentRequest) -> Result<PaymentReceipt, AppError> {
        self.process_with(&mut rand::thread_rng(), request)
    }

    pub fn process_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt, AppError> {
        let approved = match self.mode {
            ProcessingMode::AlwaysApprove => true,
            ProcessingMode::CoinFlip => rng.gen::<bool>(),
        };

        if !approved {
            return Err(AppError::ProcessingRejected);
        }

        let id = generate_token(rng, self.token_bytes);
        tracing::debug!(
            id = %id,
            currency = %request.currency,
            value = request.value,
            customer_id = %request.customer_id,
            "Payment created"
        );

        Ok(PaymentReceipt { id, result: true })
    }
}
