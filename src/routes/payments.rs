//! Handler for creating payments.

use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::instrument;

use crate::error::{AppError, AppErrorResponse, ResultExt};
use crate::extract::RequestParams;
use crate::middleware::RequestId;
use crate::payments::{PaymentParams, PaymentReceipt};
use crate::state::AppState;

/// Validate the request and, if it passes, run it through the processor.
///
/// Responds 201 with `{id, result: true}` on success. Failures carry
/// `{result: false, message}` with 400 for bad input and 422 for a
/// simulated decline.
#[instrument(
    name = "payments::create",
    skip(state, request_id, params)
)]
pub async fn create(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    params: Result<RequestParams, AppError>,
) -> Result<(StatusCode, Json<PaymentReceipt>), AppErrorResponse> {
    let RequestParams(params) = params.with_request_id(&request_id)?;

    let request = PaymentParams::from_map(params)
        .validate()
        .with_request_id(&request_id)?;

    let receipt = state
        .processor
        .process(&request)
        .with_request_id(&request_id)?;

    Ok((StatusCode::CREATED, Json(receipt)))
}
