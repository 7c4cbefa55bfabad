//! Mobile-wallet payment integration.
//!
//! The wallet SDK running in the client fires two webhooks at us — approval
//! and completion — and each one must be forwarded to the payment provider's
//! REST API with our server-side API key before the payment settles. One
//! configurable client replaces the pile of per-deployment callback scripts;
//! the key, endpoint and sandbox flag all come from the environment.

use std::env;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};
use tracing::{error, info};

use kiosk_types::api::{ApprovePaymentRequest, CompletePaymentRequest};

use crate::auth::AppState;

const DEFAULT_API_BASE: &str = "https://api.minepi.com";

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub api_key: String,
    pub base_url: String,
    pub sandbox: bool,
}

impl PaymentConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("WALLET_API_KEY").unwrap_or_default(),
            base_url: env::var("WALLET_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into()),
            sandbox: env::var("WALLET_SANDBOX")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

pub struct PaymentClient {
    http: reqwest::Client,
    config: PaymentConfig,
}

impl PaymentClient {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn sandbox(&self) -> bool {
        self.config.sandbox
    }

    async fn forward(&self, endpoint: &str, body: Value) -> Result<Value, ProviderError> {
        let url = format!("{}/v2/payments/{endpoint}", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Key {}", self.config.api_key))
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        response.json().await.map_err(ProviderError::Transport)
    }

    /// Phase one: tell the provider to approve the payment.
    pub async fn approve(&self, payment_id: &str) -> Result<Value, ProviderError> {
        self.forward("approve", json!({ "paymentId": payment_id }))
            .await
    }

    /// Phase two: mark the payment complete, with the chain transaction id
    /// when the wallet supplies one.
    pub async fn complete(
        &self,
        payment_id: &str,
        txid: Option<&str>,
    ) -> Result<Value, ProviderError> {
        let mut body = json!({ "paymentId": payment_id });
        if let Some(txid) = txid {
            body["txid"] = json!(txid);
        }
        self.forward("complete", body).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("payment provider request failed: {0}")]
    Transport(reqwest::Error),
    #[error("payment provider rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },
}

/// POST /api/payments/approve
pub async fn approve_payment(
    State(state): State<AppState>,
    Json(req): Json<ApprovePaymentRequest>,
) -> impl IntoResponse {
    if req.payment_id.is_empty() {
        return rejected(StatusCode::BAD_REQUEST, "paymentId is required");
    }

    info!(payment_id = %req.payment_id, "approving payment");
    relay(state.payments.approve(&req.payment_id).await)
}

/// POST /api/payments/complete
pub async fn complete_payment(
    State(state): State<AppState>,
    Json(req): Json<CompletePaymentRequest>,
) -> impl IntoResponse {
    if req.payment_id.is_empty() {
        return rejected(StatusCode::BAD_REQUEST, "paymentId is required");
    }

    info!(payment_id = %req.payment_id, "completing payment");
    relay(state.payments.complete(&req.payment_id, req.txid.as_deref()).await)
}

/// Relay the provider outcome to the caller as `{success: bool, ...}`,
/// preserving the provider's status code on rejection.
fn relay(outcome: Result<Value, ProviderError>) -> axum::response::Response {
    match outcome {
        Ok(data) => {
            (StatusCode::OK, Json(json!({ "success": true, "data": data }))).into_response()
        }
        Err(ProviderError::Rejected { status, detail }) => {
            error!(status, "payment provider rejected request: {detail}");
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            rejected(status, &detail)
        }
        Err(err @ ProviderError::Transport(_)) => {
            error!("payment forwarding failed: {err}");
            rejected(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

fn rejected(status: StatusCode, message: &str) -> axum::response::Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}
