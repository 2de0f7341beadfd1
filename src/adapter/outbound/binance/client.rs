//! Binance REST session.
//!
//! Signed endpoints take the request parameters plus `timestamp` and
//! `recvWindow` as a query string, sign it with HMAC-SHA256 over the API
//! secret and append the hex digest as `signature`. A request whose
//! timestamp falls outside the server's window is rejected with code
//! `-1021`, which maps to [`ExchangeError::TimeDesync`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use sha2::Sha256;
use tracing::debug;

use super::dto::{AccountResponse, ApiErrorBody, WithdrawResponse};
use super::settings::{BinanceConfig, BinanceCredentials};
use crate::error::ExchangeError;
use crate::port::outbound::exchange::{
    AccountInfo, ExchangeSession, WithdrawReceipt, WithdrawRequest,
};

type HmacSha256 = Hmac<Sha256>;

/// Error code for a request timestamp outside the recv window.
const TIMESTAMP_OUTSIDE_RECV_WINDOW: i64 = -1021;

const ACCOUNT_PATH: &str = "/api/v3/account";
const WITHDRAW_PATH: &str = "/sapi/v1/capital/withdraw/apply";

/// Longest error body echoed into an error message.
const MAX_ERROR_BODY: usize = 200;

/// A single authenticated client. Cheap to build; one per attempt.
pub struct BinanceSession {
    http: HttpClient,
    base_url: String,
    credentials: BinanceCredentials,
    recv_window_ms: u64,
}

impl BinanceSession {
    /// Build a session with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        config: &BinanceConfig,
        credentials: BinanceCredentials,
    ) -> Result<Self, ExchangeError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .map_err(|err| ExchangeError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            credentials,
            recv_window_ms: config.recv_window_ms,
        })
    }

    fn signed_query(&self, params: &[(&str, String)]) -> Result<String, ExchangeError> {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in params {
            serializer.append_pair(key, value);
        }
        serializer.append_pair("recvWindow", &self.recv_window_ms.to_string());
        serializer.append_pair("timestamp", &Utc::now().timestamp_millis().to_string());
        let query = serializer.finish();

        let signature = sign(&self.credentials.api_secret, &query)?;
        Ok(format!("{query}&signature={signature}"))
    }

    async fn send_signed<T>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}?{}", self.base_url, path, self.signed_query(params)?);
        debug!(method = %method, path, "Sending signed request");

        let response = self
            .http
            .request(method, &url)
            .header("X-MBX-APIKEY", &self.credentials.api_key)
            .send()
            .await
            .map_err(|err| ExchangeError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ExchangeError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|err| ExchangeError::Decode(err.to_string()))
    }
}

#[async_trait]
impl ExchangeSession for BinanceSession {
    async fn account_info(&self) -> Result<AccountInfo, ExchangeError> {
        let response: AccountResponse = self.send_signed(Method::GET, ACCOUNT_PATH, &[]).await?;
        Ok(response.into())
    }

    async fn withdraw(&self, request: &WithdrawRequest) -> Result<WithdrawReceipt, ExchangeError> {
        let params = [
            ("coin", request.asset.clone()),
            ("address", request.address.clone()),
            ("amount", request.amount.normalize().to_string()),
            ("network", request.network.clone()),
        ];
        let response: WithdrawResponse = self
            .send_signed(Method::POST, WITHDRAW_PATH, &params)
            .await?;
        Ok(response.into())
    }

    fn exchange_name(&self) -> &'static str {
        "binance"
    }
}

/// Hex-encoded HMAC-SHA256 of `payload` keyed with `secret`.
///
/// # Errors
///
/// Returns [`ExchangeError::Credentials`] if the secret is rejected as a key.
pub fn sign(secret: &str, payload: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| ExchangeError::Credentials(BinanceCredentials::API_SECRET_VAR))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Map a non-2xx response to a typed error.
#[must_use]
pub fn api_error(status: StatusCode, body: &str) -> ExchangeError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(error) if error.code == TIMESTAMP_OUTSIDE_RECV_WINDOW => {
            ExchangeError::TimeDesync { message: error.msg }
        }
        Ok(error) => ExchangeError::Api {
            code: error.code,
            message: error.msg,
        },
        Err(_) => ExchangeError::Api {
            code: i64::from(status.as_u16()),
            message: body.chars().take(MAX_ERROR_BODY).collect(),
        },
    }
}
