// API client module: contains a small blocking HTTP client that talks
// to the coinlayer rates API. It is intentionally small and
// synchronous; the menu loop issues at most one request at a time.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;

/// Simple API client that holds a reqwest blocking client, the base
/// URL of the rates API and the access key appended to every request.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    access_key: String,
}

/// Failure kinds for a single fetch. Callers match on the variant
/// instead of parsing console text: transport problems, HTTP error
/// statuses, undecodable bodies and API-reported failures are all
/// distinct.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(StatusCode),
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API error: {0}")]
    Api(String),
}

/// Response shape shared by the live and historical endpoints. The
/// `success` flag defaults to false so a body that omits it is
/// treated as a failure; `rates` is a BTreeMap so iteration yields
/// currency codes in sorted order.
#[derive(Deserialize, Debug)]
pub struct RatesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub rates: BTreeMap<String, f64>,
    pub date: Option<String>,
    pub target: Option<String>,
    pub error: Option<ApiErrorBody>,
}

/// Error object embedded in unsuccessful API responses.
#[derive(Deserialize, Debug)]
pub struct ApiErrorBody {
    pub code: Option<i64>,
    pub info: Option<String>,
}

impl ApiClient {
    /// Create an ApiClient from a loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: config.base_url.clone(),
            access_key: config.api_key.clone(),
        })
    }

    // URL builders, one per operation. The access key always rides as
    // the first query parameter.

    fn live_url(&self) -> String {
        format!("{}/live?access_key={}", self.base_url, self.access_key)
    }

    fn live_filtered_url(&self, target: &str, symbols: &str) -> String {
        format!("{}&target={}&symbols={}", self.live_url(), target, symbols)
    }

    fn historical_url(&self, date: &str, target: &str, symbols: &str) -> String {
        format!(
            "{}/{}?access_key={}&target={}&symbols={}",
            self.base_url, date, self.access_key, target, symbols
        )
    }

    fn convert_url(&self, from: &str, to: &str) -> String {
        format!("{}&symbols={},{}", self.live_url(), from, to)
    }

    /// Perform one GET and decode the body. This is the sole point of
    /// network I/O and of error containment: every failure comes back
    /// as a tagged `ApiError`, nothing panics or propagates further.
    fn fetch_rates(&self, url: &str) -> Result<RatesResponse, ApiError> {
        let res = self.client.get(url).send()?;
        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let body: RatesResponse = serde_json::from_str(&res.text()?)?;
        check_success(body)
    }

    /// Live rates for every symbol the API knows, sorted by code.
    pub fn live_all(&self) -> Result<Vec<(String, f64)>, ApiError> {
        let body = self.fetch_rates(&self.live_url())?;
        Ok(body.rates.into_iter().collect())
    }

    /// Live rates restricted to `symbols`, quoted against `target`.
    /// Inputs are expected to be normalized (uppercase) already.
    pub fn live_filtered(&self, symbols: &str, target: &str) -> Result<RatesResponse, ApiError> {
        self.fetch_rates(&self.live_filtered_url(target, symbols))
    }

    /// Rates for a past date. `date` must already be validated as a
    /// strict `YYYY-MM-DD` string; it is substituted into the path.
    pub fn historical(
        &self,
        date: &str,
        target: &str,
        symbols: &str,
    ) -> Result<RatesResponse, ApiError> {
        self.fetch_rates(&self.historical_url(date, target, symbols))
    }

    /// Live rates scoped to exactly the two codes of a conversion.
    pub fn conversion_rates(&self, from: &str, to: &str) -> Result<RatesResponse, ApiError> {
        self.fetch_rates(&self.convert_url(from, to))
    }
}

/// Gate on the API's own `success` flag. An unsuccessful body yields
/// the embedded error message, or "Unknown error" when the API did
/// not include one.
fn check_success(body: RatesResponse) -> Result<RatesResponse, ApiError> {
    if body.success {
        return Ok(body);
    }
    let info = body
        .error
        .and_then(|e| e.info)
        .unwrap_or_else(|| "Unknown error".to_string());
    Err(ApiError::Api(info))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> ApiClient {
        let config = Config {
            api_key: "KEY".into(),
            base_url: "http://api.test/api".into(),
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn live_url_carries_access_key() {
        let api = test_client();
        assert_eq!(api.live_url(), "http://api.test/api/live?access_key=KEY");
    }

    #[test]
    fn filtered_url_appends_target_and_symbols() {
        let api = test_client();
        assert_eq!(
            api.live_filtered_url("USD", "BTC,ETH"),
            "http://api.test/api/live?access_key=KEY&target=USD&symbols=BTC,ETH"
        );
    }

    #[test]
    fn historical_url_substitutes_date_into_path() {
        let api = test_client();
        assert_eq!(
            api.historical_url("2024-01-15", "EUR", "BTC"),
            "http://api.test/api/2024-01-15?access_key=KEY&target=EUR&symbols=BTC"
        );
    }

    #[test]
    fn convert_url_scopes_to_both_codes() {
        let api = test_client();
        assert_eq!(
            api.convert_url("BTC", "USD"),
            "http://api.test/api/live?access_key=KEY&symbols=BTC,USD"
        );
    }

    #[test]
    fn successful_body_passes_through() {
        let body: RatesResponse =
            serde_json::from_str(r#"{"success": true, "rates": {"BTC": 42000.0}}"#).unwrap();
        let body = check_success(body).unwrap();
        assert_eq!(body.rates.get("BTC"), Some(&42000.0));
    }

    #[test]
    fn api_failure_surfaces_embedded_info() {
        let body: RatesResponse =
            serde_json::from_str(r#"{"success": false, "error": {"info": "invalid_access_key"}}"#)
                .unwrap();
        let err = check_success(body).unwrap_err();
        assert!(err.to_string().contains("invalid_access_key"));
    }

    #[test]
    fn missing_success_flag_is_a_failure() {
        let body: RatesResponse = serde_json::from_str(r#"{"rates": {"BTC": 1.0}}"#).unwrap();
        let err = check_success(body).unwrap_err();
        assert!(matches!(err, ApiError::Api(ref info) if info == "Unknown error"));
    }

    #[test]
    fn rates_iterate_in_code_order() {
        let body: RatesResponse =
            serde_json::from_str(r#"{"success": true, "rates": {"ETH": 2500.0, "BTC": 42000.0}}"#)
                .unwrap();
        let codes: Vec<&str> = body.rates.keys().map(String::as_str).collect();
        assert_eq!(codes, ["BTC", "ETH"]);
    }
}
