use async_trait::async_trait;
use reqwest::Url;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::conversion::{ConversionError, ConversionRequest, RateProvider};

const USER_AGENT: &str = concat!("fxconv/", env!("CARGO_PKG_VERSION"));

/// Client for the exchangerate-api.com v6 pair endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// `<base_url>/v6/<key>/pair/<BASE>/<TARGET>/<AMOUNT>`
    pub fn pair_url(&self, request: &ConversionRequest) -> Result<Url, ConversionError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ConversionError::RequestConstruction(format!(
                "invalid base URL '{}': {e}",
                self.base_url
            ))
        })?;
        let amount = request.amount.to_string();
        url.path_segments_mut()
            .map_err(|_| {
                ConversionError::RequestConstruction(format!(
                    "base URL cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend([
                "v6",
                self.api_key.as_str(),
                "pair",
                request.base.as_str(),
                request.target.as_str(),
                amount.as_str(),
            ]);
        Ok(url)
    }
}

// Metadata fields are required so that a truncated body fails to decode, but
// only `result` and `conversion_rate` are read.
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
struct PairResponse {
    result: String,
    documentation: String,
    terms_of_use: String,
    time_last_update_unix: i64,
    time_last_update_utc: String,
    time_next_update_unix: i64,
    time_next_update_utc: String,
    base_code: String,
    target_code: String,
    conversion_rate: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "ExchangeRateFetch",
        skip(self, request),
        fields(base = %request.base, target = %request.target)
    )]
    async fn fetch_pair_rate(
        &self,
        request: &ConversionRequest,
    ) -> Result<Decimal, ConversionError> {
        let url = self.pair_url(request)?;
        // The URL carries the API key; log the pair instead.
        debug!(amount = %request.amount, "Requesting conversion rate");

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ConversionError::RequestConstruction(e.to_string()))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| ConversionError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ConversionError::Network(e.without_url().to_string()))?;
        debug!(%status, "Received exchange rate response");

        if let Ok(envelope) = serde_json::from_str::<ErrorResponse>(&text) {
            if envelope.result == "error" {
                return Err(ConversionError::Api(
                    envelope
                        .error_type
                        .unwrap_or_else(|| "unknown-error".to_string()),
                ));
            }
        }

        if !status.is_success() {
            return Err(ConversionError::Network(format!("HTTP error: {status}")));
        }

        let data: PairResponse = serde_json::from_str(&text).map_err(|e| {
            ConversionError::Decode(format!(
                "unexpected response for {}/{}: {e}",
                request.base, request.target
            ))
        })?;

        if data.result != "success" {
            return Err(ConversionError::Decode(format!(
                "unexpected result '{}'",
                data.result
            )));
        }

        Decimal::try_from(data.conversion_rate).map_err(|e| {
            ConversionError::Decode(format!(
                "conversion rate {} is not representable: {e}",
                data.conversion_rate
            ))
        })
    }
}
