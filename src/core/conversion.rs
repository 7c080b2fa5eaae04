//! Live currency conversion abstractions

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, instrument};

use super::currency::CurrencyCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Failed to build request: {0}")]
    RequestConstruction(String),
    #[error("Request error: {0}")]
    Network(String),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Exchange rate API error: {0}")]
    Api(String),
}

/// A strictly positive amount of money entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Amount {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(',', ".");
        let value = Decimal::from_str(&normalized)
            .map_err(|_| ConversionError::InvalidInput(format!("'{s}' is not a number")))?;
        if value <= Decimal::ZERO {
            return Err(ConversionError::InvalidInput(format!(
                "amount must be positive, got {s}"
            )));
        }
        Ok(Amount(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    pub amount: Amount,
}

impl ConversionRequest {
    /// Validates raw user input. Both codes must be in the reference table.
    pub fn parse(base: &str, target: &str, amount: &str) -> Result<Self, ConversionError> {
        Ok(ConversionRequest {
            base: parse_known_code(base)?,
            target: parse_known_code(target)?,
            amount: amount.parse()?,
        })
    }
}

fn parse_known_code(input: &str) -> Result<CurrencyCode, ConversionError> {
    let code = input
        .parse::<CurrencyCode>()
        .map_err(|e| ConversionError::InvalidInput(e.to_string()))?;
    if !code.is_known() {
        return Err(ConversionError::InvalidInput(format!(
            "unknown currency code: {code}"
        )));
    }
    Ok(code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionResult {
    pub rate: Decimal,
    pub converted_amount: Decimal,
}

impl ConversionResult {
    /// Fails when `amount * rate` does not fit in a `Decimal`.
    pub fn new(rate: Decimal, amount: Amount) -> Result<Self, ConversionError> {
        let converted_amount = amount
            .value()
            .checked_mul(rate)
            .ok_or_else(|| {
                ConversionError::InvalidInput(format!(
                    "amount {amount} is too large to convert at rate {rate}"
                ))
            })?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Ok(ConversionResult {
            rate,
            converted_amount,
        })
    }

    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.converted_amount)
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the conversion rate for `request.base` -> `request.target`.
    async fn fetch_pair_rate(
        &self,
        request: &ConversionRequest,
    ) -> Result<Decimal, ConversionError>;
}

/// Converts `amount` of `base` into `target`.
///
/// Input is validated before the provider is called, so malformed amounts and
/// unknown codes never reach the network.
#[instrument(name = "Convert", skip(provider))]
pub async fn convert(
    provider: &(dyn RateProvider + Send + Sync),
    base: &str,
    target: &str,
    amount: &str,
) -> Result<ConversionResult, ConversionError> {
    let request = ConversionRequest::parse(base, target, amount)?;
    convert_request(provider, &request).await
}

/// Converts an already validated request.
#[instrument(name = "Convert request", skip(provider))]
pub async fn convert_request(
    provider: &(dyn RateProvider + Send + Sync),
    request: &ConversionRequest,
) -> Result<ConversionResult, ConversionError> {
    let rate = provider.fetch_pair_rate(request).await?;
    let result = ConversionResult::new(rate, request.amount)?;
    debug!(?result, "Conversion complete");
    Ok(result)
}
