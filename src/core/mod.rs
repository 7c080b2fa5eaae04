//! Core business logic abstractions

pub mod config;
pub mod conversion;
pub mod currency;
pub mod historical;
pub mod log;

// Re-export main types for cleaner imports
pub use conversion::{ConversionError, ConversionRequest, ConversionResult, RateProvider};
pub use currency::CurrencyCode;
pub use historical::{HistoricalRateQuery, HistoricalRateResolver, LookupError, TableSource};
