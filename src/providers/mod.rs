pub mod exchange_rate_api;
pub mod xlsx;

pub use exchange_rate_api::ExchangeRateApiProvider;
pub use xlsx::XlsxTableSource;
