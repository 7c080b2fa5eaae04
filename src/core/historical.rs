//! Historical daily rates read from a bundled spreadsheet

use chrono::DateTime;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Days between the spreadsheet epoch (1899-12-30) and 1970-01-01.
const UNIX_EPOCH_SERIAL: f64 = 25569.0;
const SECONDS_PER_DAY: f64 = 86400.0;
const DATE_FORMAT: &str = "%d.%m.%y";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Rate table not found: {0}")]
    ResourceMissing(PathBuf),
    #[error("Rate table could not be read: {0}")]
    CorruptResource(String),
    #[error("No rate found for {currency} on {date}")]
    NotFound { date: String, currency: String },
    #[error("Historical rates are not available for currency: {0}")]
    UnsupportedCurrency(String),
    #[error("Lookup task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

/// Sheets in workbook order; cell indices are absolute column positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateTable {
    pub sheets: Vec<Sheet>,
}

pub trait TableSource: Send + Sync {
    fn open_table(&self, path: &Path) -> Result<RateTable, LookupError>;
}

/// The currencies that have a column in the historical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoricalCurrency {
    Usd,
    Eur,
    Rub,
    Kzt,
    Cny,
}

impl HistoricalCurrency {
    pub fn column(&self) -> usize {
        match self {
            HistoricalCurrency::Usd => 1,
            HistoricalCurrency::Eur => 2,
            HistoricalCurrency::Rub => 3,
            HistoricalCurrency::Kzt => 4,
            HistoricalCurrency::Cny => 5,
        }
    }
}

impl FromStr for HistoricalCurrency {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(HistoricalCurrency::Usd),
            "EUR" => Ok(HistoricalCurrency::Eur),
            "RUB" => Ok(HistoricalCurrency::Rub),
            "KZT" => Ok(HistoricalCurrency::Kzt),
            "CNY" => Ok(HistoricalCurrency::Cny),
            _ => Err(LookupError::UnsupportedCurrency(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalRateQuery {
    pub year: String,
    pub date: String,
    pub currency: String,
}

/// Formats a spreadsheet serial date as `dd.mm.yy` in UTC.
pub fn serial_to_date_string(serial: f64) -> Option<String> {
    if !serial.is_finite() {
        return None;
    }
    let seconds = ((serial - UNIX_EPOCH_SERIAL) * SECONDS_PER_DAY).round();
    if seconds.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(seconds as i64, 0).map(|dt| dt.format(DATE_FORMAT).to_string())
}

fn cell_as_serial(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(text) => text.trim().parse().ok(),
        Cell::Empty => None,
    }
}

fn cell_as_rate(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Number(n) => Decimal::try_from(*n).ok(),
        Cell::Text(text) => {
            let normalized: String = text
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| if c == ',' { '.' } else { c })
                .collect();
            Decimal::from_str(&normalized).ok()
        }
        Cell::Empty => None,
    }
}

/// First rate in `table` whose row date formats exactly to `date`.
pub fn find_rate(table: &RateTable, date: &str, currency: HistoricalCurrency) -> Option<Decimal> {
    let column = currency.column();
    for sheet in &table.sheets {
        debug!(sheet = %sheet.name, rows = sheet.rows.len(), "Scanning sheet");
        for (index, row) in sheet.rows.iter().enumerate() {
            let row_date = row
                .first()
                .and_then(cell_as_serial)
                .and_then(serial_to_date_string);
            if row_date.as_deref() != Some(date) {
                continue;
            }
            match row.get(column).and_then(cell_as_rate) {
                Some(rate) => return Some(rate),
                None => warn!(
                    sheet = %sheet.name,
                    row = index,
                    ?currency,
                    "Row matches date but has no usable rate"
                ),
            }
        }
    }
    None
}

pub struct HistoricalRateResolver {
    source: Arc<dyn TableSource>,
    path: PathBuf,
}

impl HistoricalRateResolver {
    pub fn new(source: Arc<dyn TableSource>, path: impl Into<PathBuf>) -> Self {
        HistoricalRateResolver {
            source,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up the rate of `currency` on `date` (`dd.mm.yy`).
    ///
    /// The table is re-read on every call. `year` does not restrict which
    /// sheets are scanned; the date already carries the year.
    #[instrument(name = "HistoricalLookup", skip(self), fields(path = %self.path.display()))]
    pub fn lookup(&self, year: &str, date: &str, currency: &str) -> Result<Decimal, LookupError> {
        let historical_currency: HistoricalCurrency = currency.parse()?;
        let table = self.source.open_table(&self.path)?;
        let date = date.trim();
        find_rate(&table, date, historical_currency).ok_or_else(|| LookupError::NotFound {
            date: date.to_string(),
            currency: currency.trim().to_ascii_uppercase(),
        })
    }

    pub fn lookup_query(&self, query: &HistoricalRateQuery) -> Result<Decimal, LookupError> {
        self.lookup(&query.year, &query.date, &query.currency)
    }

    /// Runs [`lookup_query`](Self::lookup_query) on the blocking thread pool.
    pub async fn lookup_async(
        self: Arc<Self>,
        query: HistoricalRateQuery,
    ) -> Result<Decimal, LookupError> {
        tokio::task::spawn_blocking(move || self.lookup_query(&query))
            .await
            .map_err(|e| LookupError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // 2017-02-11
    const FEB_11_2017: f64 = 42777.0;
    // 2017-02-01
    const FEB_01_2017: f64 = 42767.0;

    struct MemoryTableSource {
        tables: HashMap<PathBuf, Result<RateTable, LookupError>>,
        opens: AtomicUsize,
    }

    impl MemoryTableSource {
        fn with_table(path: &str, table: RateTable) -> Self {
            let mut tables = HashMap::new();
            tables.insert(PathBuf::from(path), Ok(table));
            Self {
                tables,
                opens: AtomicUsize::new(0),
            }
        }
    }

    impl TableSource for MemoryTableSource {
        fn open_table(&self, path: &Path) -> Result<RateTable, LookupError> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            self.tables
                .get(path)
                .cloned()
                .unwrap_or_else(|| Err(LookupError::ResourceMissing(path.to_path_buf())))
        }
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn rate_row(serial: f64, values: [&str; 5]) -> Vec<Cell> {
        let mut row = vec![Cell::Number(serial)];
        row.extend(values.iter().map(|v| text(v)));
        row
    }

    fn fixture() -> RateTable {
        RateTable {
            sheets: vec![
                Sheet {
                    name: "2016".to_string(),
                    rows: vec![
                        vec![text("Date"), text("USD"), text("EUR")],
                        rate_row(42400.0, ["3,10", "3,40", "0,05", "0,01", "0,48"]),
                    ],
                },
                Sheet {
                    name: "2017".to_string(),
                    rows: vec![
                        vec![text("Date"), text("USD"), text("EUR")],
                        rate_row(FEB_01_2017, ["3,70", "4,00", "0,06", "0,011", "0,54"]),
                        rate_row(FEB_11_2017, ["3,75", "4,01", "0,0625", "0,0115", "0,55"]),
                    ],
                },
            ],
        }
    }

    fn resolver(table: RateTable) -> (HistoricalRateResolver, Arc<MemoryTableSource>) {
        let source = Arc::new(MemoryTableSource::with_table("rates.xlsx", table));
        let resolver = HistoricalRateResolver::new(source.clone(), "rates.xlsx");
        (resolver, source)
    }

    #[test]
    fn test_serial_to_date_string() {
        assert_eq!(serial_to_date_string(FEB_11_2017).as_deref(), Some("11.02.17"));
        assert_eq!(serial_to_date_string(25569.0).as_deref(), Some("01.01.70"));
        assert_eq!(serial_to_date_string(42777.75).as_deref(), Some("11.02.17"));
        assert_eq!(serial_to_date_string(f64::NAN), None);
    }

    #[test]
    fn test_lookup_normalizes_decimal_comma() {
        let (resolver, _) = resolver(fixture());
        let rate = resolver.lookup("2017", "11.02.17", "USD").unwrap();
        assert_eq!(rate, dec!(3.75));
    }

    #[test]
    fn test_lookup_uses_currency_column() {
        let (resolver, _) = resolver(fixture());
        assert_eq!(resolver.lookup("2017", "11.02.17", "EUR").unwrap(), dec!(4.01));
        assert_eq!(resolver.lookup("2017", "11.02.17", "RUB").unwrap(), dec!(0.0625));
        assert_eq!(resolver.lookup("2017", "11.02.17", "KZT").unwrap(), dec!(0.0115));
        assert_eq!(resolver.lookup("2017", "11.02.17", "cny").unwrap(), dec!(0.55));
    }

    #[test]
    fn test_lookup_does_not_match_substrings() {
        let (resolver, _) = resolver(fixture());
        // "1.02.17" is contained in "11.02.17" but is not the same date
        let err = resolver.lookup("2017", "1.02.17", "USD").unwrap_err();
        assert_eq!(
            err,
            LookupError::NotFound {
                date: "1.02.17".to_string(),
                currency: "USD".to_string()
            }
        );
        assert_eq!(resolver.lookup("2017", "01.02.17", "USD").unwrap(), dec!(3.70));
    }

    #[test]
    fn test_lookup_scans_all_sheets_regardless_of_year() {
        let (resolver, _) = resolver(fixture());
        // 42400 is 2016-01-31, stored on the "2016" sheet
        let rate = resolver.lookup("2017", "31.01.16", "USD").unwrap();
        assert_eq!(rate, dec!(3.10));
    }

    #[test]
    fn test_unsupported_currency_checked_before_opening_table() {
        let (resolver, source) = resolver(fixture());
        let err = resolver.lookup("2017", "11.02.17", "GBP").unwrap_err();
        assert_eq!(err, LookupError::UnsupportedCurrency("GBP".to_string()));
        let err = resolver.lookup("2017", "31.12.99", "JPY").unwrap_err();
        assert!(matches!(err, LookupError::UnsupportedCurrency(_)));
        assert_eq!(source.opens.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_date_is_not_found() {
        let (resolver, _) = resolver(fixture());
        let err = resolver.lookup("2018", "05.05.18", "USD").unwrap_err();
        assert!(matches!(err, LookupError::NotFound { .. }));
    }

    #[test]
    fn test_missing_resource() {
        let source = Arc::new(MemoryTableSource::with_table("rates.xlsx", fixture()));
        let resolver = HistoricalRateResolver::new(source, "other.xlsx");
        let err = resolver.lookup("2017", "11.02.17", "USD").unwrap_err();
        assert_eq!(err, LookupError::ResourceMissing(PathBuf::from("other.xlsx")));
    }

    #[test]
    fn test_corrupt_resource_is_surfaced() {
        let mut tables = HashMap::new();
        tables.insert(
            PathBuf::from("rates.xlsx"),
            Err(LookupError::CorruptResource("not a zip archive".to_string())),
        );
        let source = Arc::new(MemoryTableSource {
            tables,
            opens: AtomicUsize::new(0),
        });
        let resolver = HistoricalRateResolver::new(source, "rates.xlsx");
        let err = resolver.lookup("2017", "11.02.17", "USD").unwrap_err();
        assert!(matches!(err, LookupError::CorruptResource(_)));
    }

    #[test]
    fn test_lookup_is_idempotent_and_rereads_table() {
        let (resolver, source) = resolver(fixture());
        let first = resolver.lookup("2017", "11.02.17", "USD");
        let second = resolver.lookup("2017", "11.02.17", "USD");
        assert_eq!(first, second);
        assert_eq!(source.opens.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_first_match_wins_and_unusable_rows_are_skipped() {
        let table = RateTable {
            sheets: vec![
                Sheet {
                    name: "a".to_string(),
                    rows: vec![
                        vec![Cell::Number(FEB_11_2017), Cell::Empty],
                        vec![Cell::Number(FEB_11_2017), text("n/a")],
                    ],
                },
                Sheet {
                    name: "b".to_string(),
                    rows: vec![
                        vec![text("42777"), Cell::Number(3.8)],
                        vec![Cell::Number(FEB_11_2017), text("9,99")],
                    ],
                },
            ],
        };
        let (resolver, _) = resolver(table);
        assert_eq!(resolver.lookup("2017", "11.02.17", "USD").unwrap(), dec!(3.8));
    }

    #[test]
    fn test_text_rate_with_spaces() {
        let table = RateTable {
            sheets: vec![Sheet {
                name: "2017".to_string(),
                rows: vec![vec![
                    Cell::Number(FEB_11_2017),
                    text("1"),
                    text("2"),
                    text(" 1 234,5 "),
                ]],
            }],
        };
        let (resolver, _) = resolver(table);
        assert_eq!(resolver.lookup("2017", " 11.02.17 ", "RUB").unwrap(), dec!(1234.5));
    }

    #[tokio::test]
    async fn test_lookup_async_runs_on_blocking_pool() {
        let (resolver, _) = resolver(fixture());
        let query = HistoricalRateQuery {
            year: "2017".to_string(),
            date: "11.02.17".to_string(),
            currency: "USD".to_string(),
        };
        let rate = Arc::new(resolver).lookup_async(query).await.unwrap();
        assert_eq!(rate, dec!(3.75));
    }
}
