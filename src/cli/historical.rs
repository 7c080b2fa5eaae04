use super::ui;
use crate::core::historical::{HistoricalRateQuery, HistoricalRateResolver};
use anyhow::Result;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

pub async fn run(resolver: Arc<HistoricalRateResolver>, query: HistoricalRateQuery) -> Result<()> {
    debug!(path = %resolver.path().display(), ?query, "Looking up historical rate");
    let spinner = ui::new_spinner("Searching historical rates...");
    let result = resolver.lookup_async(query.clone()).await;
    spinner.finish_and_clear();

    let rate = result?;
    println!("{}", render(&query, rate));
    Ok(())
}

fn render(query: &HistoricalRateQuery, rate: Decimal) -> String {
    format!(
        "{} {}",
        ui::style_text(
            &format!(
                "{} rate on {}:",
                query.currency.trim().to_ascii_uppercase(),
                query.date.trim()
            ),
            ui::StyleType::Label
        ),
        ui::style_text(&rate.normalize().to_string(), ui::StyleType::Value)
    )
}
