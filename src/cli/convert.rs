use super::ui;
use crate::core::conversion::{self, ConversionRequest, ConversionResult, RateProvider};
use anyhow::Result;

pub async fn run(
    provider: &(dyn RateProvider + Send + Sync),
    base: &str,
    target: &str,
    amount: &str,
) -> Result<()> {
    let request = ConversionRequest::parse(base, target, amount)?;
    let spinner = ui::new_spinner(&format!(
        "Converting {} {} to {}...",
        request.amount, request.base, request.target
    ));
    let result = conversion::convert_request(provider, &request).await;
    spinner.finish_and_clear();

    let result = result?;
    println!("{}", render(&request, &result));
    Ok(())
}

fn render(request: &ConversionRequest, result: &ConversionResult) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {} = {}",
        request.amount,
        request.base,
        ui::style_text(
            &format!("{} {}", result.display_amount(), request.target),
            ui::StyleType::Value
        )
    ));
    lines.push(format!(
        "{} 1 {} = {} {}",
        ui::style_text("Rate:", ui::StyleType::Label),
        request.base,
        result.rate,
        request.target
    ));
    lines.push(format!(
        "{} {}",
        ui::style_text("Base currency:", ui::StyleType::Label),
        ui::style_text(
            &ui::currency_description(&request.base),
            ui::StyleType::Subtle
        )
    ));
    lines.push(format!(
        "{} {}",
        ui::style_text("Target currency:", ui::StyleType::Label),
        ui::style_text(
            &ui::currency_description(&request.target),
            ui::StyleType::Subtle
        )
    ));
    lines.join("\n")
}
