use super::ui;
use crate::core::currency::{self, CurrencyCode};
use anyhow::Result;
use comfy_table::Cell;

pub fn run(code: Option<&str>) -> Result<()> {
    match code {
        Some(code) => println!("{}", render_single(code)),
        None => {
            println!(
                "\n{}",
                ui::style_text("Supported currencies", ui::StyleType::Title)
            );
            println!("{}", render_table());
        }
    }
    Ok(())
}

// Unknown or malformed codes degrade to "Unknown" rather than failing.
fn render_single(code: &str) -> String {
    let description = match code.parse::<CurrencyCode>() {
        Ok(parsed) => ui::currency_description(&parsed),
        Err(_) => "Unknown".to_string(),
    };
    format!(
        "{} {}",
        ui::style_text(&code.trim().to_ascii_uppercase(), ui::StyleType::Label),
        description
    )
}

fn render_table() -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell("Country"),
    ]);
    for info in currency::all() {
        table.add_row(vec![
            Cell::new(info.code),
            Cell::new(info.name),
            Cell::new(info.country),
        ]);
    }
    table.to_string()
}
