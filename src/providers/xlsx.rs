use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::Path;
use tracing::debug;

use crate::core::historical::{Cell, LookupError, RateTable, Sheet, TableSource};

/// Reads rate tables from spreadsheet files (xlsx, xls, xlsb, ods).
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxTableSource;

impl XlsxTableSource {
    pub fn new() -> Self {
        XlsxTableSource
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

// calamine ranges start at the first used cell; pad so that index 0 is column A.
fn to_rows(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let first_column = range.start().map_or(0, |(_, column)| column as usize);
    range
        .rows()
        .map(|row| {
            std::iter::repeat_n(Cell::Empty, first_column)
                .chain(row.iter().map(to_cell))
                .collect()
        })
        .collect()
}

impl TableSource for XlsxTableSource {
    fn open_table(&self, path: &Path) -> Result<RateTable, LookupError> {
        if !path.is_file() {
            return Err(LookupError::ResourceMissing(path.to_path_buf()));
        }

        let mut workbook = open_workbook_auto(path)
            .map_err(|e| LookupError::CorruptResource(format!("{}: {e}", path.display())))?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name).map_err(|e| {
                LookupError::CorruptResource(format!("{}: sheet '{name}': {e}", path.display()))
            })?;
            let rows = to_rows(&range);
            debug!(sheet = %name, rows = rows.len(), "Loaded sheet");
            sheets.push(Sheet { name, rows });
        }

        if sheets.is_empty() {
            return Err(LookupError::CorruptResource(format!(
                "{}: workbook has no sheets",
                path.display()
            )));
        }

        Ok(RateTable { sheets })
    }
}
