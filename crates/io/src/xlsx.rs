// Excel roster import (xlsx, xls, xlsb, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::IoError;
use crate::table::Table;

/// Import the first worksheet as text. The first row of the used range is the
/// header row; fully blank data rows are dropped.
pub fn import(path: &Path) -> Result<Table, IoError> {
    let display = path.display().to_string();

    let mut workbook = open_workbook_auto(path).map_err(|e| IoError::Workbook {
        path: display.clone(),
        message: e.to_string(),
    })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let first_sheet = sheet_names
        .first()
        .ok_or_else(|| IoError::NoWorksheet {
            path: display.clone(),
        })?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|e| IoError::Workbook {
            path: display,
            message: format!("failed to read sheet '{first_sheet}': {e}"),
        })?;

    let mut headers = Vec::new();
    let mut rows = Vec::new();

    for (row_idx, row) in range.rows().enumerate() {
        let values: Vec<String> = row.iter().map(cell_text).collect();
        if row_idx == 0 {
            headers = values;
        } else if values.iter().any(|v| !v.is_empty()) {
            rows.push(values);
        }
    }

    Ok(Table { headers, rows })
}

/// Render a cell the way the export tools write it: integer-valued floats
/// without decimals, TRUE/FALSE booleans, Excel error codes as text, dates as
/// their serial value.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Int(n) => format!("{n}"),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}
