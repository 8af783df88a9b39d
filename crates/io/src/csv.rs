// Delimited-text import/export

use std::io::Read;
use std::path::Path;

use crate::error::IoError;
use crate::table::Table;

/// Import a delimited-text roster. The delimiter is sniffed from the first
/// few lines; the first record is the header row; fully blank data rows are
/// dropped.
pub fn import(path: &Path) -> Result<Table, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(path, &content, delimiter)
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, the usual
/// encoding of Excel-exported CSVs).
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let open_err = |e: std::io::Error| IoError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut file = std::fs::File::open(path).map_err(open_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(open_err)?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Detect the most likely field delimiter by checking field-count consistency
/// across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), parse the sample and
/// score lines agreeing with the first line's field count, weighted by that
/// count. A candidate must produce more than one field to be viable; comma is
/// the fallback.
fn sniff_delimiter(content: &str) -> u8 {
    let sample: String = content.lines().take(10).collect::<Vec<_>>().join("\n");

    let mut best = b',';
    let mut best_score = 0u64;

    for &candidate in &[b'\t', b';', b',', b'|'] {
        let counts: Vec<usize> = csv::ReaderBuilder::new()
            .delimiter(candidate)
            .has_headers(false)
            .flexible(true)
            .from_reader(sample.as_bytes())
            .records()
            .filter_map(|r| r.ok())
            .map(|r| r.len())
            .collect();

        let Some(&first) = counts.first() else {
            continue;
        };
        if first <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&c| c == first).count() as u64;
        let score = consistent * first as u64;
        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }

    best
}

fn import_from_string(path: &Path, content: &str, delimiter: u8) -> Result<Table, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut headers = Vec::new();
    let mut rows = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| IoError::Csv {
            path: path.display().to_string(),
            message: format!("line {}: {}", row_idx + 1, e),
        })?;
        let values: Vec<String> = record.iter().map(str::to_string).collect();
        if row_idx == 0 {
            headers = values;
        } else if values.iter().any(|v| !v.is_empty()) {
            rows.push(values);
        }
    }

    Ok(Table { headers, rows })
}

/// Write a result table as comma-delimited CSV: one header record, one record
/// per row.
pub fn export(path: &Path, headers: &[&str], rows: &[Vec<String>]) -> Result<(), IoError> {
    let write_err = |message: String| IoError::Write {
        path: path.display().to_string(),
        message,
    };

    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(|e| write_err(e.to_string()))?;

    writer
        .write_record(headers)
        .map_err(|e| write_err(e.to_string()))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| write_err(e.to_string()))?;
    }

    writer.flush().map_err(|e| write_err(e.to_string()))?;
    Ok(())
}
