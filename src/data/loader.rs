use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeListArray, ListArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::Catalog;
use super::normalize::{normalize_rows, Column, RawRow};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – `Name,Score,Genres,Synopsis,Episodes,Aired,Status`, with or
///   without a header row
/// * `.json`    – `[{ "Name": ..., "Score": ..., ... }, ...]`
/// * `.parquet` – one column per field, string or numeric
///
/// Only transport problems are errors; bad rows are dropped or defaulted by
/// the normalizer and show up in the load report.
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            read_json(&text)?
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)?
        }
        other => bail!("Unsupported file extension: .{other}"),
    };

    Ok(normalize_rows(rows))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read CSV rows. The first line is treated as a header when it names the
/// `Name` column; otherwise every line is data in fixed column order.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut lines = reader.records();
    let Some(first) = lines.next() else {
        return Ok(Vec::new());
    };
    let first = first.context("CSV row 0")?;

    let header: Vec<Option<Column>> = first.iter().map(Column::from_header).collect();
    let has_header = header.contains(&Some(Column::Name));

    // Without a header, cells are taken in the default column order.
    let to_row = |record: &csv::StringRecord| {
        if !has_header {
            return RawRow::from_cells(record.iter());
        }
        let mut row = RawRow::default();
        for (cell, column) in record.iter().zip(&header) {
            if let Some(column) = column {
                row.set(*column, cell.to_string());
            }
        }
        row
    };

    let mut rows = Vec::new();
    if !has_header {
        rows.push(to_row(&first));
    }
    for (row_no, result) in lines.enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        rows.push(to_row(&record));
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "Name": "Cowboy Bebop",
///     "Score": 8.75,
///     "Genres": "Action, Sci-Fi",
///     "Episodes": 26,
///     "Aired": "Apr 3, 1998 to Apr 24, 1999",
///     "Status": "Finished Airing"
///   },
///   ...
/// ]
/// ```
///
/// `Genres` may also be an array of strings.
pub fn read_json(text: &str) -> Result<Vec<RawRow>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let rows = records
        .iter()
        .map(|rec| {
            let mut row = RawRow::default();
            // Non-object entries become empty rows and are rejected downstream.
            if let Some(obj) = rec.as_object() {
                for (key, val) in obj {
                    if let (Some(column), Some(cell)) = (Column::from_header(key), json_to_cell(val)) {
                        row.set(column, cell);
                    }
                }
            }
            row
        })
        .collect();
    Ok(rows)
}

fn json_to_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(items) => Some(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string).or_else(|| json_to_cell(v)))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per catalog field.
///
/// Columns are matched by name like CSV headers; unknown columns are ignored.
/// `Genres` may be a string column or a list of strings.
fn load_parquet(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let columns: Vec<(usize, Column)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter_map(|(i, f)| Column::from_header(f.name()).map(|c| (i, c)))
            .collect();

        if !columns.iter().any(|(_, c)| *c == Column::Name) {
            bail!("Parquet file missing 'Name' column");
        }

        for row_idx in 0..batch.num_rows() {
            let mut row = RawRow::default();
            for (col_idx, column) in &columns {
                if let Some(cell) = extract_cell(batch.column(*col_idx), row_idx) {
                    row.set(*column, cell);
                }
            }
            rows.push(row);
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Render one Arrow cell as the text the normalizer expects.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row).to_string()),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row).to_string()),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row).to_string()),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row).to_string()),
        DataType::Boolean => any.downcast_ref::<BooleanArray>().map(|a| a.value(row).to_string()),
        DataType::List(_) => {
            let values = any.downcast_ref::<ListArray>()?.value(row);
            Some(join_strings(&values))
        }
        DataType::LargeList(_) => {
            let values = any.downcast_ref::<LargeListArray>()?.value(row);
            Some(join_strings(&values))
        }
        other => {
            log::debug!("Ignoring parquet cell of type {other:?}");
            None
        }
    }
}

fn join_strings(values: &Arc<dyn Array>) -> String {
    match values.as_any().downcast_ref::<StringArray>() {
        Some(s) => s.iter().flatten().collect::<Vec<_>>().join(", "),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_with_header_in_any_order() {
        let text = "\
Status,Name,Score,Genres,Aired,Episodes
Finished Airing,Cowboy Bebop,8.75,\"Action, Sci-Fi\",\"Apr 3, 1998 to Apr 24, 1999\",26
";
        let rows = read_csv(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.name.as_deref(), Some("Cowboy Bebop"));
        assert_eq!(r.rating.as_deref(), Some("8.75"));
        assert_eq!(r.genres.as_deref(), Some("Action, Sci-Fi"));
        assert_eq!(r.status.as_deref(), Some("Finished Airing"));
        assert_eq!(r.synopsis, None);
    }

    #[test]
    fn test_csv_without_header_is_positional() {
        let text = "Trigun,8.2,\"Action, Adventure\",A gunman.,26,Apr 1998 to Sep 1998,Finished Airing\n";
        let rows = read_csv(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("Trigun"));
        assert_eq!(rows[0].synopsis.as_deref(), Some("A gunman."));
        assert_eq!(rows[0].status.as_deref(), Some("Finished Airing"));
    }

    #[test]
    fn test_csv_short_rows_and_empty_input() {
        let rows = read_csv("Name,Score\nA\n".as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rating, None);
        assert!(read_csv("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_csv_stray_header_row_reaches_normalizer() {
        let text = "Name,Score,Genres,Synopsis,Episodes,Aired,Status\n\
                    Name,Score,Genres,Synopsis,Episodes,Aired,Status\n\
                    Monster,8.9,Drama,,74,2004 to 2005,Finished Airing\n";
        let catalog = normalize_rows(read_csv(text.as_bytes()).unwrap());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records[0].genres, vec!["Genres"]);
        assert_eq!(catalog.records[0].aired, None);
    }

    #[test]
    fn test_json_rows() {
        let text = r#"[
            {"Name": "Monster", "Score": 8.88, "Genres": ["Drama", "Mystery"], "Episodes": 74,
             "Aired": "Apr 7, 2004 to Sep 28, 2005", "Status": "Finished Airing", "MAL_ID": 19},
            {"Score": "7.1"},
            42
        ]"#;
        let rows = read_json(text).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].rating.as_deref(), Some("8.88"));
        assert_eq!(rows[0].genres.as_deref(), Some("Drama, Mystery"));
        assert_eq!(rows[0].episodes.as_deref(), Some("74"));

        let catalog = normalize_rows(rows);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.report.rows_rejected, 2);
    }

    #[test]
    fn test_json_must_be_array() {
        assert!(read_json(r#"{"Name": "x"}"#).is_err());
        assert!(read_json("not json").is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_file(Path::new("catalog.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
