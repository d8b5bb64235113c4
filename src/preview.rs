use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::data::{CellValue, Column, ColumnType, Dataset};

// ---------------------------------------------------------------------------
// Preview – header plus the first N rows
// ---------------------------------------------------------------------------

/// A read-only, truncated view of a dataset: the header and the first rows
/// in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<CellValue>>,
    /// Row count of the whole dataset, not just the preview.
    pub total_rows: usize,
}

impl Preview {
    /// Take the first `n` rows (or fewer, if the dataset is shorter).
    pub fn head(dataset: &Dataset, n: usize) -> Self {
        Self {
            columns: dataset.columns.clone(),
            rows: dataset.rows().iter().take(n).cloned().collect(),
            total_rows: dataset.len(),
        }
    }

    /// Every row of the dataset ("Show raw data").
    pub fn all(dataset: &Dataset) -> Self {
        Self::head(dataset, dataset.len())
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total_rows
    }

    /// Footer line, e.g. `10 of 640 rows`.
    pub fn caption(&self) -> String {
        format!("{} of {} rows", self.rows.len(), self.total_rows)
    }

    /// Convert the preview into a typed Arrow batch, one nullable array per column.
    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|c| Field::new(&c.name, arrow_type(c.dtype), true))
            .collect();

        let arrays: Vec<ArrayRef> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, col)| self.column_array(idx, col.dtype))
            .collect();

        RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
    }

    /// Plain-text table followed by the row-count caption.
    pub fn render_text(&self) -> Result<String, ArrowError> {
        let batch = self.to_record_batch()?;
        let table = pretty_format_batches(&[batch])?;
        Ok(format!("{table}\n{}", self.caption()))
    }

    fn column_array(&self, idx: usize, dtype: ColumnType) -> ArrayRef {
        let cells = self.rows.iter().map(|r| &r[idx]);
        match dtype {
            ColumnType::Integer => Arc::new(
                cells
                    .map(|c| match c {
                        CellValue::Integer(i) => Some(*i),
                        _ => None,
                    })
                    .collect::<Int64Array>(),
            ),
            ColumnType::Float => Arc::new(cells.map(CellValue::as_f64).collect::<Float64Array>()),
            ColumnType::String => Arc::new(
                cells
                    .map(|c| match c {
                        CellValue::Null => None,
                        other => Some(other.to_string()),
                    })
                    .collect::<StringArray>(),
            ),
        }
    }
}

fn arrow_type(dtype: ColumnType) -> DataType {
    match dtype {
        ColumnType::Integer => DataType::Int64,
        ColumnType::Float => DataType::Float64,
        ColumnType::String => DataType::Utf8,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use arrow::array::Array;

    use super::*;
    use crate::data::loader::{load_csv, parse_reader};

    fn twenty_rows() -> String {
        let mut text = String::from("A,B,C\n");
        for i in 0..20 {
            text.push_str(&format!("{i},name{i},{}.5\n", i * 10));
        }
        text
    }

    #[test]
    fn head_keeps_header_and_first_rows_in_order() {
        let ds = parse_reader(twenty_rows().as_bytes(), Path::new("t.csv")).unwrap();
        let preview = Preview::head(&ds, 10);

        assert_eq!(preview.headers().collect::<Vec<_>>(), ["A", "B", "C"]);
        assert_eq!(preview.rows.len(), 10);
        for (i, row) in preview.rows.iter().enumerate() {
            assert_eq!(row[0], CellValue::Integer(i as i64));
        }
        assert_eq!(preview.total_rows, 20);
        assert!(preview.is_truncated());
        assert_eq!(preview.caption(), "10 of 20 rows");
    }

    #[test]
    fn text_rendering_shows_only_previewed_rows() {
        let ds = parse_reader(twenty_rows().as_bytes(), Path::new("t.csv")).unwrap();
        let text = Preview::head(&ds, 5).render_text().unwrap();

        assert!(text.contains("| A "), "{text}");
        assert!(text.contains("name4"));
        assert!(!text.contains("name5"));
        assert!(text.ends_with("5 of 20 rows"));
    }

    #[test]
    fn header_only_dataset_renders_header_with_zero_rows() {
        let ds = parse_reader("A,B,C\n".as_bytes(), Path::new("t.csv")).unwrap();
        let preview = Preview::head(&ds, 10);
        assert!(preview.rows.is_empty());
        assert!(!preview.is_truncated());

        let text = preview.render_text().unwrap();
        assert!(text.contains("| A | B | C |"), "{text}");
        assert!(text.ends_with("0 of 0 rows"));
    }

    #[test]
    fn short_dataset_is_not_padded() {
        let ds = parse_reader("A\n1\n2\n".as_bytes(), Path::new("t.csv")).unwrap();
        let preview = Preview::head(&ds, 10);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(Preview::all(&ds), preview);
    }

    #[test]
    fn record_batch_uses_inferred_types() {
        let ds = parse_reader("n,x,s\n1,1.5,a\n,2,\n".as_bytes(), Path::new("t.csv")).unwrap();
        let batch = Preview::head(&ds, 10).to_record_batch().unwrap();
        let schema = batch.schema();
        assert_eq!(schema.field(0).data_type(), &DataType::Int64);
        assert_eq!(schema.field(1).data_type(), &DataType::Float64);
        assert_eq!(schema.field(2).data_type(), &DataType::Utf8);
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.column(0).null_count(), 1);
        assert_eq!(batch.column(2).null_count(), 1);
    }

    #[test]
    fn missing_cells_render_blank_in_text_and_cells() {
        let ds = parse_reader("n,s\n1,a\n,\n".as_bytes(), Path::new("t.csv")).unwrap();
        let preview = Preview::head(&ds, 10);
        let gui_cells: Vec<String> = preview.rows[1].iter().map(|c| c.to_string()).collect();
        assert_eq!(gui_cells, ["", ""]);

        let text = preview.render_text().unwrap();
        assert!(text.contains("|   |   |"), "{text}");
        assert!(!text.contains("null"));
    }

    #[test]
    fn loading_twice_gives_identical_output() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(twenty_rows().as_bytes()).unwrap();

        let first = Preview::head(&load_csv(file.path()).unwrap(), 10);
        let second = Preview::head(&load_csv(file.path()).unwrap(), 10);
        assert_eq!(first, second);
        assert_eq!(first.render_text().unwrap(), second.render_text().unwrap());
    }
}
