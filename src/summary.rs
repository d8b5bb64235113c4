//! Read-only aggregations over a loaded [`Dataset`]: per-column profiles,
//! the census headline figures, top-N rows and a Pearson correlation table.

use crate::data::{CellValue, ColumnType, Dataset};

pub const POPULATION_COLUMN: &str = "Population";
pub const LITERACY_COLUMN: &str = "Literacy_Rate";
pub const DISTRICT_COLUMN: &str = "District";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SummaryError {
    #[error("column '{name}' does not exist")]
    UnknownColumn { name: String },

    #[error("column '{name}' is not numeric")]
    NotNumeric { name: String },
}

// ---------------------------------------------------------------------------
// Column profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: ColumnType,
    pub non_null: usize,
    /// Only populated for numeric columns with at least one value.
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl ColumnProfile {
    fn compute(dataset: &Dataset, idx: usize) -> Self {
        let column = &dataset.columns[idx];
        let non_null = dataset.column_values(idx).filter(|v| !v.is_null()).count();

        let (mut min, mut max, mut mean) = (None, None, None);
        if column.dtype.is_numeric() {
            let values: Vec<f64> = numeric_values(dataset, idx).collect();
            if !values.is_empty() {
                min = values.iter().copied().reduce(f64::min);
                max = values.iter().copied().reduce(f64::max);
                mean = Some(values.iter().sum::<f64>() / values.len() as f64);
            }
        }

        ColumnProfile {
            name: column.name.clone(),
            dtype: column.dtype,
            non_null,
            min,
            max,
            mean,
        }
    }
}

// ---------------------------------------------------------------------------
// Census headline metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CensusMetrics {
    /// Sum of `Population`, if the column exists and is numeric.
    pub total_population: Option<i64>,
    /// Mean of `Literacy_Rate`, if the column exists and has values.
    pub mean_literacy_rate: Option<f64>,
    /// One district per row.
    pub districts: usize,
}

impl CensusMetrics {
    pub fn compute(dataset: &Dataset) -> Self {
        let total_population = numeric_index(dataset, POPULATION_COLUMN)
            .ok()
            .and_then(|idx| match dataset.columns[idx].dtype {
                // None on overflow rather than a wrapped or panicking sum.
                ColumnType::Integer => dataset
                    .column_values(idx)
                    .filter_map(|v| match v {
                        CellValue::Integer(i) => Some(*i),
                        _ => None,
                    })
                    .try_fold(0i64, i64::checked_add),
                _ => {
                    let total = numeric_values(dataset, idx).sum::<f64>().round();
                    (total.is_finite() && total.abs() < i64::MAX as f64).then_some(total as i64)
                }
            });

        let mean_literacy_rate = numeric_index(dataset, LITERACY_COLUMN).ok().and_then(|idx| {
            let values: Vec<f64> = numeric_values(dataset, idx).collect();
            (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
        });

        CensusMetrics {
            total_population,
            mean_literacy_rate,
            districts: dataset.len(),
        }
    }
}

/// Group digits in threes: `1210854977` → `1,210,854,977`.
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Top-N rows by a numeric column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TopEntry {
    /// `District` value, or `row N` when the dataset has no such column.
    pub label: String,
    pub value: f64,
}

/// The `n` rows with the largest value in `column`, largest first.
/// Rows without a value are skipped; ties keep source order.
pub fn top_n(dataset: &Dataset, column: &str, n: usize) -> Result<Vec<TopEntry>, SummaryError> {
    let idx = numeric_index(dataset, column)?;
    let label_idx = dataset.column_index(DISTRICT_COLUMN);

    let mut entries: Vec<TopEntry> = dataset
        .rows()
        .iter()
        .enumerate()
        .filter_map(|(row_no, row)| {
            let value = row[idx].as_f64().filter(|v| !v.is_nan())?;
            let label = match label_idx {
                Some(l) if !row[l].is_null() => row[l].to_string(),
                _ => format!("row {row_no}"),
            };
            Some(TopEntry { label, value })
        })
        .collect();

    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    entries.truncate(n);
    Ok(entries)
}

/// Numeric cells of a column, skipping nulls and NaN.
fn numeric_values(dataset: &Dataset, idx: usize) -> impl Iterator<Item = f64> + '_ {
    dataset
        .column_values(idx)
        .filter_map(CellValue::as_f64)
        .filter(|v| !v.is_nan())
}

fn numeric_index(dataset: &Dataset, column: &str) -> Result<usize, SummaryError> {
    let idx = dataset
        .column_index(column)
        .ok_or_else(|| SummaryError::UnknownColumn {
            name: column.to_string(),
        })?;
    if !dataset.columns[idx].dtype.is_numeric() {
        return Err(SummaryError::NotNumeric {
            name: column.to_string(),
        });
    }
    Ok(idx)
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Pearson correlation between every pair of numeric columns.
/// Undefined entries (constant column, fewer than two paired values) are NaN.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// `None` when the dataset has fewer than two numeric columns.
    pub fn compute(dataset: &Dataset) -> Option<Self> {
        let numeric: Vec<usize> = dataset
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.dtype.is_numeric())
            .map(|(i, _)| i)
            .collect();
        if numeric.len() < 2 {
            return None;
        }

        let series: Vec<Vec<Option<f64>>> = numeric
            .iter()
            .map(|&idx| dataset.column_values(idx).map(CellValue::as_f64).collect())
            .collect();

        let k = numeric.len();
        let mut values = vec![vec![f64::NAN; k]; k];
        for i in 0..k {
            for j in i..k {
                let mut r = pearson(&series[i], &series[j]);
                if i == j && r.is_finite() {
                    r = 1.0;
                }
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Some(CorrelationMatrix {
            columns: numeric
                .iter()
                .map(|&idx| dataset.columns[idx].name.clone())
                .collect(),
            values,
        })
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Column names shortened for the table header.
    pub fn short_labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| short_label(c)).collect()
    }
}

fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
}

/// Abbreviation used for the census columns in narrow table headers.
pub fn short_label(name: &str) -> &str {
    match name {
        "Population" => "Pop",
        "Male" => "M",
        "Female" => "F",
        "Sex_Ratio" => "SexRatio",
        "Literate" => "Lit",
        "Male_Literate" => "MLit",
        "Female_Literate" => "FLit",
        "Literacy_Rate" => "LitRate",
        "Female_Literacy_Rate" => "FLitRate",
        "SC_Proportion" => "SCProp",
        "ST_Proportion" => "STProp",
        "Total_Power_Parity" => "PowerParity",
        "Power_Parity_Above_Rs_545000" => "HighParity",
        "Housholds_with_Electric_Lighting" => "ElecLight",
        "Having_latrine_facility_within_the_premises_Total_Households" => "Latrine",
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Summary – everything the summary panel shows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Summary {
    pub profiles: Vec<ColumnProfile>,
    pub metrics: CensusMetrics,
    pub correlation: Option<CorrelationMatrix>,
}

impl Summary {
    pub fn compute(dataset: &Dataset) -> Self {
        let profiles = (0..dataset.column_count())
            .map(|idx| ColumnProfile::compute(dataset, idx))
            .collect();
        let correlation = CorrelationMatrix::compute(dataset);
        if correlation.is_none() {
            log::debug!("Not enough numerical columns for a correlation table");
        }
        Summary {
            profiles,
            metrics: CensusMetrics::compute(dataset),
            correlation,
        }
    }

    /// Names of the numeric columns, for the top-N selector.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> {
        self.profiles
            .iter()
            .filter(|p| p.dtype.is_numeric())
            .map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::data::loader::parse_reader;

    const CENSUS: &str = "\
State,District,Population,Literacy_Rate,Sex_Ratio
Goa,North Goa,818008,89.57,961
Goa,South Goa,640537,87.59,986
Sikkim,North District,43709,77.39,769
Sikkim,East District,283583,83.85,872
Kerala,Idukki,1108974,91.99,1006
";

    fn census() -> Dataset {
        parse_reader(CENSUS.as_bytes(), Path::new("india.csv")).unwrap()
    }

    #[test]
    fn census_metrics_sum_and_average() {
        let m = CensusMetrics::compute(&census());
        assert_eq!(m.total_population, Some(2_894_811));
        let mean = m.mean_literacy_rate.unwrap();
        assert!((mean - 86.078).abs() < 1e-9, "{mean}");
        assert_eq!(m.districts, 5);
        assert_eq!(format_thousands(m.total_population.unwrap()), "2,894,811");
    }

    #[test]
    fn metrics_without_census_columns() {
        let ds = parse_reader("A,B\nx,1\n".as_bytes(), Path::new("t.csv")).unwrap();
        let m = CensusMetrics::compute(&ds);
        assert_eq!(m.total_population, None);
        assert_eq!(m.mean_literacy_rate, None);
        assert_eq!(m.districts, 1);
    }

    #[test]
    fn population_overflow_yields_no_total() {
        let ds = parse_reader(
            "District,Population\nA,9000000000000000000\nB,9000000000000000000\n".as_bytes(),
            Path::new("t.csv"),
        )
        .unwrap();
        let m = CensusMetrics::compute(&ds);
        assert_eq!(m.total_population, None);
        assert_eq!(m.districts, 2);

        let summary = Summary::compute(&ds);
        assert_eq!(summary.profiles[1].max, Some(9e18));
    }

    #[test]
    fn nan_cells_are_skipped_in_aggregates() {
        let ds = parse_reader(
            "District,Population,Literacy_Rate\nA,10,nan\nB,nan,80.5\nC,5,NaN\n".as_bytes(),
            Path::new("t.csv"),
        )
        .unwrap();
        let m = CensusMetrics::compute(&ds);
        assert_eq!(m.total_population, Some(15));
        assert_eq!(m.mean_literacy_rate, Some(80.5));

        let lit = &Summary::compute(&ds).profiles[2];
        assert_eq!(lit.non_null, 1);
        assert_eq!((lit.min, lit.max, lit.mean), (Some(80.5), Some(80.5), Some(80.5)));
    }

    #[test]
    fn float_population_ignores_nan_values() {
        let ds = Dataset::new(
            vec![crate::data::Column {
                name: POPULATION_COLUMN.into(),
                dtype: ColumnType::Float,
            }],
            vec![vec![CellValue::Float(10.0)], vec![CellValue::Float(f64::NAN)]],
        )
        .unwrap();
        assert_eq!(CensusMetrics::compute(&ds).total_population, Some(10));
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(-1_210_854_977), "-1,210,854,977");
    }

    #[test]
    fn top_n_orders_descending() {
        let top = top_n(&census(), "Population", 3).unwrap();
        let labels: Vec<&str> = top.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["Idukki", "North Goa", "South Goa"]);
        assert_eq!(top[0].value, 1_108_974.0);
    }

    #[test]
    fn top_n_ties_keep_source_order_and_skip_nulls() {
        let ds = parse_reader("k,v\na,2\nb,\nc,5\nd,2\n".as_bytes(), Path::new("t.csv")).unwrap();
        let top = top_n(&ds, "v", 10).unwrap();
        let labels: Vec<&str> = top.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["row 2", "row 0", "row 3"]);
    }

    #[test]
    fn top_n_rejects_bad_columns() {
        let ds = census();
        assert_eq!(
            top_n(&ds, "Nope", 5),
            Err(SummaryError::UnknownColumn { name: "Nope".into() })
        );
        assert_eq!(
            top_n(&ds, "State", 5),
            Err(SummaryError::NotNumeric { name: "State".into() })
        );
    }

    #[test]
    fn correlation_of_linear_columns() {
        let ds = parse_reader(
            "a,b,c,k\n1,2,10,7\n2,4,8,7\n3,6,6,7\n4,8,4,7\n".as_bytes(),
            Path::new("t.csv"),
        )
        .unwrap();
        let corr = CorrelationMatrix::compute(&ds).unwrap();
        assert_eq!(corr.columns, ["a", "b", "c", "k"]);
        assert!((corr.get("a", "b").unwrap() - 1.0).abs() < 1e-12);
        assert!((corr.get("a", "c").unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(corr.get("a", "a"), Some(1.0));
        assert!(corr.get("a", "k").unwrap().is_nan());
        assert!(corr.get("k", "k").unwrap().is_nan());
    }

    #[test]
    fn correlation_needs_two_numeric_columns() {
        let ds = parse_reader("name,v\nx,1\ny,2\n".as_bytes(), Path::new("t.csv")).unwrap();
        assert!(CorrelationMatrix::compute(&ds).is_none());
    }

    #[test]
    fn correlation_labels_are_shortened() {
        let corr = CorrelationMatrix::compute(&census()).unwrap();
        assert_eq!(corr.short_labels(), ["Pop", "LitRate", "SexRatio"]);
    }

    #[test]
    fn profiles_cover_every_column() {
        let summary = Summary::compute(&census());
        assert_eq!(summary.profiles.len(), 5);

        let pop = &summary.profiles[2];
        assert_eq!(pop.dtype, ColumnType::Integer);
        assert_eq!(pop.non_null, 5);
        assert_eq!(pop.min, Some(43_709.0));
        assert_eq!(pop.max, Some(1_108_974.0));

        let state = &summary.profiles[0];
        assert_eq!(state.mean, None);
        assert_eq!(
            summary.numeric_columns().collect::<Vec<_>>(),
            ["Population", "Literacy_Rate", "Sex_Ratio"]
        );
    }
}
