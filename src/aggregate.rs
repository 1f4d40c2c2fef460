use crate::dataset::{Cell, Dataset};
use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Separator for composite category keys.
pub const KEY_SEPARATOR: &str = " - ";

/// One group: display key plus one sum per value column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub key: String,
    pub values: Vec<f64>,
}

/// Grouped sums, one row per distinct category tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSeries {
    pub category_columns: Vec<String>,
    pub value_columns: Vec<String>,
    pub rows: Vec<AggregatedRow>,
}

impl AggregatedSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Category keys in group order.
    pub fn categories(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.key.clone()).collect()
    }

    /// Sums for one value column, in group order.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.value_columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r.values[idx]).collect())
    }

    /// `(key, value)` pairs for the first value column.
    pub fn pairs(&self) -> Vec<(String, f64)> {
        self.rows
            .iter()
            .map(|r| (r.key.clone(), r.values.first().copied().unwrap_or(0.0)))
            .collect()
    }
}

/// Borrowed group-key component ordered by `Cell::total_cmp`.
struct KeyPart<'a>(&'a Cell);

impl PartialEq for KeyPart<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for KeyPart<'_> {}
impl PartialOrd for KeyPart<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for KeyPart<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(other.0)
    }
}

/// Display key for a group: the single value's string form, or all values
/// joined with `" - "` in column order.
pub fn category_key(parts: &[&Cell]) -> String {
    parts
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

/// Group `data` by the `x_axis` columns and sum each `y_axis` column per group.
///
/// Rows with a null in any category column are dropped. Nulls in value
/// columns add nothing. Groups come out ordered by their typed key tuple.
pub fn aggregate(
    data: &Dataset,
    x_axis: &[String],
    y_axis: &[String],
) -> Result<AggregatedSeries, ChartError> {
    if x_axis.is_empty() || y_axis.is_empty() {
        return Err(ChartError::config("aggregation needs at least one category and one value column"));
    }
    let key_idx = x_axis
        .iter()
        .map(|c| data.require_column(c))
        .collect::<Result<Vec<_>, _>>()?;
    let val_idx = y_axis
        .iter()
        .map(|c| data.require_column(c))
        .collect::<Result<Vec<_>, _>>()?;

    let mut groups: BTreeMap<Vec<KeyPart<'_>>, Vec<f64>> = BTreeMap::new();
    for (row_no, row) in data.rows().iter().enumerate() {
        if key_idx.iter().any(|&i| row[i].is_null()) {
            continue;
        }
        let key: Vec<KeyPart<'_>> = key_idx.iter().map(|&i| KeyPart(&row[i])).collect();
        let sums = groups.entry(key).or_insert_with(|| vec![0.0; val_idx.len()]);
        for (slot, (&i, col)) in val_idx.iter().zip(y_axis).enumerate() {
            match &row[i] {
                c if c.is_null() => {}
                Cell::Number(n) => sums[slot] += n,
                other => {
                    return Err(ChartError::Aggregation(format!(
                        "column '{col}' row {row_no}: cannot sum non-numeric value '{other}'"
                    )));
                }
            }
        }
    }

    let rows: Vec<AggregatedRow> = groups
        .into_iter()
        .map(|(key, values)| {
            let parts: Vec<&Cell> = key.iter().map(|k| k.0).collect();
            AggregatedRow {
                key: category_key(&parts),
                values,
            }
        })
        .collect();

    log::debug!(
        "aggregated {} rows by {:?} into {} groups",
        data.len(),
        x_axis,
        rows.len()
    );

    Ok(AggregatedSeries {
        category_columns: x_axis.to_vec(),
        value_columns: y_axis.to_vec(),
        rows,
    })
}
