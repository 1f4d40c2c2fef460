//! In-memory tabular dataset: named columns over rows of typed cells.

use crate::error::ChartError;
use ahash::AHashMap;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Accepted datetime layouts, tried in order.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One dataset cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Number(f64),
    DateTime(NaiveDateTime),
    Text(String),
}

impl Cell {
    /// Interpret raw text the way the CSV loader does: empty → null, then
    /// finite number, then datetime/date, else text.
    ///
    /// Spellings such as `NaN` or `inf` stay text.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Cell::Null;
        }
        if let Some(n) = s.parse::<f64>().ok().filter(|n| n.is_finite()) {
            return Cell::Number(n);
        }
        if let Some(dt) = parse_datetime(s) {
            return Cell::DateTime(dt);
        }
        Cell::Text(raw.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Cell::Null => 0,
            Cell::Number(_) => 1,
            Cell::DateTime(_) => 2,
            Cell::Text(_) => 3,
        }
    }

    /// Total order used for grouping: nulls, then numbers, datetimes, text.
    pub fn total_cmp(&self, other: &Cell) -> Ordering {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a.total_cmp(b),
            (Cell::DateTime(a), Cell::DateTime(b)) => a.cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// String cast used for category keys.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("nan"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::DateTime(dt) if dt.time() == NaiveTime::MIN => {
                write!(f, "{}", dt.format(DATE_FORMAT))
            }
            Cell::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMATS[0])),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Number(v as f64)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(v: NaiveDateTime) -> Self {
        Cell::DateTime(v)
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Column type as seen from its non-null cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Temporal,
    Text,
    /// Only nulls, or mixed types.
    Other,
}

/// Rows of named columns. Row width always equals the column count.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
    index: AHashMap<String, usize>,
}

impl Dataset {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Result<Self, ChartError> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut index = AHashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ChartError::config(format!("duplicate column '{name}'")));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
            index,
        })
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), ChartError> {
        if row.len() != self.columns.len() {
            return Err(ChartError::config(format!(
                "row {} has {} cells, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Build from a JSON array of flat objects. Columns appear in first-seen
    /// order; keys missing from a record become nulls.
    pub fn from_json(value: &Value) -> Result<Self, ChartError> {
        let records = value
            .as_array()
            .ok_or_else(|| ChartError::config("dataset JSON must be an array of records"))?;

        let mut columns: Vec<String> = Vec::new();
        for (i, rec) in records.iter().enumerate() {
            let obj = rec
                .as_object()
                .ok_or_else(|| ChartError::config(format!("record {i} is not an object")))?;
            for key in obj.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let mut ds = Dataset::new(columns.clone())?;
        for obj in records.iter().filter_map(Value::as_object) {
            let row = columns
                .iter()
                .map(|c| obj.get(c).map(json_cell).unwrap_or(Cell::Null))
                .collect();
            ds.push_row(row)?;
        }
        Ok(ds)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Index of `name`, or a ConfigurationError naming the missing column.
    pub fn require_column(&self, name: &str) -> Result<usize, ChartError> {
        self.column_index(name)
            .ok_or_else(|| ChartError::config(format!("column '{name}' not found in dataset")))
    }

    pub fn column_kind(&self, idx: usize) -> ColumnKind {
        let mut kind: Option<ColumnKind> = None;
        for row in &self.rows {
            let cell_kind = match &row[idx] {
                c if c.is_null() => continue,
                Cell::Number(_) => ColumnKind::Numeric,
                Cell::DateTime(_) => ColumnKind::Temporal,
                Cell::Text(_) => ColumnKind::Text,
                Cell::Null => continue,
            };
            match kind {
                None => kind = Some(cell_kind),
                Some(k) if k != cell_kind => return ColumnKind::Other,
                _ => {}
            }
        }
        kind.unwrap_or(ColumnKind::Other)
    }

    /// Names of the columns whose kind satisfies `pred`, in column order.
    pub fn columns_of_kind(&self, pred: impl Fn(ColumnKind) -> bool) -> Vec<String> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(i, _)| pred(self.column_kind(*i)))
            .map(|(_, c)| c.clone())
            .collect()
    }
}

fn json_cell(v: &Value) -> Cell {
    match v {
        Value::Null => Cell::Null,
        Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Null),
        Value::Bool(b) => Cell::Text(b.to_string()),
        Value::String(s) => match parse_datetime(s.trim()) {
            Some(dt) => Cell::DateTime(dt),
            None => Cell::Text(s.clone()),
        },
        other => Cell::Text(other.to_string()),
    }
}
