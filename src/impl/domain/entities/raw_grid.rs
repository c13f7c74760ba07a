use serde::Serialize;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Untyped value of a single spreadsheet cell, as read from the source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn text<S: Into<String>>(s: S) -> Self {
        let s = s.into();
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Trimmed textual rendering. Whole numbers are rendered without a
    /// fractional part, so an id stored as `12.0` reads as `12`.
    pub fn display_value(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            CellValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                Some(format!("{:.0}", n))
            }
            CellValue::Number(n) => Some(n.to_string()),
        }
    }

    /// Normalized marker form used for label matching (trimmed, uppercase).
    pub(crate) fn marker(&self) -> Option<String> {
        self.as_text()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
    }
}

impl Serialize for CellValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.display_value() {
            Some(v) => serializer.serialize_str(&v),
            None => serializer.serialize_none(),
        }
    }
}

/// Verbatim 2-D contents of one worksheet. Rows may have different lengths;
/// out-of-range lookups read as empty cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawGrid {
    rows: Vec<Vec<CellValue>>,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Builds a grid of text cells; empty strings become empty cells.
    pub fn from_text_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(CellValue::text).collect())
                .collect(),
        }
    }

    pub fn get(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn row(&self, row: usize) -> &[CellValue] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = (usize, &[CellValue])> {
        self.rows.iter().map(Vec::as_slice).enumerate()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.iter().all(CellValue::is_blank))
    }
}
