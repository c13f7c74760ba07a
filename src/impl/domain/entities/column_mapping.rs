/// Columns of a one-row-per-shift sheet (`id, date, entry, exit`), as
/// zero-based indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde_derive::Serialize)]
pub struct ColumnMapping {
    pub employee_id: usize,
    pub date: usize,
    pub entry: usize,
    pub exit: usize,
}

impl ColumnMapping {
    pub fn apply(self, overrides: ColumnOverrides) -> Self {
        Self {
            employee_id: overrides.employee_id.unwrap_or(self.employee_id),
            date: overrides.date.unwrap_or(self.date),
            entry: overrides.entry.unwrap_or(self.entry),
            exit: overrides.exit.unwrap_or(self.exit),
        }
    }

    pub(crate) fn columns(&self) -> [usize; 4] {
        [self.employee_id, self.date, self.entry, self.exit]
    }
}

impl std::fmt::Display for ColumnMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "id {}, date {}, entry {}, exit {}",
            column_letter(self.employee_id),
            column_letter(self.date),
            column_letter(self.entry),
            column_letter(self.exit)
        )
    }
}

/// Columns picked explicitly; unset fields keep the suggested column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnOverrides {
    pub employee_id: Option<usize>,
    pub date: Option<usize>,
    pub entry: Option<usize>,
    pub exit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSheetFailure {
    NoHeaderRow,
    ColumnOutOfRange { column: usize, width: usize },
}

impl std::fmt::Display for ColumnSheetFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnSheetFailure::NoHeaderRow => write!(f, "the sheet has no header row"),
            ColumnSheetFailure::ColumnOutOfRange { column, width } => write!(
                f,
                "column {} is outside the header, which ends at column {}",
                column_letter(*column),
                column_letter(width.saturating_sub(1))
            ),
        }
    }
}

/// Zero-based index of a spreadsheet column letter (`A` is 0, `AA` is 26).
pub fn column_index(letters: &str) -> Option<usize> {
    let letters = letters.trim();
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    letters
        .to_ascii_uppercase()
        .bytes()
        .try_fold(0usize, |n, b| {
            n.checked_mul(26)?.checked_add(usize::from(b - b'A') + 1)
        })
        .map(|n| n - 1)
}

pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_index("A"), Some(0));
        assert_eq!(column_index(" d "), Some(3));
        assert_eq!(column_index("Z"), Some(25));
        assert_eq!(column_index("AA"), Some(26));
        assert_eq!(column_index("3"), None);
        assert_eq!(column_index(""), None);
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(27), "AB");
    }

    #[test]
    fn test_overrides_replace_only_given_columns() {
        let suggested = ColumnMapping {
            employee_id: 0,
            date: 1,
            entry: 2,
            exit: 3,
        };
        let mapping = suggested.apply(ColumnOverrides {
            exit: Some(5),
            ..ColumnOverrides::default()
        });
        assert_eq!(mapping.columns(), [0, 1, 2, 5]);
        assert_eq!(mapping.to_string(), "id A, date B, entry C, exit F");
    }
}
