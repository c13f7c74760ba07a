use std::str::FromStr;

use fractic_server_error::ServerError;

use crate::errors::InvalidEmployeeId;

/// Employee id as text. Spreadsheet tools often write numeric ids as
/// floats ("12.0"), which normalize to the integer form.
#[derive(Debug)]
pub(crate) struct EmployeeIdModel(String);
impl FromStr for EmployeeIdModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(InvalidEmployeeId::new(s));
        }
        let normalized = match raw.parse::<f64>() {
            Ok(n) if n.is_finite() && n.fract() == 0.0 && !raw.starts_with('0') => {
                format!("{:.0}", n)
            }
            _ => raw.to_string(),
        };
        Ok(EmployeeIdModel(normalized))
    }
}

impl From<EmployeeIdModel> for String {
    fn from(model: EmployeeIdModel) -> Self {
        model.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> String {
        s.parse::<EmployeeIdModel>().unwrap().into()
    }

    #[test]
    fn test_normalize_ids() {
        assert_eq!(id("12"), "12");
        assert_eq!(id(" 12.0 "), "12");
        assert_eq!(id("007"), "007");
        assert_eq!(id("A-15"), "A-15");
        assert!("  ".parse::<EmployeeIdModel>().is_err());
    }
}
