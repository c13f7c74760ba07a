use std::str::FromStr;

use fractic_server_error::ServerError;

use crate::errors::InvalidHourlyWage;

#[derive(Debug)]
pub(crate) struct HourlyWageModel(pub f64);
impl FromStr for HourlyWageModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().trim_start_matches('$').replace(',', "");
        match raw.parse::<f64>() {
            Ok(wage) if wage.is_finite() && wage >= 0.0 => Ok(HourlyWageModel(wage)),
            _ => Err(InvalidHourlyWage::new(s)),
        }
    }
}

impl From<HourlyWageModel> for f64 {
    fn from(model: HourlyWageModel) -> Self {
        model.0
    }
}
