use std::str::FromStr;

use fractic_server_error::ServerError;

use crate::errors::InvalidHoursAmount;

/// Non-negative decimal hours. Accepts a decimal comma ("7,5").
#[derive(Debug)]
pub(crate) struct HoursAmountModel(pub f64);
impl FromStr for HoursAmountModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().replace(',', ".");
        let hours = raw
            .parse::<f64>()
            .map_err(|_| InvalidHoursAmount::new(s))?;
        if !hours.is_finite() || hours < 0.0 {
            return Err(InvalidHoursAmount::new(s));
        }
        Ok(HoursAmountModel(hours))
    }
}

impl From<HoursAmountModel> for f64 {
    fn from(model: HoursAmountModel) -> Self {
        model.0
    }
}
