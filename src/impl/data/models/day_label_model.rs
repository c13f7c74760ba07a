use std::str::FromStr;

use fractic_server_error::ServerError;

use crate::{data::models::iso_date_model::ISODateModel, entities::DayLabel, errors::InvalidIsoDate};

/// Ledger date column: an ISO date, or a bare day-of-month for rows whose
/// calendar date could not be resolved at import time.
#[derive(Debug)]
pub(crate) struct DayLabelModel(DayLabel);
impl FromStr for DayLabelModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Ok(day) = raw.parse::<u32>() {
            return match day {
                1..=31 => Ok(DayLabelModel(DayLabel::DayOfMonth(day))),
                _ => Err(InvalidIsoDate::new(raw)),
            };
        }
        let date: ISODateModel = raw.parse()?;
        Ok(DayLabelModel(DayLabel::Date(date.into())))
    }
}

impl From<DayLabelModel> for DayLabel {
    fn from(model: DayLabelModel) -> Self {
        model.0
    }
}
