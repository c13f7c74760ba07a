use chrono::{Datelike, NaiveDate, Weekday};

/// Supplies the expected worked minutes for a calendar day. Used only to
/// annotate shortfalls; it never changes worked time.
pub trait ExpectedHoursPolicy {
    fn expected_minutes(&self, date: NaiveDate) -> u32;
}

/// Fixed expected minutes per weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde_derive::Deserialize, serde_derive::Serialize)]
#[serde(default)]
pub struct WeekdayTablePolicy {
    pub monday: u32,
    pub tuesday: u32,
    pub wednesday: u32,
    pub thursday: u32,
    pub friday: u32,
    pub saturday: u32,
    pub sunday: u32,
}

impl Default for WeekdayTablePolicy {
    /// Shop schedule: 10 hours Monday/Wednesday/Friday, 9 hours
    /// Tuesday/Thursday, weekends off.
    fn default() -> Self {
        Self {
            monday: 600,
            tuesday: 540,
            wednesday: 600,
            thursday: 540,
            friday: 600,
            saturday: 0,
            sunday: 0,
        }
    }
}

impl ExpectedHoursPolicy for WeekdayTablePolicy {
    fn expected_minutes(&self, date: NaiveDate) -> u32 {
        match date.weekday() {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }
}

/// Minutes missing against the expectation. Only computed for days with a
/// positive expectation.
pub fn shortfall_minutes(expected: Option<u32>, worked: u32) -> Option<u32> {
    expected
        .filter(|e| *e > 0)
        .map(|e| e.saturating_sub(worked))
}
