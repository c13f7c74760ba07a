use serde::Serialize;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    minutes: u32,
}

impl ClockTime {
    /// Returns `None` outside 00:00..=23:59.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| Self {
            minutes: hour * 60 + minute,
        })
    }

    pub fn hour(&self) -> u32 {
        self.minutes / 60
    }

    pub fn minute(&self) -> u32 {
        self.minutes % 60
    }

    /// Minutes since midnight.
    pub fn minutes_of_day(&self) -> u32 {
        self.minutes
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Punches found in one cell, in order of appearance. Position determines
/// role: entry and exit of the first shift, then entry and exit of the
/// second shift.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PunchSet {
    pub times: Vec<ClockTime>,
    /// Well-formed punches found beyond the fourth one.
    pub excess: usize,
    /// Tokens shaped like a time but out of range (e.g. `25:70`).
    pub malformed: usize,
}

impl PunchSet {
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    fn slot(&self, i: usize) -> Option<ClockTime> {
        self.times.get(i).copied()
    }

    pub fn first_shift(&self) -> (Option<ClockTime>, Option<ClockTime>) {
        (self.slot(0), self.slot(1))
    }

    pub fn second_shift(&self) -> (Option<ClockTime>, Option<ClockTime>) {
        (self.slot(2), self.slot(3))
    }
}
