use std::collections::BTreeSet;

use crate::entities::{AttendanceFlag, ClockTime, PunchSet, MINUTES_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftSlot {
    First,
    Second,
}

impl ShiftSlot {
    fn incomplete_flag(self) -> AttendanceFlag {
        match self {
            ShiftSlot::First => AttendanceFlag::IncompleteShift,
            ShiftSlot::Second => AttendanceFlag::SecondShiftIncomplete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftOutcome {
    pub minutes: u32,
    pub flag: Option<AttendanceFlag>,
}

/// Minutes from `entry` to `exit`. An exit earlier than the entry is taken
/// as falling on the next calendar day.
pub fn minutes_between(entry: ClockTime, exit: ClockTime) -> u32 {
    let (entry, exit) = (entry.minutes_of_day(), exit.minutes_of_day());
    if exit >= entry {
        exit - entry
    } else {
        MINUTES_PER_DAY - entry + exit
    }
}

/// Worked minutes of one entry/exit pair. A lone punch counts as zero and
/// is flagged as incomplete for its slot.
pub fn shift_minutes(
    entry: Option<ClockTime>,
    exit: Option<ClockTime>,
    slot: ShiftSlot,
) -> ShiftOutcome {
    match (entry, exit) {
        (Some(entry), Some(exit)) => ShiftOutcome {
            minutes: minutes_between(entry, exit),
            flag: None,
        },
        (None, None) => ShiftOutcome {
            minutes: 0,
            flag: None,
        },
        _ => ShiftOutcome {
            minutes: 0,
            flag: Some(slot.incomplete_flag()),
        },
    }
}

/// Total worked minutes for a day's punches: both shift slots summed, each
/// computed independently. A third punch without a fourth only marks the
/// second shift incomplete.
pub fn day_minutes(punches: &PunchSet) -> (u32, BTreeSet<AttendanceFlag>) {
    let (e1, s1) = punches.first_shift();
    let (e2, s2) = punches.second_shift();
    let outcomes = [
        shift_minutes(e1, s1, ShiftSlot::First),
        shift_minutes(e2, s2, ShiftSlot::Second),
    ];
    let minutes = outcomes.iter().map(|o| o.minutes).sum();
    let flags = outcomes.iter().filter_map(|o| o.flag).collect();
    (minutes, flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hm(h, m).unwrap()
    }

    fn punches(times: &[(u32, u32)]) -> PunchSet {
        PunchSet {
            times: times.iter().map(|&(h, m)| hm(h, m)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_same_day_pair() {
        assert_eq!(minutes_between(hm(8, 3), hm(13, 58)), 355);
        assert_eq!(minutes_between(hm(9, 0), hm(9, 0)), 0);
    }

    #[test]
    fn test_overnight_pair() {
        assert_eq!(minutes_between(hm(22, 0), hm(6, 15)), 495);
        for (entry, exit) in [(hm(23, 59), hm(0, 0)), (hm(13, 0), hm(12, 59))] {
            let expected = MINUTES_PER_DAY - entry.minutes_of_day() + exit.minutes_of_day();
            assert_eq!(minutes_between(entry, exit), expected);
        }
    }

    #[test]
    fn test_absent_pair_is_zero_without_flag() {
        let o = shift_minutes(None, None, ShiftSlot::First);
        assert_eq!(o, ShiftOutcome { minutes: 0, flag: None });
    }

    #[test]
    fn test_lone_punch_is_incomplete() {
        let o = shift_minutes(Some(hm(8, 0)), None, ShiftSlot::First);
        assert_eq!(o.minutes, 0);
        assert_eq!(o.flag, Some(AttendanceFlag::IncompleteShift));

        let o = shift_minutes(None, Some(hm(17, 0)), ShiftSlot::Second);
        assert_eq!(o.flag, Some(AttendanceFlag::SecondShiftIncomplete));
    }

    #[test]
    fn test_day_with_two_shifts() {
        let (minutes, flags) = day_minutes(&punches(&[(8, 0), (12, 0), (13, 0), (17, 30)]));
        assert_eq!(minutes, 240 + 270);
        assert!(flags.is_empty());
    }

    #[test]
    fn test_third_punch_keeps_first_shift() {
        let (minutes, flags) = day_minutes(&punches(&[(8, 0), (12, 0), (13, 0)]));
        assert_eq!(minutes, 240);
        assert_eq!(
            flags.into_iter().collect::<Vec<_>>(),
            vec![AttendanceFlag::SecondShiftIncomplete]
        );
    }

    #[test]
    fn test_single_punch_day() {
        let (minutes, flags) = day_minutes(&punches(&[(8, 0)]));
        assert_eq!(minutes, 0);
        assert!(flags.contains(&AttendanceFlag::IncompleteShift));
        assert!(!flags.contains(&AttendanceFlag::SecondShiftIncomplete));
    }
}
