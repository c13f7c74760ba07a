use std::cmp::Ordering;

/// Orders employee ids numerically when both are numbers, textually
/// otherwise ("2" before "10").
pub(crate) fn compare_employee_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

pub(crate) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_employee_ids() {
        let mut ids = vec!["10", "B7", "2", "A1", "02"];
        ids.sort_by(|a, b| compare_employee_ids(a, b));
        assert_eq!(ids, vec!["02", "2", "10", "A1", "B7"]);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(5.916666), 5.92);
        assert_eq!(round_to_cents(0.0), 0.0);
    }
}
