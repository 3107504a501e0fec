//! Cycle-length detection over an abstract integer generator.

use std::collections::HashMap;

use serde::Serialize;

use crate::source::IntSource;

/// Outcome of a period search.
///
/// `period` is the number of generator steps between the first occurrence
/// of a value and its next occurrence. Both fields are `None` when no
/// repeat was observed within the iteration budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodResult {
    pub period: Option<u64>,
    pub repeat_value: Option<u64>,
}

/// Detect the cycle length of `generator` by tracking visited values.
///
/// Drives [`IntSource::next_int`] until some value repeats or
/// `max_iterations` values have been drawn. The budget is a hard ceiling:
/// a generator whose modulus far exceeds it reports "not found" rather
/// than scanning on.
///
/// The reported length matches the eventual cycle length for any generator
/// whose state is fully captured by the emitted value.
pub fn find_period<G: IntSource + ?Sized>(generator: &mut G, max_iterations: u64) -> PeriodResult {
    let mut seen: HashMap<u64, u64> = HashMap::new();

    for step in 0..max_iterations {
        let value = generator.next_int();
        if let Some(&first) = seen.get(&value) {
            log::debug!("cycle closed at step {step}: value {value} first seen at step {first}");
            return PeriodResult {
                period: Some(step - first),
                repeat_value: Some(value),
            };
        }
        seen.insert(value, step);
    }

    log::debug!("no repeat within {max_iterations} iterations");
    PeriodResult {
        period: None,
        repeat_value: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcg::Lcg;
    use crate::lfsr::Lfsr;

    #[test]
    fn full_period_lcg() {
        // a=5, c=3, m=16 satisfies Hull-Dobell, so the period is exactly m.
        let mut lcg = Lcg::new(1, 5, 3, 16);
        let result = find_period(&mut lcg, 1_000);
        assert_eq!(result.period, Some(16));
        assert!(result.repeat_value.unwrap() < 16);
    }

    #[test]
    fn trivial_modulus_has_period_one() {
        let mut lcg = Lcg::new(0, 1, 0, 1);
        let result = find_period(&mut lcg, 1_000);
        assert_eq!(result.period, Some(1));
        assert_eq!(result.repeat_value, Some(0));
    }

    #[test]
    fn short_tail_before_the_cycle() {
        // seed=0, a=2, c=1, m=4: 1, 3, 3, ... -> period 1 at value 3.
        let mut lcg = Lcg::new(0, 2, 1, 4);
        let result = find_period(&mut lcg, 1_000);
        assert_eq!(result.period, Some(1));
        assert_eq!(result.repeat_value, Some(3));
    }

    #[test]
    fn budget_exhaustion_reports_absent() {
        let mut lcg = Lcg::new(1, 1103515245, 12345, 1 << 31);
        let result = find_period(&mut lcg, 1_000);
        assert_eq!(result.period, None);
        assert_eq!(result.repeat_value, None);
    }

    #[test]
    fn lfsr_state_cycles() {
        let mut lfsr = Lfsr::new(1, &[5, 3], 5).unwrap();
        let result = find_period(&mut lfsr, 100);
        let period = result.period.expect("5-bit register must cycle within 100 steps");
        assert!(period >= 1 && period <= 31);
    }

    #[test]
    fn zero_budget_finds_nothing() {
        let mut lcg = Lcg::new(1, 5, 3, 16);
        let result = find_period(&mut lcg, 0);
        assert_eq!(result.period, None);
    }

    #[test]
    fn result_serializes() {
        let result = PeriodResult {
            period: Some(16),
            repeat_value: Some(4),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["period"], 16);
        assert_eq!(json["repeat_value"], 4);
    }
}
