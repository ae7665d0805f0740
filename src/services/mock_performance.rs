use rand::Rng;

use crate::models::PerformanceResult;

const WEEKLY_SPREAD: f64 = 5.0;
const MONTHLY_SPREAD: f64 = 10.0;
const YEARLY_SPREAD: f64 = 25.0;
const FIVE_YEARLY_SPREAD: f64 = 100.0;
/// Long-horizon mock returns lean positive: [-40, 160].
const FIVE_YEARLY_BIAS: f64 = 60.0;

/// Synthetic figures used when live prices are unavailable.
pub fn mock_performance() -> PerformanceResult {
    mock_performance_with(&mut rand::rng())
}

pub fn mock_performance_with<R: Rng + ?Sized>(rng: &mut R) -> PerformanceResult {
    PerformanceResult {
        weekly_change: rng.random_range(-WEEKLY_SPREAD..=WEEKLY_SPREAD),
        monthly_change: rng.random_range(-MONTHLY_SPREAD..=MONTHLY_SPREAD),
        yearly_change: rng.random_range(-YEARLY_SPREAD..=YEARLY_SPREAD),
        five_yearly_change: rng.random_range(-FIVE_YEARLY_SPREAD..=FIVE_YEARLY_SPREAD)
            + FIVE_YEARLY_BIAS,
    }
}

/// True when every field lies inside the ranges `mock_performance` draws from.
#[cfg(test)]
pub fn within_mock_ranges(result: &PerformanceResult) -> bool {
    (-WEEKLY_SPREAD..=WEEKLY_SPREAD).contains(&result.weekly_change)
        && (-MONTHLY_SPREAD..=MONTHLY_SPREAD).contains(&result.monthly_change)
        && (-YEARLY_SPREAD..=YEARLY_SPREAD).contains(&result.yearly_change)
        && (FIVE_YEARLY_BIAS - FIVE_YEARLY_SPREAD..=FIVE_YEARLY_BIAS + FIVE_YEARLY_SPREAD)
            .contains(&result.five_yearly_change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mock_values_stay_in_range() {
        for _ in 0..1_000 {
            let result = mock_performance();
            assert!(within_mock_ranges(&result), "out of range: {:?}", result);
        }
    }

    #[test]
    fn test_five_year_range_is_biased() {
        assert!(within_mock_ranges(&PerformanceResult {
            weekly_change: 0.0,
            monthly_change: 0.0,
            yearly_change: 0.0,
            five_yearly_change: 150.0,
        }));
        assert!(!within_mock_ranges(&PerformanceResult {
            weekly_change: 0.0,
            monthly_change: 0.0,
            yearly_change: 0.0,
            five_yearly_change: -50.0,
        }));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a = mock_performance_with(&mut StdRng::seed_from_u64(7));
        let b = mock_performance_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
