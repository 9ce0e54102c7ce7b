//! Performance Quality Index calculation.

pub const BASE_SCORE: f64 = 100.0;
pub const DEFAULT_PENALTY_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreStatus {
    /// PR is as fast as or faster than the baseline.
    Improvement,
    /// PR is slower than the baseline.
    Regression,
}

impl ScoreStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Improvement => "Pass (Improvement)",
            Self::Regression => "Fail (Regression)",
        }
    }
}

/// Outcome of comparing one PR measurement to its baseline.
///
/// Values are unrounded; use `{:.2}` for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    /// `pr - baseline`; negative means the PR got faster.
    pub regression: f64,
    pub status: ScoreStatus,
    pub penalty: f64,
    pub penalty_factor: f64,
}

/// Score a PR value against a baseline value.
///
/// Ties count as an improvement. The score is floored at 0. A zero penalty
/// factor never deducts, even when the regression overflows to infinity.
pub fn calculate_score(pr_value: f64, baseline_value: f64, penalty_factor: f64) -> ScoreResult {
    let regression = pr_value - baseline_value;

    let (penalty, status) = if regression <= 0.0 {
        (0.0, ScoreStatus::Improvement)
    } else if penalty_factor == 0.0 {
        (0.0, ScoreStatus::Regression)
    } else {
        (regression * penalty_factor, ScoreStatus::Regression)
    };

    ScoreResult {
        score: (BASE_SCORE - penalty).max(0.0),
        regression,
        status,
        penalty,
        penalty_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_values_score_100() {
        let r = calculate_score(200.0, 200.0, DEFAULT_PENALTY_FACTOR);
        assert_eq!(r.regression, 0.0);
        assert_eq!(r.penalty, 0.0);
        assert_eq!(r.score, 100.0);
        assert_eq!(r.status, ScoreStatus::Improvement);
    }

    #[test]
    fn test_faster_pr_has_no_penalty() {
        let r = calculate_score(150.0, 200.0, DEFAULT_PENALTY_FACTOR);
        assert_eq!(r.regression, -50.0);
        assert_eq!(r.penalty, 0.0);
        assert_eq!(r.score, 100.0);
        assert_eq!(r.status, ScoreStatus::Improvement);
    }

    #[test]
    fn test_regression_penalty() {
        let r = calculate_score(220.0, 200.0, DEFAULT_PENALTY_FACTOR);
        assert_eq!(r.regression, 20.0);
        assert_eq!(r.penalty, 10.0);
        assert_eq!(r.score, 90.0);
        assert_eq!(r.status, ScoreStatus::Regression);
    }

    #[test]
    fn test_score_is_floored_at_zero() {
        let r = calculate_score(1_000.0, 200.0, DEFAULT_PENALTY_FACTOR);
        assert_eq!(r.penalty, 400.0);
        assert_eq!(r.score, 0.0);
    }

    #[test]
    fn test_custom_penalty_factor() {
        let r = calculate_score(210.0, 200.0, 2.0);
        assert_eq!(r.penalty, 20.0);
        assert_eq!(r.score, 80.0);
        assert_eq!(r.penalty_factor, 2.0);
    }

    #[test]
    fn test_score_stays_in_range() {
        let values = [0.0, 0.1, 1.0, 99.9, 200.0, 1e6, -5.0];
        for &pr in &values {
            for &base in &values {
                let r = calculate_score(pr, base, DEFAULT_PENALTY_FACTOR);
                assert!(
                    (0.0..=100.0).contains(&r.score),
                    "score {} out of range for pr={pr} base={base}",
                    r.score
                );
                assert!(r.penalty >= 0.0);
            }
        }
    }

    #[test]
    fn test_overflowing_regression() {
        let r = calculate_score(f64::MAX, -f64::MAX, 0.0);
        assert_eq!(r.regression, f64::INFINITY);
        assert_eq!(r.penalty, 0.0);
        assert_eq!(r.score, 100.0);
        assert_eq!(r.status, ScoreStatus::Regression);

        let r = calculate_score(f64::MAX, -f64::MAX, DEFAULT_PENALTY_FACTOR);
        assert_eq!(r.penalty, f64::INFINITY);
        assert_eq!(r.score, 0.0);
    }
}
