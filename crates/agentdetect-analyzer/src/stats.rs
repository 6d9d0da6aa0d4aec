//! Small numeric helpers shared by every signal group. Pure functions
//! only — the Analyzer does no I/O.

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by n, not n-1) — the spec's thresholds
/// were tuned against this definition.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    mean(&values.iter().map(|v| (v - m).powi(2)).collect::<Vec<_>>())
}

pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Coefficient of variation, sigma/mu. `0.0` when the mean is zero (avoids
/// division by zero rather than reporting a spurious infinity).
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 {
        return 0.0;
    }
    std_dev(values) / m
}

pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variance_of_constant_sequence_is_zero() {
        assert_eq!(variance(&[5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn coefficient_of_variation_matches_known_case() {
        let values = [10.0, 10.0, 10.0, 10.0];
        assert_eq!(coefficient_of_variation(&values), 0.0);
    }

    #[test]
    fn ratio_with_zero_denominator_is_zero_not_nan() {
        assert_eq!(ratio(5.0, 0.0), 0.0);
    }
}
