pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0_f64
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Rounds to the nearest integer with halves going up, for non-negative ratios.
pub fn rounded_ratio(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    (numerator as f64 / denominator as f64).round() as u64
}

pub fn round_float(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1000.0, 1200.0]), 1100.0);
    }

    #[test]
    fn rounded_ratio_rounds_halves_up() {
        assert_eq!(rounded_ratio(16, 4), 4);
        assert_eq!(rounded_ratio(3, 2), 2);
        assert_eq!(rounded_ratio(7, 3), 2);
        assert_eq!(rounded_ratio(5, 0), 0);
    }

    #[test]
    fn round_float_two_decimals() {
        assert_eq!(round_float(2.333_333), 2.33);
        assert_eq!(round_float(-0.005_1), -0.01);
    }
}
