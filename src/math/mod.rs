/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Rounds `value` to `decimals` decimal places.
///
/// Used where two computed quantities are compared for strict ordering and
/// accumulated floating error must not flip the result.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    if !factor.is_finite() {
        return value;
    }
    (value * factor).round() / factor
}

/// Sorts `values` and collapses entries closer than [`TOLERANCE`].
///
/// The first value of each cluster is kept, so coordinates coming from the
/// same source stay bit-identical.
#[must_use]
pub fn sorted_unique(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let mut unique: Vec<f64> = Vec::with_capacity(sorted.len());
    for value in sorted {
        match unique.last() {
            Some(&last) if (value - last).abs() <= TOLERANCE => {}
            _ => unique.push(value),
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_five_places() {
        assert!((round_to(1.234_567_89, 5) - 1.234_57).abs() < 1e-12);
        assert!((round_to(12.0, 5) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn sorted_unique_merges_near_duplicates() {
        let values = sorted_unique(&[1.0, 0.0, 1.0 + 1e-12, 0.5, 0.0]);
        assert_eq!(values, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn sorted_unique_drops_non_finite() {
        let values = sorted_unique(&[f64::NAN, 2.0, f64::INFINITY, 1.0]);
        assert_eq!(values, vec![1.0, 2.0]);
    }
}
