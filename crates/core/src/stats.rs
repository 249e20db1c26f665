//! Summary statistics over numeric columns.

/// Quantile `q` (0..=1) of the values, interpolating linearly between the
/// two closest ranks. NaN values are ignored; `None` when nothing is left.
#[must_use]
pub fn quantile<I>(values: I, q: f64) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    if fraction == 0.0 {
        Some(sorted[lower])
    } else {
        Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolates_between_ranks() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(quantile(values, 0.25), Some(1.75));
        assert_eq!(quantile(values, 0.5), Some(2.5));
        assert_eq!(quantile(values, 0.75), Some(3.25));
    }

    #[test]
    fn test_exact_ranks_and_bounds() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(quantile(values, 0.0), Some(10.0));
        assert_eq!(quantile(values, 0.25), Some(20.0));
        assert_eq!(quantile(values, 1.0), Some(50.0));
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(quantile([7.0], 0.75), Some(7.0));
        assert_eq!(quantile(Vec::new(), 0.25), None);
        assert_eq!(quantile([f64::NAN], 0.25), None);
    }

    #[test]
    fn test_infinity_participates() {
        assert_eq!(quantile([1.0, f64::INFINITY], 1.0), Some(f64::INFINITY));
    }
}
