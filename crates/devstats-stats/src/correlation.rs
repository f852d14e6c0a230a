//! Pearson product-moment correlation.

use statrs::statistics::Statistics;

/// Pearson correlation of complete `(x, y)` pairs.
///
/// Returns `None` when the coefficient is undefined: fewer than two pairs,
/// or either variable has zero variance. The result is clamped to
/// `[-1.0, 1.0]` to absorb rounding.
///
/// # Examples
///
/// ```
/// use devstats_stats::pearson;
///
/// let r = pearson([(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]).unwrap();
/// assert!((r - 1.0).abs() < 1e-12);
///
/// assert_eq!(pearson([(1.0, 5.0), (2.0, 5.0)]), None);
/// ```
pub fn pearson<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (xs, ys): (Vec<f64>, Vec<f64>) = pairs
        .into_iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .unzip();
    if xs.len() < 2 {
        return None;
    }

    let sd_x = xs.iter().std_dev();
    let sd_y = ys.iter().std_dev();
    if sd_x == 0.0 || sd_y == 0.0 {
        return None;
    }

    let r = xs.iter().covariance(ys.iter()) / (sd_x * sd_y);
    Some(r.clamp(-1.0, 1.0))
}
