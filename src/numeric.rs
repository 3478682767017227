//! Numeric helpers shared by the statistics, outlier and plotting stages.
//!
//! All functions ignore missing entries. Undefined results are `None`
//! rather than NaN so they serialize as JSON `null`.

use std::cmp::Ordering;

/// Non-missing values of a column, in row order
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}

/// Non-missing values sorted ascending
pub fn sorted_present(values: &[Option<f64>]) -> Vec<f64> {
    let mut data = present(values);
    data.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    data
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation (n - 1 denominator)
pub fn sample_std(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    Some((ss / (data.len() as f64 - 1.0)).sqrt())
}

/// Quantile `q` in [0, 1] of already sorted data, linear interpolation
/// between closest ranks (position `q * (n - 1)`).
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let rank = q * (sorted.len() as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let frac = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Q1, median and Q3 of a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    pub fn of_sorted(sorted: &[f64]) -> Option<Self> {
        Some(Self {
            q1: quantile_sorted(sorted, 0.25)?,
            median: quantile_sorted(sorted, 0.5)?,
            q3: quantile_sorted(sorted, 0.75)?,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Tukey fences `[q1 - k * iqr, q3 + k * iqr]`
    pub fn fences(&self, multiplier: f64) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - multiplier * iqr, self.q3 + multiplier * iqr)
    }
}

/// Pearson correlation over rows where both values are present.
/// `None` with fewer than two complete pairs or zero variance on either side.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    if !r.is_finite() {
        return None;
    }
    Some(r.clamp(-1.0, 1.0))
}

/// Min and max of non-empty data
pub fn min_max(data: &[f64]) -> Option<(f64, f64)> {
    let first = *data.first()?;
    Some(
        data.iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_linear_interpolation() {
        let data = [1.0, 2.0, 3.0, 4.0, 100.0];
        assert_eq!(quantile_sorted(&data, 0.25), Some(2.0));
        assert_eq!(quantile_sorted(&data, 0.5), Some(3.0));
        assert_eq!(quantile_sorted(&data, 0.75), Some(4.0));

        let even = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&even, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&even, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&even, 0.75), Some(3.25));
    }

    #[test]
    fn test_quantile_empty_and_single() {
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(quantile_sorted(&[7.0], 0.25), Some(7.0));
    }

    #[test]
    fn test_sample_std() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std = sample_std(&data).unwrap();
        assert!((std - 2.138089935299395).abs() < 1e-12);
        assert_eq!(sample_std(&[1.0]), None);
    }

    #[test]
    fn test_pearson_perfect_and_pairwise_complete() {
        let x = [Some(1.0), Some(2.0), Some(3.0), None];
        let y = [Some(2.0), Some(4.0), Some(6.0), Some(100.0)];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);

        let neg = [Some(3.0), Some(2.0), Some(1.0), Some(0.0)];
        assert!((pearson(&x, &neg).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_undefined() {
        let x = [Some(1.0), Some(1.0), Some(1.0)];
        let y = [Some(1.0), Some(2.0), Some(3.0)];
        assert_eq!(pearson(&x, &y), None);
        assert_eq!(pearson(&[Some(1.0)], &[Some(2.0)]), None);
    }

    #[test]
    fn test_fences() {
        let quartiles = Quartiles::of_sorted(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(quartiles.iqr(), 2.0);
        assert_eq!(quartiles.fences(1.5), (-1.0, 7.0));
    }
}
