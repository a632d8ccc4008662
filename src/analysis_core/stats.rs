//! Descriptive statistics over a numeric series

use serde::Serialize;

/// count / mean / std / min / quartiles / max
///
/// Everything except `count` is `None` for an empty series; `std` is the
/// sample standard deviation and needs at least two values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Describe {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl Describe {
    pub fn of(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        });

        Self {
            count,
            mean: Some(mean),
            std,
            min: sorted.first().copied(),
            p25: Some(quantile(&sorted, 0.25)),
            p50: Some(quantile(&sorted, 0.50)),
            p75: Some(quantile(&sorted, 0.75)),
            max: sorted.last().copied(),
        }
    }

    /// (label, value) pairs in display order
    pub fn rows(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("count", Some(self.count as f64)),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.p25),
            ("50%", self.p50),
            ("75%", self.p75),
            ("max", self.max),
        ]
    }
}

/// Linear-interpolated quantile of a sorted, non-empty slice
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_basic() {
        let d = Describe::of(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(d.count, 4);
        assert_eq!(d.mean, Some(2.5));
        assert_eq!(d.min, Some(1.0));
        assert_eq!(d.max, Some(4.0));
        assert_eq!(d.p25, Some(1.75));
        assert_eq!(d.p50, Some(2.5));
        assert_eq!(d.p75, Some(3.25));

        let std = d.std.unwrap();
        assert!((std - 1.290_994_448_7).abs() < 1e-9);
    }

    #[test]
    fn test_describe_single_value_has_no_std() {
        let d = Describe::of(&[7.0]);
        assert_eq!(d.count, 1);
        assert_eq!(d.std, None);
        assert_eq!(d.p25, Some(7.0));
        assert_eq!(d.p75, Some(7.0));
    }

    #[test]
    fn test_describe_empty() {
        let d = Describe::of(&[]);
        assert_eq!(d, Describe::default());
        assert_eq!(d.rows()[0], ("count", Some(0.0)));
    }
}
