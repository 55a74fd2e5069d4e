use crate::comparator::Variant;
use crate::harness::TrialRecord;

/// `y = slope * x + intercept`, least squares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// `None` for fewer than two points or when every x is the same.
pub fn linear_fit(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for &(x, y) in points {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedupSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl SpeedupSummary {
    /// Summarizes the finite speedups in `records`.
    pub fn from_records(records: &[TrialRecord]) -> Option<Self> {
        let mut values: Vec<f64> = records
            .iter()
            .filter_map(|r| r.speedup)
            .filter(|s| s.is_finite())
            .collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let count = values.len();
        let median = if count % 2 == 1 {
            values[count / 2]
        } else {
            (values[count / 2 - 1] + values[count / 2]) / 2.0
        };
        Some(Self {
            count,
            mean: values.iter().sum::<f64>() / count as f64,
            median,
            min: values[0],
            max: values[count - 1],
        })
    }
}

/// Operation-count models, before scaling.
pub fn oracle_model(variant: Variant, len1: usize, len2: usize) -> f64 {
    let (m, n) = (len1 as f64, len2 as f64);
    match variant {
        Variant::Subsequence => 2f64.powf(m.min(n)) * m.max(n),
        Variant::Substring => m * m * n,
    }
}

pub fn dp_model(len1: usize, len2: usize) -> f64 {
    (len1 * len2) as f64
}

/// Model label for chart legends.
pub fn oracle_model_label(variant: Variant) -> &'static str {
    match variant {
        Variant::Subsequence => "O(2^min(m,n) * max(m,n))",
        Variant::Substring => "O(m^2 * n)",
    }
}

/// Per-row theoretical times for the complete rows of `records`, each model
/// scaled so its mean equals the mean measured time.
#[derive(Debug, Clone, PartialEq)]
pub struct TheoreticalCurves {
    /// (product, measured, model) for the oracle.
    pub oracle: Vec<(f64, f64, f64)>,
    /// (product, measured, model) for DP.
    pub dp: Vec<(f64, f64, f64)>,
}

pub fn theoretical_curves(variant: Variant, records: &[TrialRecord]) -> Option<TheoreticalCurves> {
    let rows: Vec<(&TrialRecord, f64, f64)> = records
        .iter()
        .filter_map(|r| Some((r, r.brute_force_time?, r.dp_time?)))
        .collect();
    if rows.is_empty() {
        return None;
    }

    let n = rows.len() as f64;
    let bf_raw: Vec<f64> = rows
        .iter()
        .map(|(r, _, _)| oracle_model(variant, r.str1_length, r.str2_length))
        .collect();
    let dp_raw: Vec<f64> = rows
        .iter()
        .map(|(r, _, _)| dp_model(r.str1_length, r.str2_length))
        .collect();

    let scale = |measured_mean: f64, raw: &[f64]| {
        let raw_mean = raw.iter().sum::<f64>() / n;
        if raw_mean > 0.0 {
            measured_mean / raw_mean
        } else {
            0.0
        }
    };
    let bf_scale = scale(rows.iter().map(|r| r.1).sum::<f64>() / n, &bf_raw);
    let dp_scale = scale(rows.iter().map(|r| r.2).sum::<f64>() / n, &dp_raw);

    let mut curves = TheoreticalCurves {
        oracle: Vec::with_capacity(rows.len()),
        dp: Vec::with_capacity(rows.len()),
    };
    for (i, (r, bf, dp)) in rows.iter().enumerate() {
        let x = r.product_length as f64;
        curves.oracle.push((x, *bf, bf_raw[i] * bf_scale));
        curves.dp.push((x, *dp, dp_raw[i] * dp_scale));
    }
    Some(curves)
}
