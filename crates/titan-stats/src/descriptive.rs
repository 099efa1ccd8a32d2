use titan_core::Vector;

/// Mean and median of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CentralTendency {
    pub mean: f64,
    pub median: f64,
}

impl CentralTendency {
    /// Both measures are `0.0` for an empty sample.
    pub fn of(data: &Vector) -> Self {
        CentralTendency {
            mean: data.mean(),
            median: median(data),
        }
    }
}

/// Population variance and standard deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dispersion {
    pub variance: f64,
    pub std_dev: f64,
}

impl Dispersion {
    /// Spread around a precomputed `mean`; zeros for an empty sample.
    pub fn of(data: &Vector, mean: f64) -> Self {
        let variance = variance(data, mean);
        Dispersion {
            variance,
            std_dev: variance.sqrt(),
        }
    }
}

/// Middle value of the sorted sample; even lengths average the two middle values.
pub fn median(data: &Vector) -> f64 {
    let n = data.len();
    if n == 0 {
        return 0.0;
    }
    let mut sorted = data.as_slice().to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Population variance (divides by `n`).
pub fn variance(data: &Vector, mean: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = data
        .iter()
        .map(|&x| {
            let d = x - mean;
            d * d
        })
        .sum();
    sum_sq / data.len() as f64
}
