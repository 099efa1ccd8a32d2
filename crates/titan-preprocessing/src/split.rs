use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use titan_core::{LearnError, LearnResult, Matrix, Vector};

/// Training and held-out partitions of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub x_train: Matrix,
    pub x_test: Matrix,
    pub y_train: Vector,
    pub y_test: Vector,
}

/// Split data into training and test sets after a shuffle.
///
/// `test_ratio` of the rows (rounded) go to the test set. A fixed `seed`
/// makes the shuffle reproducible.
pub fn train_test_split(
    x: &Matrix,
    y: &Vector,
    test_ratio: f64,
    seed: Option<u64>,
) -> LearnResult<Split> {
    let n = x.rows();
    if n != y.len() {
        return Err(LearnError::DimensionMismatch(format!(
            "X has {} rows but y has {} labels",
            n,
            y.len()
        )));
    }
    if !(0.0..=1.0).contains(&test_ratio) {
        return Err(LearnError::InvalidHyperparameter(format!(
            "test_ratio must be within [0, 1], got {}",
            test_ratio
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    indices.shuffle(&mut rng);

    let test_size = (n as f64 * test_ratio).round() as usize;
    let (train_idx, test_idx) = indices.split_at(n - test_size);

    let labels = |idx: &[usize]| -> LearnResult<Vector> {
        idx.iter()
            .map(|&i| y.get(i))
            .collect::<LearnResult<Vec<f64>>>()
            .map(Vector::from)
    };

    Ok(Split {
        x_train: x.select_rows(train_idx)?,
        x_test: x.select_rows(test_idx)?,
        y_train: labels(train_idx)?,
        y_test: labels(test_idx)?,
    })
}
