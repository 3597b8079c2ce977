/// Synthetic point cloud generation from three independent distributions
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::{Exp, Normal};
use tracing::debug;

use crate::cloud::PointCloud;
use crate::error::{CloudError, Result};

/// Mean of the normal distribution used for X
pub const NORMAL_MEAN: f64 = 0.0;
/// Standard deviation of the normal distribution used for X
pub const NORMAL_STD_DEV: f64 = 1.0;
/// Inclusive lower bound of the uniform distribution used for Y
pub const UNIFORM_LOW: f64 = -1.0;
/// Exclusive upper bound of the uniform distribution used for Y
pub const UNIFORM_HIGH: f64 = 1.0;
/// Scale (mean) of the exponential distribution used for Z
pub const EXPONENTIAL_SCALE: f64 = 1.0;

/// Default point count when the caller does not choose one
pub const DEFAULT_NUM_POINTS: i64 = 100;

/// Generate a sample cloud using the thread-local random source.
///
/// See [`generate_sample_data_with`] for the column distributions.
pub fn generate_sample_data(num_points: i64) -> Result<PointCloud> {
    generate_sample_data_with(num_points, &mut rand::thread_rng())
}

/// Generate a cloud of `num_points` rows drawn from `rng`.
///
/// - X ~ Normal(0, 1)
/// - Y ~ Uniform[-1, 1)
/// - Z ~ Exponential(scale = 1)
///
/// Each column is sampled independently. A count of zero yields an empty
/// (0, 3) cloud; a negative count is rejected before anything is sampled.
pub fn generate_sample_data_with<R: Rng + ?Sized>(
    num_points: i64,
    rng: &mut R,
) -> Result<PointCloud> {
    let count = usize::try_from(num_points).map_err(|_| {
        CloudError::invalid_argument("num_points", num_points, "point count must be non-negative")
    })?;

    let normal = Normal::new(NORMAL_MEAN, NORMAL_STD_DEV)
        .map_err(|e| CloudError::Distribution(e.to_string()))?;
    let uniform = Uniform::new(UNIFORM_LOW, UNIFORM_HIGH);
    let exponential =
        Exp::new(1.0 / EXPONENTIAL_SCALE).map_err(|e| CloudError::Distribution(e.to_string()))?;

    let x = sample_column(&normal, count, rng);
    let y = sample_column(&uniform, count, rng);
    let z = sample_column(&exponential, count, rng);

    let cloud = PointCloud::from_columns(x, y, z)?;
    debug!(points = cloud.len(), "generated sample cloud");
    Ok(cloud)
}

fn sample_column<D, R>(dist: &D, count: usize, rng: &mut R) -> Vec<f64>
where
    D: Distribution<f64>,
    R: Rng + ?Sized,
{
    (0..count).map(|_| dist.sample(rng)).collect()
}
