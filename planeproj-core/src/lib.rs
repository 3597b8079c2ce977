/// planeproj core library - point cloud generation and planar projection
///
/// This library provides the stateless core: a fixed-width point cloud
/// table, a sample generator drawing each axis from its own distribution,
/// and the XY/XZ/YZ projections computed by column selection.

pub mod cloud;
pub mod error;
pub mod projection;
pub mod sample;

// Re-export commonly used types
pub use cloud::{Axis, PointCloud};
pub use error::{CloudError, Extent, Result};
pub use projection::{project, project_table, project_to_planes, Plane, Projection, Projections};
pub use sample::{generate_sample_data, generate_sample_data_with, DEFAULT_NUM_POINTS};
