/// Axis-aligned planar projections of a point cloud
use std::fmt;

use nalgebra::{Const, DMatrix, Dyn, OMatrix, U2};
use tracing::trace;

use crate::cloud::{Axis, PointCloud};
use crate::error::Result;

/// Backing storage of a projection, column-major with a fixed width of two
pub type ProjectionMatrix = OMatrix<f64, Dyn, U2>;

/// One of the three coordinate planes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::XY, Plane::XZ, Plane::YZ];

    /// The (horizontal, vertical) axes kept by this plane
    pub fn axes(self) -> (Axis, Axis) {
        match self {
            Plane::XY => (Axis::X, Axis::Y),
            Plane::XZ => (Axis::X, Axis::Z),
            Plane::YZ => (Axis::Y, Axis::Z),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Plane::XY => "XY",
            Plane::XZ => "XZ",
            Plane::YZ => "YZ",
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A two-column table selected from a cloud, rows in cloud order
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    plane: Plane,
    matrix: ProjectionMatrix,
}

impl Projection {
    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (rows, columns); the column count is always 2
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    /// Column 0 or 1 of the projection, `None` for any other index
    pub fn column(&self, index: usize) -> Option<&[f64]> {
        let rows = self.len();
        (index < 2).then(|| &self.matrix.as_slice()[index * rows..(index + 1) * rows])
    }

    /// Values along the plane's first axis (X for XY and XZ, Y for YZ)
    pub fn horizontal(&self) -> &[f64] {
        &self.matrix.as_slice()[..self.len()]
    }

    /// Values along the plane's second axis
    pub fn vertical(&self) -> &[f64] {
        &self.matrix.as_slice()[self.len()..]
    }

    pub fn point(&self, i: usize) -> Option<[f64; 2]> {
        (i < self.len()).then(|| [self.matrix[(i, 0)], self.matrix[(i, 1)]])
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.horizontal().iter().zip(self.vertical()).map(|(&u, &v)| [u, v])
    }

    pub fn as_matrix(&self) -> &ProjectionMatrix {
        &self.matrix
    }
}

/// The XY, XZ and YZ projections of one cloud
#[derive(Debug, Clone, PartialEq)]
pub struct Projections {
    pub xy: Projection,
    pub xz: Projection,
    pub yz: Projection,
}

impl Projections {
    pub fn get(&self, plane: Plane) -> &Projection {
        match plane {
            Plane::XY => &self.xy,
            Plane::XZ => &self.xz,
            Plane::YZ => &self.yz,
        }
    }

    /// Projections in XY, XZ, YZ order
    pub fn iter(&self) -> impl Iterator<Item = &Projection> {
        [&self.xy, &self.xz, &self.yz].into_iter()
    }
}

/// Select the two columns of `plane` from `cloud`.
///
/// Values are copied unchanged; row order and row count are preserved.
pub fn project(cloud: &PointCloud, plane: Plane) -> Projection {
    let (u, v) = plane.axes();
    let rows = cloud.len();

    let mut data = Vec::with_capacity(rows * 2);
    data.extend_from_slice(cloud.column(u));
    data.extend_from_slice(cloud.column(v));

    trace!(plane = %plane, rows, "projected cloud");
    Projection {
        plane,
        matrix: ProjectionMatrix::from_vec_generic(Dyn(rows), Const::<2>, data),
    }
}

/// Project a cloud onto all three coordinate planes
pub fn project_to_planes(cloud: &PointCloud) -> Projections {
    Projections {
        xy: project(cloud, Plane::XY),
        xz: project(cloud, Plane::XZ),
        yz: project(cloud, Plane::YZ),
    }
}

/// Project an untyped table, which must have exactly three columns
pub fn project_table(table: &DMatrix<f64>) -> Result<Projections> {
    let cloud = PointCloud::try_from(table.clone())?;
    Ok(project_to_planes(&cloud))
}
