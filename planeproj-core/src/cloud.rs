/// Point cloud table: N rows of (X, Y, Z)
use std::fmt;

use nalgebra::{Const, DMatrix, Dyn, OMatrix, U3};

use crate::error::{CloudError, Extent, Result};

/// Backing storage of a cloud, column-major with a fixed width of three
pub type CloudMatrix = OMatrix<f64, Dyn, U3>;

/// Number of coordinate columns in a point cloud
pub const CLOUD_COLUMNS: usize = 3;

/// A coordinate axis, which is also a column of the cloud table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Column index of this axis in the cloud table
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An immutable, ordered table of 3-D points.
///
/// Column 0 is X, column 1 is Y, column 2 is Z. Rows keep the order in
/// which they were supplied. A cloud may have zero rows but always has
/// exactly three columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    matrix: CloudMatrix,
}

impl PointCloud {
    /// A cloud with zero rows and three columns
    pub fn empty() -> Self {
        Self {
            matrix: CloudMatrix::zeros_generic(Dyn(0), Const::<3>),
        }
    }

    /// Build a cloud from per-axis columns of equal length
    pub fn from_columns(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        let rows = x.len();
        if let Some(column) = [&y, &z].into_iter().find(|column| column.len() != rows) {
            return Err(CloudError::ShapeMismatch {
                extent: Extent::Rows,
                expected: rows,
                found: column.len(),
            });
        }

        let mut data = x;
        data.reserve(rows * 2);
        data.extend(y);
        data.extend(z);

        Ok(Self {
            matrix: CloudMatrix::from_vec_generic(Dyn(rows), Const::<3>, data),
        })
    }

    /// Build a cloud from rows that must each hold exactly three values
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        if let Some(bad) = rows.iter().find(|row| row.as_ref().len() != CLOUD_COLUMNS) {
            return Err(CloudError::column_count(CLOUD_COLUMNS, bad.as_ref().len()));
        }

        let matrix =
            CloudMatrix::from_fn_generic(Dyn(rows.len()), Const::<3>, |r, c| rows[r].as_ref()[c]);
        Ok(Self { matrix })
    }

    /// Build a cloud from flat row-major data `[x0, y0, z0, x1, y1, z1, ...]`
    pub fn from_row_slice(data: &[f64]) -> Result<Self> {
        if data.len() % CLOUD_COLUMNS != 0 {
            return Err(CloudError::invalid_argument(
                "data",
                format!("length {}", data.len()),
                "row-major xyz data must have a length divisible by 3",
            ));
        }

        let rows = data.len() / CLOUD_COLUMNS;
        Ok(Self {
            matrix: CloudMatrix::from_row_slice_generic(Dyn(rows), Const::<3>, data),
        })
    }

    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (rows, columns); the column count is always 3
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    /// All values of one axis in row order
    pub fn column(&self, axis: Axis) -> &[f64] {
        let rows = self.len();
        let start = axis.index() * rows;
        &self.matrix.as_slice()[start..start + rows]
    }

    pub fn point(&self, i: usize) -> Option<[f64; 3]> {
        (i < self.len()).then(|| [self.matrix[(i, 0)], self.matrix[(i, 1)], self.matrix[(i, 2)]])
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.matrix.row_iter().map(|row| [row[0], row[1], row[2]])
    }

    pub fn as_matrix(&self) -> &CloudMatrix {
        &self.matrix
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<CloudMatrix> for PointCloud {
    fn from(matrix: CloudMatrix) -> Self {
        Self { matrix }
    }
}

impl TryFrom<DMatrix<f64>> for PointCloud {
    type Error = CloudError;

    /// Accept an untyped table only when it has exactly three columns
    fn try_from(table: DMatrix<f64>) -> Result<Self> {
        if table.ncols() != CLOUD_COLUMNS {
            return Err(CloudError::column_count(CLOUD_COLUMNS, table.ncols()));
        }

        Ok(Self {
            matrix: table.fixed_columns::<3>(0).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fixture() -> PointCloud {
        PointCloud::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap()
    }

    #[test]
    fn test_empty_has_three_columns() {
        let cloud = PointCloud::empty();
        assert!(cloud.is_empty());
        assert_eq!(cloud.shape(), (0, 3));
        assert!(cloud.column(Axis::Z).is_empty());
        assert_eq!(cloud.iter_points().count(), 0);
    }

    #[test]
    fn test_from_rows_keeps_row_order() {
        let cloud = fixture();
        assert_eq!(cloud.shape(), (3, 3));
        assert_eq!(cloud.point(0), Some([1.0, 2.0, 3.0]));
        assert_eq!(cloud.point(2), Some([7.0, 8.0, 9.0]));
        assert_eq!(cloud.point(3), None);
        assert_eq!(cloud.column(Axis::X), &[1.0, 4.0, 7.0]);
        assert_eq!(cloud.column(Axis::Y), &[2.0, 5.0, 8.0]);
        assert_eq!(cloud.column(Axis::Z), &[3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_row() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]];
        assert_eq!(
            PointCloud::from_rows(&rows),
            Err(CloudError::column_count(3, 2))
        );
    }

    #[test]
    fn test_from_columns_matches_from_rows() {
        let cloud =
            PointCloud::from_columns(vec![1.0, 4.0, 7.0], vec![2.0, 5.0, 8.0], vec![3.0, 6.0, 9.0])
                .unwrap();
        assert_eq!(cloud, fixture());
    }

    #[test]
    fn test_from_columns_rejects_length_mismatch() {
        let err = PointCloud::from_columns(vec![1.0], vec![2.0, 3.0], vec![4.0]).unwrap_err();
        assert_eq!(
            err,
            CloudError::ShapeMismatch {
                extent: Extent::Rows,
                expected: 1,
                found: 2
            }
        );

        let err = PointCloud::from_columns(vec![1.0, 2.0], vec![3.0, 4.0], vec![]).unwrap_err();
        assert!(matches!(err, CloudError::ShapeMismatch { extent: Extent::Rows, .. }));
    }

    #[test]
    fn test_from_row_slice() {
        let cloud =
            PointCloud::from_row_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
        assert_eq!(cloud, fixture());
        assert!(PointCloud::from_row_slice(&[1.0, 2.0]).is_err());
        assert_eq!(PointCloud::from_row_slice(&[]).unwrap().shape(), (0, 3));
    }

    #[test]
    fn test_try_from_dmatrix_checks_width() {
        let table = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let cloud = PointCloud::try_from(table).unwrap();
        assert_eq!(cloud.point(1), Some([4.0, 5.0, 6.0]));

        let narrow = DMatrix::<f64>::zeros(4, 2);
        assert_eq!(
            PointCloud::try_from(narrow),
            Err(CloudError::column_count(3, 2))
        );
    }

    #[test]
    fn test_axis_indices() {
        let indices: Vec<usize> = Axis::ALL.iter().map(|a| a.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(Axis::Y.to_string(), "Y");
    }

    proptest! {
        #[test]
        fn rows_and_columns_agree(
            pts in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3, -1e3f64..1e3), 0..200)
        ) {
            let rows: Vec<[f64; 3]> = pts.iter().map(|&(x, y, z)| [x, y, z]).collect();
            let cloud = PointCloud::from_rows(&rows).unwrap();
            prop_assert_eq!(cloud.shape(), (rows.len(), 3));
            let collected: Vec<[f64; 3]> = cloud.iter_points().collect();
            prop_assert_eq!(&collected, &rows);
            for axis in Axis::ALL {
                let expected: Vec<f64> = rows.iter().map(|r| r[axis.index()]).collect();
                prop_assert_eq!(cloud.column(axis), expected.as_slice());
            }
        }
    }
}
