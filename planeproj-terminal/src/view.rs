/// Orbit state and orthographic camera for the 3-D scatter panel
use nalgebra::{Matrix3, Vector3};

/// Default elevation in degrees, looking slightly down onto the XY plane
pub const DEFAULT_ELEVATION: f64 = 30.0;
/// Default azimuth in degrees
pub const DEFAULT_AZIMUTH: f64 = -60.0;

/// Viewing angles around the cloud (in degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub elevation: f64,
    pub azimuth: f64,
}

impl OrbitState {
    pub fn new(elevation: f64, azimuth: f64) -> Self {
        let mut state = Self {
            elevation: 0.0,
            azimuth: 0.0,
        };
        state.orbit(elevation, azimuth);
        state
    }

    /// Orbit by delta amounts (in degrees).
    ///
    /// Elevation is clamped to [-90, 90]; azimuth wraps into [-180, 180).
    pub fn orbit(&mut self, d_elevation: f64, d_azimuth: f64) {
        self.elevation = (self.elevation + d_elevation).clamp(-90.0, 90.0);
        self.azimuth = (self.azimuth + d_azimuth + 180.0).rem_euclid(360.0) - 180.0;
    }
}

impl Default for OrbitState {
    fn default() -> Self {
        Self::new(DEFAULT_ELEVATION, DEFAULT_AZIMUTH)
    }
}

/// Orthographic camera orbiting the origin of a normalized cube
#[derive(Debug, Clone, Copy, Default)]
pub struct OrbitCamera {
    pub orbit: OrbitState,
}

impl OrbitCamera {
    pub fn new(orbit: OrbitState) -> Self {
        Self { orbit }
    }

    /// Rows are the screen-right, screen-up and toward-viewer directions
    pub fn view_matrix(&self) -> Matrix3<f64> {
        let elev = self.orbit.elevation.to_radians();
        let azim = self.orbit.azimuth.to_radians();
        let (se, ce) = elev.sin_cos();
        let (sa, ca) = azim.sin_cos();

        Matrix3::new(
            -sa, ca, 0.0, //
            -se * ca, -se * sa, ce, //
            ce * ca, ce * sa, se,
        )
    }

    /// Project a point of the normalized cube to (right, up, depth).
    ///
    /// Larger depth is closer to the viewer.
    pub fn project(&self, point: &Vector3<f64>) -> (f64, f64, f64) {
        let view = self.view_matrix() * point;
        (view.x, view.y, view.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_orbit() {
        let state = OrbitState::default();
        assert_eq!(state.elevation, DEFAULT_ELEVATION);
        assert_eq!(state.azimuth, DEFAULT_AZIMUTH);
    }

    #[test]
    fn test_orbit_clamps_and_wraps() {
        let mut state = OrbitState::new(80.0, 170.0);
        state.orbit(30.0, 20.0);
        assert_eq!(state.elevation, 90.0);
        assert!(approx(state.azimuth, -170.0));

        state.orbit(-200.0, -20.0);
        assert_eq!(state.elevation, -90.0);
        assert!(approx(state.azimuth, 170.0));
    }

    #[test]
    fn test_view_matrix_is_orthonormal() {
        let camera = OrbitCamera::default();
        let view = camera.view_matrix();
        assert!((view * view.transpose() - Matrix3::identity()).norm() < 1e-9);
        assert!(approx(view.determinant(), 1.0));
    }

    #[test]
    fn test_side_view_maps_axes() {
        // Looking down the +X axis: Y is to the right, Z is up
        let camera = OrbitCamera::new(OrbitState::new(0.0, 0.0));
        let (right, up, depth) = camera.project(&Vector3::new(0.0, 1.0, 0.0));
        assert!(approx(right, 1.0) && approx(up, 0.0) && approx(depth, 0.0));

        let (right, up, _) = camera.project(&Vector3::new(0.0, 0.0, 1.0));
        assert!(approx(right, 0.0) && approx(up, 1.0));

        let (_, _, depth) = camera.project(&Vector3::new(1.0, 0.0, 0.0));
        assert!(approx(depth, 1.0));
    }
}
