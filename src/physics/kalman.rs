//! Kalman Filter for joint position stabilization
//!
//! State vector: [x, y, vx, vy]ᵀ (constant-velocity model)
//! Observation: [x, y] in pixels, one measurement per processed frame.
//! Stabilizes a single 2D landmark for display; independent of the
//! scalar metric filter.

use nalgebra::{SMatrix, SVector};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, TrackerError};
use crate::physics::geometry::Point;

/// 4-element state vector type
type State = SVector<f32, 4>;
/// 4x4 matrix type
type Matrix4 = SMatrix<f32, 4, 4>;
/// 2x4 matrix type (observation)
type Matrix2x4 = SMatrix<f32, 2, 4>;
/// 4x2 matrix type (Kalman gain)
type Matrix4x2 = SMatrix<f32, 4, 2>;
/// 2x2 matrix type
type Matrix2 = SMatrix<f32, 2, 2>;
/// 2-element vector type
type Vector2 = SVector<f32, 2>;

/// Initial position/velocity uncertainty after construction or reset
const INITIAL_UNCERTAINTY: f32 = 500.0;

/// Stabilizer parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KalmanConfig {
    /// Frame interval (seconds)
    pub dt: f32,
    /// Process noise variance (diagonal)
    pub process_var: f32,
    /// Measurement noise variance (pixels², diagonal)
    pub measurement_var: f32,
}

impl Default for KalmanConfig {
    fn default() -> Self {
        Self {
            dt: 1.0 / 30.0,
            process_var: 1e-2,
            measurement_var: 5.0,
        }
    }
}

impl KalmanConfig {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("dt", self.dt),
            ("process_var", self.process_var),
            ("measurement_var", self.measurement_var),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(TrackerError::InvalidConfig(format!(
                    "stabilizer.{name} must be strictly positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Constant-velocity Kalman filter for one 2D point
///
/// Call [`predict`](Self::predict) then [`update`](Self::update) once per
/// frame. Call [`reset`](Self::reset) whenever the measured point comes
/// from a new source.
#[derive(Debug, Clone)]
pub struct KalmanFilter {
    config: KalmanConfig,

    /// State: [x, y, vx, vy]
    state: State,

    /// State covariance matrix (uncertainty)
    covariance: Matrix4,

    /// Process noise
    process_noise: Matrix4,

    /// Measurement noise covariance
    measurement_noise: Matrix2,
}

impl KalmanFilter {
    pub fn new(config: KalmanConfig) -> Self {
        Self {
            config,
            state: State::zeros(),
            covariance: Matrix4::identity() * INITIAL_UNCERTAINTY,
            process_noise: Matrix4::identity() * config.process_var,
            measurement_noise: Matrix2::identity() * config.measurement_var,
        }
    }

    /// Build transition matrix F
    ///
    /// ```text
    /// | 1  0  dt 0  |
    /// | 0  1  0  dt |
    /// | 0  0  1  0  |
    /// | 0  0  0  1  |
    /// ```
    fn transition_matrix(dt: f32) -> Matrix4 {
        Matrix4::new(
            1.0, 0.0, dt,  0.0,
            0.0, 1.0, 0.0, dt,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Observation matrix H (we only measure x, y)
    fn observation_matrix() -> Matrix2x4 {
        Matrix2x4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
        )
    }

    /// Predict step: x = F·x, P = F·P·Fᵀ + Q
    ///
    /// Returns the predicted position.
    pub fn predict(&mut self) -> Point {
        let f = Self::transition_matrix(self.config.dt);
        self.state = f * self.state;
        self.covariance = f * self.covariance * f.transpose() + self.process_noise;
        self.position()
    }

    /// Update step with a measured position
    ///
    /// Covariance uses the Joseph form `(I-KH)·P·(I-KH)ᵀ + K·R·Kᵀ`, which
    /// keeps P symmetric. Returns the corrected position.
    pub fn update(&mut self, measurement: Point) -> Point {
        let h = Self::observation_matrix();
        let z = Vector2::new(measurement.0, measurement.1);

        // Innovation: y = z - H·x
        let innovation = z - h * self.state;

        // Innovation covariance: S = H·P·Hᵀ + R
        let s = h * self.covariance * h.transpose() + self.measurement_noise;

        let Some(s_inv) = s.try_inverse() else {
            warn!("singular innovation covariance, skipping correction");
            return self.position();
        };

        // Kalman gain: K = P·Hᵀ·S⁻¹
        let k: Matrix4x2 = self.covariance * h.transpose() * s_inv;

        self.state += k * innovation;

        let i_kh = Matrix4::identity() - k * h;
        self.covariance = i_kh * self.covariance * i_kh.transpose()
            + k * self.measurement_noise * k.transpose();

        self.position()
    }

    /// Reinitialize to zero state with high uncertainty, same parameters
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Current position estimate
    pub fn position(&self) -> Point {
        (self.state[0], self.state[1])
    }

    /// Current velocity estimate (pixels / second)
    pub fn velocity(&self) -> Point {
        (self.state[2], self.state[3])
    }

    /// Sum of state variances, a scalar measure of uncertainty
    pub fn covariance_trace(&self) -> f32 {
        self.covariance.trace()
    }

    pub fn config(&self) -> &KalmanConfig {
        &self.config
    }
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self::new(KalmanConfig::default())
    }
}
