// crates/hj_reach/src/dynamics/systems/integrator.rs

//! n 维积分器 `ẋ = c + u + d`
//!
//! 常漂移 `c`，控制与扰动均为对称盒。半径取零时退化为纯平移，
//! 值函数沿 `c` 以固定速度输运。

use crate::dynamics::{Dynamics, OptimizationMode};
use crate::sets::{BoxSet, ConvexSet};
use hj_foundation::{HjError, HjResult};
use ndarray::{Array1, Array2, ArrayView1};

/// n 维积分器
#[derive(Debug, Clone)]
pub struct Integrator {
    drift: Array1<f64>,
    control_space: BoxSet,
    disturbance_space: BoxSet,
    control_mode: OptimizationMode,
    disturbance_mode: OptimizationMode,
}

impl Integrator {
    /// 创建积分器
    ///
    /// `control_radii` 与 `disturbance_radii` 长度须与 `drift` 一致。
    pub fn new(
        drift: impl Into<Array1<f64>>,
        control_radii: impl Into<Array1<f64>>,
        disturbance_radii: impl Into<Array1<f64>>,
        control_mode: OptimizationMode,
        disturbance_mode: OptimizationMode,
    ) -> HjResult<Self> {
        let drift = drift.into();
        let control_space = BoxSet::symmetric(control_radii)?;
        let disturbance_space = BoxSet::symmetric(disturbance_radii)?;
        HjError::check_dim("control radii", drift.len(), control_space.ndim())?;
        HjError::check_dim("disturbance radii", drift.len(), disturbance_space.ndim())?;
        Ok(Self {
            drift,
            control_space,
            disturbance_space,
            control_mode,
            disturbance_mode,
        })
    }

    /// 纯平移 `ẋ = c`
    pub fn translation(velocity: impl Into<Array1<f64>>) -> HjResult<Self> {
        let drift = velocity.into();
        let zeros = Array1::zeros(drift.len());
        Self::new(
            drift,
            zeros.clone(),
            zeros,
            OptimizationMode::Max,
            OptimizationMode::Min,
        )
    }

    /// 零动力学：值函数保持不变
    pub fn stationary(ndim: usize) -> HjResult<Self> {
        Self::translation(Array1::zeros(ndim))
    }

    /// 常漂移
    pub fn drift(&self) -> &Array1<f64> {
        &self.drift
    }
}

impl Dynamics for Integrator {
    fn name(&self) -> &'static str {
        "Integrator"
    }

    fn state_dim(&self) -> usize {
        self.drift.len()
    }

    fn open_loop_dynamics(&self, _state: ArrayView1<f64>, _time: f64) -> Array1<f64> {
        self.drift.clone()
    }

    fn control_jacobian(&self, _state: ArrayView1<f64>, _time: f64) -> Array2<f64> {
        Array2::eye(self.drift.len())
    }

    fn disturbance_jacobian(&self, _state: ArrayView1<f64>, _time: f64) -> Array2<f64> {
        Array2::eye(self.drift.len())
    }

    fn control_space(&self) -> &dyn ConvexSet {
        &self.control_space
    }

    fn disturbance_space(&self) -> &dyn ConvexSet {
        &self.disturbance_space
    }

    fn control_mode(&self) -> OptimizationMode {
        self.control_mode
    }

    fn disturbance_mode(&self) -> OptimizationMode {
        self.disturbance_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_translation_hamiltonian() {
        let sys = Integrator::translation(vec![2.0, -1.0]).unwrap();
        let h = sys.hamiltonian(array![0.0, 0.0].view(), 0.0, array![1.0, 1.0].view());
        assert!((h - 1.0).abs() < 1e-12);
        assert_eq!(
            sys.partial_max_magnitudes(array![0.0, 0.0].view(), 0.0),
            array![2.0, 1.0]
        );
    }

    #[test]
    fn test_game_hamiltonian() {
        // 控制 |u| ≤ 2 最大化，扰动 |d| ≤ 0.5 最小化：H = |p|·(2 - 0.5)
        let sys = Integrator::new(
            vec![0.0],
            vec![2.0],
            vec![0.5],
            OptimizationMode::Max,
            OptimizationMode::Min,
        )
        .unwrap();
        let h = sys.hamiltonian(array![0.0].view(), 0.0, array![-3.0].view());
        assert!((h - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_checks() {
        assert!(Integrator::new(
            vec![0.0, 0.0],
            vec![1.0],
            vec![1.0, 1.0],
            OptimizationMode::Max,
            OptimizationMode::Min
        )
        .is_err());
        assert_eq!(Integrator::stationary(3).unwrap().state_dim(), 3);
    }
}
