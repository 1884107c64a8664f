// crates/hj_reach/src/dynamics/systems/double_integrator.rs

//! 二阶积分器 `ẋ = v, v̇ = u`，`u ∈ [-a_max, a_max]`，无扰动

use crate::dynamics::{Dynamics, OptimizationMode};
use crate::sets::{BoxSet, ConvexSet};
use hj_foundation::HjResult;
use ndarray::{array, Array1, Array2, ArrayView1};

/// 二阶积分器
#[derive(Debug, Clone)]
pub struct DoubleIntegrator {
    control_space: BoxSet,
    disturbance_space: BoxSet,
    control_mode: OptimizationMode,
}

impl DoubleIntegrator {
    /// 以加速度上界与控制模式创建
    pub fn new(max_acceleration: f64, control_mode: OptimizationMode) -> HjResult<Self> {
        Ok(Self {
            control_space: BoxSet::interval(-max_acceleration, max_acceleration)?,
            disturbance_space: BoxSet::empty(),
            control_mode,
        })
    }
}

impl Default for DoubleIntegrator {
    fn default() -> Self {
        Self {
            control_space: BoxSet::unit(1),
            disturbance_space: BoxSet::empty(),
            control_mode: OptimizationMode::Max,
        }
    }
}

impl Dynamics for DoubleIntegrator {
    fn name(&self) -> &'static str {
        "DoubleIntegrator"
    }

    fn state_dim(&self) -> usize {
        2
    }

    fn open_loop_dynamics(&self, state: ArrayView1<f64>, _time: f64) -> Array1<f64> {
        array![state[1], 0.0]
    }

    fn control_jacobian(&self, _state: ArrayView1<f64>, _time: f64) -> Array2<f64> {
        array![[0.0], [1.0]]
    }

    fn disturbance_jacobian(&self, _state: ArrayView1<f64>, _time: f64) -> Array2<f64> {
        Array2::zeros((2, 0))
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
        self.control_mode.opposite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamiltonian_without_disturbance() {
        let sys = DoubleIntegrator::new(2.0, OptimizationMode::Min).unwrap();
        let state = array![0.0, 3.0];
        let grad = array![1.0, -1.0];
        // p·f = 3；最小化 p_v·u → u = +2，贡献 -2
        let h = sys.hamiltonian(state.view(), 0.0, grad.view());
        assert!((h - 1.0).abs() < 1e-12);

        let (u, d) = sys.optimal_control_and_disturbance(state.view(), 0.0, grad.view());
        assert_eq!(u, array![2.0]);
        assert_eq!(d.len(), 0);
    }

    #[test]
    fn test_partial_max_magnitudes() {
        let sys = DoubleIntegrator::default();
        let m = sys.partial_max_magnitudes(array![5.0, -3.0].view(), 0.0);
        assert_eq!(m, array![3.0, 1.0]);
    }

    #[test]
    fn test_rejects_negative_bound() {
        assert!(DoubleIntegrator::new(-1.0, OptimizationMode::Max).is_err());
    }
}
