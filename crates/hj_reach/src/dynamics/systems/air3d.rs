// crates/hj_reach/src/dynamics/systems/air3d.rs

//! Air3d 追逃系统
//!
//! 以追捕者为原点的相对坐标 `(x, y, ψ)`：
//!
//! ```text
//! ẋ = -v_a + v_b cos ψ + a·y
//! ẏ =  v_b sin ψ       - a·x
//! ψ̇ =                   - a   + b
//! ```
//!
//! `a` 为逃逸者（控制）角速度，`b` 为追捕者（扰动）角速度。
//! 默认控制最大化、扰动最小化，用于计算捕获集的后向可达管。
//! `ψ` 为周期坐标。
//!
//! ## 参考文献
//!
//! Mitchell, I. M., Bayen, A. M., & Tomlin, C. J. (2005). A time-dependent
//! Hamilton-Jacobi formulation of reachable sets for continuous dynamic games.
//! IEEE TAC, 50(7), 947-957.

use crate::dynamics::{Dynamics, OptimizationMode};
use crate::sets::{BoxSet, ConvexSet};
use hj_foundation::HjResult;
use ndarray::{array, Array1, Array2, ArrayView1};

/// Air3d 追逃动力学
#[derive(Debug, Clone)]
pub struct Air3d {
    evader_speed: f64,
    pursuer_speed: f64,
    control_space: BoxSet,
    disturbance_space: BoxSet,
    control_mode: OptimizationMode,
    disturbance_mode: OptimizationMode,
}

impl Air3d {
    /// 创建系统
    ///
    /// 转向角速度上界构成对称区间控制/扰动空间。
    pub fn new(
        evader_max_turn_rate: f64,
        pursuer_max_turn_rate: f64,
        evader_speed: f64,
        pursuer_speed: f64,
    ) -> HjResult<Self> {
        Ok(Self {
            evader_speed,
            pursuer_speed,
            control_space: BoxSet::interval(-evader_max_turn_rate, evader_max_turn_rate)?,
            disturbance_space: BoxSet::interval(-pursuer_max_turn_rate, pursuer_max_turn_rate)?,
            control_mode: OptimizationMode::Max,
            disturbance_mode: OptimizationMode::Min,
        })
    }

    /// 设置优化模式
    pub fn with_modes(mut self, control: OptimizationMode, disturbance: OptimizationMode) -> Self {
        self.control_mode = control;
        self.disturbance_mode = disturbance;
        self
    }

    /// 逃逸者速度
    pub fn evader_speed(&self) -> f64 {
        self.evader_speed
    }

    /// 追捕者速度
    pub fn pursuer_speed(&self) -> f64 {
        self.pursuer_speed
    }
}

impl Default for Air3d {
    /// 角速度上界 1 rad/s，两者速度 5
    fn default() -> Self {
        Self {
            evader_speed: 5.0,
            pursuer_speed: 5.0,
            control_space: BoxSet::unit(1),
            disturbance_space: BoxSet::unit(1),
            control_mode: OptimizationMode::Max,
            disturbance_mode: OptimizationMode::Min,
        }
    }
}

impl Dynamics for Air3d {
    fn name(&self) -> &'static str {
        "Air3d"
    }

    fn state_dim(&self) -> usize {
        3
    }

    fn open_loop_dynamics(&self, state: ArrayView1<f64>, _time: f64) -> Array1<f64> {
        let psi = state[2];
        array![
            -self.evader_speed + self.pursuer_speed * psi.cos(),
            self.pursuer_speed * psi.sin(),
            0.0
        ]
    }

    fn control_jacobian(&self, state: ArrayView1<f64>, _time: f64) -> Array2<f64> {
        array![[state[1]], [-state[0]], [-1.0]]
    }

    fn disturbance_jacobian(&self, _state: ArrayView1<f64>, _time: f64) -> Array2<f64> {
        array![[0.0], [0.0], [1.0]]
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
