// crates/hj_reach/src/dynamics/systems/dubins.rs

//! Dubins 车辆
//!
//! ```text
//! ẋ = v cos θ + d_x
//! ẏ = v sin θ + d_y
//! θ̇ = ω
//! ```
//!
//! 转向角速度 `ω ∈ [-ω_max, ω_max]` 为控制，平面速度扰动
//! `(d_x, d_y)` 位于半径 `d_max` 的圆盘内。

use crate::dynamics::{Dynamics, OptimizationMode};
use crate::sets::{Ball, BoxSet, ConvexSet};
use hj_foundation::{HjResult, Tolerance};
use ndarray::{array, Array1, Array2, ArrayView1};

/// Dubins 车辆
#[derive(Debug, Clone)]
pub struct DubinsCar {
    speed: f64,
    control_space: BoxSet,
    disturbance_space: Ball,
    control_mode: OptimizationMode,
    disturbance_mode: OptimizationMode,
}

impl DubinsCar {
    /// 创建车辆；默认控制最大化、扰动最小化（避障）
    pub fn new(speed: f64, max_turn_rate: f64, max_disturbance: f64) -> HjResult<Self> {
        Ok(Self {
            speed,
            control_space: BoxSet::interval(-max_turn_rate, max_turn_rate)?,
            disturbance_space: Ball::new(vec![0.0, 0.0], max_disturbance)?,
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

    /// 扰动球判定零方向时使用的容差，通常取 `SolverSettings::tolerance`
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.disturbance_space = self.disturbance_space.with_tolerance(tolerance);
        self
    }

    /// 前进速度
    pub fn speed(&self) -> f64 {
        self.speed
    }
}

impl Dynamics for DubinsCar {
    fn name(&self) -> &'static str {
        "DubinsCar"
    }

    fn state_dim(&self) -> usize {
        3
    }

    fn open_loop_dynamics(&self, state: ArrayView1<f64>, _time: f64) -> Array1<f64> {
        let theta = state[2];
        array![self.speed * theta.cos(), self.speed * theta.sin(), 0.0]
    }

    fn control_jacobian(&self, _state: ArrayView1<f64>, _time: f64) -> Array2<f64> {
        array![[0.0], [0.0], [1.0]]
    }

    fn disturbance_jacobian(&self, _state: ArrayView1<f64>, _time: f64) -> Array2<f64> {
        array![[1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]
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
