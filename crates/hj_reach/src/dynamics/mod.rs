// crates/hj_reach/src/dynamics/mod.rs

//! 动力学模块
//!
//! 控制-扰动仿射系统：
//!
//! $$ \dot x = f(x, t) + G(x, t)\,u + D(x, t)\,d $$
//!
//! 具体系统实现 [`Dynamics`] trait 的必需方法（漂移、雅可比、空间、优化模式），
//! Hamiltonian、最优控制/扰动与 Lax-Friedrichs 所需的偏导数界由默认方法提供。
//!
//! # 优化模式
//!
//! | 问题 | 控制 | 扰动 |
//! |------|------|------|
//! | 安全（避开目标，后向可达管） | Max | Min |
//! | 到达（进入目标） | Min | Max |
//!
//! 模式在构造时固定，求解过程中不可更改。

pub mod systems;

use crate::sets::ConvexSet;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

pub use systems::{Air3d, DoubleIntegrator, DubinsCar, Integrator};

/// 控制/扰动的逐点优化方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMode {
    /// 最小化 Hamiltonian
    Min,
    /// 最大化 Hamiltonian
    Max,
}

impl OptimizationMode {
    /// 作用于方向向量的符号
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Self::Min => -1.0,
            Self::Max => 1.0,
        }
    }

    /// 相反模式
    pub fn opposite(&self) -> Self {
        match self {
            Self::Min => Self::Max,
            Self::Max => Self::Min,
        }
    }
}

impl std::str::FromStr for OptimizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "min" | "minimize" => Ok(Self::Min),
            "max" | "maximize" => Ok(Self::Max),
            _ => Err(format!("未知优化模式: {s}")),
        }
    }
}

/// 控制-扰动仿射动力学能力接口
///
/// 实现者必须对网格可能产生的每个状态（包括周期回绕点）给出有定义的结果，
/// 所有方法无副作用。
pub trait Dynamics: Send + Sync {
    /// 系统名称
    fn name(&self) -> &'static str;

    /// 状态维度
    fn state_dim(&self) -> usize;

    /// 开环漂移 `f(x, t)`，长度 `state_dim`
    fn open_loop_dynamics(&self, state: ArrayView1<f64>, time: f64) -> Array1<f64>;

    /// 控制雅可比 `G(x, t)`，形状 `(state_dim, control_dim)`
    fn control_jacobian(&self, state: ArrayView1<f64>, time: f64) -> Array2<f64>;

    /// 扰动雅可比 `D(x, t)`，形状 `(state_dim, disturbance_dim)`
    fn disturbance_jacobian(&self, state: ArrayView1<f64>, time: f64) -> Array2<f64>;

    /// 控制空间
    fn control_space(&self) -> &dyn ConvexSet;

    /// 扰动空间
    fn disturbance_space(&self) -> &dyn ConvexSet;

    /// 控制优化模式
    fn control_mode(&self) -> OptimizationMode;

    /// 扰动优化模式
    fn disturbance_mode(&self) -> OptimizationMode;

    /// 闭环向量场 `f + G u + D d`
    fn evaluate(
        &self,
        state: ArrayView1<f64>,
        control: ArrayView1<f64>,
        disturbance: ArrayView1<f64>,
        time: f64,
    ) -> Array1<f64> {
        self.open_loop_dynamics(state, time)
            + self.control_jacobian(state, time).dot(&control)
            + self.disturbance_jacobian(state, time).dot(&disturbance)
    }

    /// 给定值函数梯度时的最优控制与最优扰动
    ///
    /// 控制方向为 `Gᵀ∇V`（最小化模式取反），取控制空间的支撑点；扰动同理。
    fn optimal_control_and_disturbance(
        &self,
        state: ArrayView1<f64>,
        time: f64,
        grad_value: ArrayView1<f64>,
    ) -> (Array1<f64>, Array1<f64>) {
        let control_direction = self.control_jacobian(state, time).t().dot(&grad_value)
            * self.control_mode().sign();
        let disturbance_direction = self.disturbance_jacobian(state, time).t().dot(&grad_value)
            * self.disturbance_mode().sign();
        (
            self.control_space().extreme_point(control_direction.view()),
            self.disturbance_space()
                .extreme_point(disturbance_direction.view()),
        )
    }

    /// Hamiltonian `H(x, t, p) = p · (f + G u* + D d*)`
    fn hamiltonian(&self, state: ArrayView1<f64>, time: f64, grad_value: ArrayView1<f64>) -> f64 {
        let (control, disturbance) = self.optimal_control_and_disturbance(state, time, grad_value);
        grad_value.dot(&self.evaluate(state, control.view(), disturbance.view(), time))
    }

    /// `|∂H/∂p_i|` 的逐轴上界
    ///
    /// `|f| + |G|·max|u| + |D|·max|d|`，用作 Lax-Friedrichs 耗散系数。
    fn partial_max_magnitudes(&self, state: ArrayView1<f64>, time: f64) -> Array1<f64> {
        let control_bound = self.control_space().max_magnitudes();
        let disturbance_bound = self.disturbance_space().max_magnitudes();
        self.open_loop_dynamics(state, time).mapv(f64::abs)
            + self
                .control_jacobian(state, time)
                .mapv(f64::abs)
                .dot(&control_bound)
            + self
                .disturbance_jacobian(state, time)
                .mapv(f64::abs)
                .dot(&disturbance_bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_sign_and_parse() {
        assert_eq!(OptimizationMode::Min.sign(), -1.0);
        assert_eq!(OptimizationMode::Max.opposite(), OptimizationMode::Min);
        assert_eq!("MAX".parse::<OptimizationMode>().unwrap(), OptimizationMode::Max);
        assert!("sideways".parse::<OptimizationMode>().is_err());
    }
}
