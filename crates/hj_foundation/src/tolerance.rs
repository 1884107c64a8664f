// crates/hj_foundation/src/tolerance.rs

//! 数值容差配置
//!
//! 容差通过参数注入（`SolverSettings::tolerance`）传递，不使用全局变量。

use serde::{Deserialize, Serialize};

/// 数值容差
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// WENO 光滑指示子的相对正则项
    pub weno_epsilon: f64,
    /// 耗散系数之和低于此值时视为无 CFL 约束
    pub min_dissipation: f64,
    /// 方向向量范数低于此值时视为零方向
    pub zero_direction: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            weno_epsilon: 1e-6,
            min_dissipation: 1e-14,
            zero_direction: 1e-12,
        }
    }
}

impl Tolerance {
    /// 创建保守配置（更严格的容差）
    pub fn conservative() -> Self {
        Self {
            weno_epsilon: 1e-8,
            min_dissipation: 1e-16,
            zero_direction: 1e-14,
        }
    }

    /// 耗散系数是否可忽略
    #[inline]
    pub fn is_negligible_dissipation(&self, value: f64) -> bool {
        value.abs() < self.min_dissipation
    }

    /// 方向是否可视为零
    #[inline]
    pub fn is_zero_direction(&self, norm: f64) -> bool {
        norm < self.zero_direction
    }
}
