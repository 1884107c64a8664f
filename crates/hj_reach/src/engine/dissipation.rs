// crates/hj_reach/src/engine/dissipation.rs

//! Lax-Friedrichs 人工耗散
//!
//! 耗散系数 `α_i(x)` 是 `|∂H/∂p_i|` 的上界，由
//! [`Dynamics::partial_max_magnitudes`] 逐点给出：
//!
//! - `Global`: 每轴取全网格最大值，所有点共用
//! - `Local`: 逐点使用自身的上界，数值粘性更小
//!
//! 两者都保证单调性；全局形式更稳健，是所有精度档位的默认值。

use crate::dynamics::Dynamics;
use crate::grid::Grid;
use hj_foundation::{ensure, HjError, HjResult};
use ndarray::{Array2, Axis, Zip};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// 人工耗散类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtificialDissipation {
    /// 全局 Lax-Friedrichs
    #[default]
    Global,
    /// 局部 Lax-Friedrichs
    Local,
}

impl ArtificialDissipation {
    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Global => "global_lax_friedrichs",
            Self::Local => "local_lax_friedrichs",
        }
    }

    /// 计算耗散系数，形状 `(len, ndim)`，行顺序与 [`Grid::states`] 一致
    ///
    /// 任一系数非有限时返回 [`HjError::NonFiniteValues`]；`f64::max` 会跳过
    /// NaN，所以检查放在全局归约之前。
    pub fn coefficients(
        &self,
        dynamics: &dyn Dynamics,
        grid: &Grid,
        time: f64,
    ) -> HjResult<Array2<f64>> {
        let mut alpha = Array2::zeros((grid.len(), grid.ndim()));
        Zip::from(alpha.rows_mut())
            .and(grid.states().rows())
            .par_for_each(|mut row, state| {
                row.assign(&dynamics.partial_max_magnitudes(state, time));
            });
        ensure!(
            alpha.iter().all(|a| a.is_finite()),
            HjError::non_finite("dissipation", time)
        );

        if let Self::Global = self {
            let axis_max = alpha.fold_axis(Axis(0), 0.0_f64, |&acc, &a| acc.max(a));
            alpha.rows_mut().into_iter().for_each(|mut row| row.assign(&axis_max));
        }
        Ok(alpha)
    }
}

/// CFL 分母 `max_x Σ_i α_i(x) / Δx_i`
pub fn max_scaled_dissipation(alpha: &Array2<f64>, spacings: &[f64]) -> f64 {
    alpha
        .axis_iter(Axis(0))
        .into_par_iter()
        .map(|row| {
            row.iter()
                .zip(spacings)
                .map(|(&a, &dx)| a / dx)
                .sum::<f64>()
        })
        .reduce(|| 0.0, f64::max)
}
