// crates/hj_reach/src/engine/hamiltonian.rs

//! Lax-Friedrichs 数值 Hamiltonian
//!
//! ```text
//! Ĥ(x) = s·H(x, t, (p⁻ + p⁺)/2) - ½ Σ_i α_i (p⁺_i - p⁻_i)
//! dV/dt = -post(s·Ĥ)
//! ```
//!
//! `s = sign(Δt)`：后向求解时对 Hamiltonian 取反，使耗散项在两个
//! 时间方向上都起稳定作用。`post` 为 [`HamiltonianPostprocessor`]。

use crate::dynamics::Dynamics;
use crate::grid::Grid;
use crate::numerics::upwind::UpwindGradients;
use hj_foundation::{ensure, HjError, HjResult};
use ndarray::{Array1, Array2, ArrayD, IxDyn, Zip};
use serde::{Deserialize, Serialize};

/// 作用于数值 Hamiltonian 的逐点变换
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HamiltonianPostprocessor {
    /// 不变换
    #[default]
    Identity,
    /// 后向可达管 `min(h, 0)`：值函数在后向时间上单调不增
    BackwardsReachableTube,
    /// 自定义变换（不可序列化）
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

impl HamiltonianPostprocessor {
    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::BackwardsReachableTube => "backwards_reachable_tube",
            Self::Custom(_) => "custom",
        }
    }

    /// 应用变换
    #[inline]
    pub fn apply(&self, h: f64) -> f64 {
        match self {
            Self::Identity => h,
            Self::BackwardsReachableTube => h.min(0.0),
            Self::Custom(f) => f(h),
        }
    }
}

impl PartialEq for HamiltonianPostprocessor {
    /// 自定义变换之间不可比较，视为不相等
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Identity, Self::Identity)
                | (Self::BackwardsReachableTube, Self::BackwardsReachableTube)
        )
    }
}

/// 计算全网格 `dV/dt`
///
/// `direction` 为时间方向符号（±1），`alpha` 形状 `(len, ndim)`。
/// 数值 Hamiltonian 出现 NaN/Inf 时返回 [`HjError::NonFiniteValues`]。
pub fn lax_friedrichs_rate(
    dynamics: &dyn Dynamics,
    grid: &Grid,
    time: f64,
    direction: f64,
    gradients: &UpwindGradients,
    alpha: &Array2<f64>,
    postprocessor: HamiltonianPostprocessor,
) -> HjResult<ArrayD<f64>> {
    let mut rate = Array1::<f64>::zeros(grid.len());
    Zip::from(&mut rate)
        .and(grid.states().rows())
        .and(gradients.left.rows())
        .and(gradients.right.rows())
        .and(alpha.rows())
        .par_for_each(|dvdt, state, left, right, a| {
            let central = (&left + &right) * 0.5;
            let h = direction * dynamics.hamiltonian(state, time, central.view());
            let dissipation: f64 = a
                .iter()
                .zip(right.iter().zip(left.iter()))
                .map(|(&a, (&r, &l))| a * (r - l))
                .sum();
            *dvdt = h - 0.5 * dissipation;
        });

    // 后处理（如 `min(h, 0)`）会吞掉 NaN，须在此之前检查
    ensure!(
        rate.iter().all(|h| h.is_finite()),
        HjError::non_finite("hamiltonian", time)
    );
    rate.par_mapv_inplace(|h| -postprocessor.apply(direction * h));

    rate.into_shape_with_order(IxDyn(grid.shape()))
        .map_err(|_| HjError::shape_mismatch("dvdt", grid.shape(), &[grid.len()]))
}
