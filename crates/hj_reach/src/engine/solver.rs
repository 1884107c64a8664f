// crates/hj_reach/src/engine/solver.rs

//! HJ PDE 求解入口
//!
//! - [`step`]: 把值函数从 `time` 推进到 `target_time`
//! - [`solve`]: 依次推进到时间序列中的每个采样点
//!
//! 时间方向由 `sign(target_time - time)` 决定，无需单独的前向/后向标志。
//! 所有用法错误（形状、维度、时间序列、配置）在入口处急切检查。

use super::dissipation::max_scaled_dissipation;
use super::hamiltonian::lax_friedrichs_rate;
use super::time_integrator::{create_integrator, Rhs, RhsComputer};
use super::timestep::CflCalculator;
use crate::builder::SolverSettings;
use crate::dynamics::Dynamics;
use crate::grid::Grid;
use crate::numerics::upwind::{create_stencil, upwind_gradients, UpwindStencil};
use hj_foundation::{ensure, HjError, HjResult};
use ndarray::{stack, ArrayD, ArrayView, Axis, IxDyn};
use std::time::Instant;

// ============================================================
// 右端项
// ============================================================

/// `dV/dt` 的空间离散
struct HjRhs<'a> {
    settings: &'a SolverSettings,
    dynamics: &'a dyn Dynamics,
    grid: &'a Grid,
    stencil: Box<dyn UpwindStencil>,
}

impl RhsComputer for HjRhs<'_> {
    fn compute_rhs(&self, time: f64, values: &ArrayD<f64>, direction: f64) -> HjResult<Rhs> {
        let gradients = upwind_gradients(self.grid, values, self.stencil.as_ref());
        let alpha = self
            .settings
            .artificial_dissipation
            .coefficients(self.dynamics, self.grid, time)?;
        let max_scaled = max_scaled_dissipation(&alpha, self.grid.spacings());
        ensure!(max_scaled.is_finite(), HjError::non_finite("dissipation", time));

        let dvdt = lax_friedrichs_rate(
            self.dynamics,
            self.grid,
            time,
            direction,
            &gradients,
            &alpha,
            self.settings.hamiltonian_postprocessor,
        )?;
        Ok(Rhs {
            dvdt,
            max_scaled_dissipation: max_scaled,
        })
    }
}

// ============================================================
// 入口
// ============================================================

fn check_inputs(
    settings: &SolverSettings,
    dynamics: &dyn Dynamics,
    grid: &Grid,
    time: f64,
    values: &ArrayD<f64>,
) -> HjResult<()> {
    grid.check_values("values", values)?;
    check_dynamics(dynamics, grid, time)?;
    settings.validate()?;
    settings.value_postprocessor.check(grid)
}

/// 在第一个网格点上求值一次，核对漂移与 Jacobian 的维度
fn check_dynamics(dynamics: &dyn Dynamics, grid: &Grid, time: f64) -> HjResult<()> {
    let n = grid.ndim();
    HjError::check_dim("dynamics state", n, dynamics.state_dim())?;

    let state = grid.states().row(0);
    let drift = dynamics.open_loop_dynamics(state, time);
    HjError::check_dim("open_loop_dynamics", n, drift.len())?;

    let g = dynamics.control_jacobian(state, time);
    HjError::check_dim("control_jacobian rows", n, g.nrows())?;
    HjError::check_dim("control_jacobian cols", dynamics.control_space().ndim(), g.ncols())?;

    let d = dynamics.disturbance_jacobian(state, time);
    HjError::check_dim("disturbance_jacobian rows", n, d.nrows())?;
    HjError::check_dim(
        "disturbance_jacobian cols",
        dynamics.disturbance_space().ndim(),
        d.ncols(),
    )
}

/// 把值函数从 `time` 推进到 `target_time`
///
/// `target_time < time` 时后向求解。`target_time == time` 时直接返回
/// `values` 的副本。每个子步长为
/// `min(cfl / max_x Σ_i α_i/Δx_i, |target_time - t|)`，末步精确落在
/// `target_time` 上；子步结束后应用值函数后处理。
///
/// # 错误
///
/// - [`HjError::ShapeMismatch`]: `values` 或障碍数组形状与网格不一致
/// - [`HjError::DimensionMismatch`]: 动力学的状态维度、漂移长度或 Jacobian
///   形状与网格及控制/扰动空间不一致
/// - [`HjError::InvalidConfig`]: 设置无效或时间非有限
/// - [`HjError::NonFiniteValues`]: 推进过程中出现 NaN/Inf
pub fn step(
    settings: &SolverSettings,
    dynamics: &dyn Dynamics,
    grid: &Grid,
    time: f64,
    values: &ArrayD<f64>,
    target_time: f64,
) -> HjResult<ArrayD<f64>> {
    ensure!(
        time.is_finite() && target_time.is_finite(),
        HjError::invalid_config("time", format!("{time} -> {target_time}"), "时间必须为有限值")
    );
    check_inputs(settings, dynamics, grid, time, values)?;

    if time == target_time {
        return Ok(values.clone());
    }

    let rhs = HjRhs {
        settings,
        dynamics,
        grid,
        stencil: create_stencil(settings.upwind_scheme, &settings.tolerance),
    };
    let integrator = create_integrator(settings.time_integrator);
    let cfl = CflCalculator::new(settings.cfl_number, settings.tolerance);

    let start = Instant::now();
    let mut t = time;
    let mut v = values.clone();
    let mut n_sub_steps = 0usize;

    loop {
        let (sub, next) = integrator.advance(&rhs, &cfl, t, &v, target_time)?;
        ensure!(
            sub.end_time != t,
            HjError::invalid_config(
                "cfl_number",
                settings.cfl_number.to_string(),
                format!("t={t} 处步长 {:e} 过小，时间无法推进", sub.dt)
            )
        );
        if n_sub_steps == 0 && sub.is_suspicious(target_time - time) {
            log::warn!(
                "CFL 步长 {:.3e} 过小: 区间 {:.4} -> {:.4} 预计需要 {:.0} 个子步",
                sub.dt,
                time,
                target_time,
                sub.estimated_count(target_time - time)
            );
        }
        v = settings.value_postprocessor.apply(sub.end_time, next);
        ensure!(
            v.iter().all(|x| x.is_finite()),
            HjError::non_finite("step", sub.end_time)
        );
        t = sub.end_time;
        n_sub_steps += 1;
        log::debug!("{} 子步 {}: t={:.6}, dt={:.3e}", integrator.name(), n_sub_steps, t, sub.dt);
        if sub.reaches(target_time) {
            break;
        }
    }

    log::info!(
        "step {:.4} -> {:.4}: {} 个子步, {} + {}, 耗时 {:.2?}",
        time,
        target_time,
        n_sub_steps,
        rhs.stencil.name(),
        integrator.name(),
        start.elapsed()
    );
    Ok(v)
}

/// 检查时间序列非空且严格单调
fn check_time_sequence(times: &[f64]) -> HjResult<()> {
    ensure!(!times.is_empty(), HjError::EmptyTimeSequence);
    for (index, &t) in times.iter().enumerate() {
        ensure!(
            t.is_finite(),
            HjError::invalid_time_sequence(index, times[index.saturating_sub(1)], t)
        );
    }
    let Some(direction) = times.get(1).map(|&t1| (t1 - times[0]).signum()) else {
        return Ok(());
    };
    for (index, pair) in times.windows(2).enumerate() {
        let delta = pair[1] - pair[0];
        ensure!(
            delta != 0.0 && delta.signum() == direction,
            HjError::invalid_time_sequence(index + 1, pair[0], pair[1])
        );
    }
    Ok(())
}

/// 依次求解时间序列上的值函数
///
/// `times` 须非空且严格单调（递增或递减）。结果第 0 项是
/// `initial_values` 的精确副本，第 k 项为从第 k-1 项 [`step`] 到 `times[k]`。
pub fn solve(
    settings: &SolverSettings,
    dynamics: &dyn Dynamics,
    grid: &Grid,
    times: &[f64],
    initial_values: &ArrayD<f64>,
) -> HjResult<Solution> {
    check_time_sequence(times)?;
    check_inputs(settings, dynamics, grid, times[0], initial_values)?;

    let start = Instant::now();
    let mut values = Vec::with_capacity(times.len());
    values.push(initial_values.clone());
    for (k, pair) in times.windows(2).enumerate() {
        let next = step(settings, dynamics, grid, pair[0], &values[k], pair[1])?;
        log::info!("采样 {}/{}: t={:.4}", k + 1, times.len() - 1, pair[1]);
        values.push(next);
    }

    log::info!(
        "solve 完成: {} 个采样, {} 网格点, 耗时 {:.2?}",
        times.len(),
        grid.len(),
        start.elapsed()
    );
    Ok(Solution {
        times: times.to_vec(),
        values,
    })
}

// ============================================================
// 结果
// ============================================================

/// 时间序列上的值函数
#[derive(Debug, Clone)]
pub struct Solution {
    times: Vec<f64>,
    values: Vec<ArrayD<f64>>,
}

impl Solution {
    /// 采样时刻
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// 各时刻值函数
    pub fn values(&self) -> &[ArrayD<f64>] {
        &self.values
    }

    /// 采样数
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空（由 [`solve`] 构造时总是非空）
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 第 k 个采样
    pub fn get(&self, k: usize) -> Option<&ArrayD<f64>> {
        self.values.get(k)
    }

    /// 初始值函数
    pub fn first(&self) -> Option<&ArrayD<f64>> {
        self.values.first()
    }

    /// 最终值函数
    pub fn last(&self) -> Option<&ArrayD<f64>> {
        self.values.last()
    }

    /// 迭代 `(time, values)`
    pub fn iter(&self) -> impl Iterator<Item = (f64, &ArrayD<f64>)> {
        self.times.iter().copied().zip(&self.values)
    }

    /// 沿新的首轴堆叠为 `(len, *grid.shape)` 数组
    pub fn stacked(&self) -> HjResult<ArrayD<f64>> {
        let first = self.values.first().ok_or(HjError::EmptyTimeSequence)?;
        for v in &self.values[1..] {
            HjError::check_shape("solution values", first.shape(), v.shape())?;
        }
        let views: Vec<ArrayView<f64, IxDyn>> = self.values.iter().map(|v| v.view()).collect();
        stack(Axis(0), &views).map_err(|e| HjError::invalid_grid(format!("堆叠失败: {e}")))
    }

    /// 取出全部值函数
    pub fn into_values(self) -> Vec<ArrayD<f64>> {
        self.values
    }
}
