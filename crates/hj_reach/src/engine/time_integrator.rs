// crates/hj_reach/src/engine/time_integrator.rs

//! TVD Runge-Kutta 时间积分器
//!
//! Shu-Osher 形式的凸组合，每一级都是一次前向欧拉更新，
//! 因此单调性（TVD）由欧拉步继承：
//!
//! ### TVD-RK2
//!
//! ```text
//! V^(1)   = V^n + Δt L(V^n)
//! V^{n+1} = ½ V^n + ½ (V^(1) + Δt L(V^(1)))
//! ```
//!
//! ### TVD-RK3
//!
//! ```text
//! V^(1)   = V^n + Δt L(V^n)
//! V^(2)   = ¾ V^n + ¼ (V^(1) + Δt L(V^(1)))
//! V^{n+1} = ⅓ V^n + ⅔ (V^(2) + Δt L(V^(2)))
//! ```
//!
//! 步长由第一级的 CFL 上界决定，后续各级沿用同一 `Δt`。
//!
//! ## 参考文献
//!
//! 1. Shu, C.-W., & Osher, S. (1988). Efficient implementation of essentially
//!    non-oscillatory shock-capturing schemes. J. Comput. Phys., 77(2), 439-471.
//! 2. Gottlieb, S., Shu, C.-W., & Tadmor, E. (2001). Strong stability-preserving
//!    high-order time discretization methods. SIAM Review, 43(1), 89-112.

use super::timestep::{CflCalculator, SubStep};
use hj_foundation::HjResult;
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

/// 一次右端项求值的结果
#[derive(Debug, Clone)]
pub struct Rhs {
    /// `dV/dt`，与值函数同形状
    pub dvdt: ArrayD<f64>,
    /// `max_x Σ_i α_i(x)/Δx_i`，用于 CFL 上界
    pub max_scaled_dissipation: f64,
}

/// RHS 计算器 trait
///
/// 实现此 trait 的类型可以计算右端项 `dV/dt = L(V)`
pub trait RhsComputer: Sync {
    /// 计算右端项
    ///
    /// # 参数
    /// - `time`: 当前时间
    /// - `values`: 当前值函数
    /// - `direction`: 时间方向符号（±1）
    fn compute_rhs(&self, time: f64, values: &ArrayD<f64>, direction: f64) -> HjResult<Rhs>;
}

/// 时间积分器 trait
pub trait TimeIntegrator: Send + Sync {
    /// 积分器名称
    fn name(&self) -> &'static str;

    /// 时间精度阶数
    fn order(&self) -> u8;

    /// Runge-Kutta 级数
    fn stages(&self) -> u8;

    /// 从 `time` 向 `target_time` 推进一个子步
    ///
    /// 返回子步信息与新的值函数。
    fn advance(
        &self,
        rhs: &dyn RhsComputer,
        cfl: &CflCalculator,
        time: f64,
        values: &ArrayD<f64>,
        target_time: f64,
    ) -> HjResult<(SubStep, ArrayD<f64>)>;
}

/// 积分器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeIntegratorKind {
    /// TVD-RK1（前向欧拉）
    Rk1,
    /// TVD-RK2
    Rk2,
    /// TVD-RK3
    #[default]
    Rk3,
}

impl TimeIntegratorKind {
    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rk1 => "tvd_rk1",
            Self::Rk2 => "tvd_rk2",
            Self::Rk3 => "tvd_rk3",
        }
    }
}

/// 根据配置创建积分器实例
pub fn create_integrator(kind: TimeIntegratorKind) -> Box<dyn TimeIntegrator> {
    match kind {
        TimeIntegratorKind::Rk1 => Box::new(ForwardEuler),
        TimeIntegratorKind::Rk2 => Box::new(TvdRk2),
        TimeIntegratorKind::Rk3 => Box::new(TvdRk3),
    }
}

/// 首级：求 RHS、定步长、欧拉更新
fn first_stage(
    rhs: &dyn RhsComputer,
    cfl: &CflCalculator,
    time: f64,
    values: &ArrayD<f64>,
    target_time: f64,
) -> HjResult<(SubStep, ArrayD<f64>)> {
    let direction = (target_time - time).signum();
    let r = rhs.compute_rhs(time, values, direction)?;
    let sub = cfl.sub_step(time, target_time, r.max_scaled_dissipation);
    log::trace!(
        "子步 t={:.6} dt={:.3e} max(Σα/Δx)={:.3e}",
        time,
        sub.dt,
        r.max_scaled_dissipation
    );
    Ok((sub, values + &(r.dvdt * sub.dt)))
}

/// 固定步长的欧拉更新
fn euler(rhs: &dyn RhsComputer, time: f64, values: &ArrayD<f64>, dt: f64) -> HjResult<ArrayD<f64>> {
    let r = rhs.compute_rhs(time, values, dt.signum())?;
    Ok(values + &(r.dvdt * dt))
}

/// 一阶前向欧拉
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardEuler;

impl TimeIntegrator for ForwardEuler {
    fn name(&self) -> &'static str {
        "TVD-RK1"
    }

    fn order(&self) -> u8 {
        1
    }

    fn stages(&self) -> u8 {
        1
    }

    fn advance(
        &self,
        rhs: &dyn RhsComputer,
        cfl: &CflCalculator,
        time: f64,
        values: &ArrayD<f64>,
        target_time: f64,
    ) -> HjResult<(SubStep, ArrayD<f64>)> {
        first_stage(rhs, cfl, time, values, target_time)
    }
}

/// TVD-RK2
#[derive(Debug, Clone, Copy, Default)]
pub struct TvdRk2;

impl TimeIntegrator for TvdRk2 {
    fn name(&self) -> &'static str {
        "TVD-RK2"
    }

    fn order(&self) -> u8 {
        2
    }

    fn stages(&self) -> u8 {
        2
    }

    fn advance(
        &self,
        rhs: &dyn RhsComputer,
        cfl: &CflCalculator,
        time: f64,
        values: &ArrayD<f64>,
        target_time: f64,
    ) -> HjResult<(SubStep, ArrayD<f64>)> {
        let (sub, v1) = first_stage(rhs, cfl, time, values, target_time)?;
        let v2 = euler(rhs, time + sub.dt, &v1, sub.dt)?;
        Ok((sub, (values + &v2) * 0.5))
    }
}

/// TVD-RK3
#[derive(Debug, Clone, Copy, Default)]
pub struct TvdRk3;

impl TimeIntegrator for TvdRk3 {
    fn name(&self) -> &'static str {
        "TVD-RK3"
    }

    fn order(&self) -> u8 {
        3
    }

    fn stages(&self) -> u8 {
        3
    }

    fn advance(
        &self,
        rhs: &dyn RhsComputer,
        cfl: &CflCalculator,
        time: f64,
        values: &ArrayD<f64>,
        target_time: f64,
    ) -> HjResult<(SubStep, ArrayD<f64>)> {
        let (sub, v1) = first_stage(rhs, cfl, time, values, target_time)?;
        let v2 = euler(rhs, time + sub.dt, &v1, sub.dt)?;
        let v_half = values * 0.75 + v2 * 0.25;
        let v3 = euler(rhs, time + 0.5 * sub.dt, &v_half, sub.dt)?;
        Ok((sub, values / 3.0 + v3 * (2.0 / 3.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hj_foundation::Tolerance;
    use ndarray::{arr1, IxDyn};

    /// dV/dt = -V，固定耗散使步长为 0.1
    struct Decay;

    impl RhsComputer for Decay {
        fn compute_rhs(&self, _time: f64, values: &ArrayD<f64>, _direction: f64) -> HjResult<Rhs> {
            Ok(Rhs {
                dvdt: values.mapv(|v| -v),
                max_scaled_dissipation: 7.5,
            })
        }
    }

    fn one() -> ArrayD<f64> {
        arr1(&[1.0]).into_shape_with_order(IxDyn(&[1])).unwrap()
    }

    #[test]
    fn test_stage_polynomials() {
        let cfl = CflCalculator::new(0.75, Tolerance::default());
        let dt: f64 = 0.1;
        let expected = [
            1.0 - dt,
            1.0 - dt + dt * dt / 2.0,
            1.0 - dt + dt * dt / 2.0 - dt.powi(3) / 6.0,
        ];
        for (kind, want) in [
            TimeIntegratorKind::Rk1,
            TimeIntegratorKind::Rk2,
            TimeIntegratorKind::Rk3,
        ]
        .into_iter()
        .zip(expected)
        {
            let integrator = create_integrator(kind);
            let (sub, v) = integrator.advance(&Decay, &cfl, 0.0, &one(), 1.0).unwrap();
            assert!((sub.dt - dt).abs() < 1e-12);
            assert!((v[[0]] - want).abs() < 1e-12, "{}", integrator.name());
        }
    }

    #[test]
    fn test_metadata() {
        let rk3 = create_integrator(TimeIntegratorKind::Rk3);
        assert_eq!((rk3.order(), rk3.stages()), (3, 3));
        assert_eq!(TimeIntegratorKind::default(), TimeIntegratorKind::Rk3);
        assert_eq!(TimeIntegratorKind::Rk2.name(), "tvd_rk2");
    }
}
