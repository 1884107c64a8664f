// crates/hj_reach/src/engine/timestep.rs

//! 时间步长控制模块
//!
//! 子步长满足 CFL 条件：
//!
//! $$ |\Delta t| \leq C \Big/ \max_x \sum_i \frac{\alpha_i(x)}{\Delta x_i} $$
//!
//! 并截断到剩余区间 `|target - t|`。耗散可忽略时 CFL 约束为无穷，
//! 子步直接覆盖整个剩余区间。

use hj_foundation::Tolerance;

/// 预计子步数超过此值时记录警告
pub const SUB_STEP_WARN_THRESHOLD: f64 = 1e5;

/// CFL 时间步计算器
#[derive(Debug, Clone, Copy)]
pub struct CflCalculator {
    /// CFL 数
    cfl: f64,
    tol: Tolerance,
}

/// 一个子步的时间信息
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubStep {
    /// 带符号步长
    pub dt: f64,
    /// 子步结束时刻；末步精确等于目标时刻
    pub end_time: f64,
}

impl SubStep {
    /// 是否为到达目标的末步
    pub fn reaches(&self, target_time: f64) -> bool {
        self.end_time == target_time
    }

    /// 以当前步长覆盖长度为 `interval` 的区间所需的子步数
    pub fn estimated_count(&self, interval: f64) -> f64 {
        (interval / self.dt).abs().ceil()
    }

    /// 步长相对区间过小，通常意味着耗散系数异常大或 CFL 数过小
    pub fn is_suspicious(&self, interval: f64) -> bool {
        self.estimated_count(interval) > SUB_STEP_WARN_THRESHOLD
    }
}

impl CflCalculator {
    /// 创建计算器
    pub fn new(cfl: f64, tol: Tolerance) -> Self {
        Self { cfl, tol }
    }

    /// CFL 数
    pub fn cfl(&self) -> f64 {
        self.cfl
    }

    /// 由 `max_x Σ_i α_i/Δx_i` 得到步长上界（绝对值）
    pub fn bound(&self, max_scaled_dissipation: f64) -> f64 {
        if self.tol.is_negligible_dissipation(max_scaled_dissipation) {
            return f64::INFINITY;
        }
        self.cfl / max_scaled_dissipation
    }

    /// 从 `time` 向 `target_time` 推进的子步
    ///
    /// 上界覆盖剩余区间时，结束时刻直接取 `target_time`，避免浮点累积误差。
    pub fn sub_step(&self, time: f64, target_time: f64, max_scaled_dissipation: f64) -> SubStep {
        let remaining = target_time - time;
        let bound = self.bound(max_scaled_dissipation);
        if remaining.abs() <= bound {
            SubStep {
                dt: remaining,
                end_time: target_time,
            }
        } else {
            let dt = bound.copysign(remaining);
            let end_time = time + dt;
            // 舍入可能越过目标
            if (target_time - end_time) * remaining <= 0.0 {
                SubStep {
                    dt: remaining,
                    end_time: target_time,
                }
            } else {
                SubStep { dt, end_time }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound() {
        let calc = CflCalculator::new(0.75, Tolerance::default());
        assert!((calc.bound(3.0) - 0.25).abs() < 1e-15);
        assert!(calc.bound(0.0).is_infinite());
        assert_eq!(calc.cfl(), 0.75);
    }

    #[test]
    fn test_backward_sub_steps() {
        let calc = CflCalculator::new(0.5, Tolerance::default());
        let first = calc.sub_step(0.0, -1.0, 1.0);
        assert_eq!(first.dt, -0.5);
        assert_eq!(first.end_time, -0.5);
        assert!(!first.reaches(-1.0));

        let last = calc.sub_step(-0.7, -1.0, 1.0);
        assert!((last.dt + 0.3).abs() < 1e-12);
        assert!(last.reaches(-1.0));
    }

    #[test]
    fn test_suspicious_sub_steps() {
        let calc = CflCalculator::new(0.75, Tolerance::default());
        let sane = calc.sub_step(0.0, -2.0, 3.0);
        assert_eq!(sane.estimated_count(-2.0), 8.0);
        assert!(!sane.is_suspicious(-2.0));

        let tiny = calc.sub_step(0.0, -2.0, 1e9);
        assert!(tiny.estimated_count(-2.0) > SUB_STEP_WARN_THRESHOLD);
        assert!(tiny.is_suspicious(-2.0));
    }

    #[test]
    fn test_negligible_dissipation_covers_interval() {
        let calc = CflCalculator::new(0.75, Tolerance::default());
        let step = calc.sub_step(1.0, 3.0, 0.0);
        assert_eq!(step.dt, 2.0);
        assert_eq!(step.end_time, 3.0);
    }
}
