// crates/hj_reach/src/grid/boundary.rs

//! 边界条件
//!
//! 上风差分模板在每条坐标轴两端需要幽灵点（ghost points）。
//! 本模块根据边界类型把一条网格线（lane）扩展为带幽灵点的缓冲区。
//!
//! ## 支持的边界类型
//!
//! - `Periodic`: 周期回绕，适用于角度等环形坐标
//! - `ExtrapolateAwayFromZero`: 线性外推且始终远离零，
//!   保证边界不会制造虚假的零水平集
//!
//! ```text
//!  ghost   ghost | v0  v1  ...  v_{n-1} | ghost  ghost
//!  <- pad ->     |                      |   <- pad ->
//! ```

use num_traits::Float;
use serde::{Deserialize, Serialize};

/// 单轴边界条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryCondition {
    /// 周期边界
    Periodic,
    /// 远离零的线性外推（默认）
    #[default]
    ExtrapolateAwayFromZero,
}

impl BoundaryCondition {
    /// 边界名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Periodic => "periodic",
            Self::ExtrapolateAwayFromZero => "extrapolate_away_from_zero",
        }
    }

    /// 是否为周期边界
    #[inline]
    pub fn is_periodic(&self) -> bool {
        matches!(self, Self::Periodic)
    }

    /// 将 `lane` 两端各扩展 `pad` 个幽灵点，写入 `out`
    ///
    /// `out` 会被清空并重用，长度为 `lane.len() + 2 * pad`。
    /// 外推边界要求 `lane.len() >= 2`，长度为 1 时退化为常数延拓。
    pub fn pad_into<F: Float>(&self, lane: &[F], pad: usize, out: &mut Vec<F>) {
        out.clear();
        let n = lane.len();
        if n == 0 {
            return;
        }
        out.reserve(n + 2 * pad);

        match self {
            Self::Periodic => {
                let n_i = n as isize;
                for k in -(pad as isize)..(n_i + pad as isize) {
                    out.push(lane[k.rem_euclid(n_i) as usize]);
                }
            }
            Self::ExtrapolateAwayFromZero => {
                let first = lane[0];
                let last = lane[n - 1];
                let (lower_step, upper_step) = if n >= 2 {
                    (
                        sign(first) * (lane[1] - first).abs(),
                        sign(last) * (last - lane[n - 2]).abs(),
                    )
                } else {
                    (F::zero(), F::zero())
                };

                for k in (1..=pad).rev() {
                    out.push(first + lower_step * cast(k));
                }
                out.extend_from_slice(lane);
                for k in 1..=pad {
                    out.push(last + upper_step * cast(k));
                }
            }
        }
    }
}

/// 符号函数，`sign(0) = 0`
#[inline]
fn sign<F: Float>(x: F) -> F {
    if x > F::zero() {
        F::one()
    } else if x < F::zero() {
        -F::one()
    } else {
        F::zero()
    }
}

#[inline]
fn cast<F: Float>(k: usize) -> F {
    F::from(k).unwrap_or_else(F::zero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_padding() {
        let lane = [1.0, 2.0, 3.0, 4.0];
        let mut out = Vec::new();
        BoundaryCondition::Periodic.pad_into(&lane[..], 2, &mut out);
        assert_eq!(out, vec![3.0, 4.0, 1.0, 2.0, 3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn test_periodic_padding_wider_than_lane() {
        let lane = [5.0, 6.0];
        let mut out = Vec::new();
        BoundaryCondition::Periodic.pad_into(&lane[..], 3, &mut out);
        assert_eq!(out, vec![6.0, 5.0, 6.0, 5.0, 6.0, 5.0, 6.0, 5.0]);
    }

    #[test]
    fn test_extrapolation_moves_away_from_zero() {
        // 两端均为正值：无论斜率方向，幽灵点都应继续增大
        let lane = [1.0, 0.5, 0.5, 2.0];
        let mut out = Vec::new();
        BoundaryCondition::ExtrapolateAwayFromZero.pad_into(&lane[..], 2, &mut out);
        assert_eq!(out, vec![2.0, 1.5, 1.0, 0.5, 0.5, 2.0, 3.5, 5.0]);
    }

    #[test]
    fn test_extrapolation_negative_end() {
        let lane = [-1.0, -3.0];
        let mut out = Vec::new();
        BoundaryCondition::ExtrapolateAwayFromZero.pad_into(&lane[..], 1, &mut out);
        assert_eq!(out, vec![-3.0, -1.0, -3.0, -5.0]);
    }

    #[test]
    fn test_extrapolation_zero_endpoint_is_flat() {
        let lane = [0.0, 1.0, 2.0];
        let mut out = Vec::new();
        BoundaryCondition::ExtrapolateAwayFromZero.pad_into(&lane[..], 1, &mut out);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[4], 3.0);
    }

    #[test]
    fn test_buffer_reuse() {
        let mut out = vec![9.0; 16];
        BoundaryCondition::Periodic.pad_into(&[1.0][..], 1, &mut out);
        assert_eq!(out, vec![1.0, 1.0, 1.0]);
    }
}
