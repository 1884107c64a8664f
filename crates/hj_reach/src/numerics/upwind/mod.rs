// crates/hj_reach/src/numerics/upwind/mod.rs

//! # 上风梯度模块
//!
//! 在结构化网格上逐轴计算值函数的左/右单侧导数：
//!
//! - `UpwindStencil` - 一维模板 trait
//! - `FirstOrder` - 一阶上风
//! - `EssentiallyNonOscillatory2` - 二阶 ENO
//! - `WeightedEssentiallyNonOscillatory3` - 三阶 WENO
//! - `WeightedEssentiallyNonOscillatory5` - 五阶 WENO
//!
//! ## 使用方式
//!
//! ```ignore
//! use hj_reach::numerics::upwind::{create_stencil, upwind_gradients, UpwindScheme};
//!
//! let stencil = create_stencil(UpwindScheme::Weno5, &tol);
//! let grads = upwind_gradients(&grid, &values, stencil.as_ref());
//! // grads.left.row(k) 为第 k 个网格点的左导数向量
//! ```
//!
//! ## 模板选择指南
//!
//! | 模板 | 阶数 | 幽灵点 | 适用场景 |
//! |------|------|--------|----------|
//! | FirstOrder | 1 | 1 | 调试、快速估计 |
//! | ENO2 | 2 | 2 | 中等精度 |
//! | WENO3 | 3 | 2 | 高精度 |
//! | WENO5 | 5 | 3 | 最高精度，推荐用于最终结果 |

mod eno;
mod first_order;
mod traits;
mod weno;

pub use eno::EssentiallyNonOscillatory2;
pub use first_order::FirstOrder;
pub use traits::UpwindStencil;
pub use weno::{WeightedEssentiallyNonOscillatory3, WeightedEssentiallyNonOscillatory5};

use crate::grid::Grid;
use hj_foundation::Tolerance;
use ndarray::{Array2, ArrayD, Axis, Zip};
use serde::{Deserialize, Serialize};

/// 上风格式类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpwindScheme {
    /// 一阶上风
    FirstOrder,
    /// 二阶 ENO
    Eno2,
    /// 三阶 WENO
    Weno3,
    /// 五阶 WENO
    #[default]
    Weno5,
}

impl UpwindScheme {
    /// 格式名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstOrder => "first_order",
            Self::Eno2 => "eno2",
            Self::Weno3 => "weno3",
            Self::Weno5 => "weno5",
        }
    }
}

/// 根据配置创建模板实例
pub fn create_stencil(scheme: UpwindScheme, tol: &Tolerance) -> Box<dyn UpwindStencil> {
    match scheme {
        UpwindScheme::FirstOrder => Box::new(FirstOrder),
        UpwindScheme::Eno2 => Box::new(EssentiallyNonOscillatory2),
        UpwindScheme::Weno3 => Box::new(WeightedEssentiallyNonOscillatory3::new(*tol)),
        UpwindScheme::Weno5 => Box::new(WeightedEssentiallyNonOscillatory5::new(*tol)),
    }
}

/// 全网格单侧梯度
///
/// `left` / `right` 形状为 `(len, ndim)`，行顺序与 [`Grid::states`] 一致。
#[derive(Debug, Clone)]
pub struct UpwindGradients {
    /// 左导数 `D⁻V`
    pub left: Array2<f64>,
    /// 右导数 `D⁺V`
    pub right: Array2<f64>,
}

impl UpwindGradients {
    /// 中心梯度 `(D⁻V + D⁺V) / 2`
    pub fn central(&self) -> Array2<f64> {
        (&self.left + &self.right) * 0.5
    }
}

/// 计算全网格左/右单侧梯度
///
/// 每条坐标轴上的网格线并行处理；调用方负责保证 `values` 形状与网格一致。
pub fn upwind_gradients(
    grid: &Grid,
    values: &ArrayD<f64>,
    stencil: &dyn UpwindStencil,
) -> UpwindGradients {
    let n_points = grid.len();
    let ndim = grid.ndim();
    let pad = stencil.pad_width();
    let mut left = Array2::zeros((n_points, ndim));
    let mut right = Array2::zeros((n_points, ndim));

    for axis in 0..ndim {
        let spacing = grid.spacings()[axis];
        let bc = grid.boundary_conditions()[axis];
        let mut axis_left = ArrayD::<f64>::zeros(values.raw_dim());
        let mut axis_right = ArrayD::<f64>::zeros(values.raw_dim());

        Zip::from(values.lanes(Axis(axis)))
            .and(axis_left.lanes_mut(Axis(axis)))
            .and(axis_right.lanes_mut(Axis(axis)))
            .par_for_each(|lane, mut lane_left, mut lane_right| {
                let raw: Vec<f64> = lane.iter().copied().collect();
                let n = raw.len();
                let mut padded = Vec::with_capacity(n + 2 * pad);
                bc.pad_into(&raw, pad, &mut padded);

                let mut l = vec![0.0; n];
                let mut r = vec![0.0; n];
                stencil.derivatives(&padded, spacing, &mut l, &mut r);

                lane_left
                    .iter_mut()
                    .zip(l)
                    .for_each(|(dst, src)| *dst = src);
                lane_right
                    .iter_mut()
                    .zip(r)
                    .for_each(|(dst, src)| *dst = src);
            });

        // 逻辑顺序（行主序）写入第 axis 列
        left.column_mut(axis)
            .iter_mut()
            .zip(axis_left.iter())
            .for_each(|(dst, &src)| *dst = src);
        right
            .column_mut(axis)
            .iter_mut()
            .zip(axis_right.iter())
            .for_each(|(dst, &src)| *dst = src);
    }

    UpwindGradients { left, right }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::BoxSet;

    fn plane_grid(periodic: &[usize]) -> Grid {
        let domain = BoxSet::new(vec![0.0, 0.0], vec![1.0, 2.0]).unwrap();
        Grid::from_lattice_parameters_and_boundary_conditions(domain, &[11, 21], periodic).unwrap()
    }

    #[test]
    fn test_create_stencil_metadata() {
        let tol = Tolerance::default();
        let orders: Vec<u8> = [
            UpwindScheme::FirstOrder,
            UpwindScheme::Eno2,
            UpwindScheme::Weno3,
            UpwindScheme::Weno5,
        ]
        .iter()
        .map(|&s| create_stencil(s, &tol).order())
        .collect();
        assert_eq!(orders, vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_gradients_of_plane_interior() {
        let grid = plane_grid(&[]);
        // 外推边界不保持线性，只检查远离边界的内部点
        let values = grid.map_states(|s| 10.0 + 2.0 * s[0] + 3.0 * s[1]);
        let tol = Tolerance::default();
        for scheme in [UpwindScheme::FirstOrder, UpwindScheme::Eno2, UpwindScheme::Weno5] {
            let stencil = create_stencil(scheme, &tol);
            let grads = upwind_gradients(&grid, &values, stencil.as_ref());
            assert_eq!(grads.left.dim(), (grid.len(), 2));
            // 取内部点 (5, 10)
            let row = 5 * 21 + 10;
            assert!((grads.left[[row, 0]] - 2.0).abs() < 1e-9, "{}", scheme.name());
            assert!((grads.right[[row, 1]] - 3.0).abs() < 1e-9, "{}", scheme.name());
            let central = grads.central();
            assert!((central[[row, 1]] - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_gradients_periodic_axis() {
        let domain = BoxSet::new(vec![0.0], vec![std::f64::consts::TAU]).unwrap();
        let grid =
            Grid::from_lattice_parameters_and_boundary_conditions(domain, &[200], &[0]).unwrap();
        let values = grid.map_states(|s| s[0].sin());
        let stencil = create_stencil(UpwindScheme::Weno5, &Tolerance::default());
        let grads = upwind_gradients(&grid, &values, stencil.as_ref());
        // 首尾点也应精确：周期回绕
        for (k, x) in grid.coordinate_vectors()[0].iter().enumerate() {
            assert!((grads.left[[k, 0]] - x.cos()).abs() < 5e-4);
            assert!((grads.right[[k, 0]] - x.cos()).abs() < 5e-4);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&UpwindScheme::Weno3).unwrap();
        assert_eq!(json, "\"weno3\"");
        let parsed: UpwindScheme = serde_json::from_str("\"first_order\"").unwrap();
        assert_eq!(parsed, UpwindScheme::FirstOrder);
    }
}
