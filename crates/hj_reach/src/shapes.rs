// crates/hj_reach/src/shapes.rs

//! 水平集形状
//!
//! 生成网格上的隐式曲面函数，零下水平集即目标集合：
//!
//! - [`sphere`] / [`cylinder`]: 欧氏距离减半径（周期轴按最短回绕距离）
//! - [`rectangle`]: 轴对齐盒的近似符号距离
//! - [`union`] / [`intersection`] / [`complement`]: 集合运算
//!
//! ```ignore
//! // Air3d 捕获集：忽略航向角
//! let target = shapes::cylinder(&grid, &[2], &[0.0, 0.0, 0.0], 5.0)?;
//! ```

use crate::grid::Grid;
use hj_foundation::{ensure, HjError, HjResult};
use ndarray::{ArrayD, Zip};

/// 第 `axis` 轴上的坐标差，周期轴取最短回绕
fn axis_offset(grid: &Grid, axis: usize, x: f64, c: f64) -> f64 {
    let d = x - c;
    if grid.boundary_conditions()[axis].is_periodic() {
        let period = grid.domain().hi()[axis] - grid.domain().lo()[axis];
        let wrapped = d.rem_euclid(period);
        wrapped.min(period - wrapped)
    } else {
        d
    }
}

/// 以 `center` 为中心、`radius` 为半径的球
pub fn sphere(grid: &Grid, center: &[f64], radius: f64) -> HjResult<ArrayD<f64>> {
    cylinder(grid, &[], center, radius)
}

/// 忽略 `ignore_dims` 各轴的柱体
///
/// `center` 长度须等于网格维度，被忽略轴上的分量不参与计算。
pub fn cylinder(
    grid: &Grid,
    ignore_dims: &[usize],
    center: &[f64],
    radius: f64,
) -> HjResult<ArrayD<f64>> {
    HjError::check_dim("center", grid.ndim(), center.len())?;
    ensure!(
        radius >= 0.0,
        HjError::invalid_config("radius", radius.to_string(), "半径必须非负")
    );
    let axes: Vec<usize> = (0..grid.ndim())
        .filter(|axis| !ignore_dims.contains(axis))
        .collect();
    ensure!(
        !axes.is_empty(),
        HjError::invalid_config("ignore_dims", format!("{ignore_dims:?}"), "至少保留一个轴")
    );

    Ok(grid.map_states(|state| {
        axes.iter()
            .map(|&axis| axis_offset(grid, axis, state[axis], center[axis]).powi(2))
            .sum::<f64>()
            .sqrt()
            - radius
    }))
}

/// 轴对齐盒 `[lower, upper]`
///
/// 取各轴 `max(lower - x, x - upper)` 的最大值：内部为负，外部为正。
pub fn rectangle(grid: &Grid, lower: &[f64], upper: &[f64]) -> HjResult<ArrayD<f64>> {
    HjError::check_dim("lower", grid.ndim(), lower.len())?;
    HjError::check_dim("upper", grid.ndim(), upper.len())?;
    Ok(grid.map_states(|state| {
        (0..state.len())
            .map(|axis| (lower[axis] - state[axis]).max(state[axis] - upper[axis]))
            .fold(f64::NEG_INFINITY, f64::max)
    }))
}

fn combine(
    a: &ArrayD<f64>,
    b: &ArrayD<f64>,
    f: impl Fn(f64, f64) -> f64,
) -> HjResult<ArrayD<f64>> {
    HjError::check_shape("shape", a.shape(), b.shape())?;
    Ok(Zip::from(a).and(b).map_collect(|&x, &y| f(x, y)))
}

/// 并集 `min(a, b)`
pub fn union(a: &ArrayD<f64>, b: &ArrayD<f64>) -> HjResult<ArrayD<f64>> {
    combine(a, b, f64::min)
}

/// 交集 `max(a, b)`
pub fn intersection(a: &ArrayD<f64>, b: &ArrayD<f64>) -> HjResult<ArrayD<f64>> {
    combine(a, b, f64::max)
}

/// 补集 `-a`
pub fn complement(a: &ArrayD<f64>) -> ArrayD<f64> {
    a.mapv(|v| -v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::BoxSet;
    use std::f64::consts::TAU;

    fn plane() -> Grid {
        let domain = BoxSet::new(vec![-2.0, -2.0], vec![2.0, 2.0]).unwrap();
        Grid::from_lattice_parameters_and_boundary_conditions(domain, &[5, 5], &[]).unwrap()
    }

    #[test]
    fn test_sphere() {
        let grid = plane();
        let v = sphere(&grid, &[0.0, 0.0], 1.0).unwrap();
        assert_eq!(v[[2, 2]], -1.0);
        assert_eq!(v[[2, 4]], 1.0);
        assert!((v[[0, 0]] - (8.0_f64.sqrt() - 1.0)).abs() < 1e-12);
        assert!(sphere(&grid, &[0.0], 1.0).is_err());
    }

    #[test]
    fn test_cylinder_ignores_axis() {
        let domain = BoxSet::new(vec![-1.0, 0.0], vec![1.0, TAU]).unwrap();
        let grid =
            Grid::from_lattice_parameters_and_boundary_conditions(domain, &[3, 8], &[1]).unwrap();
        let v = cylinder(&grid, &[1], &[0.0, 0.0], 0.5).unwrap();
        for j in 0..8 {
            assert_eq!(v[[1, j]], -0.5);
            assert_eq!(v[[2, j]], 0.5);
        }
        assert!(cylinder(&grid, &[0, 1], &[0.0, 0.0], 0.5).is_err());
    }

    #[test]
    fn test_periodic_distance_wraps() {
        let domain = BoxSet::new(vec![0.0], vec![TAU]).unwrap();
        let grid =
            Grid::from_lattice_parameters_and_boundary_conditions(domain, &[8], &[0]).unwrap();
        let v = sphere(&grid, &[0.0], 0.0).unwrap();
        // 最后一个点距 0 为 π/4（回绕）
        assert!((v[[7]] - TAU / 8.0).abs() < 1e-12);
        assert!((v[[4]] - TAU / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rectangle_and_set_ops() {
        let grid = plane();
        let r = rectangle(&grid, &[-1.0, -1.0], &[1.0, 1.0]).unwrap();
        assert_eq!(r[[2, 2]], -1.0);
        assert_eq!(r[[1, 1]], 0.0);
        assert_eq!(r[[0, 2]], 1.0);

        let s = sphere(&grid, &[2.0, 2.0], 1.0).unwrap();
        let u = union(&r, &s).unwrap();
        let i = intersection(&r, &s).unwrap();
        assert!(u[[4, 4]] < 0.0 && u[[2, 2]] < 0.0);
        assert!(i[[2, 2]] > 0.0);
        assert_eq!(complement(&r)[[2, 2]], 1.0);

        let wrong = ArrayD::zeros(ndarray::IxDyn(&[2, 2]));
        assert!(matches!(union(&r, &wrong), Err(HjError::ShapeMismatch { .. })));
    }
}
