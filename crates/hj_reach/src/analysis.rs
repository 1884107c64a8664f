// crates/hj_reach/src/analysis.rs

//! 结果分析
//!
//! 对求解得到的值函数做简单的后处理：下水平集体积、最近点取值、二维切片。

use crate::grid::Grid;
use hj_foundation::{ensure, HjError, HjResult};
use ndarray::{Array1, Array2, ArrayD, ArrayView1, Axis, Ix2};
use std::io::Write;

/// 下水平集 `{V <= level}` 的体积（网格点计数 × 单元体积）
pub fn sublevel_volume(grid: &Grid, values: &ArrayD<f64>, level: f64) -> HjResult<f64> {
    grid.check_values("values", values)?;
    let count = values.iter().filter(|&&v| v <= level).count();
    Ok(count as f64 * grid.cell_volume())
}

/// 距离 `state` 最近的网格点上的值
pub fn value_at(grid: &Grid, values: &ArrayD<f64>, state: ArrayView1<f64>) -> HjResult<f64> {
    grid.check_values("values", values)?;
    let index = grid.nearest_index(state)?;
    Ok(values[index.as_slice()])
}

/// 二维切片
#[derive(Debug, Clone)]
pub struct Slice2d {
    /// 第一个保留轴的坐标
    pub x: Array1<f64>,
    /// 第二个保留轴的坐标
    pub y: Array1<f64>,
    /// 形状 `(x.len(), y.len())`
    pub values: Array2<f64>,
}

impl Slice2d {
    /// 以 `x,y,value` 三列写出 CSV
    pub fn write_csv<W: Write>(&self, mut writer: W) -> HjResult<()> {
        writeln!(writer, "x,y,value")?;
        for (i, &x) in self.x.iter().enumerate() {
            for (j, &y) in self.y.iter().enumerate() {
                writeln!(writer, "{x},{y},{}", self.values[[i, j]])?;
            }
        }
        Ok(())
    }
}

/// 保留 `axes` 两轴，其余轴固定在距离 `state` 最近的网格点
///
/// `state` 在保留轴上的分量被忽略。
pub fn slice_2d(
    grid: &Grid,
    values: &ArrayD<f64>,
    axes: [usize; 2],
    state: ArrayView1<f64>,
) -> HjResult<Slice2d> {
    grid.check_values("values", values)?;
    let [a, b] = axes;
    ensure!(
        a != b && a < grid.ndim() && b < grid.ndim(),
        HjError::invalid_config("axes", format!("{axes:?}"), "须为两个不同的有效轴")
    );
    let index = grid.nearest_index(state)?;

    let mut view = values.view();
    for axis in (0..grid.ndim()).rev() {
        if axis != a && axis != b {
            view = view.index_axis_move(Axis(axis), index[axis]);
        }
    }
    let plane = view
        .into_dimensionality::<Ix2>()
        .map_err(|e| HjError::invalid_grid(format!("切片维度错误: {e}")))?;
    // 剩余两轴按原顺序排列
    let plane = if a < b { plane } else { plane.reversed_axes() };

    Ok(Slice2d {
        x: grid.coordinate_vectors()[a].clone(),
        y: grid.coordinate_vectors()[b].clone(),
        values: plane.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::BoxSet;
    use ndarray::array;

    fn cube() -> Grid {
        let domain = BoxSet::new(vec![0.0, 0.0, 0.0], vec![2.0, 3.0, 4.0]).unwrap();
        Grid::from_lattice_parameters_and_boundary_conditions(domain, &[3, 4, 5], &[]).unwrap()
    }

    #[test]
    fn test_sublevel_volume() {
        let grid = cube();
        let values = grid.map_states(|s| s[0] - 0.5);
        // x = 0 的一层共 20 点，单元体积 1
        assert_eq!(sublevel_volume(&grid, &values, 0.0).unwrap(), 20.0);
        assert_eq!(sublevel_volume(&grid, &values, -1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_value_at() {
        let grid = cube();
        let values = grid.map_states(|s| s[0] + 10.0 * s[1] + 100.0 * s[2]);
        let v = value_at(&grid, &values, array![1.1, 1.9, 3.2].view()).unwrap();
        assert_eq!(v, 1.0 + 20.0 + 300.0);
    }

    #[test]
    fn test_slice_2d() {
        let grid = cube();
        let values = grid.map_states(|s| s[0] + 10.0 * s[1] + 100.0 * s[2]);
        let slice = slice_2d(&grid, &values, [2, 0], array![0.0, 2.0, 0.0].view()).unwrap();
        assert_eq!(slice.values.dim(), (5, 3));
        assert_eq!(slice.x.len(), 5);
        // z = 4, x = 1, y 固定为 2
        assert_eq!(slice.values[[4, 1]], 1.0 + 20.0 + 400.0);

        let mut out = Vec::new();
        slice.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1 + 15);
        assert!(text.starts_with("x,y,value\n"));

        assert!(slice_2d(&grid, &values, [1, 1], array![0.0, 0.0, 0.0].view()).is_err());
    }
}
