// crates/hj_reach/src/grid/lattice.rs

//! 结构化 n 维网格
//!
//! 由定义域盒、每轴点数与周期轴集合构造，构造后不可变，
//! 被所有求解调用只读共享。
//!
//! ## 坐标规则
//!
//! - 非周期轴：`n` 个均匀点，包含上下界，`Δx = (hi - lo) / (n - 1)`
//! - 周期轴：`n` 个均匀点覆盖 `[lo, hi)`，不重复上界，`Δx = (hi - lo) / n`
//!
//! 状态数组按网格多重索引的行主序（C 序）排列，每行一个状态。

use super::boundary::BoundaryCondition;
use crate::sets::{BoxSet, ConvexSet};
use hj_foundation::{ensure, HjError, HjResult};
use ndarray::{Array1, Array2, ArrayD, ArrayView1, IxDyn};

/// 结构化网格
#[derive(Debug, Clone)]
pub struct Grid {
    domain: BoxSet,
    shape: Vec<usize>,
    coordinate_vectors: Vec<Array1<f64>>,
    spacings: Vec<f64>,
    boundary_conditions: Vec<BoundaryCondition>,
    states: Array2<f64>,
}

impl Grid {
    /// 由格点参数与周期轴构造网格
    ///
    /// 周期轴使用 [`BoundaryCondition::Periodic`]，其余轴使用
    /// [`BoundaryCondition::ExtrapolateAwayFromZero`]。
    pub fn from_lattice_parameters_and_boundary_conditions(
        domain: BoxSet,
        shape: &[usize],
        periodic_dims: &[usize],
    ) -> HjResult<Self> {
        let ndim = domain.ndim();
        for &axis in periodic_dims {
            ensure!(
                axis < ndim,
                HjError::invalid_grid(format!("周期轴 {axis} 超出维度 {ndim}"))
            );
        }
        let boundary_conditions = (0..ndim)
            .map(|axis| {
                if periodic_dims.contains(&axis) {
                    BoundaryCondition::Periodic
                } else {
                    BoundaryCondition::ExtrapolateAwayFromZero
                }
            })
            .collect();
        Self::with_boundary_conditions(domain, shape, boundary_conditions)
    }

    /// 指定每轴边界条件构造网格
    pub fn with_boundary_conditions(
        domain: BoxSet,
        shape: &[usize],
        boundary_conditions: Vec<BoundaryCondition>,
    ) -> HjResult<Self> {
        let ndim = domain.ndim();
        ensure!(ndim > 0, HjError::invalid_grid("定义域维度必须大于 0"));
        HjError::check_dim("grid shape", ndim, shape.len())?;
        HjError::check_dim("boundary conditions", ndim, boundary_conditions.len())?;

        let mut coordinate_vectors = Vec::with_capacity(ndim);
        let mut spacings = Vec::with_capacity(ndim);

        for axis in 0..ndim {
            let lo = domain.lo()[axis];
            let hi = domain.hi()[axis];
            let n = shape[axis];
            let periodic = boundary_conditions[axis].is_periodic();

            ensure!(
                hi > lo && lo.is_finite() && hi.is_finite(),
                HjError::invalid_grid(format!("轴 {axis} 的区间 [{lo}, {hi}] 无效"))
            );
            let min_points = if periodic { 1 } else { 2 };
            ensure!(
                n >= min_points,
                HjError::invalid_grid(format!("轴 {axis} 至少需要 {min_points} 个点, 实际 {n}"))
            );

            let (coords, dx) = if periodic {
                let dx = (hi - lo) / n as f64;
                (Array1::from_shape_fn(n, |i| lo + i as f64 * dx), dx)
            } else {
                let dx = (hi - lo) / (n - 1) as f64;
                let mut coords = Array1::from_shape_fn(n, |i| lo + i as f64 * dx);
                // 精确命中上界
                coords[n - 1] = hi;
                (coords, dx)
            };
            coordinate_vectors.push(coords);
            spacings.push(dx);
        }

        let n_points: usize = shape.iter().product();
        let mut states = Array2::zeros((n_points, ndim));
        let mut index = vec![0usize; ndim];
        for (flat, mut row) in states.rows_mut().into_iter().enumerate() {
            unravel_index(flat, shape, &mut index);
            for axis in 0..ndim {
                row[axis] = coordinate_vectors[axis][index[axis]];
            }
        }

        log::debug!(
            "构建网格: shape={:?}, spacings={:?}, 周期轴={:?}",
            shape,
            spacings,
            boundary_conditions
                .iter()
                .enumerate()
                .filter(|(_, bc)| bc.is_periodic())
                .map(|(axis, _)| axis)
                .collect::<Vec<_>>()
        );

        Ok(Self {
            domain,
            shape: shape.to_vec(),
            coordinate_vectors,
            spacings,
            boundary_conditions,
            states,
        })
    }

    /// 维度
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// 每轴点数
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// 网格点总数
    #[inline]
    pub fn len(&self) -> usize {
        self.states.nrows()
    }

    /// 网格是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 定义域
    pub fn domain(&self) -> &BoxSet {
        &self.domain
    }

    /// 每轴坐标向量
    pub fn coordinate_vectors(&self) -> &[Array1<f64>] {
        &self.coordinate_vectors
    }

    /// 每轴网格间距
    pub fn spacings(&self) -> &[f64] {
        &self.spacings
    }

    /// 每轴边界条件
    pub fn boundary_conditions(&self) -> &[BoundaryCondition] {
        &self.boundary_conditions
    }

    /// 周期轴索引
    pub fn periodic_dims(&self) -> Vec<usize> {
        self.boundary_conditions
            .iter()
            .enumerate()
            .filter_map(|(axis, bc)| bc.is_periodic().then_some(axis))
            .collect()
    }

    /// 全部状态，形状 `(len, ndim)`，行主序
    pub fn states(&self) -> &Array2<f64> {
        &self.states
    }

    /// 单个网格单元的体积（各轴间距之积）
    pub fn cell_volume(&self) -> f64 {
        self.spacings.iter().product()
    }

    /// 多重索引对应的状态
    pub fn state_at(&self, index: &[usize]) -> HjResult<ArrayView1<'_, f64>> {
        HjError::check_dim("grid index", self.ndim(), index.len())?;
        for (axis, (&i, &n)) in index.iter().zip(&self.shape).enumerate() {
            ensure!(
                i < n,
                HjError::invalid_grid(format!("轴 {axis} 索引 {i} 超出范围 0..{n}"))
            );
        }
        Ok(self.states.row(ravel_index(index, &self.shape)))
    }

    /// 距离给定状态最近的网格多重索引
    ///
    /// 周期轴按周期回绕，非周期轴截断到边界。
    pub fn nearest_index(&self, state: ArrayView1<f64>) -> HjResult<Vec<usize>> {
        HjError::check_dim("state", self.ndim(), state.len())?;
        let index = (0..self.ndim())
            .map(|axis| {
                let n = self.shape[axis];
                let lo = self.domain.lo()[axis];
                let pos = ((state[axis] - lo) / self.spacings[axis]).round();
                if self.boundary_conditions[axis].is_periodic() {
                    (pos as i64).rem_euclid(n as i64) as usize
                } else {
                    pos.clamp(0.0, (n - 1) as f64) as usize
                }
            })
            .collect();
        Ok(index)
    }

    /// 在每个网格点上求值，生成与网格同形状的数组
    pub fn map_states<F>(&self, f: F) -> ArrayD<f64>
    where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        let data: Vec<f64> = self.states.rows().into_iter().map(f).collect();
        ArrayD::from_shape_vec(IxDyn(&self.shape), data)
            .unwrap_or_else(|_| ArrayD::zeros(IxDyn(&self.shape)))
    }

    /// 检查值函数形状与网格一致
    pub fn check_values(&self, name: &'static str, values: &ArrayD<f64>) -> HjResult<()> {
        HjError::check_shape(name, &self.shape, values.shape())
    }
}

/// 行主序展开：扁平索引 → 多重索引
pub(crate) fn unravel_index(mut flat: usize, shape: &[usize], out: &mut [usize]) {
    for axis in (0..shape.len()).rev() {
        out[axis] = flat % shape[axis];
        flat /= shape[axis];
    }
}

/// 行主序压缩：多重索引 → 扁平索引
pub(crate) fn ravel_index(index: &[usize], shape: &[usize]) -> usize {
    index
        .iter()
        .zip(shape)
        .fold(0, |acc, (&i, &n)| acc * n + i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn unit_square(n: usize) -> Grid {
        let domain = BoxSet::new(vec![-1.0, -1.0], vec![1.0, 1.0]).unwrap();
        Grid::from_lattice_parameters_and_boundary_conditions(domain, &[n, n], &[]).unwrap()
    }

    #[test]
    fn test_coordinate_vectors_3x3() {
        let grid = unit_square(3);
        for coords in grid.coordinate_vectors() {
            assert_eq!(coords, &array![-1.0, 0.0, 1.0]);
        }
        assert_eq!(grid.spacings(), &[1.0, 1.0]);
        assert_eq!(grid.len(), 9);
    }

    #[test]
    fn test_periodic_axis_excludes_upper_bound() {
        let domain = BoxSet::new(vec![0.0, 0.0], vec![1.0, 4.0]).unwrap();
        let grid =
            Grid::from_lattice_parameters_and_boundary_conditions(domain, &[2, 4], &[1]).unwrap();
        assert_eq!(grid.coordinate_vectors()[1], array![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(grid.spacings()[1], 1.0);
        assert_eq!(grid.periodic_dims(), vec![1]);
        assert!(grid.boundary_conditions()[1].is_periodic());
        assert!(!grid.boundary_conditions()[0].is_periodic());
    }

    #[test]
    fn test_states_row_major() {
        let grid = unit_square(3);
        // 第二行：索引 (0, 1)
        assert_eq!(grid.states().row(1), array![-1.0, 0.0]);
        // 最后一行：索引 (2, 2)
        assert_eq!(grid.states().row(8), array![1.0, 1.0]);
        assert_eq!(grid.state_at(&[1, 2]).unwrap(), array![0.0, 1.0]);
        assert!(grid.state_at(&[3, 0]).is_err());
    }

    #[test]
    fn test_invalid_grids() {
        let domain = BoxSet::new(vec![0.0], vec![1.0]).unwrap();
        assert!(Grid::from_lattice_parameters_and_boundary_conditions(
            domain.clone(),
            &[1],
            &[]
        )
        .is_err());
        assert!(Grid::from_lattice_parameters_and_boundary_conditions(
            domain.clone(),
            &[4, 4],
            &[]
        )
        .is_err());
        assert!(
            Grid::from_lattice_parameters_and_boundary_conditions(domain, &[4], &[2]).is_err()
        );
        let flat = BoxSet::new(vec![1.0], vec![1.0]).unwrap();
        assert!(Grid::from_lattice_parameters_and_boundary_conditions(flat, &[4], &[]).is_err());
    }

    #[test]
    fn test_nearest_index() {
        let domain = BoxSet::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let grid =
            Grid::from_lattice_parameters_and_boundary_conditions(domain, &[11, 10], &[1])
                .unwrap();
        assert_eq!(grid.nearest_index(array![0.31, 0.5].view()).unwrap(), vec![3, 5]);
        // 非周期截断，周期回绕
        assert_eq!(grid.nearest_index(array![2.0, 1.02].view()).unwrap(), vec![10, 0]);
        assert_eq!(grid.nearest_index(array![-2.0, -0.1].view()).unwrap(), vec![0, 9]);
    }

    #[test]
    fn test_map_states_and_check_values() {
        let grid = unit_square(3);
        let values = grid.map_states(|s| s[0] + 10.0 * s[1]);
        assert_eq!(values.shape(), &[3, 3]);
        assert_eq!(values[[2, 0]], 1.0 - 10.0);
        assert!(grid.check_values("values", &values).is_ok());
        let wrong = ArrayD::<f64>::zeros(IxDyn(&[3, 4]));
        assert!(matches!(
            grid.check_values("values", &wrong),
            Err(HjError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_ravel_roundtrip_index() {
        let shape = [2, 3, 4];
        let mut index = [0; 3];
        unravel_index(17, &shape, &mut index);
        assert_eq!(index, [1, 1, 1]);
        assert_eq!(ravel_index(&index, &shape), 17);
    }
}
