// crates/hj_reach/src/lib.rs

//! HJ Reach
//!
//! 结构化网格上的 Hamilton-Jacobi 可达性求解器。
//!
//! 给定控制-扰动仿射动力学、网格与初始值函数，沿时间前向或后向积分
//!
//! $$ \frac{\partial V}{\partial t} + H(x, t, \nabla V) = 0 $$
//!
//! 得到各采样时刻的值函数，其零下水平集即可达集（或可达管）。
//!
//! # 模块概览
//!
//! - [`sets`]: 凸集（控制/扰动空间、网格定义域）
//! - [`grid`]: 结构化网格与边界条件
//! - [`dynamics`]: 动力学 trait 与具体系统
//! - [`numerics`]: 上风梯度格式
//! - [`engine`]: 数值 Hamiltonian、耗散、时间积分与求解入口
//! - [`builder`]: 求解器设置与精度档位
//! - [`shapes`]: 初始值函数（水平集形状）
//! - [`analysis`]: 结果分析
//!
//! # 示例
//!
//! ```no_run
//! use hj_reach::prelude::*;
//! use std::f64::consts::TAU;
//!
//! # fn main() -> HjResult<()> {
//! let domain = BoxSet::new(vec![-6.0, -10.0, 0.0], vec![20.0, 10.0, TAU])?;
//! let grid = Grid::from_lattice_parameters_and_boundary_conditions(domain, &[51, 40, 50], &[2])?;
//! let values = shapes::cylinder(&grid, &[2], &[0.0, 0.0, 0.0], 5.0)?;
//!
//! let settings = SolverSettings::with_accuracy(
//!     Accuracy::VeryHigh,
//!     HamiltonianPostprocessor::BackwardsReachableTube,
//! );
//! let solution = solve(&settings, &Air3d::default(), &grid, &[0.0, -2.8], &values)?;
//! assert_eq!(solution.len(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod builder;
pub mod dynamics;
pub mod engine;
pub mod grid;
pub mod numerics;
pub mod sets;
pub mod shapes;

pub use builder::{Accuracy, SolverSettings};
pub use dynamics::{Air3d, DoubleIntegrator, DubinsCar, Dynamics, Integrator, OptimizationMode};
pub use engine::{
    solve, step, ArtificialDissipation, HamiltonianPostprocessor, Solution, TimeIntegratorKind,
    ValuePostprocessor,
};
pub use grid::{BoundaryCondition, Grid};
pub use numerics::UpwindScheme;
pub use sets::{Ball, BoxSet, ConvexSet};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::builder::{Accuracy, SolverSettings};
    pub use crate::dynamics::{
        Air3d, DoubleIntegrator, DubinsCar, Dynamics, Integrator, OptimizationMode,
    };
    pub use crate::engine::{
        solve, step, ArtificialDissipation, HamiltonianPostprocessor, Solution, ValuePostprocessor,
    };
    pub use crate::grid::Grid;
    pub use crate::sets::{Ball, BoxSet, ConvexSet};
    pub use crate::shapes;
    pub use hj_foundation::{HjError, HjResult};
}
