// crates/hj_reach/src/grid/mod.rs

//! 网格模块
//!
//! - [`Grid`]: 结构化 n 维网格（坐标向量、间距、状态数组）
//! - [`BoundaryCondition`]: 每轴边界条件与幽灵点填充

mod boundary;
mod lattice;

pub use boundary::BoundaryCondition;
pub use lattice::Grid;
