// crates/hj_reach/src/builder/mod.rs

//! 求解器配置
//!
//! [`SolverSettings`] 汇集一次求解所需的全部数值选项，
//! [`Accuracy`] 把精度档位映射到具体的上风格式与时间积分器。

pub mod settings;

pub use settings::{Accuracy, SolverSettings};
