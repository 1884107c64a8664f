// crates/hj_foundation/src/lib.rs

//! HJ Reach Foundation Layer
//!
//! 基础层，提供整个项目共享的错误类型与数值辅助。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `HjError` 与 `ensure!` 宏
//! - [`tolerance`]: 时间比较与数值容差
//!
//! # 设计原则
//!
//! 1. **最少依赖**: 仅依赖 serde 和 thiserror
//! 2. **急切检查**: 用法错误在调用边界报告

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod tolerance;

// 重导出常用类型
pub use error::{HjError, HjResult};
pub use tolerance::Tolerance;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::ensure;
    pub use crate::error::{HjError, HjResult};
    pub use crate::tolerance::Tolerance;
}
