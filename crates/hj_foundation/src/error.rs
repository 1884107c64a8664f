// crates/hj_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `HjError` 枚举和 `HjResult` 类型别名，用于整个项目的错误处理。
//!
//! 求解器入口只在调用边界做急切检查（形状、时间序列、配置），
//! 数值发散由 `NonFiniteValues` 报告，不返回静默的 NaN。
//!
//! # 示例
//!
//! ```
//! use hj_foundation::error::{HjError, HjResult};
//!
//! fn check(cfl: f64) -> HjResult<()> {
//!     if cfl <= 0.0 {
//!         return Err(HjError::invalid_config("cfl_number", cfl.to_string(), "必须大于 0"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(-1.0).is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type HjResult<T> = Result<T, HjError>;

/// HJ Reach 错误类型
#[derive(Error, Debug)]
pub enum HjError {
    // ========================================================================
    // 调用边界错误
    // ========================================================================
    /// 值函数数组形状与网格形状不一致
    #[error("形状不匹配: {name} 期望 {expected:?}, 实际 {actual:?}")]
    ShapeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望形状（网格每轴点数）
        expected: Vec<usize>,
        /// 实际形状
        actual: Vec<usize>,
    },

    /// 时间序列非严格单调
    #[error("无效时间序列: 第 {index} 个时间 {current} 与前一个 {previous} 破坏严格单调性")]
    InvalidTimeSequence {
        /// 出错位置
        index: usize,
        /// 前一个时间
        previous: f64,
        /// 当前时间
        current: f64,
    },

    /// 空时间序列
    #[error("无效时间序列: 至少需要一个时间采样")]
    EmptyTimeSequence,

    /// 维度不匹配（例如动力学状态维度与网格维度）
    #[error("维度不匹配: {name} 期望 {expected}, 实际 {actual}")]
    DimensionMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望维度
        expected: usize,
        /// 实际维度
        actual: usize,
    },

    /// 网格参数无效
    #[error("无效网格: {message}")]
    InvalidGrid {
        /// 具体错误信息
        message: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    // ========================================================================
    // 数值错误
    // ========================================================================
    /// 计算过程中出现 NaN / Inf
    #[error("数值非有限: {stage} (t={time})")]
    NonFiniteValues {
        /// 出错阶段
        stage: &'static str,
        /// 出错时刻
        time: f64,
    },

    // ========================================================================
    // IO / 序列化
    // ========================================================================
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl HjError {
    /// 形状不匹配
    pub fn shape_mismatch(name: &'static str, expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            name,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// 时间序列非单调
    pub fn invalid_time_sequence(index: usize, previous: f64, current: f64) -> Self {
        Self::InvalidTimeSequence {
            index,
            previous,
            current,
        }
    }

    /// 维度不匹配
    pub fn dimension_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 无效网格
    pub fn invalid_grid(message: impl Into<String>) -> Self {
        Self::InvalidGrid {
            message: message.into(),
        }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 数值非有限
    pub fn non_finite(stage: &'static str, time: f64) -> Self {
        Self::NonFiniteValues { stage, time }
    }

    /// IO 错误（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// 是否属于调用方用法错误（可在入口处急切检测）
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. }
                | Self::InvalidTimeSequence { .. }
                | Self::EmptyTimeSequence
                | Self::DimensionMismatch { .. }
                | Self::InvalidGrid { .. }
                | Self::InvalidConfig { .. }
        )
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl HjError {
    /// 检查形状是否一致
    #[inline]
    pub fn check_shape(name: &'static str, expected: &[usize], actual: &[usize]) -> HjResult<()> {
        if expected != actual {
            Err(Self::shape_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查维度是否一致
    #[inline]
    pub fn check_dim(name: &'static str, expected: usize, actual: usize) -> HjResult<()> {
        if expected != actual {
            Err(Self::dimension_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for HjError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// 条件不满足时提前返回错误
///
/// ```
/// use hj_foundation::{ensure, HjError, HjResult};
///
/// fn positive(v: f64) -> HjResult<f64> {
///     ensure!(v > 0.0, HjError::invalid_config("v", v.to_string(), "必须为正"));
///     Ok(v)
/// }
/// assert!(positive(1.0).is_ok());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

// ========================================================================
// 测试
// ========================================================================
