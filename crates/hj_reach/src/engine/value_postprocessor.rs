// crates/hj_reach/src/engine/value_postprocessor.rs

//! 值函数后处理
//!
//! 每个子步结束后作用于整个值函数。`StaticObstacle` 实现带障碍的
//! 可达问题：`V ← max(V, obstacle)`，障碍内部（`obstacle > 0`）始终不可达。

use crate::grid::Grid;
use hj_foundation::HjResult;
use ndarray::{ArrayD, Zip};
use serde::{Deserialize, Serialize};

/// 值函数后处理器
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePostprocessor {
    /// 不变换
    #[default]
    Identity,
    /// 静态障碍 `max(V, obstacle)`
    StaticObstacle(ArrayD<f64>),
}

impl ValuePostprocessor {
    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::StaticObstacle(_) => "static_obstacle",
        }
    }

    /// 检查障碍数组形状与网格一致
    pub fn check(&self, grid: &Grid) -> HjResult<()> {
        match self {
            Self::Identity => Ok(()),
            Self::StaticObstacle(obstacle) => grid.check_values("obstacle", obstacle),
        }
    }

    /// 应用后处理
    pub fn apply(&self, _time: f64, mut values: ArrayD<f64>) -> ArrayD<f64> {
        if let Self::StaticObstacle(obstacle) = self {
            Zip::from(&mut values)
                .and(obstacle)
                .for_each(|v, &o| *v = v.max(o));
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, IxDyn};

    #[test]
    fn test_static_obstacle() {
        let obstacle = arr1(&[-1.0, 2.0, 0.0]).into_shape_with_order(IxDyn(&[3])).unwrap();
        let values = arr1(&[0.5, 0.5, -0.5]).into_shape_with_order(IxDyn(&[3])).unwrap();
        let post = ValuePostprocessor::StaticObstacle(obstacle);
        let out = post.apply(0.0, values.clone());
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![0.5, 2.0, 0.0]);
        assert_eq!(ValuePostprocessor::Identity.apply(0.0, values.clone()), values);
    }
}
