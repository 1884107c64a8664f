// crates/hj_reach/src/sets.rs

//! 凸集
//!
//! 控制空间与扰动空间由凸集描述。求解器只需要两个能力：
//!
//! - `extreme_point(d)`: 集合中使 `⟨d, x⟩` 最大的点（支撑点）
//! - `max_magnitudes()`: 每个分量绝对值的上界，用于 Lax-Friedrichs 耗散系数
//!
//! 网格定义域同样使用 [`BoxSet`] 表示。

use hj_foundation::{ensure, HjError, HjResult, Tolerance};
use ndarray::{Array1, ArrayView1, Zip};
use serde::{Deserialize, Serialize};

/// 凸集能力接口
pub trait ConvexSet: Send + Sync + std::fmt::Debug {
    /// 维度
    fn ndim(&self) -> usize;

    /// 支撑点：使 `direction · x` 最大的集合元素
    fn extreme_point(&self, direction: ArrayView1<f64>) -> Array1<f64>;

    /// 各分量绝对值上界
    fn max_magnitudes(&self) -> Array1<f64>;

    /// 外接轴对齐盒
    fn bounding_box(&self) -> BoxSet;
}

/// 轴对齐超矩形 `[lo, hi]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSet {
    lo: Array1<f64>,
    hi: Array1<f64>,
}

impl BoxSet {
    /// 由上下界创建
    ///
    /// 要求 `lo.len() == hi.len()` 且逐分量 `lo <= hi`。
    pub fn new(lo: impl Into<Array1<f64>>, hi: impl Into<Array1<f64>>) -> HjResult<Self> {
        let lo = lo.into();
        let hi = hi.into();
        HjError::check_dim("box upper bound", lo.len(), hi.len())?;
        ensure!(
            Zip::from(&lo).and(&hi).all(|&l, &h| l <= h),
            HjError::invalid_config(
                "box",
                format!("lo={lo}, hi={hi}"),
                "下界必须逐分量不大于上界"
            )
        );
        Ok(Self { lo, hi })
    }

    /// 关于原点对称的盒 `[-r, r]`
    pub fn symmetric(radii: impl Into<Array1<f64>>) -> HjResult<Self> {
        let hi = radii.into();
        let lo = hi.mapv(|r| -r);
        Self::new(lo, hi)
    }

    /// 一维区间
    pub fn interval(lo: f64, hi: f64) -> HjResult<Self> {
        Self::new(vec![lo], vec![hi])
    }

    /// 单位盒 `[-1, 1]^n`
    pub fn unit(ndim: usize) -> Self {
        Self {
            lo: Array1::from_elem(ndim, -1.0),
            hi: Array1::from_elem(ndim, 1.0),
        }
    }

    /// 零维空集（无扰动的系统使用）
    pub fn empty() -> Self {
        Self {
            lo: Array1::zeros(0),
            hi: Array1::zeros(0),
        }
    }

    /// 下界
    pub fn lo(&self) -> &Array1<f64> {
        &self.lo
    }

    /// 上界
    pub fn hi(&self) -> &Array1<f64> {
        &self.hi
    }

    /// 各轴宽度
    pub fn widths(&self) -> Array1<f64> {
        &self.hi - &self.lo
    }

    /// 点是否位于盒内（含边界）
    pub fn contains(&self, point: ArrayView1<f64>) -> bool {
        point.len() == self.ndim()
            && Zip::from(&point)
                .and(&self.lo)
                .and(&self.hi)
                .all(|&x, &l, &h| l <= x && x <= h)
    }
}

impl ConvexSet for BoxSet {
    fn ndim(&self) -> usize {
        self.lo.len()
    }

    fn extreme_point(&self, direction: ArrayView1<f64>) -> Array1<f64> {
        Zip::from(&direction)
            .and(&self.lo)
            .and(&self.hi)
            .map_collect(|&d, &l, &h| if d < 0.0 { l } else { h })
    }

    fn max_magnitudes(&self) -> Array1<f64> {
        Zip::from(&self.lo)
            .and(&self.hi)
            .map_collect(|&l, &h| l.abs().max(h.abs()))
    }

    fn bounding_box(&self) -> BoxSet {
        self.clone()
    }
}

/// 欧氏球 `{x : |x - c| <= r}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    center: Array1<f64>,
    radius: f64,
    #[serde(default)]
    tolerance: Tolerance,
}

impl Ball {
    /// 创建球，半径必须非负
    pub fn new(center: impl Into<Array1<f64>>, radius: f64) -> HjResult<Self> {
        ensure!(
            radius >= 0.0 && radius.is_finite(),
            HjError::invalid_config("radius", radius.to_string(), "半径必须为非负有限值")
        );
        Ok(Self {
            center: center.into(),
            radius,
            tolerance: Tolerance::default(),
        })
    }

    /// 设置零方向判定所用的容差
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// 中心
    pub fn center(&self) -> &Array1<f64> {
        &self.center
    }

    /// 半径
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl ConvexSet for Ball {
    fn ndim(&self) -> usize {
        self.center.len()
    }

    fn extreme_point(&self, direction: ArrayView1<f64>) -> Array1<f64> {
        let norm = direction.dot(&direction).sqrt();
        if self.tolerance.is_zero_direction(norm) {
            return self.center.clone();
        }
        &self.center + &direction.mapv(|d| self.radius * d / norm)
    }

    fn max_magnitudes(&self) -> Array1<f64> {
        self.center.mapv(|c| c.abs() + self.radius)
    }

    fn bounding_box(&self) -> BoxSet {
        BoxSet {
            lo: self.center.mapv(|c| c - self.radius),
            hi: self.center.mapv(|c| c + self.radius),
        }
    }
}
