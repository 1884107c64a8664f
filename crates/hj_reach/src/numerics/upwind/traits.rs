// crates/hj_reach/src/numerics/upwind/traits.rs

//! 上风差分模板 trait 定义

use hj_foundation::Tolerance;

/// 一维上风差分模板
///
/// 输入为已按边界条件填充幽灵点的网格线 `padded`
/// （长度 `n + 2 * pad_width()`），输出每个内部点的左/右单侧导数。
pub trait UpwindStencil: Send + Sync {
    /// 模板名称
    fn name(&self) -> &'static str;

    /// 空间精度阶数
    fn order(&self) -> u8;

    /// 每侧所需幽灵点数
    fn pad_width(&self) -> usize;

    /// 计算单侧导数
    ///
    /// `left[i]` 近似 `D⁻V(x_i)`，`right[i]` 近似 `D⁺V(x_i)`。
    fn derivatives(&self, padded: &[f64], spacing: f64, left: &mut [f64], right: &mut [f64]);
}

/// 一阶差商 `D¹_{j+1/2} = (p[j+1] - p[j]) / Δx`
#[inline]
pub(crate) fn first_differences(padded: &[f64], spacing: f64) -> Vec<f64> {
    padded
        .windows(2)
        .map(|w| (w[1] - w[0]) / spacing)
        .collect()
}

/// 光滑指示子正则项
///
/// `ε = ε_rel · max(v_k²) + 1e-99`，防止除零并使权重对尺度不敏感。
#[inline]
pub(crate) fn weno_regularization(tol: &Tolerance, v: &[f64]) -> f64 {
    let max_sq = v.iter().fold(0.0_f64, |acc, &x| acc.max(x * x));
    tol.weno_epsilon * max_sq + 1e-99
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_differences() {
        let d = first_differences(&[0.0, 1.0, 4.0, 9.0], 0.5);
        assert_eq!(d, vec![2.0, 6.0, 10.0]);
    }

    #[test]
    fn test_weno_regularization_positive() {
        let tol = Tolerance::default();
        assert!(weno_regularization(&tol, &[0.0, 0.0]) > 0.0);
        let eps = weno_regularization(&tol, &[1.0, -3.0]);
        assert!((eps - 9e-6).abs() < 1e-12);
    }
}
