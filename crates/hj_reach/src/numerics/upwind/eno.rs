// crates/hj_reach/src/numerics/upwind/eno.rs

//! 二阶 ENO (Essentially Non-Oscillatory) 上风差分
//!
//! # 算法
//!
//! 在两个候选二阶差商中选择绝对值较小者（更光滑的模板）：
//!
//! ```text
//! D²_i   = (D¹_{i+1/2} - D¹_{i-1/2}) / (2Δx)
//! D⁻V_i  = D¹_{i-1/2} + Δx · pick(D²_{i-1}, D²_i)
//! D⁺V_i  = D¹_{i+1/2} - Δx · pick(D²_i, D²_{i+1})
//! pick(a, b) = a  若 |a| <= |b|，否则 b
//! ```
//!
//! 对二次函数精确，在间断附近退化为不跨越间断的单侧模板。

use super::traits::{first_differences, UpwindStencil};

/// 二阶 ENO 模板
#[derive(Debug, Clone, Copy, Default)]
pub struct EssentiallyNonOscillatory2;

#[inline]
fn pick(a: f64, b: f64) -> f64 {
    if a.abs() <= b.abs() {
        a
    } else {
        b
    }
}

impl UpwindStencil for EssentiallyNonOscillatory2 {
    fn name(&self) -> &'static str {
        "ENO2"
    }

    fn order(&self) -> u8 {
        2
    }

    fn pad_width(&self) -> usize {
        2
    }

    fn derivatives(&self, padded: &[f64], spacing: f64, left: &mut [f64], right: &mut [f64]) {
        let pad = self.pad_width();
        let d1 = first_differences(padded, spacing);
        // d1[p] 位于 padded[p] 与 padded[p + 1] 之间；d2(p) 为 padded[p] 处的二阶差商
        let d2 = |p: usize| (d1[p] - d1[p - 1]) / (2.0 * spacing);

        for i in 0..left.len() {
            let p = i + pad;
            let d2_prev = d2(p - 1);
            let d2_here = d2(p);
            let d2_next = d2(p + 1);

            left[i] = d1[p - 1] + spacing * pick(d2_prev, d2_here);
            right[i] = d1[p] - spacing * pick(d2_here, d2_next);
        }
    }
}
