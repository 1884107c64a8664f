// crates/hj_reach/src/numerics/upwind/first_order.rs

//! 一阶上风差分
//!
//! ```text
//! D⁻V_i = (V_i - V_{i-1}) / Δx
//! D⁺V_i = (V_{i+1} - V_i) / Δx
//! ```

use super::traits::UpwindStencil;

/// 一阶上风模板
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOrder;

impl UpwindStencil for FirstOrder {
    fn name(&self) -> &'static str {
        "FirstOrder"
    }

    fn order(&self) -> u8 {
        1
    }

    fn pad_width(&self) -> usize {
        1
    }

    fn derivatives(&self, padded: &[f64], spacing: f64, left: &mut [f64], right: &mut [f64]) {
        for i in 0..left.len() {
            let center = padded[i + 1];
            left[i] = (center - padded[i]) / spacing;
            right[i] = (padded[i + 2] - center) / spacing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_order_quadratic() {
        // V = x², Δx = 1, 内部点 x = 0, 1, 2
        let padded = [1.0, 0.0, 1.0, 4.0, 9.0];
        let mut left = [0.0; 3];
        let mut right = [0.0; 3];
        FirstOrder.derivatives(&padded, 1.0, &mut left, &mut right);
        assert_eq!(left, [-1.0, 1.0, 3.0]);
        assert_eq!(right, [1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_metadata() {
        assert_eq!(FirstOrder.order(), 1);
        assert_eq!(FirstOrder.pad_width(), 1);
    }
}
