// crates/hj_reach/src/numerics/mod.rs

//! 数值离散模块
//!
//! - [`upwind`]: 上风单侧梯度（一阶、ENO2、WENO3、WENO5）

pub mod upwind;

pub use upwind::{create_stencil, upwind_gradients, UpwindGradients, UpwindScheme, UpwindStencil};
