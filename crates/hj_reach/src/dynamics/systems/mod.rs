// crates/hj_reach/src/dynamics/systems/mod.rs

//! 具体动力学系统
//!
//! - [`Air3d`]: 三维追逃（相对坐标）
//! - [`DubinsCar`]: 恒速转向车辆，带有界速度扰动
//! - [`DoubleIntegrator`]: 二阶积分器
//! - [`Integrator`]: n 维积分器（常漂移 + 盒约束控制/扰动）

mod air3d;
mod double_integrator;
mod dubins;
mod integrator;

pub use air3d::Air3d;
pub use double_integrator::DoubleIntegrator;
pub use dubins::DubinsCar;
pub use integrator::Integrator;
