// crates/hj_reach/src/engine/mod.rs

//! 求解引擎
//!
//! - [`dissipation`]: Lax-Friedrichs 耗散系数
//! - [`hamiltonian`]: 数值 Hamiltonian 与后处理
//! - [`timestep`]: CFL 子步长
//! - [`time_integrator`]: TVD Runge-Kutta
//! - [`value_postprocessor`]: 子步后的值函数变换
//! - [`solver`]: 入口 [`step`] 与 [`solve`]

pub mod dissipation;
pub mod hamiltonian;
pub mod solver;
pub mod time_integrator;
pub mod timestep;
pub mod value_postprocessor;

pub use dissipation::ArtificialDissipation;
pub use hamiltonian::HamiltonianPostprocessor;
pub use solver::{solve, step, Solution};
pub use time_integrator::{create_integrator, TimeIntegrator, TimeIntegratorKind};
pub use timestep::CflCalculator;
pub use value_postprocessor::ValuePostprocessor;
