// apps/hj_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示精度档位映射与默认设置。

use anyhow::Result;
use clap::Args;
use hj_reach::{Accuracy, HamiltonianPostprocessor, SolverSettings};
use tracing::info;

/// 信息显示参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// 仅显示精度档位
    #[arg(long)]
    pub tiers: bool,

    /// 以 JSON 输出默认设置
    #[arg(long)]
    pub json: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== HJ Reach 信息 ===");

    print_tiers();
    if args.tiers {
        return Ok(());
    }
    println!();
    print_default_settings(args.json)
}

fn print_tiers() {
    println!("=== 精度档位 ===");
    println!("{:<10} {:<12} {:<10}", "档位", "上风格式", "时间积分");
    for accuracy in Accuracy::ALL {
        println!(
            "{:<10} {:<12} {:<10}",
            accuracy.name(),
            accuracy.upwind_scheme().name(),
            accuracy.time_integrator().name()
        );
    }
    println!("所有档位: 全局 Lax-Friedrichs 耗散, CFL 0.75");
}

fn print_default_settings(json: bool) -> Result<()> {
    println!("=== 默认设置 ===");
    let settings = SolverSettings::with_accuracy(
        Accuracy::default(),
        HamiltonianPostprocessor::Identity,
    );

    if json {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    println!("上风格式: {}", settings.upwind_scheme.name());
    println!("时间积分: {}", settings.time_integrator.name());
    println!("人工耗散: {}", settings.artificial_dissipation.name());
    println!("CFL 数: {}", settings.cfl_number);
    println!("Hamiltonian 后处理: {}", settings.hamiltonian_postprocessor.name());
    println!("值函数后处理: {}", settings.value_postprocessor.name());
    println!("WENO ε: {:e}", settings.tolerance.weno_epsilon);
    Ok(())
}
