// apps/hj_cli/src/commands/validate.rs

//! 设置验证命令

use anyhow::{bail, Result};
use clap::Args;
use hj_reach::{SolverSettings, TimeIntegratorKind, UpwindScheme};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 验证参数
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// 设置文件路径（JSON 或 YAML）
    #[arg(short, long)]
    pub settings: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn passed(&self, strict: bool) -> bool {
        self.errors.is_empty() && (!strict || self.warnings.is_empty())
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== HJ Reach 设置验证 ===");
    println!("检查设置文件: {}", args.settings.display());

    let mut result = ValidationResult::default();
    match SolverSettings::load(&args.settings) {
        Ok(settings) => check_settings(&settings, &mut result),
        Err(e) => result.add_error(format!("无法加载: {e}")),
    }

    for w in &result.warnings {
        warn!("{w}");
        println!("  ⚠ {w}");
    }
    for e in &result.errors {
        error!("{e}");
        println!("  ✗ {e}");
    }

    if !result.passed(args.strict) {
        bail!(
            "验证失败: {} 个错误, {} 个警告",
            result.errors.len(),
            result.warnings.len()
        );
    }
    println!("  ✓ 设置有效");
    Ok(())
}

fn check_settings(settings: &SolverSettings, result: &mut ValidationResult) {
    if let Err(e) = settings.validate() {
        result.add_error(e.to_string());
    }

    // 高阶空间格式配一阶时间积分时精度由时间误差主导
    if settings.time_integrator == TimeIntegratorKind::Rk1
        && matches!(settings.upwind_scheme, UpwindScheme::Weno3 | UpwindScheme::Weno5)
    {
        result.add_warning(format!(
            "{} 与 {} 搭配时时间精度不足",
            settings.upwind_scheme.name(),
            settings.time_integrator.name()
        ));
    }
    if settings.cfl_number > 0.9 && settings.cfl_number <= 1.0 {
        result.add_warning(format!("CFL 数 {} 接近稳定上限", settings.cfl_number));
    }
}
