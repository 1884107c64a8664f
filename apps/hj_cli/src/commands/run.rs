// apps/hj_cli/src/commands/run.rs

//! 运行算例命令
//!
//! Air3d 追逃问题的后向可达管：
//! 定义域 `[-6, 20] × [-10, 10] × [0, 2π)`，航向角为周期轴，
//! 初始值函数为捕获半径柱体 `‖(x, y)‖ - r`。

use anyhow::{ensure, Context, Result};
use clap::Args;
use hj_reach::analysis::{slice_2d, sublevel_volume};
use hj_reach::prelude::*;
use ndarray::array;
use std::f64::consts::TAU;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// 运行算例参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// 设置文件路径（JSON 或 YAML），覆盖 --accuracy
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// 精度档位 (low, medium, high, very_high)
    #[arg(short, long, default_value = "very_high")]
    pub accuracy: Accuracy,

    /// 目标时刻（负值为后向求解）
    #[arg(short = 't', long, default_value = "-2.8", allow_hyphen_values = true)]
    pub target_time: f64,

    /// 采样区间数
    #[arg(short = 'n', long, default_value = "4")]
    pub samples: usize,

    /// 每轴网格点数 (x,y,ψ)
    #[arg(short, long, value_delimiter = ',', default_value = "51,40,50")]
    pub resolution: Vec<usize>,

    /// 捕获半径
    #[arg(long, default_value = "5.0")]
    pub capture_radius: f64,

    /// 导出最终值函数在给定航向角处的 (x, y) 切片
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// 切片航向角 [rad]
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    pub heading: f64,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== HJ Reach Air3d 算例 ===");
    ensure!(args.samples > 0, "采样区间数必须大于 0");
    ensure!(args.resolution.len() == 3, "分辨率需要 3 个值 (x,y,ψ)");

    let settings = match &args.settings {
        Some(path) => SolverSettings::load(path)
            .with_context(|| format!("无法加载设置文件: {}", path.display()))?,
        None => SolverSettings::with_accuracy(
            args.accuracy,
            HamiltonianPostprocessor::BackwardsReachableTube,
        ),
    };
    settings.validate().context("设置无效")?;
    if settings.hamiltonian_postprocessor != HamiltonianPostprocessor::BackwardsReachableTube {
        warn!("Hamiltonian 后处理为 {}，结果不是可达管", settings.hamiltonian_postprocessor.name());
    }
    info!(
        "设置: {} + {}, {}, CFL={}",
        settings.upwind_scheme.name(),
        settings.time_integrator.name(),
        settings.artificial_dissipation.name(),
        settings.cfl_number
    );

    let domain = BoxSet::new(vec![-6.0, -10.0, 0.0], vec![20.0, 10.0, TAU])?;
    let grid = Grid::from_lattice_parameters_and_boundary_conditions(domain, &args.resolution, &[2])
        .context("构建网格失败")?;
    info!("网格: {:?}, {} 点, 间距 {:?}", grid.shape(), grid.len(), grid.spacings());

    let initial_values = shapes::cylinder(&grid, &[2], &[0.0, 0.0, 0.0], args.capture_radius)?;
    let dynamics = Air3d::default();

    let times: Vec<f64> = (0..=args.samples)
        .map(|k| args.target_time * k as f64 / args.samples as f64)
        .collect();
    info!("时间采样: {:?}", times);

    let start = Instant::now();
    let solution = solve(&settings, &dynamics, &grid, &times, &initial_values)
        .context("求解失败")?;
    let elapsed = start.elapsed();

    for (t, values) in solution.iter() {
        let volume = sublevel_volume(&grid, values, 0.0)?;
        let min_value = values.iter().copied().fold(f64::INFINITY, f64::min);
        info!("t={:>7.3}: 可达管体积={:>10.3}, min V={:.4}", t, volume, min_value);
    }

    info!("=== 求解完成 ===");
    info!("计算时间: {:.2} s", elapsed.as_secs_f64());

    if let Some(path) = &args.export_csv {
        let final_values = solution
            .last()
            .context("结果为空")?;
        let slice = slice_2d(&grid, final_values, [0, 1], array![0.0, 0.0, args.heading].view())?;
        let file = File::create(path)
            .with_context(|| format!("无法创建文件: {}", path.display()))?;
        slice.write_csv(BufWriter::new(file))?;
        info!("切片已导出: {} (ψ≈{})", path.display(), args.heading);
    }

    Ok(())
}
