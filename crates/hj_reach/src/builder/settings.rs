// crates/hj_reach/src/builder/settings.rs

//! 求解器设置

use crate::engine::{
    ArtificialDissipation, HamiltonianPostprocessor, TimeIntegratorKind, ValuePostprocessor,
};
use crate::numerics::upwind::UpwindScheme;
use hj_foundation::{ensure, HjError, HjResult, Tolerance};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 精度档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    /// 一阶上风 + TVD-RK1
    Low,
    /// ENO2 + TVD-RK2
    Medium,
    /// WENO3 + TVD-RK3
    #[default]
    High,
    /// WENO5 + TVD-RK3
    VeryHigh,
}

impl Accuracy {
    /// 全部档位，按精度升序
    pub const ALL: [Accuracy; 4] = [Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    /// 档位名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }

    /// 对应的上风格式
    pub fn upwind_scheme(&self) -> UpwindScheme {
        match self {
            Self::Low => UpwindScheme::FirstOrder,
            Self::Medium => UpwindScheme::Eno2,
            Self::High => UpwindScheme::Weno3,
            Self::VeryHigh => UpwindScheme::Weno5,
        }
    }

    /// 对应的时间积分器
    pub fn time_integrator(&self) -> TimeIntegratorKind {
        match self {
            Self::Low => TimeIntegratorKind::Rk1,
            Self::Medium => TimeIntegratorKind::Rk2,
            Self::High | Self::VeryHigh => TimeIntegratorKind::Rk3,
        }
    }
}

impl std::fmt::Display for Accuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Accuracy {
    type Err = HjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "very_high" | "veryhigh" => Ok(Self::VeryHigh),
            _ => Err(HjError::invalid_config(
                "accuracy",
                s,
                "可选值: low, medium, high, very_high",
            )),
        }
    }
}

/// 求解器设置
///
/// 构造后视为只读值，在求解调用之间共享。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSettings {
    /// 上风格式
    #[serde(default)]
    pub upwind_scheme: UpwindScheme,

    /// 时间积分器
    #[serde(default)]
    pub time_integrator: TimeIntegratorKind,

    /// 人工耗散
    #[serde(default)]
    pub artificial_dissipation: ArtificialDissipation,

    /// CFL 数，取值 (0, 1]
    #[serde(default = "default_cfl")]
    pub cfl_number: f64,

    /// Hamiltonian 后处理
    #[serde(default)]
    pub hamiltonian_postprocessor: HamiltonianPostprocessor,

    /// 值函数后处理
    #[serde(default)]
    pub value_postprocessor: ValuePostprocessor,

    /// 数值容差
    #[serde(default)]
    pub tolerance: Tolerance,
}

fn default_cfl() -> f64 {
    0.75
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self::with_accuracy(Accuracy::default(), HamiltonianPostprocessor::Identity)
    }
}

impl SolverSettings {
    /// 由精度档位构造
    ///
    /// 所有档位均使用全局 Lax-Friedrichs 耗散与 CFL 0.75。
    pub fn with_accuracy(
        accuracy: Accuracy,
        hamiltonian_postprocessor: HamiltonianPostprocessor,
    ) -> Self {
        Self {
            upwind_scheme: accuracy.upwind_scheme(),
            time_integrator: accuracy.time_integrator(),
            artificial_dissipation: ArtificialDissipation::Global,
            cfl_number: default_cfl(),
            hamiltonian_postprocessor,
            value_postprocessor: ValuePostprocessor::Identity,
            tolerance: Tolerance::default(),
        }
    }

    /// 设置 CFL 数
    pub fn with_cfl_number(mut self, cfl: f64) -> Self {
        self.cfl_number = cfl;
        self
    }

    /// 设置人工耗散
    pub fn with_dissipation(mut self, dissipation: ArtificialDissipation) -> Self {
        self.artificial_dissipation = dissipation;
        self
    }

    /// 设置值函数后处理
    pub fn with_value_postprocessor(mut self, post: ValuePostprocessor) -> Self {
        self.value_postprocessor = post;
        self
    }

    /// 设置数值容差
    pub fn with_tolerance(mut self, tol: Tolerance) -> Self {
        self.tolerance = tol;
        self
    }

    /// 验证设置
    pub fn validate(&self) -> HjResult<()> {
        ensure!(
            self.cfl_number > 0.0 && self.cfl_number <= 1.0,
            HjError::invalid_config("cfl_number", self.cfl_number.to_string(), "必须在 (0, 1] 范围内")
        );
        ensure!(
            self.tolerance.weno_epsilon > 0.0,
            HjError::invalid_config(
                "tolerance.weno_epsilon",
                self.tolerance.weno_epsilon.to_string(),
                "必须大于 0"
            )
        );
        ensure!(
            self.tolerance.min_dissipation >= 0.0,
            HjError::invalid_config(
                "tolerance.min_dissipation",
                self.tolerance.min_dissipation.to_string(),
                "不能为负"
            )
        );
        Ok(())
    }

    /// 从文件加载（`.yaml`/`.yml` 按 YAML 解析，其余按 JSON）
    pub fn load(path: impl AsRef<Path>) -> HjResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| HjError::io_with_source(format!("读取设置文件 {}", path.display()), e))?;
        if is_yaml(path) {
            serde_yaml::from_str(&content).map_err(|e| HjError::serialization(e.to_string()))
        } else {
            Self::from_json(&content)
        }
    }

    /// 保存到文件，格式同 [`Self::load`]
    pub fn save(&self, path: impl AsRef<Path>) -> HjResult<()> {
        let path = path.as_ref();
        let content = if is_yaml(path) {
            serde_yaml::to_string(self).map_err(|e| HjError::serialization(e.to_string()))?
        } else {
            self.to_json()?
        };
        std::fs::write(path, content)
            .map_err(|e| HjError::io_with_source(format!("写入设置文件 {}", path.display()), e))
    }

    /// 从JSON字符串解析
    pub fn from_json(json: &str) -> HjResult<Self> {
        serde_json::from_str(json).map_err(|e| HjError::serialization(e.to_string()))
    }

    /// 转换为JSON字符串
    pub fn to_json(&self) -> HjResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| HjError::serialization(e.to_string()))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
