//! # Config 模块
//!
//! 运行时配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::animation::Argb;
use crate::error::ConfigError;

/// 模拟帧率上限
pub const MAX_FPS: u32 = 1000;

/// 模拟时长上限（秒）
pub const MAX_DURATION_SECS: f32 = 3600.0;

/// 应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 动画时长
    #[serde(default)]
    pub timing: TimingConfig,

    /// 调色板
    #[serde(default)]
    pub palette: PaletteConfig,

    /// 场景布局
    #[serde(default)]
    pub layout: LayoutConfig,

    /// 装饰动画（脉动、光芒）
    #[serde(default)]
    pub decorations: DecorationConfig,

    /// 无头模拟参数
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// 动画时长配置（毫秒）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// 日落（太阳下落 + 天空变橙）时长
    #[serde(default = "default_sunset_ms")]
    pub sunset_ms: u64,

    /// 夜空变暗时长
    #[serde(default = "default_night_sky_ms")]
    pub night_sky_ms: u64,

    /// 太阳脉动单程时长
    #[serde(default = "default_pulse_ms")]
    pub pulse_ms: u64,

    /// 光芒旋转一周的时长
    #[serde(default = "default_rays_ms")]
    pub rays_ms: u64,
}

/// 调色板
///
/// 颜色写作 `#RRGGBB` 或 `#AARRGGBB`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    #[serde(default = "default_blue_sky")]
    pub blue_sky: Argb,

    #[serde(default = "default_sunset_sky")]
    pub sunset_sky: Argb,

    #[serde(default = "default_night_sky")]
    pub night_sky: Argb,

    #[serde(default = "default_sea")]
    pub sea: Argb,

    #[serde(default = "default_sun")]
    pub sun: Argb,
}

/// 场景布局
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// 天空高度
    #[serde(default = "default_sky_height")]
    pub sky_height: f32,

    /// 海面高度
    #[serde(default = "default_sea_height")]
    pub sea_height: f32,

    /// 太阳（及倒影）直径
    #[serde(default = "default_sun_size")]
    pub sun_size: f32,

    /// 太阳落下时越过边界的额外距离，避免脉动时露出边缘
    #[serde(default = "default_overshoot")]
    pub overshoot: f32,
}

/// 装饰动画配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationConfig {
    /// 是否启用装饰动画
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// 脉动的缩放倍数
    #[serde(default = "default_pulse_scale")]
    pub pulse_scale: f32,

    /// 是否旋转光芒
    #[serde(default = "default_true")]
    pub rays: bool,
}

/// 无头模拟配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 每秒帧数
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// 模拟总时长（秒）
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f32,

    /// 点击时刻（秒）
    #[serde(default = "default_clicks")]
    pub clicks: Vec<f32>,

    /// 每隔多少帧输出一次快照
    #[serde(default = "default_print_every")]
    pub print_every: u32,
}

// 默认值函数
fn default_sunset_ms() -> u64 {
    3000
}

fn default_night_sky_ms() -> u64 {
    1500
}

fn default_pulse_ms() -> u64 {
    3000
}

fn default_rays_ms() -> u64 {
    6000
}

fn default_blue_sky() -> Argb {
    Argb(0xff1e_7ac7)
}

fn default_sunset_sky() -> Argb {
    Argb(0xffec_8100)
}

fn default_night_sky() -> Argb {
    Argb(0xff05_192e)
}

fn default_sea() -> Argb {
    Argb(0xff22_4869)
}

fn default_sun() -> Argb {
    Argb(0xfffc_fcb7)
}

fn default_sky_height() -> f32 {
    610.0
}

fn default_sea_height() -> f32 {
    390.0
}

fn default_sun_size() -> f32 {
    100.0
}

fn default_overshoot() -> f32 {
    100.0
}

fn default_true() -> bool {
    true
}

fn default_pulse_scale() -> f32 {
    1.2
}

fn default_fps() -> u32 {
    60
}

fn default_duration_secs() -> f32 {
    6.0
}

fn default_clicks() -> Vec<f32> {
    vec![0.0]
}

fn default_print_every() -> u32 {
    30
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            sunset_ms: default_sunset_ms(),
            night_sky_ms: default_night_sky_ms(),
            pulse_ms: default_pulse_ms(),
            rays_ms: default_rays_ms(),
        }
    }
}

impl TimingConfig {
    /// 毫秒转秒
    pub fn secs(ms: u64) -> f32 {
        ms as f32 / 1000.0
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            blue_sky: default_blue_sky(),
            sunset_sky: default_sunset_sky(),
            night_sky: default_night_sky(),
            sea: default_sea(),
            sun: default_sun(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sky_height: default_sky_height(),
            sea_height: default_sea_height(),
            sun_size: default_sun_size(),
            overshoot: default_overshoot(),
        }
    }
}

impl LayoutConfig {
    /// 太阳在天空中垂直居中时的 top
    pub fn sun_top(&self) -> f32 {
        (self.sky_height - self.sun_size) / 2.0
    }
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pulse_scale: default_pulse_scale(),
            rays: true,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            duration_secs: default_duration_secs(),
            clicks: default_clicks(),
            print_every: default_print_every(),
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并打印警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = %path.display(), "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;
        for (name, ms) in [
            ("sunset_ms", timing.sunset_ms),
            ("night_sky_ms", timing.night_sky_ms),
            ("pulse_ms", timing.pulse_ms),
            ("rays_ms", timing.rays_ms),
        ] {
            if ms == 0 {
                return Err(ConfigError::ValidationFailed(format!(
                    "timing.{name} 必须大于 0"
                )));
            }
        }

        let layout = &self.layout;
        let simulation = &self.simulation;
        for (name, value) in [
            ("layout.sky_height", layout.sky_height),
            ("layout.sea_height", layout.sea_height),
            ("layout.sun_size", layout.sun_size),
            ("layout.overshoot", layout.overshoot),
            ("decorations.pulse_scale", self.decorations.pulse_scale),
            ("simulation.duration_secs", simulation.duration_secs),
        ] {
            ensure_finite(name, value)?;
        }

        if layout.sky_height <= 0.0 || layout.sea_height <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "天空和海面高度必须大于 0".to_string(),
            ));
        }

        if layout.sun_size <= 0.0 || layout.sun_size > layout.sky_height {
            return Err(ConfigError::ValidationFailed(format!(
                "太阳直径必须在 (0, {}] 之间",
                layout.sky_height
            )));
        }

        if layout.overshoot < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "overshoot 不能为负数".to_string(),
            ));
        }

        if self.decorations.pulse_scale <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "脉动缩放倍数必须大于 0".to_string(),
            ));
        }

        if simulation.fps == 0 || simulation.fps > MAX_FPS {
            return Err(ConfigError::ValidationFailed(format!(
                "fps 必须在 [1, {MAX_FPS}] 之间"
            )));
        }

        if !(0.0..=MAX_DURATION_SECS).contains(&simulation.duration_secs) {
            return Err(ConfigError::ValidationFailed(format!(
                "模拟时长必须在 [0, {MAX_DURATION_SECS}] 秒之间"
            )));
        }

        if simulation.print_every == 0 {
            return Err(ConfigError::ValidationFailed(
                "print_every 必须大于 0".to_string(),
            ));
        }

        for &click in &simulation.clicks {
            ensure_finite("simulation.clicks", click)?;
            if click < 0.0 {
                return Err(ConfigError::ValidationFailed(format!(
                    "点击时刻不能为负数: {click}"
                )));
            }
        }

        Ok(())
    }
}

/// 拒绝 NaN 与无穷大
fn ensure_finite(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed(format!(
            "{name} 必须是有限数值，实际为 {value}"
        )))
    }
}
