//! # Color 模块
//!
//! 32 位 ARGB 颜色及其插值。
//!
//! 插值在线性空间中进行：先把 sRGB 分量转换到线性空间（γ = 2.2），
//! 插值后再转换回 sRGB，alpha 分量直接线性插值。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const GAMMA: f32 = 2.2;

/// ARGB 颜色（`0xAARRGGBB`）
///
/// 序列化为 `"#AARRGGBB"` 字符串；解析时也接受 `"#RRGGBB"`（alpha 视为 `ff`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Argb(pub u32);

impl Argb {
    /// 由不透明的 RGB 分量创建
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_channels(0xff, r, g, b)
    }

    /// 由各分量创建
    pub fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    pub fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(&self) -> u8 {
        self.0 as u8
    }

    /// 解析 `#RRGGBB` 或 `#AARRGGBB`
    pub fn from_hex(text: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(text.to_string());

        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            6 => Ok(Self(0xff00_0000 | value)),
            8 => Ok(Self(value)),
            _ => Err(invalid()),
        }
    }

    /// 格式化为 `#AARRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:08x}", self.0)
    }

    /// 线性空间插值
    ///
    /// `t = 0.0` 返回 `from`，`t = 1.0` 返回 `to`。
    pub fn lerp(from: Argb, to: Argb, t: f32) -> Argb {
        let a = lerp_channel(from.alpha(), to.alpha(), t);
        let r = lerp_linear(from.red(), to.red(), t);
        let g = lerp_linear(from.green(), to.green(), t);
        let b = lerp_linear(from.blue(), to.blue(), t);
        Argb::from_channels(a, r, g, b)
    }
}

impl std::fmt::Display for Argb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for Argb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Argb> for String {
    fn from(color: Argb) -> Self {
        color.to_hex()
    }
}

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    let from = from as f32 / 255.0;
    let to = to as f32 / 255.0;
    to_byte(from + (to - from) * t)
}

fn lerp_linear(from: u8, to: u8, t: f32) -> u8 {
    let from = (from as f32 / 255.0).powf(GAMMA);
    let to = (to as f32 / 255.0).powf(GAMMA);
    let value = from + (to - from) * t;
    to_byte(value.max(0.0).powf(1.0 / GAMMA))
}

fn to_byte(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
