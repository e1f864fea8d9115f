//! # Easing 模块
//!
//! 缓动函数库，用于动画的时间插值。
//!
//! `Accelerate` / `AccelerateDecelerate` 的曲线与常见移动平台的插值器一致，
//! 日落动画使用 `Accelerate(1.0)`。

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// 线性（匀速）
    Linear,
    /// 加速，参数为加速因子（1.0 即 `t²`）
    Accelerate(f32),
    /// 先加速后减速（余弦曲线）
    #[default]
    AccelerateDecelerate,
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)
    ///
    /// # 返回
    /// - 缓动后的进度值 (0.0 - 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::Accelerate(factor) => accelerate(t, *factor),
            EasingFunction::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

fn accelerate(t: f32, factor: f32) -> f32 {
    if factor == 1.0 {
        t * t
    } else {
        t.powf(2.0 * factor)
    }
}
