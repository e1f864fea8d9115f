//! # Input 模块
//!
//! 定义 Host 向 Runtime 传递的输入。
//!
//! ## 设计说明
//!
//! - 用户点击和动画器生命周期事件都以 `SceneInput` 的形式进入 Runtime
//! - Host 必须在同一线程上按发生顺序逐条传入，Runtime 不做排序
//! - 时间流逝由 Host 的动画系统处理，Runtime 只关心离散事件

use serde::{Deserialize, Serialize};

use crate::animator::AnimatorEvent;

/// Host 向 Runtime 传递的输入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneInput {
    /// 用户点击场景（推进日落/日出）
    Click,

    /// 动画器生命周期事件
    Animator(AnimatorEvent),
}

impl SceneInput {
    /// 创建点击输入
    pub fn click() -> Self {
        Self::Click
    }
}

impl From<AnimatorEvent> for SceneInput {
    fn from(event: AnimatorEvent) -> Self {
        Self::Animator(event)
    }
}
