//! # Animator 模块
//!
//! 定义属性动画器的能力接口。
//!
//! Runtime 不实现任何插值或时间轴逻辑，只通过 [`Animator`] trait 控制动画器：
//! 启动、反向播放、查询是否运行。动画器的生命周期事件由 Host 以
//! [`AnimatorEvent`] 的形式按顺序送回 Runtime。

use serde::{Deserialize, Serialize};

/// 动画器标识符
///
/// 由 Host 的动画系统分配，用于把生命周期事件路由到对应的 Scene 成员。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimatorId(pub u64);

impl AnimatorId {
    /// 创建动画器 ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AnimatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AnimatorId({})", self.0)
    }
}

/// 动画器生命周期事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimatorEvent {
    /// 开始播放（正向或反向）
    Started(AnimatorId),
    /// 播放到当前方向的终点
    Ended(AnimatorId),
    /// 播放中被重新启动
    Cancelled(AnimatorId),
    /// 重复播放进入下一轮
    Repeated(AnimatorId),
}

impl AnimatorEvent {
    /// 事件所属的动画器
    pub fn animator_id(&self) -> AnimatorId {
        match self {
            Self::Started(id) | Self::Ended(id) | Self::Cancelled(id) | Self::Repeated(id) => *id,
        }
    }

    /// 是否为结束事件
    pub fn is_end(&self) -> bool {
        matches!(self, Self::Ended(_))
    }
}

/// 属性动画器能力接口
///
/// 语义约定（与常见 UI 平台的属性动画一致）：
///
/// - `start()`：从起始值正向播放
/// - `reverse()`：运行中时原地反向；空闲时从终点值反向播放
///   （若动画器停在起始值，会先跳到终点值，这是调用方需要规避的情况）
/// - `is_running()`：是否正在播放
///
/// 实现者负责在播放结束时产生 [`AnimatorEvent::Ended`]。
pub trait Animator {
    /// 动画器 ID
    fn id(&self) -> AnimatorId;

    /// 正向启动
    fn start(&mut self);

    /// 反向播放
    fn reverse(&mut self);

    /// 是否正在播放
    fn is_running(&self) -> bool;
}
