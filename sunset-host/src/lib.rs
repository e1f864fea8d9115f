//! # Sunset Host 层
//!
//! 日落场景的宿主层实现，以无头方式运行。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 属性动画系统（时间轴、缓动、颜色插值）
//! - 可动画视图与布局
//! - 配置加载
//! - 把动画器生命周期事件按顺序送回 Runtime
//!
//! Host 层不包含日落/日出的状态逻辑，状态机在 `sunset-runtime` 中。

pub mod animation;
pub mod config;
pub mod error;
pub mod stage;
pub mod sunset;
pub mod view;

pub use animation::{
    Animatable, AnimationSystem, AnimatorSpec, Argb, EasingFunction, ObjectAnimator, ObjectId,
    PropertyValue, SharedAnimationSystem,
};
pub use config::{
    AppConfig, DecorationConfig, LayoutConfig, PaletteConfig, SimulationConfig, TimingConfig,
};
pub use error::{AnimationError, ConfigError, HostError, HostResult};
pub use stage::{StageView, StageViews, SunsetStage};
pub use sunset::{FrameSnapshot, SunsetScene};
pub use view::{AnimatableView, ViewData};
