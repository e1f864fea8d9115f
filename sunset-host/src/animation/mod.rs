//! # Animation 模块
//!
//! 属性动画系统，为 Runtime 的 Scene 提供具体的动画器实现。
//!
//! ## 核心设计理念
//!
//! 动画系统只负责 **时间轴管理**：
//! - 知道某个属性从 A 到 B 需要在 duration 内变化
//! - 每帧把当前值直接写回对象
//! - **不假设对象类型**，对象自己决定如何使用这些值
//!
//! ## 核心概念
//!
//! - `Animation`: 可反向、可重复的时间轴
//! - `AnimationSystem`: 对象注册、动画器创建与统一更新
//! - `ObjectAnimator`: 实现 `sunset_runtime::Animator` 的动画器句柄
//! - `PropertyValue`: 浮点或 ARGB 颜色属性值
//! - `EasingFunction`: 缓动函数
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let system = shared_system();
//! let view_id = system.borrow_mut().register(view.clone());
//! let id = system
//!     .borrow_mut()
//!     .create_animator(AnimatorSpec::float(view_id, "y", 0.0, 710.0, 3.0))?;
//!
//! let mut sun = ObjectAnimator::new(&system, id);
//! sun.start();
//! let events = system.borrow_mut().update(1.0 / 60.0);
//! ```

mod animation;
mod color;
mod easing;
mod handle;
mod system;
mod traits;

pub use animation::{Animation, Direction, Lifecycle, Repeat, RepeatMode};
pub use color::Argb;
pub use easing::EasingFunction;
pub use handle::{ObjectAnimator, SharedAnimationSystem, shared_system};
pub use system::{AnimationSystem, AnimatorSpec};
pub use traits::{Animatable, ObjectId, PropertyValue, ValueKind};
