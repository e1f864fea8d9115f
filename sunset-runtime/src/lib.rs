//! # Sunset Runtime
//!
//! 日落场景的核心运行时库。
//!
//! ## 架构概述
//!
//! `sunset-runtime` 是纯逻辑核心，不依赖任何渲染或时间源。
//! 它只通过 [`Animator`] trait 控制属性动画器，由宿主层（Host）提供具体实现：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │──── SceneInput::Click ──────────►│ advance()
//!   │◄─── Animator::start / reverse ───│
//!   │                                   │
//!   │──── SceneInput::Animator(Ended) ►│ 完成回调 → 下一阶段
//!   │◄─── Animator::start / reverse ───│
//! ```
//!
//! ## 线程模型
//!
//! 所有输入必须在同一线程上按发生顺序传入。Scene 的完成回调使用
//! `Rc<RefCell<_>>` 共享队列，控制器因此不是 `Send`，编译期即保证单线程。
//!
//! ## 核心类型
//!
//! - [`Animator`]：属性动画器能力接口
//! - [`Scene`]：动画组，统一启动/反向/查询，第一个成员结束即整组结束
//! - [`SunsetController`]：日落/日出状态机
//! - [`SceneInput`]：Host 向 Runtime 传递的输入
//!
//! ## 使用示例
//!
//! ```ignore
//! use sunset_runtime::{SceneInput, SunsetController};
//!
//! let mut controller = SunsetController::new(factory);
//!
//! // 主循环
//! loop {
//!     if clicked {
//!         controller.handle(SceneInput::Click);
//!     }
//!     for event in animation_system.update(dt) {
//!         controller.handle(SceneInput::Animator(event));
//!     }
//! }
//! ```

pub mod animator;
pub mod controller;
pub mod input;
pub mod scene;

#[cfg(test)]
pub(crate) mod testing;

// 重导出核心类型
pub use animator::{Animator, AnimatorEvent, AnimatorId};
pub use controller::{SceneFactory, SkyState, SunsetController};
pub use input::SceneInput;
pub use scene::{FinishedListener, Scene};
