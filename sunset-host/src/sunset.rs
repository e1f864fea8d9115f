//! # Sunset 模块
//!
//! 无头日落场景：把动画系统、舞台和 Runtime 控制器组装在一起。
//!
//! 每帧流程：
//!
//! ```text
//! click()  ──► SunsetController::handle(Click)
//! update() ──► AnimationSystem::update(dt) ──► 逐个事件 handle(Animator(e))
//! ```

use serde::Serialize;
use sunset_runtime::{Animator, Scene, SceneInput, SkyState, SunsetController};
use tracing::{debug, info};

use crate::animation::{ObjectAnimator, SharedAnimationSystem, shared_system};
use crate::config::AppConfig;
use crate::stage::{StageViews, SunsetStage};
use crate::view::ViewData;

/// 单帧快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    /// 场景时间（秒）
    pub time: f32,
    pub state: SkyState,
    /// 日落/日出动画是否在播放（不含装饰动画）
    pub transitioning: bool,
    pub views: Vec<ViewData>,
}

/// 日落场景
pub struct SunsetScene {
    system: SharedAnimationSystem,
    controller: SunsetController<ObjectAnimator, SunsetStage>,
    decorations: Vec<ObjectAnimator>,
    laid_out: bool,
    time: f32,
}

impl std::fmt::Debug for SunsetScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SunsetScene")
            .field("controller", &self.controller)
            .field("decorations", &self.decorations.len())
            .field("laid_out", &self.laid_out)
            .field("time", &self.time)
            .finish()
    }
}

impl SunsetScene {
    /// 创建场景，尚未布局
    pub fn new(config: &AppConfig) -> Self {
        let system = shared_system();
        let stage = SunsetStage::new(&system, config);

        Self {
            system,
            controller: SunsetController::new(stage),
            decorations: Vec::new(),
            laid_out: false,
            time: 0.0,
        }
    }

    /// 计算布局
    pub fn layout(&mut self) {
        self.controller.factory().layout();
        self.laid_out = true;
        debug!("场景布局完成");
    }

    /// 启动装饰动画，重复调用无效果
    pub fn init_decorations(&mut self) {
        if !self.decorations.is_empty() {
            return;
        }

        self.decorations = self.controller.factory().decorations();
        for animator in &mut self.decorations {
            animator.start();
        }
        debug!(count = self.decorations.len(), "装饰动画已启动");
    }

    /// 点击场景
    ///
    /// 尚未布局时先布局，保证太阳组读取到正确的几何信息。
    pub fn click(&mut self) {
        if !self.laid_out {
            self.layout();
        }

        let from = self.controller.state();
        self.controller.handle(SceneInput::click());
        info!(
            time = self.time,
            from = ?from,
            to = ?self.controller.state(),
            "点击场景"
        );
    }

    /// 推进动画时钟并把生命周期事件交给控制器
    pub fn update(&mut self, dt: f32) {
        self.time += dt;

        let events = self.system.borrow_mut().update(dt);
        for event in events {
            self.controller.handle(SceneInput::from(event));
        }
    }

    pub fn state(&self) -> SkyState {
        self.controller.state()
    }

    /// 场景时间（秒）
    pub fn time(&self) -> f32 {
        self.time
    }

    /// 太阳组或夜空组是否在播放
    pub fn is_transitioning(&self) -> bool {
        let running = |scene: Option<&Scene<ObjectAnimator>>| {
            scene.is_some_and(|s| s.is_running())
        };
        running(self.controller.sun_scene()) || running(self.controller.night_scene())
    }

    pub fn views(&self) -> &StageViews {
        self.controller.factory().views()
    }

    /// 当前帧快照
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            time: self.time,
            state: self.state(),
            transitioning: self.is_transitioning(),
            views: self.views().snapshot(),
        }
    }
}
