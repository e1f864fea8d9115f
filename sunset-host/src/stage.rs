//! # Stage 模块
//!
//! 日落场景的视图集合与 Scene 构建。
//!
//! `SunsetStage` 持有全部视图并实现 [`SceneFactory`]：控制器首次推进时
//! 读取布局后的几何信息，创建太阳组和夜空组的动画器。

use std::rc::Rc;

use sunset_runtime::{Scene, SceneFactory};
use tracing::{debug, error};

use crate::animation::{
    AnimatorSpec, EasingFunction, ObjectAnimator, ObjectId, Repeat, RepeatMode,
    SharedAnimationSystem,
};
use crate::config::{AppConfig, TimingConfig};
use crate::view::{AnimatableView, ViewData};

/// 已注册到动画系统的视图
#[derive(Debug, Clone)]
pub struct StageView {
    pub view: AnimatableView,
    pub object: ObjectId,
}

impl StageView {
    fn register(system: &SharedAnimationSystem, view: AnimatableView) -> Self {
        let object = system.borrow_mut().register(Rc::new(view.clone()));
        Self { view, object }
    }
}

/// 场景中的全部视图
#[derive(Debug, Clone)]
pub struct StageViews {
    pub sky: StageView,
    pub sea: StageView,
    pub sun: StageView,
    /// 太阳在海面上的倒影，布局完成前不可见
    pub reflection: StageView,
    pub rays: StageView,
}

impl StageViews {
    /// 按绘制顺序排列的视图
    pub fn all(&self) -> [&StageView; 5] {
        [&self.sky, &self.sea, &self.rays, &self.sun, &self.reflection]
    }

    /// 所有视图的数据副本
    pub fn snapshot(&self) -> Vec<ViewData> {
        self.all().iter().map(|v| v.view.snapshot()).collect()
    }
}

/// 日落场景舞台
pub struct SunsetStage {
    system: SharedAnimationSystem,
    config: AppConfig,
    views: StageViews,
}

impl std::fmt::Debug for SunsetStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SunsetStage")
            .field("views", &self.views)
            .finish()
    }
}

impl SunsetStage {
    /// 创建视图并注册到动画系统
    pub fn new(system: &SharedAnimationSystem, config: &AppConfig) -> Self {
        let palette = &config.palette;
        let views = StageViews {
            sky: StageView::register(system, AnimatableView::new("sky", palette.blue_sky)),
            sea: StageView::register(system, AnimatableView::new("sea", palette.sea)),
            sun: StageView::register(system, AnimatableView::new("sun", palette.sun)),
            reflection: StageView::register(
                system,
                AnimatableView::hidden("reflection", palette.sun),
            ),
            rays: StageView::register(system, AnimatableView::new("rays", palette.sun)),
        };

        Self {
            system: Rc::clone(system),
            config: config.clone(),
            views,
        }
    }

    pub fn views(&self) -> &StageViews {
        &self.views
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 计算布局
    ///
    /// 天空在上、海面在下，太阳在天空中居中。倒影在布局完成后才显示，
    /// 并放在与太阳相同的 Y 坐标上。
    pub fn layout(&self) {
        let layout = &self.config.layout;
        let views = &self.views;

        views.sky.view.set_geometry(0.0, layout.sky_height);
        views.sea.view.set_geometry(layout.sky_height, layout.sea_height);
        views.sun.view.set_geometry(layout.sun_top(), layout.sun_size);
        views.rays.view.set_geometry(layout.sun_top(), layout.sun_size);
        views.reflection.view.set_geometry(
            (layout.sea_height - layout.sun_size) / 2.0,
            layout.sun_size,
        );

        views.reflection.view.set_visible(true);
        views.reflection.view.set_y(views.sun.view.top());
    }

    /// 创建装饰动画器（太阳与倒影的脉动、光芒旋转）
    ///
    /// 装饰动画无限重复，不参与日落状态机。关闭装饰时返回空列表。
    pub fn decorations(&self) -> Vec<ObjectAnimator> {
        let decorations = &self.config.decorations;
        if !decorations.enabled {
            return Vec::new();
        }

        let pulse = TimingConfig::secs(self.config.timing.pulse_ms);
        let mut specs = Vec::new();

        for target in [&self.views.sun, &self.views.reflection] {
            let (scale_x, scale_y) = target.view.scale();
            for (property, from) in [("scale_x", scale_x), ("scale_y", scale_y)] {
                specs.push(
                    AnimatorSpec::float(
                        target.object,
                        property,
                        from,
                        from * decorations.pulse_scale,
                        pulse,
                    )
                    .with_repeat(Repeat::Infinite, RepeatMode::Reverse),
                );
            }
        }

        if decorations.rays {
            specs.push(
                AnimatorSpec::float(
                    self.views.rays.object,
                    "rotation",
                    0.0,
                    360.0,
                    TimingConfig::secs(self.config.timing.rays_ms),
                )
                .with_easing(EasingFunction::Linear)
                .with_repeat(Repeat::Infinite, RepeatMode::Restart),
            );
        }

        self.create_all(specs)
    }

    /// 创建动画器；创建失败的动画器记录错误后跳过
    fn create_all(&self, specs: Vec<AnimatorSpec>) -> Vec<ObjectAnimator> {
        specs
            .into_iter()
            .filter_map(|spec| {
                let property = spec.property;
                let result = self.system.borrow_mut().create_animator(spec);
                match result {
                    Ok(id) => Some(ObjectAnimator::new(&self.system, id)),
                    Err(e) => {
                        error!(error = %e, property, "创建动画器失败，已跳过");
                        None
                    }
                }
            })
            .collect()
    }
}

impl SceneFactory<ObjectAnimator> for SunsetStage {
    fn sun_scene(&mut self) -> Scene<ObjectAnimator> {
        let layout = &self.config.layout;
        let palette = &self.config.palette;
        let duration = TimingConfig::secs(self.config.timing.sunset_ms);
        let views = &self.views;

        let sun_end = views.sky.view.height() + layout.overshoot;
        let reflection_end = -views.reflection.view.height() - layout.overshoot;
        debug!(sun_end, reflection_end, duration, "构建太阳组");

        // 第一个成员（太阳位置）的结束代表整组结束
        let specs = vec![
            AnimatorSpec::float(views.sun.object, "y", views.sun.view.y(), sun_end, duration)
                .with_easing(EasingFunction::Accelerate(1.0)),
            AnimatorSpec::float(
                views.reflection.object,
                "y",
                views.reflection.view.y(),
                reflection_end,
                duration,
            )
            .with_easing(EasingFunction::Accelerate(1.0)),
            AnimatorSpec::color(
                views.sky.object,
                "background_color",
                palette.blue_sky,
                palette.sunset_sky,
                duration,
            ),
        ];

        self.create_all(specs)
            .into_iter()
            .fold(Scene::new(), Scene::with)
    }

    fn night_scene(&mut self) -> Scene<ObjectAnimator> {
        let palette = &self.config.palette;
        let duration = TimingConfig::secs(self.config.timing.night_sky_ms);
        debug!(duration, "构建夜空组");

        let specs = vec![AnimatorSpec::color(
            self.views.sky.object,
            "background_color",
            palette.sunset_sky,
            palette.night_sky,
            duration,
        )];

        self.create_all(specs)
            .into_iter()
            .fold(Scene::new(), Scene::with)
    }
}
