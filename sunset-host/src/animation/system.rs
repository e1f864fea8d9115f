//! # System 模块
//!
//! 通用属性动画系统管理器。
//!
//! 对象实现 `Animatable` trait，系统直接设置属性值：
//! ```rust,ignore
//! let obj_id = system.register(view);
//! let anim_id = system.create_animator(AnimatorSpec::float(obj_id, "y", 0.0, 100.0, 3.0))?;
//! system.start(anim_id);
//! let events = system.update(dt); // 值自动应用到对象
//! ```
//!
//! 与一次性动画不同，动画器创建后长期存在，可以反复 `start` / `reverse`。

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use sunset_runtime::{AnimatorEvent, AnimatorId};
use tracing::{trace, warn};

use super::animation::{Animation, Lifecycle, Repeat, RepeatMode};
use super::color::Argb;
use super::traits::{Animatable, ObjectId, PropertyValue};
use super::EasingFunction;
use crate::error::AnimationError;

/// 动画器配置
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorSpec {
    /// 目标对象
    pub object: ObjectId,
    /// 目标属性
    pub property: &'static str,
    /// 起始值
    pub from: PropertyValue,
    /// 终点值
    pub to: PropertyValue,
    /// 单轮时长（秒）
    pub duration: f32,
    pub easing: EasingFunction,
    pub repeat: Repeat,
    pub repeat_mode: RepeatMode,
}

impl AnimatorSpec {
    /// 创建动画器配置
    ///
    /// 默认缓动为 `AccelerateDecelerate`，不重复。
    pub fn new(
        object: ObjectId,
        property: &'static str,
        from: PropertyValue,
        to: PropertyValue,
        duration: f32,
    ) -> Self {
        Self {
            object,
            property,
            from,
            to,
            duration,
            easing: EasingFunction::default(),
            repeat: Repeat::Never,
            repeat_mode: RepeatMode::Restart,
        }
    }

    /// 浮点属性动画器
    pub fn float(object: ObjectId, property: &'static str, from: f32, to: f32, duration: f32) -> Self {
        Self::new(object, property, from.into(), to.into(), duration)
    }

    /// 颜色属性动画器（线性空间插值）
    pub fn color(
        object: ObjectId,
        property: &'static str,
        from: Argb,
        to: Argb,
        duration: f32,
    ) -> Self {
        Self::new(object, property, from.into(), to.into(), duration)
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 设置重复
    pub fn with_repeat(mut self, repeat: Repeat, mode: RepeatMode) -> Self {
        self.repeat = repeat;
        self.repeat_mode = mode;
        self
    }
}

/// 已创建的属性动画器
struct PropertyAnimator {
    object: ObjectId,
    property: &'static str,
    from: PropertyValue,
    to: PropertyValue,
    timeline: Animation,
}

impl PropertyAnimator {
    fn current_value(&self) -> PropertyValue {
        PropertyValue::interpolate(&self.from, &self.to, self.timeline.eased_fraction())
            .unwrap_or(self.from)
    }
}

/// 动画系统
///
/// 管理所有动画器，提供统一的更新和查询接口。
///
/// ## 设计理念
///
/// 动画系统只负责：
/// 1. 管理时间轴：知道某个属性从 A 到 B 需要在 duration 内变化
/// 2. 直接设置对象属性（通过 Animatable trait）
/// 3. 按顺序产出生命周期事件，由调用方路由
pub struct AnimationSystem {
    /// 已注册的对象（ObjectId -> 对象）
    objects: HashMap<ObjectId, Rc<dyn Animatable>>,
    /// 动画器（按创建顺序）
    animators: BTreeMap<AnimatorId, PropertyAnimator>,
    /// 下一个动画器 ID
    next_animator_id: u64,
    /// 下一个对象 ID
    next_object_id: u64,
    /// 待处理的事件队列
    events: Vec<AnimatorEvent>,
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimationSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSystem")
            .field("objects", &self.objects.len())
            .field("animators", &self.animators.len())
            .field("pending_events", &self.events.len())
            .finish()
    }
}

impl AnimationSystem {
    /// 创建新的动画系统
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            animators: BTreeMap::new(),
            next_animator_id: 1,
            next_object_id: 1,
            events: Vec::new(),
        }
    }

    // ========== 对象管理 ==========

    /// 注册可动画对象
    ///
    /// # 返回
    /// 系统分配的唯一 `ObjectId`
    pub fn register<T: Animatable>(&mut self, object: Rc<T>) -> ObjectId {
        let id = ObjectId::new(self.next_object_id);
        self.next_object_id += 1;
        self.objects.insert(id, object as Rc<dyn Animatable>);
        id
    }

    // ========== 动画器管理 ==========

    /// 创建属性动画器
    ///
    /// 动画器创建后处于空闲状态，停在起始值，不修改对象属性。
    ///
    /// # 返回
    /// - `Ok(AnimatorId)`: 创建成功
    /// - `Err(AnimationError)`: 对象未注册、属性不存在或值类型不匹配
    pub fn create_animator(&mut self, spec: AnimatorSpec) -> Result<AnimatorId, AnimationError> {
        let object = self
            .objects
            .get(&spec.object)
            .ok_or(AnimationError::ObjectNotRegistered {
                object: spec.object,
            })?;

        let current =
            object
                .get_property(spec.property)
                .ok_or(AnimationError::UnknownProperty {
                    object: spec.object,
                    property: spec.property,
                })?;

        for value in [spec.from, spec.to] {
            if value.kind() != current.kind() {
                return Err(AnimationError::ValueKindMismatch {
                    property: spec.property,
                    expected: current.kind(),
                    actual: value.kind(),
                });
            }
        }

        let id = AnimatorId::new(self.next_animator_id);
        self.next_animator_id += 1;

        let timeline = Animation::new(spec.duration)
            .with_easing(spec.easing)
            .with_repeat(spec.repeat, spec.repeat_mode);

        trace!(animator = %id, object = %spec.object, property = spec.property, "创建动画器");
        self.animators.insert(
            id,
            PropertyAnimator {
                object: spec.object,
                property: spec.property,
                from: spec.from,
                to: spec.to,
                timeline,
            },
        );
        Ok(id)
    }

    // ========== 动画控制 ==========

    /// 从起始值正向启动动画器
    ///
    /// 起始值立即写入对象。
    pub fn start(&mut self, id: AnimatorId) {
        let Some(animator) = self.animators.get_mut(&id) else {
            warn!(animator = %id, "启动不存在的动画器");
            return;
        };

        let mut lifecycle = Vec::new();
        animator.timeline.start(&mut lifecycle);
        apply_value(&self.objects, animator);
        push_events(&mut self.events, id, &lifecycle);
        trace!(animator = %id, property = animator.property, "动画器启动");
    }

    /// 反向播放动画器
    ///
    /// 运行中时原地反向；空闲时从终点值开始反向播放（终点值立即写入对象）。
    pub fn reverse(&mut self, id: AnimatorId) {
        let Some(animator) = self.animators.get_mut(&id) else {
            warn!(animator = %id, "反向播放不存在的动画器");
            return;
        };

        let mut lifecycle = Vec::new();
        animator.timeline.reverse(&mut lifecycle);
        apply_value(&self.objects, animator);
        push_events(&mut self.events, id, &lifecycle);
        trace!(animator = %id, property = animator.property, "动画器反向");
    }

    /// 更新所有动画器
    ///
    /// # 返回
    /// 自上次更新以来产生的事件，按动画器创建顺序排列
    pub fn update(&mut self, dt: f32) -> Vec<AnimatorEvent> {
        let mut lifecycle = Vec::new();

        for (id, animator) in &mut self.animators {
            if !animator.timeline.is_running() {
                continue;
            }

            animator.timeline.update(dt, &mut lifecycle);
            apply_value(&self.objects, animator);
            push_events(&mut self.events, *id, &lifecycle);
            lifecycle.clear();
        }

        std::mem::take(&mut self.events)
    }

    // ========== 查询方法 ==========

    /// 动画器是否正在播放（不存在的动画器视为未播放）
    pub fn is_running(&self, id: AnimatorId) -> bool {
        self.animators
            .get(&id)
            .is_some_and(|a| a.timeline.is_running())
    }

    /// 动画器的线性进度（0.0 = 起始值，1.0 = 终点值）
    pub fn fraction(&self, id: AnimatorId) -> Option<f32> {
        self.animators.get(&id).map(|a| a.timeline.fraction())
    }

}

fn apply_value(objects: &HashMap<ObjectId, Rc<dyn Animatable>>, animator: &PropertyAnimator) {
    if let Some(object) = objects.get(&animator.object) {
        object.set_property(animator.property, animator.current_value());
    }
}

fn push_events(events: &mut Vec<AnimatorEvent>, id: AnimatorId, lifecycle: &[Lifecycle]) {
    events.extend(lifecycle.iter().map(|event| match event {
        Lifecycle::Started => AnimatorEvent::Started(id),
        Lifecycle::Cancelled => AnimatorEvent::Cancelled(id),
        Lifecycle::Repeated => AnimatorEvent::Repeated(id),
        Lifecycle::Ended => AnimatorEvent::Ended(id),
    }));
}
