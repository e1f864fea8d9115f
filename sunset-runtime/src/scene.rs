//! # Scene 模块
//!
//! 把一组属性动画器组合成一个可统一控制的单元。
//!
//! ## 完成回调的近似
//!
//! Scene 的完成回调只挂在**第一个注册的成员**上：第一个成员播放结束即视为整组结束。
//! 这要求所有成员时长一致，Scene 不做校验，时长不一致时回调会提前或延后触发。

use tracing::trace;

use crate::animator::{Animator, AnimatorEvent, AnimatorId};

/// Scene 完成回调
pub type FinishedListener = Box<dyn FnMut()>;

/// 已挂载的完成回调
struct AttachedListener {
    /// 被监听的成员（第一个成员）
    member: AnimatorId,
    callback: FinishedListener,
}

/// 动画组
///
/// 成员按注册顺序保存，`start` / `reverse` 按同一顺序转发。
pub struct Scene<A> {
    members: Vec<A>,
    listener: Option<AttachedListener>,
}

impl<A> Default for Scene<A> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            listener: None,
        }
    }
}

impl<A: Animator> std::fmt::Debug for Scene<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<AnimatorId> = self.members.iter().map(|m| m.id()).collect();
        f.debug_struct("Scene")
            .field("members", &ids)
            .field("listener", &self.listener.as_ref().map(|l| l.member))
            .finish()
    }
}

impl<A: Animator> Scene<A> {
    /// 创建空的动画组
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加成员
    pub fn add(&mut self, animator: A) {
        self.members.push(animator);
    }

    /// 追加成员（builder 形式）
    pub fn with(mut self, animator: A) -> Self {
        self.add(animator);
        self
    }

    /// 成员数量
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// 是否没有成员
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// 成员列表（注册顺序）
    pub fn members(&self) -> &[A] {
        &self.members
    }

    /// 启动所有成员
    pub fn start(&mut self) {
        for member in &mut self.members {
            member.start();
        }
    }

    /// 反向播放所有成员
    pub fn reverse(&mut self) {
        for member in &mut self.members {
            member.reverse();
        }
    }

    /// 是否有任一成员正在播放
    pub fn is_running(&self) -> bool {
        self.members.iter().any(|m| m.is_running())
    }

    /// 设置完成回调
    ///
    /// 先移除已有回调，再挂到第一个成员的结束事件上。
    /// 开始、取消、重复事件不会触发回调。空组不挂载任何回调。
    pub fn set_finished_listener<F>(&mut self, listener: F)
    where
        F: FnMut() + 'static,
    {
        self.remove_finished_listeners();

        let Some(first) = self.members.first() else {
            trace!("空 Scene，忽略完成回调");
            return;
        };

        self.listener = Some(AttachedListener {
            member: first.id(),
            callback: Box::new(listener),
        });
    }

    /// 移除所有成员上的完成回调
    pub fn remove_finished_listeners(&mut self) {
        self.listener = None;
    }

    /// 是否挂载了完成回调
    pub fn has_finished_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// 分发动画器事件
    ///
    /// # 返回
    /// - `true`: 事件触发了完成回调
    /// - `false`: 事件与本组的回调无关
    pub fn dispatch(&mut self, event: &AnimatorEvent) -> bool {
        let Some(listener) = self.listener.as_mut() else {
            return false;
        };

        if !event.is_end() || event.animator_id() != listener.member {
            return false;
        }

        trace!(member = %listener.member, "Scene 完成");
        (listener.callback)();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallLog, FakeAnimator, FakePhase};
    use std::cell::Cell;
    use std::rc::Rc;

    fn three_member_scene(log: &CallLog) -> (Scene<FakeAnimator>, Vec<FakeAnimator>) {
        let members = vec![
            FakeAnimator::new(1, "a", log),
            FakeAnimator::new(2, "b", log),
            FakeAnimator::new(3, "c", log),
        ];
        let mut scene = Scene::new();
        for m in &members {
            scene.add(m.clone());
        }
        (scene, members)
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn test_start_in_registration_order() {
        let log = CallLog::new();
        let (mut scene, _) = three_member_scene(&log);

        scene.start();

        assert_eq!(log.take(), vec!["a.start", "b.start", "c.start"]);
    }

    #[test]
    fn test_reverse_forwards_to_every_member() {
        let log = CallLog::new();
        let (mut scene, members) = three_member_scene(&log);

        scene.start();
        log.take();
        scene.reverse();

        assert_eq!(log.take(), vec!["a.reverse", "b.reverse", "c.reverse"]);
        assert!(members.iter().all(|m| m.phase() == FakePhase::Backward));
    }

    #[test]
    fn test_is_running_when_any_member_runs() {
        let log = CallLog::new();
        let (mut scene, members) = three_member_scene(&log);
        assert!(!scene.is_running());

        scene.start();
        assert!(scene.is_running());

        members[0].finish();
        members[1].finish();
        // 只剩最后一个成员在播放
        assert!(scene.is_running());

        members[2].finish();
        assert!(!scene.is_running());
    }

    #[test]
    fn test_empty_scene_is_not_running() {
        let scene: Scene<FakeAnimator> = Scene::new();
        assert!(scene.is_empty());
        assert!(!scene.is_running());
    }

    #[test]
    fn test_listener_fires_on_first_member_end_only() {
        let log = CallLog::new();
        let (mut scene, members) = three_member_scene(&log);
        let (count, listener) = counter();
        scene.set_finished_listener(listener);
        scene.start();

        // 非第一个成员结束不触发
        let event = members[1].finish().unwrap();
        assert!(!scene.dispatch(&event));
        assert_eq!(count.get(), 0);

        let event = members[0].finish().unwrap();
        assert!(scene.dispatch(&event));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_listener_ignores_non_end_events() {
        let log = CallLog::new();
        let (mut scene, members) = three_member_scene(&log);
        let (count, listener) = counter();
        scene.set_finished_listener(listener);

        let id = members[0].id();
        assert!(!scene.dispatch(&AnimatorEvent::Started(id)));
        assert!(!scene.dispatch(&AnimatorEvent::Cancelled(id)));
        assert!(!scene.dispatch(&AnimatorEvent::Repeated(id)));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_replacing_listener_keeps_only_latest() {
        let log = CallLog::new();
        let (mut scene, members) = three_member_scene(&log);
        let (first, first_listener) = counter();
        let (second, second_listener) = counter();

        scene.set_finished_listener(first_listener);
        scene.set_finished_listener(second_listener);
        scene.start();

        let event = members[0].finish().unwrap();
        scene.dispatch(&event);

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_remove_listeners() {
        let log = CallLog::new();
        let (mut scene, members) = three_member_scene(&log);
        let (count, listener) = counter();
        scene.set_finished_listener(listener);
        assert!(scene.has_finished_listener());

        scene.remove_finished_listeners();
        assert!(!scene.has_finished_listener());

        scene.start();
        let event = members[0].finish().unwrap();
        assert!(!scene.dispatch(&event));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_listener_fires_on_every_end() {
        let log = CallLog::new();
        let (mut scene, members) = three_member_scene(&log);
        let (count, listener) = counter();
        scene.set_finished_listener(listener);

        scene.start();
        scene.dispatch(&members[0].finish().unwrap());
        scene.reverse();
        scene.dispatch(&members[0].finish().unwrap());

        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_empty_scene_never_fires() {
        let mut scene: Scene<FakeAnimator> = Scene::new();
        let (count, listener) = counter();
        scene.set_finished_listener(listener);

        assert!(!scene.has_finished_listener());
        assert!(!scene.dispatch(&AnimatorEvent::Ended(AnimatorId::new(1))));
        assert_eq!(count.get(), 0);
    }
}
