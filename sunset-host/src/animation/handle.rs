//! # Handle 模块
//!
//! 把 `AnimationSystem` 中的动画器包装成 Runtime 的 [`Animator`]。

use std::cell::RefCell;
use std::rc::Rc;

use sunset_runtime::{Animator, AnimatorId};

use super::AnimationSystem;

/// 共享的动画系统
///
/// 宿主、Scene 中的各个动画器句柄都持有同一个系统。`Rc` 使其只能在
/// 创建它的线程上使用。
pub type SharedAnimationSystem = Rc<RefCell<AnimationSystem>>;

/// 创建共享的动画系统
pub fn shared_system() -> SharedAnimationSystem {
    Rc::new(RefCell::new(AnimationSystem::new()))
}

/// 动画器句柄
///
/// 每次调用都会短暂借用动画系统，调用方不能在持有系统借用时操作句柄。
#[derive(Clone)]
pub struct ObjectAnimator {
    system: SharedAnimationSystem,
    id: AnimatorId,
}

impl ObjectAnimator {
    pub fn new(system: &SharedAnimationSystem, id: AnimatorId) -> Self {
        Self {
            system: Rc::clone(system),
            id,
        }
    }

    /// 线性进度（0.0 = 起始值，1.0 = 终点值）
    pub fn fraction(&self) -> f32 {
        self.system.borrow().fraction(self.id).unwrap_or(0.0)
    }
}

impl std::fmt::Debug for ObjectAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectAnimator").field("id", &self.id).finish()
    }
}

impl Animator for ObjectAnimator {
    fn id(&self) -> AnimatorId {
        self.id
    }

    fn start(&mut self) {
        self.system.borrow_mut().start(self.id);
    }

    fn reverse(&mut self) {
        self.system.borrow_mut().reverse(self.id);
    }

    fn is_running(&self) -> bool {
        self.system.borrow().is_running(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Animatable, AnimatorSpec, EasingFunction, PropertyValue};
    use std::cell::Cell;
    use sunset_runtime::{AnimatorEvent, Scene};

    struct Marker {
        x: Cell<f32>,
    }

    impl Animatable for Marker {
        fn get_property(&self, property_id: &str) -> Option<PropertyValue> {
            (property_id == "x").then(|| PropertyValue::Float(self.x.get()))
        }

        fn set_property(&self, property_id: &str, value: PropertyValue) -> bool {
            match (property_id, value) {
                ("x", PropertyValue::Float(v)) => {
                    self.x.set(v);
                    true
                }
                _ => false,
            }
        }

        fn property_list(&self) -> &'static [&'static str] {
            &["x"]
        }
    }

    fn animator(system: &SharedAnimationSystem, marker: Rc<Marker>) -> ObjectAnimator {
        let mut sys = system.borrow_mut();
        let object = sys.register(marker);
        let id = sys
            .create_animator(
                AnimatorSpec::float(object, "x", 0.0, 10.0, 1.0).with_easing(EasingFunction::Linear),
            )
            .unwrap();
        drop(sys);
        ObjectAnimator::new(system, id)
    }

    #[test]
    fn test_handle_drives_system() {
        let system = shared_system();
        let marker = Rc::new(Marker { x: Cell::new(5.0) });
        let mut handle = animator(&system, marker.clone());

        assert!(!handle.is_running());
        handle.start();
        assert!(handle.is_running());
        assert_eq!(marker.x.get(), 0.0);

        system.borrow_mut().update(0.5);
        assert_eq!(handle.fraction(), 0.5);

        handle.reverse();
        let events = system.borrow_mut().update(0.5);
        assert_eq!(events, vec![AnimatorEvent::Ended(handle.id())]);
        assert_eq!(marker.x.get(), 0.0);
    }

    #[test]
    fn test_scene_of_handles() {
        let system = shared_system();
        let a = animator(&system, Rc::new(Marker { x: Cell::new(0.0) }));
        let b = animator(&system, Rc::new(Marker { x: Cell::new(0.0) }));
        let fired = Rc::new(Cell::new(0));

        let mut scene = Scene::new().with(a.clone()).with(b);
        let counter = fired.clone();
        scene.set_finished_listener(move || counter.set(counter.get() + 1));

        scene.start();
        assert!(scene.is_running());

        let events = system.borrow_mut().update(1.0);
        for event in &events {
            scene.dispatch(event);
        }

        assert!(!scene.is_running());
        assert_eq!(fired.get(), 1);
        assert!(!a.is_running());
    }
}
