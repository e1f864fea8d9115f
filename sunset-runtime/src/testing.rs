//! 测试用的假动画器
//!
//! 只记录调用并模拟播放方向，不做任何插值。

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::animator::{Animator, AnimatorEvent, AnimatorId};

/// 假动画器的播放位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakePhase {
    /// 停在起始值
    AtStart,
    /// 正向播放中
    Forward,
    /// 反向播放中
    Backward,
    /// 停在终点值
    AtEnd,
}

/// 多个假动画器共享的调用日志
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    /// 取出并清空日志
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// 假动画器
///
/// `Clone` 共享内部状态，测试可以在把动画器交给 Scene 之后继续观察它。
#[derive(Debug, Clone)]
pub struct FakeAnimator {
    id: AnimatorId,
    name: &'static str,
    phase: Rc<Cell<FakePhase>>,
    jumped: Rc<Cell<bool>>,
    log: CallLog,
}

impl FakeAnimator {
    pub fn new(id: u64, name: &'static str, log: &CallLog) -> Self {
        Self {
            id: AnimatorId::new(id),
            name,
            phase: Rc::new(Cell::new(FakePhase::AtStart)),
            jumped: Rc::new(Cell::new(false)),
            log: log.clone(),
        }
    }

    pub fn phase(&self) -> FakePhase {
        self.phase.get()
    }

    /// 是否出现过"停在起始值时被反向"导致的跳变
    pub fn jumped(&self) -> bool {
        self.jumped.get()
    }

    /// 模拟播放到当前方向的终点
    ///
    /// 空闲时返回 `None`。
    pub fn finish(&self) -> Option<AnimatorEvent> {
        let next = match self.phase.get() {
            FakePhase::Forward => FakePhase::AtEnd,
            FakePhase::Backward => FakePhase::AtStart,
            FakePhase::AtStart | FakePhase::AtEnd => return None,
        };
        self.phase.set(next);
        Some(AnimatorEvent::Ended(self.id))
    }
}

impl Animator for FakeAnimator {
    fn id(&self) -> AnimatorId {
        self.id
    }

    fn start(&mut self) {
        self.log.push(format!("{}.start", self.name));
        self.phase.set(FakePhase::Forward);
    }

    fn reverse(&mut self) {
        self.log.push(format!("{}.reverse", self.name));
        let next = match self.phase.get() {
            FakePhase::Forward => FakePhase::Backward,
            FakePhase::Backward => FakePhase::Forward,
            FakePhase::AtEnd => FakePhase::Backward,
            FakePhase::AtStart => {
                self.jumped.set(true);
                FakePhase::Backward
            }
        };
        self.phase.set(next);
    }

    fn is_running(&self) -> bool {
        matches!(self.phase.get(), FakePhase::Forward | FakePhase::Backward)
    }
}
