//! # Controller 模块
//!
//! 日落/日出状态机。
//!
//! ## 状态转换
//!
//! ```text
//! Unset ──advance──► ShowingSunset ◄──advance──► ShowingSunrise
//! ```
//!
//! 控制器持有两个 Scene：
//! - 太阳组：太阳下落、倒影上移、天空 蓝→日落色
//! - 夜空组：天空 日落色→夜色
//!
//! 每次方向改变时重新挂载完成回调：
//! - 日落方向：太阳组结束 → 启动夜空组
//! - 日出方向：夜空组结束 → 反向播放太阳组
//!
//! ## start 与 reverse 的选择
//!
//! 对停在起始值的动画器调用 `reverse()` 会先跳到终点值，
//! 因此太阳组完全回到日出位置后，必须用 `start()` 重新播放。
//! 停在终点值的动画器反向播放总是平滑的。

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animator::{Animator, AnimatorEvent};
use crate::input::SceneInput;
use crate::scene::Scene;


/// 场景显示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyState {
    /// 尚未点击过
    #[default]
    Unset,
    /// 正在显示（或前往）日出
    ShowingSunrise,
    /// 正在显示（或前往）日落
    ShowingSunset,
}

/// Scene 构建接口
///
/// 首次 `advance` 时调用，此时 Host 已完成布局，可以读取元素几何信息。
pub trait SceneFactory<A: Animator> {
    /// 构建太阳组（太阳位置、倒影位置、天空日落色）
    fn sun_scene(&mut self) -> Scene<A>;

    /// 构建夜空组（天空夜色）
    fn night_scene(&mut self) -> Scene<A>;
}

/// 完成回调产生的后续动作
///
/// 回调只负责入队，控制器在事件分发结束后统一执行。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    StartNightSky,
    ReverseSun,
}

type CueQueue = Rc<RefCell<VecDeque<Cue>>>;

/// Scene 构建之后的显示方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Showing {
    Sunrise,
    Sunset,
}

impl From<Showing> for SkyState {
    fn from(showing: Showing) -> Self {
        match showing {
            Showing::Sunrise => SkyState::ShowingSunrise,
            Showing::Sunset => SkyState::ShowingSunset,
        }
    }
}

/// 首次 `advance` 之后才存在的状态
struct Scenes<A> {
    sun: Scene<A>,
    night: Scene<A>,
    showing: Showing,
}

impl<A: Animator> Scenes<A> {
    /// 从日出方向切换到日落方向
    fn sunrise_to_sunset(&mut self, cues: &CueQueue) {
        self.wire_sunset_listeners(cues);
        if self.night.is_running() {
            // 夜色正在褪去，只需把它反转回去
            self.night.reverse();
        } else if self.sun.is_running() {
            // 太阳正在升起，反转让它落下
            self.sun.reverse();
        } else {
            // 日出已结束，太阳组停在起始值，必须 start
            self.sun.start();
        }
        self.showing = Showing::Sunset;
    }

    /// 从日落方向切换到日出方向
    fn sunset_to_sunrise(&mut self, cues: &CueQueue) {
        self.wire_sunrise_listeners(cues);
        if self.sun.is_running() {
            self.sun.reverse();
        } else {
            // 夜色正在加深或已完成，停在终点值的反向播放是安全的
            self.night.reverse();
        }
        self.showing = Showing::Sunrise;
    }

    /// 日落方向：太阳组结束后启动夜空组
    fn wire_sunset_listeners(&mut self, cues: &CueQueue) {
        self.night.remove_finished_listeners();
        let cues = cues.clone();
        self.sun
            .set_finished_listener(move || cues.borrow_mut().push_back(Cue::StartNightSky));
    }

    /// 日出方向：夜空组结束后反向播放太阳组
    fn wire_sunrise_listeners(&mut self, cues: &CueQueue) {
        self.sun.remove_finished_listeners();
        let cues = cues.clone();
        self.night
            .set_finished_listener(move || cues.borrow_mut().push_back(Cue::ReverseSun));
    }
}

/// 日落/日出控制器
pub struct SunsetController<A, F> {
    factory: F,
    /// `None` 即 `SkyState::Unset`
    scenes: Option<Scenes<A>>,
    cues: CueQueue,
}

impl<A, F> std::fmt::Debug for SunsetController<A, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self
            .scenes
            .as_ref()
            .map_or(SkyState::Unset, |s| s.showing.into());
        f.debug_struct("SunsetController")
            .field("state", &state)
            .field("built", &self.scenes.is_some())
            .finish()
    }
}

impl<A, F> SunsetController<A, F>
where
    A: Animator,
    F: SceneFactory<A>,
{
    /// 创建控制器，Scene 延迟到首次 `advance` 构建
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            scenes: None,
            cues: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// 当前状态
    pub fn state(&self) -> SkyState {
        self.scenes
            .as_ref()
            .map_or(SkyState::Unset, |s| s.showing.into())
    }

    /// 太阳组（首次 `advance` 之前为 `None`）
    pub fn sun_scene(&self) -> Option<&Scene<A>> {
        self.scenes.as_ref().map(|s| &s.sun)
    }

    /// 夜空组（首次 `advance` 之前为 `None`）
    pub fn night_scene(&self) -> Option<&Scene<A>> {
        self.scenes.as_ref().map(|s| &s.night)
    }

    /// Scene 构建接口
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// 处理一条输入
    pub fn handle(&mut self, input: SceneInput) {
        match input {
            SceneInput::Click => self.advance(),
            SceneInput::Animator(event) => {
                self.on_animator_event(&event);
            }
        }
    }

    /// 推进状态机（由点击触发）
    ///
    /// 状态立即更新，不等待动画结束。
    pub fn advance(&mut self) {
        let previous = self.state();

        match self.scenes.as_mut() {
            None => self.start_sunset(),
            Some(scenes) => match scenes.showing {
                Showing::Sunrise => scenes.sunrise_to_sunset(&self.cues),
                Showing::Sunset => scenes.sunset_to_sunrise(&self.cues),
            },
        }

        debug!(from = ?previous, to = ?self.state(), "天空状态切换");
    }

    /// 首次点击：构建两个 Scene 并开始日落
    fn start_sunset(&mut self) {
        let mut scenes = Scenes {
            sun: self.factory.sun_scene(),
            night: self.factory.night_scene(),
            showing: Showing::Sunset,
        };
        debug!(
            sun_members = scenes.sun.len(),
            night_members = scenes.night.len(),
            "构建日落场景"
        );

        scenes.wire_sunset_listeners(&self.cues);
        scenes.sun.start();
        self.scenes = Some(scenes);
    }

    /// 分发动画器事件
    ///
    /// # 返回
    /// 事件是否触发了某个 Scene 的完成回调
    pub fn on_animator_event(&mut self, event: &AnimatorEvent) -> bool {
        let Some(scenes) = self.scenes.as_mut() else {
            return false;
        };

        let sun_fired = scenes.sun.dispatch(event);
        let night_fired = scenes.night.dispatch(event);
        self.run_cues();

        sun_fired || night_fired
    }

    fn run_cues(&mut self) {
        let Some(scenes) = self.scenes.as_mut() else {
            self.cues.borrow_mut().clear();
            return;
        };

        loop {
            let cue = self.cues.borrow_mut().pop_front();
            let Some(cue) = cue else {
                break;
            };

            debug!(?cue, "执行后续阶段");
            match cue {
                Cue::StartNightSky => scenes.night.start(),
                Cue::ReverseSun => scenes.sun.reverse(),
            }
        }
    }
}
