//! # Animation 模块
//!
//! 单个动画的时间轴。
//!
//! 核心设计：时间轴只维护线性进度 `fraction`（0.0 = 起始值，1.0 = 终点值）
//! 和播放方向，不关心具体属性。反向播放沿同一条缓动曲线回退。

use serde::{Deserialize, Serialize};

use super::EasingFunction;

/// 播放方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// 起始值 → 终点值
    #[default]
    Forward,
    /// 终点值 → 起始值
    Backward,
}

impl Direction {
    fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// 重复次数（不含首轮）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// 只播放一轮
    #[default]
    Never,
    /// 额外重复 n 轮
    Times(u32),
    /// 无限重复，永不结束
    Infinite,
}

/// 重复模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// 每轮从头开始
    #[default]
    Restart,
    /// 每轮掉转方向（往返）
    Reverse,
}

/// 时间轴生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// 开始播放
    Started,
    /// 播放中被重新启动
    Cancelled,
    /// 进入下一轮
    Repeated,
    /// 播放结束
    Ended,
}

/// 动画时间轴
#[derive(Debug, Clone)]
pub struct Animation {
    /// 单轮时长（秒）
    pub duration: f32,
    /// 缓动函数
    pub easing: EasingFunction,
    /// 重复次数
    pub repeat: Repeat,
    /// 重复模式
    pub repeat_mode: RepeatMode,
    /// 线性进度（0.0 - 1.0，未应用缓动）
    fraction: f32,
    direction: Direction,
    running: bool,
    /// 已完成的重复轮数
    iteration: u32,
}

impl Animation {
    /// 创建新的时间轴，初始停在起始值
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            easing: EasingFunction::default(),
            repeat: Repeat::Never,
            repeat_mode: RepeatMode::Restart,
            fraction: 0.0,
            direction: Direction::Forward,
            running: false,
            iteration: 0,
        }
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

    /// 从起始值正向播放
    ///
    /// 播放中调用会先产生 `Cancelled`，然后从头开始。
    pub fn start(&mut self, events: &mut Vec<Lifecycle>) {
        if self.running {
            events.push(Lifecycle::Cancelled);
        }
        self.fraction = 0.0;
        self.direction = Direction::Forward;
        self.iteration = 0;
        self.running = true;
        events.push(Lifecycle::Started);
    }

    /// 反向播放
    ///
    /// - 播放中：原地掉转方向，不产生事件
    /// - 空闲：从终点值开始反向播放。若此前停在起始值，属性会立即跳到终点值
    pub fn reverse(&mut self, events: &mut Vec<Lifecycle>) {
        if self.running {
            self.direction = self.direction.flipped();
            return;
        }
        self.fraction = 1.0;
        self.direction = Direction::Backward;
        self.iteration = 0;
        self.running = true;
        events.push(Lifecycle::Started);
    }

    /// 推进时间轴
    ///
    /// 一次推进可能跨越多轮重复，每轮产生一个 `Repeated`。
    pub fn update(&mut self, dt: f32, events: &mut Vec<Lifecycle>) {
        if !self.running {
            return;
        }

        if self.duration <= 0.0 {
            self.fraction = self.target();
            self.running = false;
            events.push(Lifecycle::Ended);
            return;
        }

        let mut remaining = dt.max(0.0) / self.duration;
        loop {
            let room = match self.direction {
                Direction::Forward => 1.0 - self.fraction,
                Direction::Backward => self.fraction,
            };

            if remaining < room {
                self.advance_by(remaining);
                return;
            }

            remaining -= room;
            self.fraction = self.target();

            if !self.has_more_repeats() {
                self.running = false;
                events.push(Lifecycle::Ended);
                return;
            }

            self.iteration += 1;
            events.push(Lifecycle::Repeated);
            match self.repeat_mode {
                RepeatMode::Restart => self.fraction = 1.0 - self.target(),
                RepeatMode::Reverse => self.direction = self.direction.flipped(),
            }
        }
    }

    fn advance_by(&mut self, delta: f32) {
        self.fraction = match self.direction {
            Direction::Forward => (self.fraction + delta).min(1.0),
            Direction::Backward => (self.fraction - delta).max(0.0),
        };
    }

    /// 当前方向的终点
    fn target(&self) -> f32 {
        match self.direction {
            Direction::Forward => 1.0,
            Direction::Backward => 0.0,
        }
    }

    fn has_more_repeats(&self) -> bool {
        match self.repeat {
            Repeat::Never => false,
            Repeat::Times(n) => self.iteration < n,
            Repeat::Infinite => true,
        }
    }

    /// 线性进度（0.0 = 起始值，1.0 = 终点值）
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// 应用缓动后的进度
    pub fn eased_fraction(&self) -> f32 {
        self.easing.apply(self.fraction)
    }

    /// 当前播放方向
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// 已完成的重复轮数
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// 是否正在播放
    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(duration: f32) -> Animation {
        Animation::new(duration).with_easing(EasingFunction::Linear)
    }

    #[test]
    fn test_new_is_idle_at_start() {
        let anim = linear(1.0);
        assert!(!anim.is_running());
        assert_eq!(anim.fraction(), 0.0);
    }

    #[test]
    fn test_start_and_finish() {
        let mut anim = linear(1.0);
        let mut events = Vec::new();

        anim.start(&mut events);
        assert_eq!(events, vec![Lifecycle::Started]);
        assert!(anim.is_running());

        events.clear();
        anim.update(0.4, &mut events);
        assert!((anim.fraction() - 0.4).abs() < 1e-6);
        assert!(events.is_empty());

        anim.update(0.7, &mut events);
        assert_eq!(events, vec![Lifecycle::Ended]);
        assert!(!anim.is_running());
        assert_eq!(anim.fraction(), 1.0);
    }

    #[test]
    fn test_restart_while_running_cancels() {
        let mut anim = linear(1.0);
        let mut events = Vec::new();
        anim.start(&mut events);
        anim.update(0.5, &mut events);

        events.clear();
        anim.start(&mut events);
        assert_eq!(events, vec![Lifecycle::Cancelled, Lifecycle::Started]);
        assert_eq!(anim.fraction(), 0.0);
    }

    #[test]
    fn test_reverse_mid_run_keeps_position() {
        let mut anim = linear(1.0);
        let mut events = Vec::new();
        anim.start(&mut events);
        anim.update(0.3, &mut events);
        events.clear();

        anim.reverse(&mut events);
        assert!(events.is_empty());
        assert!((anim.fraction() - 0.3).abs() < 1e-6);
        assert_eq!(anim.direction(), Direction::Backward);

        // 只需回退 0.3 秒即到达起点
        anim.update(0.31, &mut events);
        assert_eq!(events, vec![Lifecycle::Ended]);
        assert_eq!(anim.fraction(), 0.0);
    }

    #[test]
    fn test_reverse_from_end_is_full_traversal() {
        let mut anim = linear(1.0);
        let mut events = Vec::new();
        anim.start(&mut events);
        anim.update(1.0, &mut events);
        events.clear();

        anim.reverse(&mut events);
        assert_eq!(events, vec![Lifecycle::Started]);
        assert_eq!(anim.fraction(), 1.0);

        anim.update(0.5, &mut events);
        assert!((anim.fraction() - 0.5).abs() < 1e-6);
        anim.update(0.5, &mut events);
        assert_eq!(anim.fraction(), 0.0);
        assert_eq!(events.last(), Some(&Lifecycle::Ended));
    }

    #[test]
    fn test_reverse_from_start_jumps_to_end() {
        let mut anim = linear(1.0);
        let mut events = Vec::new();

        anim.reverse(&mut events);

        // 停在起始值时反向播放会立即跳到终点值
        assert_eq!(anim.fraction(), 1.0);
        assert!(anim.is_running());
    }

    #[test]
    fn test_zero_duration_ends_on_first_update() {
        let mut anim = linear(0.0);
        let mut events = Vec::new();
        anim.start(&mut events);
        anim.update(0.0, &mut events);
        assert_eq!(events, vec![Lifecycle::Started, Lifecycle::Ended]);
        assert_eq!(anim.fraction(), 1.0);
    }

    #[test]
    fn test_infinite_reverse_mode_ping_pongs() {
        let mut anim = linear(1.0).with_repeat(Repeat::Infinite, RepeatMode::Reverse);
        let mut events = Vec::new();
        anim.start(&mut events);
        events.clear();

        anim.update(1.25, &mut events);
        assert_eq!(events, vec![Lifecycle::Repeated]);
        assert_eq!(anim.direction(), Direction::Backward);
        assert!((anim.fraction() - 0.75).abs() < 1e-5);

        anim.update(10.0, &mut events);
        assert!(anim.is_running());
        assert_eq!(anim.iteration(), 11);
        assert!(!events.contains(&Lifecycle::Ended));
    }

    #[test]
    fn test_finite_restart_mode() {
        let mut anim = linear(1.0).with_repeat(Repeat::Times(2), RepeatMode::Restart);
        let mut events = Vec::new();
        anim.start(&mut events);
        events.clear();

        anim.update(1.5, &mut events);
        assert_eq!(events, vec![Lifecycle::Repeated]);
        assert_eq!(anim.direction(), Direction::Forward);
        assert!((anim.fraction() - 0.5).abs() < 1e-5);

        anim.update(2.0, &mut events);
        assert_eq!(
            events,
            vec![Lifecycle::Repeated, Lifecycle::Repeated, Lifecycle::Ended]
        );
        assert!(!anim.is_running());
        assert_eq!(anim.fraction(), 1.0);
    }

    #[test]
    fn test_eased_fraction() {
        let mut anim = Animation::new(1.0).with_easing(EasingFunction::Accelerate(1.0));
        let mut events = Vec::new();
        anim.start(&mut events);
        anim.update(0.5, &mut events);
        assert!((anim.eased_fraction() - 0.25).abs() < 1e-6);
    }
}
