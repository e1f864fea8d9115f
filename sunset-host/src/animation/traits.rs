//! # Traits 模块
//!
//! 基于 Trait 的动画系统核心接口定义。
//!
//! ## 核心概念
//!
//! - `ObjectId`: 由 AnimationSystem 分配的唯一对象标识符
//! - `PropertyValue`: 可动画的属性值（浮点或 ARGB 颜色）
//! - `Animatable`: 可动画对象接口

use serde::{Deserialize, Serialize};

use super::color::Argb;

/// 对象唯一标识符
///
/// 由 `AnimationSystem` 在对象注册时分配，保证全局唯一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) u64);

impl ObjectId {
    /// 创建新的对象 ID（仅供 AnimationSystem 内部使用）
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

/// 属性值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Float,
    Color,
}

/// 属性值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// 浮点属性（位置、缩放、旋转）
    Float(f32),
    /// ARGB 颜色属性（背景色）
    Color(Argb),
}

impl PropertyValue {
    /// 值类型
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::Color(_) => ValueKind::Color,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Argb> {
        match self {
            Self::Color(c) => Some(*c),
            Self::Float(_) => None,
        }
    }

    /// 按进度插值
    ///
    /// 浮点值线性插值，颜色在线性空间插值。类型不一致时返回 `None`。
    pub fn interpolate(from: &Self, to: &Self, t: f32) -> Option<Self> {
        match (from, to) {
            (Self::Float(a), Self::Float(b)) => Some(Self::Float(a + (b - a) * t)),
            (Self::Color(a), Self::Color(b)) => Some(Self::Color(Argb::lerp(*a, *b, t))),
            _ => None,
        }
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<Argb> for PropertyValue {
    fn from(value: Argb) -> Self {
        Self::Color(value)
    }
}

/// 可动画对象接口
///
/// 对象通过实现此 trait 声明自己有哪些属性可以被动画。
/// 由 `AnimationSystem` 统一分配唯一标识符，对象无需管理。
///
/// setter 使用 `&self`，实现者需要内部可变性（通常是 `Rc<RefCell<T>>`），
/// 这样动画系统和宿主可以同时持有同一个对象。
pub trait Animatable: 'static {
    /// 获取属性的当前值
    ///
    /// # 返回
    /// - `Some(value)`: 属性存在，返回当前值
    /// - `None`: 属性不存在
    fn get_property(&self, property_id: &str) -> Option<PropertyValue>;

    /// 设置属性的新值
    ///
    /// # 返回
    /// - `true`: 设置成功
    /// - `false`: 属性不存在或值类型不匹配
    fn set_property(&self, property_id: &str, value: PropertyValue) -> bool;

    /// 获取所有可动画属性的列表
    fn property_list(&self) -> &'static [&'static str];
}
