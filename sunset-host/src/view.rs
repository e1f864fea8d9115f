//! # View 模块
//!
//! 可动画的无头视图，对应日落场景中的太阳、倒影、天空、海面和光芒。
//!
//! ## 设计说明
//!
//! `AnimatableView` 使用 `Rc<RefCell<T>>` 实现内部可变性，
//! 动画系统和场景可以同时持有同一个视图。

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::animation::{Animatable, Argb, PropertyValue};

/// 视图的内部数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewData {
    /// 视图名称
    pub name: String,
    /// 布局位置（布局前为 0）
    pub top: f32,
    /// 布局高度（布局前为 0）
    pub height: f32,
    /// 当前 Y 坐标
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// 旋转角度（度）
    pub rotation: f32,
    pub background_color: Argb,
    pub visible: bool,
}

impl ViewData {
    /// 创建新的视图数据
    pub fn new(name: impl Into<String>, background_color: Argb) -> Self {
        Self {
            name: name.into(),
            top: 0.0,
            height: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            background_color,
            visible: true,
        }
    }
}

/// 可动画视图
///
/// ## 支持的属性
///
/// - `"y"`: Y 坐标
/// - `"scale_x"` / `"scale_y"`: 缩放
/// - `"rotation"`: 旋转角度（度）
/// - `"background_color"`: 背景色（ARGB）
#[derive(Debug, Clone)]
pub struct AnimatableView {
    data: Rc<RefCell<ViewData>>,
}

impl AnimatableView {
    /// 支持的属性列表
    pub const PROPERTIES: &'static [&'static str] =
        &["y", "scale_x", "scale_y", "rotation", "background_color"];

    /// 创建新的可动画视图
    pub fn new(name: impl Into<String>, background_color: Argb) -> Self {
        Self {
            data: Rc::new(RefCell::new(ViewData::new(name, background_color))),
        }
    }

    /// 创建初始不可见的视图
    pub fn hidden(name: impl Into<String>, background_color: Argb) -> Self {
        let view = Self::new(name, background_color);
        view.set_visible(false);
        view
    }

    /// 获取视图名称
    pub fn name(&self) -> String {
        self.data.borrow().name.clone()
    }

    /// 设置布局几何，Y 坐标同时回到布局位置
    pub fn set_geometry(&self, top: f32, height: f32) {
        let mut data = self.data.borrow_mut();
        data.top = top;
        data.height = height;
        data.y = top;
    }

    pub fn top(&self) -> f32 {
        self.data.borrow().top
    }

    pub fn height(&self) -> f32 {
        self.data.borrow().height
    }

    pub fn y(&self) -> f32 {
        self.data.borrow().y
    }

    pub fn set_y(&self, y: f32) {
        self.data.borrow_mut().y = y;
    }

    /// 获取缩放
    pub fn scale(&self) -> (f32, f32) {
        let data = self.data.borrow();
        (data.scale_x, data.scale_y)
    }

    pub fn rotation(&self) -> f32 {
        self.data.borrow().rotation
    }

    pub fn background_color(&self) -> Argb {
        self.data.borrow().background_color
    }

    pub fn is_visible(&self) -> bool {
        self.data.borrow().visible
    }

    pub fn set_visible(&self, visible: bool) {
        self.data.borrow_mut().visible = visible;
    }

    /// 获取完整数据副本
    pub fn snapshot(&self) -> ViewData {
        self.data.borrow().clone()
    }
}

impl Animatable for AnimatableView {
    fn get_property(&self, property_id: &str) -> Option<PropertyValue> {
        let data = self.data.borrow();
        match property_id {
            "y" => Some(data.y.into()),
            "scale_x" => Some(data.scale_x.into()),
            "scale_y" => Some(data.scale_y.into()),
            "rotation" => Some(data.rotation.into()),
            "background_color" => Some(data.background_color.into()),
            _ => None,
        }
    }

    fn set_property(&self, property_id: &str, value: PropertyValue) -> bool {
        let mut data = self.data.borrow_mut();
        let slot = match property_id {
            "y" => &mut data.y,
            "scale_x" => &mut data.scale_x,
            "scale_y" => &mut data.scale_y,
            "rotation" => &mut data.rotation,
            "background_color" => {
                return match value {
                    PropertyValue::Color(color) => {
                        data.background_color = color;
                        true
                    }
                    PropertyValue::Float(_) => false,
                };
            }
            _ => return false,
        };

        match value {
            PropertyValue::Float(v) => {
                *slot = v;
                true
            }
            PropertyValue::Color(_) => false,
        }
    }

    fn property_list(&self) -> &'static [&'static str] {
        Self::PROPERTIES
    }
}
