//! # Error 模块
//!
//! 定义 sunset-host 中使用的错误类型。

use thiserror::Error;

use crate::animation::{ObjectId, ValueKind};

/// 动画系统错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// 对象未注册
    #[error("对象 {object} 未注册")]
    ObjectNotRegistered { object: ObjectId },

    /// 属性不存在
    #[error("对象 {object} 上不存在属性 '{property}'")]
    UnknownProperty {
        object: ObjectId,
        property: &'static str,
    },

    /// 属性值类型不匹配
    #[error("属性 '{property}' 的值类型不匹配：期望 {expected:?}，实际 {actual:?}")]
    ValueKindMismatch {
        property: &'static str,
        expected: ValueKind,
        actual: ValueKind,
    },
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),

    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),

    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),

    /// 无效的颜色值
    #[error("无效的颜色值 '{0}'，应为 #RRGGBB 或 #AARRGGBB")]
    InvalidColor(String),
}

/// sunset-host 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type HostResult<T> = Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnimationError::ObjectNotRegistered {
            object: ObjectId::new(3),
        };
        assert_eq!(err.to_string(), "对象 ObjectId(3) 未注册");

        let err = ConfigError::InvalidColor("blue".to_string());
        assert!(err.to_string().contains("'blue'"));
    }

    #[test]
    fn test_host_error_from() {
        let err: HostError = ConfigError::ValidationFailed("fps 必须大于 0".to_string()).into();
        assert_eq!(err.to_string(), "配置错误: 配置验证失败: fps 必须大于 0");
    }
}
