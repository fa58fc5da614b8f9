//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_coursework_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CourseworkError {
            $($variant(String),)*
        }

        impl CourseworkError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CourseworkError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CourseworkError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CourseworkError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CourseworkError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CourseworkError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_coursework_errors! {
    PolicyDenied("E001", "Policy Denied"),
    Validation("E002", "Validation Error"),
    NotFound("E003", "Resource Not Found"),
    ConcurrencyConflict("E004", "Concurrency Conflict"),
    DatabaseConfig("E005", "Database Configuration Error"),
    DatabaseConnection("E006", "Database Connection Error"),
    DatabaseOperation("E007", "Database Operation Error"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
}

impl CourseworkError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CourseworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CourseworkError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CourseworkError {
    fn from(err: sea_orm::DbErr) -> Self {
        CourseworkError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CourseworkError {
    fn from(err: serde_json::Error) -> Self {
        CourseworkError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CourseworkError {
    fn from(err: chrono::ParseError) -> Self {
        CourseworkError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CourseworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CourseworkError::policy_denied("test").code(), "E001");
        assert_eq!(CourseworkError::validation("test").code(), "E002");
        assert_eq!(CourseworkError::not_found("test").code(), "E003");
        assert_eq!(CourseworkError::database_operation("test").code(), "E007");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CourseworkError::policy_denied("test").error_type(),
            "Policy Denied"
        );
        assert_eq!(
            CourseworkError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CourseworkError::validation("score out of range");
        assert_eq!(err.message(), "score out of range");
    }

    #[test]
    fn test_format_simple() {
        let err = CourseworkError::policy_denied("not the assignment owner");
        let formatted = err.format_simple();
        assert!(formatted.contains("Policy Denied"));
        assert!(formatted.contains("not the assignment owner"));
    }
}
