//! 调用方身份
//!
//! 本核心不做认证：Actor 由外部的身份/会话层在每次调用时提供，
//! 这里只消费其 id 与角色。

use serde::{Deserialize, Serialize};

// 调用方角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Student, // 学生
    Teacher, // 教师
    Admin,   // 管理员
}

impl ActorRole {
    pub const STUDENT: &'static str = "student";
    pub const TEACHER: &'static str = "teacher";
    pub const ADMIN: &'static str = "admin";
}

impl<'de> Deserialize<'de> for ActorRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            ActorRole::STUDENT => Ok(ActorRole::Student),
            ActorRole::TEACHER => Ok(ActorRole::Teacher),
            ActorRole::ADMIN => Ok(ActorRole::Admin),
            _ => Err(serde::de::Error::custom(format!(
                "无效的角色: '{s}'. 支持的角色: student, teacher, admin"
            ))),
        }
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorRole::Student => write!(f, "{}", ActorRole::STUDENT),
            ActorRole::Teacher => write!(f, "{}", ActorRole::TEACHER),
            ActorRole::Admin => write!(f, "{}", ActorRole::ADMIN),
        }
    }
}

impl std::str::FromStr for ActorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(ActorRole::Student),
            "teacher" => Ok(ActorRole::Teacher),
            "admin" => Ok(ActorRole::Admin),
            _ => Err(format!("Invalid actor role: {s}")),
        }
    }
}

/// 已认证的调用方
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: ActorRole,
}

impl Actor {
    pub fn student(id: i64) -> Self {
        Self {
            id,
            role: ActorRole::Student,
        }
    }

    pub fn teacher(id: i64) -> Self {
        Self {
            id,
            role: ActorRole::Teacher,
        }
    }

    pub fn admin(id: i64) -> Self {
        Self {
            id,
            role: ActorRole::Admin,
        }
    }
}
