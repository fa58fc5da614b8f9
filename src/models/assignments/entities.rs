use serde::{Deserialize, Serialize};

// 作业状态
//
// Draft 只由"尚未发布"这一事实决定；其余三个状态由提交集合派生，
// 见 lifecycle::derive_status。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Draft,   // 未发布
    Open,    // 已发布，可提交
    Grading, // 有提交待评分
    Closed,  // 全部评分完成
}

impl AssignmentStatus {
    pub const DRAFT: &'static str = "draft";
    pub const OPEN: &'static str = "open";
    pub const GRADING: &'static str = "grading";
    pub const CLOSED: &'static str = "closed";
}

impl<'de> Deserialize<'de> for AssignmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AssignmentStatus::DRAFT => Ok(AssignmentStatus::Draft),
            AssignmentStatus::OPEN => Ok(AssignmentStatus::Open),
            AssignmentStatus::GRADING => Ok(AssignmentStatus::Grading),
            AssignmentStatus::CLOSED => Ok(AssignmentStatus::Closed),
            _ => Err(serde::de::Error::custom(format!(
                "无效的作业状态: '{s}'. 支持的状态: draft, open, grading, closed"
            ))),
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Draft => write!(f, "{}", AssignmentStatus::DRAFT),
            AssignmentStatus::Open => write!(f, "{}", AssignmentStatus::OPEN),
            AssignmentStatus::Grading => write!(f, "{}", AssignmentStatus::GRADING),
            AssignmentStatus::Closed => write!(f, "{}", AssignmentStatus::CLOSED),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AssignmentStatus::Draft),
            "open" => Ok(AssignmentStatus::Open),
            "grading" => Ok(AssignmentStatus::Grading),
            "closed" => Ok(AssignmentStatus::Closed),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 所属教师 ID
    pub owner_id: i64,
    // 作业标题
    pub title: String,
    // 作业满分（正整数）
    pub max_score: i64,
    // 作业截止时间
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    // 作业状态（由提交集合派生，见 lifecycle）
    pub status: AssignmentStatus,
    // 已提交人数（派生计数，事务内重查得出，客户端不可直接修改）
    pub submitted_count: i64,
    // 已评分人数（派生计数，同上）
    pub graded_count: i64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
