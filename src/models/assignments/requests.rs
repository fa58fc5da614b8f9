use serde::Deserialize;

/// 创建作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub max_score: i64,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
}
