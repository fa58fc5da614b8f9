use serde::Deserialize;

/// 创建（或重交）提交请求
///
/// student_id 缺省为调用方自身；显式指定他人时由策略引擎裁决
/// （学生替他人提交会被拒绝，管理员放行）。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    #[serde(default)]
    pub student_id: Option<i64>,
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// 修改自己提交的正文/附件
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubmissionRequest {
    pub content: Option<String>,
    pub attachments: Option<Vec<String>>,
}
