//! 实体存储层
//!
//! 核心通过 Storage / StorageTransaction 两个 trait 访问持久化状态，
//! 事务边界由核心（services 层）控制：一次变更操作内的读-改-写与
//! 计数重算必须落在同一个事务里。
//!
//! 提供两个实现：
//! - sea_orm_storage::SeaOrmStorage：SQLite / PostgreSQL / MySQL
//! - memory::MemoryStorage：快照隔离的内存实现，供测试与嵌入场景

use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::submissions::entities::{Submission, SubmissionStatus};

pub mod memory;
pub mod sea_orm_storage;

/// 新建作业的写入记录（id 由存储层分配）
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub owner_id: i64,
    pub title: String,
    pub max_score: i64,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub status: AssignmentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 提交的 upsert 记录
///
/// id 为 None 时按 (assignment_id, student_id) 定位既有行：
/// 命中则覆盖（重交语义，同一键永远只有一行），否则插入。
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub id: Option<i64>,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: String,
    pub attachments: Vec<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub status: SubmissionStatus,
    pub score: Option<i64>,
    pub comment: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub graded_by: Option<i64>,
}

impl SubmissionRecord {
    /// 由业务实体构造（携带 id，用于评分等整行覆盖）
    pub fn from_submission(sub: &Submission) -> Self {
        Self {
            id: Some(sub.id),
            assignment_id: sub.assignment_id,
            student_id: sub.student_id,
            content: sub.content.clone(),
            attachments: sub.attachments.clone(),
            submitted_at: sub.submitted_at,
            status: sub.status,
            score: sub.score,
            comment: sub.comment.clone(),
            graded_at: sub.graded_at,
            graded_by: sub.graded_by,
        }
    }
}

/// 单个存储事务
///
/// 未 commit 即被 drop 的事务整体回滚，不留下部分写入。
#[async_trait::async_trait]
pub trait StorageTransaction: Send {
    /// 作业
    // 通过 ID 获取作业
    async fn get_assignment(&self, id: i64) -> Result<Option<Assignment>>;
    // 插入新作业
    async fn insert_assignment(&self, record: NewAssignment) -> Result<Assignment>;
    // 更新作业状态（发布等显式迁移）
    async fn update_assignment_status(&self, id: i64, status: AssignmentStatus) -> Result<bool>;
    // 以重查得到的计数覆盖派生字段
    async fn update_assignment_counters(
        &self,
        id: i64,
        submitted_count: i64,
        graded_count: i64,
        status: AssignmentStatus,
    ) -> Result<bool>;

    /// 提交
    // 通过 ID 获取提交
    async fn get_submission(&self, id: i64) -> Result<Option<Submission>>;
    // 获取某学生对某作业的提交
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出作业的全部提交
    async fn list_submissions_by_assignment(&self, assignment_id: i64)
    -> Result<Vec<Submission>>;
    // 插入或覆盖提交
    async fn upsert_submission(&self, record: SubmissionRecord) -> Result<Submission>;

    /// 提交事务
    async fn commit(self: Box<Self>) -> Result<()>;
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 开启事务
    async fn begin(&self) -> Result<Box<dyn StorageTransaction>>;

    /// 单行快照读（只读路径用，不跨行保证一致性）
    async fn get_assignment(&self, id: i64) -> Result<Option<Assignment>>;
    async fn get_submission(&self, id: i64) -> Result<Option<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
