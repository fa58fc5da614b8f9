//! 业务服务层
//!
//! 每个公开操作是一次请求/响应式的工作单元：策略裁决、输入校验、
//! 生命周期迁移与计数重算在服务内编排，落库走同一个存储事务。

pub mod assignments;
pub mod grading;
pub mod submissions;

use crate::errors::Result;
use crate::lifecycle;
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::Submission;
use crate::storage::StorageTransaction;

/// 在同一事务内重查提交集合，覆盖作业的派生计数与状态
///
/// 永远重查而不是增量加减，并发写者下计数才不会漂移。
/// 返回重查得到的提交集合，统计计算直接复用，避免二次查询。
pub(crate) async fn recount_assignment(
    txn: &dyn StorageTransaction,
    assignment: &Assignment,
) -> Result<Vec<Submission>> {
    let submissions = txn.list_submissions_by_assignment(assignment.id).await?;
    let submitted_count = submissions.len() as i64;
    let graded_count = submissions.iter().filter(|s| s.is_graded()).count() as i64;
    let status = lifecycle::derive_status(assignment.status, submitted_count, graded_count);

    txn.update_assignment_counters(assignment.id, submitted_count, graded_count, status)
        .await?;

    Ok(submissions)
}
