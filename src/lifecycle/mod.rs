//! 生命周期控制
//!
//! 提交状态机与作业派生状态。全部为纯函数；落库由 services 层
//! 在同一事务里完成。
//!
//! 提交：Submitted -> Graded、Submitted -> Late（仅在创建时打标签）、
//! Graded -> Graded（重复评分幂等覆盖）。没有从 Graded 回退的迁移。
//!
//! 作业：状态永远由提交集合的最新计数派生，不作为独立事实存储。

use chrono::{DateTime, Utc};

use crate::errors::{CourseworkError, Result};
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::submissions::entities::{Submission, SubmissionStatus};

/// 计算（重）提交时刻的状态标签
///
/// 严格晚于截止时间才算迟交；恰好等于截止时间不算。
pub fn status_on_submit(
    deadline: Option<DateTime<Utc>>,
    submitted_at: DateTime<Utc>,
) -> SubmissionStatus {
    match deadline {
        Some(deadline) if submitted_at > deadline => SubmissionStatus::Late,
        _ => SubmissionStatus::Submitted,
    }
}

/// 将提交迁移到 Graded
///
/// 对已评分的提交重复调用是幂等的：score/comment/graded_at/graded_by
/// 总是被整体覆盖，不存在半写状态。
pub fn apply_grade(
    submission: &mut Submission,
    score: i64,
    comment: Option<String>,
    grader_id: i64,
    graded_at: DateTime<Utc>,
) {
    submission.status = SubmissionStatus::Graded;
    submission.score = Some(score);
    submission.comment = comment;
    submission.graded_at = Some(graded_at);
    submission.graded_by = Some(grader_id);
}

/// 发布作业：Draft -> Open
pub fn publish(assignment: &mut Assignment) -> Result<()> {
    if assignment.status != AssignmentStatus::Draft {
        return Err(CourseworkError::validation(format!(
            "作业 {} 处于 {} 状态，只有 draft 可以发布",
            assignment.id, assignment.status
        )));
    }
    assignment.status = AssignmentStatus::Open;
    Ok(())
}

/// 由最新计数派生作业状态
///
/// 计数必须来自同一事务内对提交集合的重查，不允许增量维护。
/// Draft 不受提交活动影响（未发布的作业不接受提交）。
pub fn derive_status(
    current: AssignmentStatus,
    submitted_count: i64,
    graded_count: i64,
) -> AssignmentStatus {
    if current == AssignmentStatus::Draft {
        return AssignmentStatus::Draft;
    }
    if submitted_count == 0 {
        AssignmentStatus::Open
    } else if graded_count < submitted_count {
        AssignmentStatus::Grading
    } else {
        AssignmentStatus::Closed
    }
}
