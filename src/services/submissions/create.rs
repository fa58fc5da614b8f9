//! 创建提交服务

use chrono::Utc;
use tracing::info;

use super::SubmissionService;
use crate::errors::{CourseworkError, Result};
use crate::lifecycle;
use crate::models::actors::{Actor, ActorRole};
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::policy::{Action, Decision, PolicyResource};
use crate::services::recount_assignment;
use crate::storage::SubmissionRecord;

/// 创建（或重交）提交
///
/// 策略裁决、迟交标签、upsert 与计数重算在同一事务内完成。
/// 同一 (assignment, student) 对永远只有一行：重交覆盖既有行，
/// 并把评分字段重置为未评分形态。
pub async fn create_submission(
    service: &SubmissionService,
    actor: &Actor,
    req: CreateSubmissionRequest,
) -> Result<Submission> {
    let student_id = req.student_id.unwrap_or(actor.id);

    let txn = service.storage.begin().await?;

    let assignment = txn
        .get_assignment(req.assignment_id)
        .await?
        .ok_or_else(|| CourseworkError::not_found(format!("作业不存在: {}", req.assignment_id)))?;

    let existing = txn
        .get_submission_by_assignment_and_student(req.assignment_id, student_id)
        .await?;

    // 策略裁决
    let resource = PolicyResource {
        assignment: Some(&assignment),
        submission: existing.as_ref(),
        student_id: Some(student_id),
    };
    if service.policy.evaluate(actor, Action::CreateSubmission, &resource) == Decision::Deny {
        return Err(deny_reason(
            actor,
            student_id,
            assignment.status,
            existing.as_ref(),
        ));
    }

    // 输入校验
    if req.content.trim().is_empty() {
        return Err(CourseworkError::validation("提交内容不能为空"));
    }

    let now = Utc::now();
    let record = SubmissionRecord {
        id: existing.as_ref().map(|s| s.id),
        assignment_id: req.assignment_id,
        student_id,
        content: req.content,
        attachments: req.attachments,
        submitted_at: now,
        status: lifecycle::status_on_submit(assignment.deadline, now),
        score: None,
        comment: None,
        graded_at: None,
        graded_by: None,
    };
    let submission = txn.upsert_submission(record).await?;

    // 同一事务内重查计数并派生作业状态
    recount_assignment(txn.as_ref(), &assignment).await?;
    txn.commit().await?;

    info!(
        "学生 {} 提交作业 {}（提交 {}，状态 {}）",
        student_id, submission.assignment_id, submission.id, submission.status
    );

    Ok(submission)
}

/// 把创建提交的拒绝翻译为错误类型
///
/// 身份不匹配是授权失败；本人撞上不可提交的状态（作业未开放、
/// 已评分不可重交）按输入校验失败上报。
fn deny_reason(
    actor: &Actor,
    student_id: i64,
    status: AssignmentStatus,
    existing: Option<&Submission>,
) -> CourseworkError {
    if actor.role != ActorRole::Student {
        return CourseworkError::policy_denied("只有学生可以提交作业");
    }
    if actor.id != student_id {
        return CourseworkError::policy_denied("不能替其他学生提交作业");
    }
    if status != AssignmentStatus::Open {
        return CourseworkError::validation(format!("作业处于 {status} 状态，不接受提交"));
    }
    if existing.is_some_and(|s| s.is_graded()) {
        return CourseworkError::validation("该作业的提交已评分，不能重交");
    }
    CourseworkError::policy_denied("没有提交该作业的权限")
}
