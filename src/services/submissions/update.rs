//! 修改提交服务

use super::SubmissionService;
use crate::errors::{CourseworkError, Result};
use crate::models::actors::Actor;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::UpdateSubmissionRequest;
use crate::policy::{Action, Decision, PolicyResource};
use crate::storage::SubmissionRecord;

/// 修改自己提交的正文/附件
///
/// 只触碰作者字段：submitted_at、状态与评分字段保持原样，
/// 因此不需要重算作业计数。
pub async fn update_submission(
    service: &SubmissionService,
    actor: &Actor,
    submission_id: i64,
    req: UpdateSubmissionRequest,
) -> Result<Submission> {
    if let Some(content) = &req.content
        && content.trim().is_empty()
    {
        return Err(CourseworkError::validation("提交内容不能为空"));
    }

    let txn = service.storage.begin().await?;

    let mut submission = txn
        .get_submission(submission_id)
        .await?
        .ok_or_else(|| CourseworkError::not_found(format!("提交不存在: {submission_id}")))?;

    let assignment = txn
        .get_assignment(submission.assignment_id)
        .await?
        .ok_or_else(|| {
            CourseworkError::not_found(format!("作业不存在: {}", submission.assignment_id))
        })?;

    let resource = PolicyResource::submission(&assignment, &submission);
    if service.policy.evaluate(actor, Action::UpdateSubmission, &resource) == Decision::Deny {
        return Err(CourseworkError::policy_denied("只能修改自己的提交"));
    }

    if let Some(content) = req.content {
        submission.content = content;
    }
    if let Some(attachments) = req.attachments {
        submission.attachments = attachments;
    }

    let submission = txn
        .upsert_submission(SubmissionRecord::from_submission(&submission))
        .await?;
    txn.commit().await?;

    Ok(submission)
}
