//! 提交详情服务

use super::SubmissionService;
use crate::errors::{CourseworkError, Result};
use crate::models::actors::Actor;
use crate::models::submissions::entities::Submission;
use crate::policy::{Action, Decision, PolicyResource};

/// 获取提交详情
///
/// 学生只能读取自己的提交；管理员全量放行。
pub async fn get_submission(
    service: &SubmissionService,
    actor: &Actor,
    submission_id: i64,
) -> Result<Submission> {
    let submission = service
        .storage
        .get_submission(submission_id)
        .await?
        .ok_or_else(|| CourseworkError::not_found(format!("提交不存在: {submission_id}")))?;

    let assignment = service
        .storage
        .get_assignment(submission.assignment_id)
        .await?
        .ok_or_else(|| {
            CourseworkError::not_found(format!("作业不存在: {}", submission.assignment_id))
        })?;

    let resource = PolicyResource::submission(&assignment, &submission);
    if service.policy.evaluate(actor, Action::ReadSubmission, &resource) == Decision::Deny {
        return Err(CourseworkError::policy_denied("没有查看该提交的权限"));
    }

    Ok(submission)
}
