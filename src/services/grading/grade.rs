//! 评分服务

use chrono::Utc;
use tracing::info;

use super::GradingService;
use crate::errors::{CourseworkError, Result};
use crate::lifecycle;
use crate::models::actors::Actor;
use crate::models::assignments::stats_responses::AssignmentStats;
use crate::policy::{Action, Decision, PolicyResource};
use crate::services::recount_assignment;
use crate::storage::SubmissionRecord;

/// 对一份提交评分
///
/// 整个操作是一个存储事务：任何一步失败都不落库。
/// 重复评分幂等覆盖，score/graded_at/graded_by 整行写入，
/// 不存在可观测的半写状态。
pub async fn grade(
    service: &GradingService,
    actor: &Actor,
    submission_id: i64,
    score: i64,
    comment: Option<String>,
) -> Result<AssignmentStats> {
    let txn = service.storage.begin().await?;

    // 1. 装载提交与所属作业
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

    // 2. 策略裁决
    let resource = PolicyResource::submission(&assignment, &submission);
    if service.policy.evaluate(actor, Action::GradeSubmission, &resource) == Decision::Deny {
        return Err(CourseworkError::policy_denied("只有作业归属教师可以评分"));
    }

    // 3. 分数范围校验
    if score < 0 || score > assignment.max_score {
        return Err(CourseworkError::validation(format!(
            "分数 {score} 超出范围 [0, {}]",
            assignment.max_score
        )));
    }

    // 4. 生命周期迁移并整行覆盖
    lifecycle::apply_grade(&mut submission, score, comment, actor.id, Utc::now());
    txn.upsert_submission(SubmissionRecord::from_submission(&submission))
        .await?;

    // 5. 同一事务内重查计数并派生作业状态
    let submissions = recount_assignment(txn.as_ref(), &assignment).await?;

    // 6. 基于最新提交集合计算统计
    let stats = crate::stats::summarize(&submissions, assignment.max_score);
    txn.commit().await?;

    info!(
        "提交 {} 评分完成：{}/{}，评分人 {}",
        submission.id, score, assignment.max_score, actor.id
    );

    Ok(stats)
}
