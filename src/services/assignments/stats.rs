//! 作业统计服务

use super::AssignmentService;
use crate::errors::{CourseworkError, Result};
use crate::models::actors::Actor;
use crate::models::assignments::stats_responses::AssignmentStats;
use crate::policy::{Action, Decision, PolicyResource};

/// 获取作业成绩统计
///
/// 作业与提交集合在同一事务内读取，统计结果与派生状态来自
/// 同一个快照。
pub async fn get_stats(
    service: &AssignmentService,
    actor: &Actor,
    assignment_id: i64,
) -> Result<AssignmentStats> {
    let txn = service.storage.begin().await?;

    let assignment = txn
        .get_assignment(assignment_id)
        .await?
        .ok_or_else(|| CourseworkError::not_found(format!("作业不存在: {assignment_id}")))?;

    let resource = PolicyResource::assignment(&assignment);
    if service
        .policy
        .evaluate(actor, Action::ReadAssignmentStats, &resource)
        == Decision::Deny
    {
        return Err(CourseworkError::policy_denied("只有作业归属教师可以查看统计"));
    }

    let submissions = txn.list_submissions_by_assignment(assignment_id).await?;
    let stats = crate::stats::summarize(&submissions, assignment.max_score);
    txn.commit().await?;

    Ok(stats)
}
