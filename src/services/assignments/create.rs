//! 创建作业服务

use chrono::Utc;
use tracing::info;

use super::AssignmentService;
use crate::errors::{CourseworkError, Result};
use crate::models::actors::Actor;
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::policy::{Action, Decision, PolicyResource};
use crate::storage::NewAssignment;

/// 创建作业
///
/// 新作业以 Draft 状态落库，归属落在调用教师名下；
/// 发布之前不接受任何提交。
pub async fn create_assignment(
    service: &AssignmentService,
    actor: &Actor,
    req: CreateAssignmentRequest,
) -> Result<Assignment> {
    let resource = PolicyResource::none();
    if service.policy.evaluate(actor, Action::CreateAssignment, &resource) == Decision::Deny {
        return Err(CourseworkError::policy_denied("只有教师可以创建作业"));
    }

    if req.title.trim().is_empty() {
        return Err(CourseworkError::validation("作业标题不能为空"));
    }
    if req.max_score <= 0 {
        return Err(CourseworkError::validation(format!(
            "作业满分必须为正整数: {}",
            req.max_score
        )));
    }

    let now = Utc::now();
    let txn = service.storage.begin().await?;
    let assignment = txn
        .insert_assignment(NewAssignment {
            owner_id: actor.id,
            title: req.title,
            max_score: req.max_score,
            deadline: req.deadline,
            status: AssignmentStatus::Draft,
            created_at: now,
            updated_at: now,
        })
        .await?;
    txn.commit().await?;

    info!(
        "教师 {} 创建作业 {}（{}）",
        actor.id, assignment.id, assignment.title
    );

    Ok(assignment)
}
