//! 发布作业服务

use tracing::info;

use super::AssignmentService;
use crate::errors::{CourseworkError, Result};
use crate::lifecycle;
use crate::models::actors::Actor;
use crate::models::assignments::entities::Assignment;
use crate::policy::{Action, Decision, PolicyResource};

/// 发布作业：Draft -> Open
pub async fn publish_assignment(
    service: &AssignmentService,
    actor: &Actor,
    assignment_id: i64,
) -> Result<Assignment> {
    let txn = service.storage.begin().await?;

    let mut assignment = txn
        .get_assignment(assignment_id)
        .await?
        .ok_or_else(|| CourseworkError::not_found(format!("作业不存在: {assignment_id}")))?;

    let resource = PolicyResource::assignment(&assignment);
    if service.policy.evaluate(actor, Action::PublishAssignment, &resource) == Decision::Deny {
        return Err(CourseworkError::policy_denied("只有作业归属教师可以发布"));
    }

    lifecycle::publish(&mut assignment)?;
    txn.update_assignment_status(assignment.id, assignment.status)
        .await?;
    txn.commit().await?;

    info!("作业 {} 已发布", assignment.id);

    Ok(assignment)
}
