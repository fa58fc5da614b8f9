//! 提交存储操作

use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{CourseworkError, Result};
use crate::models::submissions::entities::Submission;
use crate::storage::SubmissionRecord;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// 通过 ID 获取提交
pub(crate) async fn get_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Submission>> {
    let result = Submissions::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| CourseworkError::database_operation(format!("查询提交失败: {e}")))?;

    Ok(result.map(|m| m.into_submission()))
}

/// 获取某学生对某作业的提交（同一键至多一行）
pub(crate) async fn get_by_assignment_and_student<C: ConnectionTrait>(
    db: &C,
    assignment_id: i64,
    student_id: i64,
) -> Result<Option<Submission>> {
    let result = Submissions::find()
        .filter(Column::AssignmentId.eq(assignment_id))
        .filter(Column::StudentId.eq(student_id))
        .one(db)
        .await
        .map_err(|e| CourseworkError::database_operation(format!("查询提交失败: {e}")))?;

    Ok(result.map(|m| m.into_submission()))
}

/// 列出作业的全部提交
pub(crate) async fn list_by_assignment<C: ConnectionTrait>(
    db: &C,
    assignment_id: i64,
) -> Result<Vec<Submission>> {
    let results = Submissions::find()
        .filter(Column::AssignmentId.eq(assignment_id))
        .order_by_desc(Column::SubmittedAt)
        .all(db)
        .await
        .map_err(|e| CourseworkError::database_operation(format!("查询提交列表失败: {e}")))?;

    Ok(results.into_iter().map(|m| m.into_submission()).collect())
}

/// 插入或覆盖提交
///
/// record.id 为 None 时先按 (assignment_id, student_id) 定位既有行，
/// 命中则整行覆盖，保持同一键只有一行的不变量。
pub(crate) async fn upsert<C: ConnectionTrait>(
    db: &C,
    record: SubmissionRecord,
) -> Result<Submission> {
    let row_id = match record.id {
        Some(id) => Some(id),
        None => {
            get_by_assignment_and_student(db, record.assignment_id, record.student_id)
                .await?
                .map(|s| s.id)
        }
    };

    let attachments = if record.attachments.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&record.attachments)?)
    };

    let mut model = ActiveModel {
        assignment_id: Set(record.assignment_id),
        student_id: Set(record.student_id),
        content: Set(record.content),
        attachments: Set(attachments),
        submitted_at: Set(record.submitted_at.timestamp()),
        status: Set(record.status.to_string()),
        score: Set(record.score),
        comment: Set(record.comment),
        graded_at: Set(record.graded_at.map(|d| d.timestamp())),
        graded_by: Set(record.graded_by),
        ..Default::default()
    };

    let result = match row_id {
        Some(id) => {
            model.id = Set(id);
            model
                .update(db)
                .await
                .map_err(|e| CourseworkError::database_operation(format!("覆盖提交失败: {e}")))?
        }
        None => model
            .insert(db)
            .await
            .map_err(|e| CourseworkError::database_operation(format!("创建提交失败: {e}")))?,
    };

    Ok(result.into_submission())
}
