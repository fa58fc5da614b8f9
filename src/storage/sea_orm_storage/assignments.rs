//! 作业存储操作

use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{CourseworkError, Result};
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::storage::NewAssignment;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

/// 通过 ID 获取作业
pub(crate) async fn get_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Assignment>> {
    let result = Assignments::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| CourseworkError::database_operation(format!("查询作业失败: {e}")))?;

    Ok(result.map(|m| m.into_assignment()))
}

/// 插入新作业
pub(crate) async fn insert<C: ConnectionTrait>(db: &C, record: NewAssignment) -> Result<Assignment> {
    let model = ActiveModel {
        owner_id: Set(record.owner_id),
        title: Set(record.title),
        max_score: Set(record.max_score),
        deadline: Set(record.deadline.map(|d| d.timestamp())),
        status: Set(record.status.to_string()),
        submitted_count: Set(0),
        graded_count: Set(0),
        created_at: Set(record.created_at.timestamp()),
        updated_at: Set(record.updated_at.timestamp()),
        ..Default::default()
    };

    let result = model
        .insert(db)
        .await
        .map_err(|e| CourseworkError::database_operation(format!("创建作业失败: {e}")))?;

    Ok(result.into_assignment())
}

/// 更新作业状态（发布等显式迁移）
pub(crate) async fn update_status<C: ConnectionTrait>(
    db: &C,
    id: i64,
    status: AssignmentStatus,
) -> Result<bool> {
    let result = Assignments::update_many()
        .col_expr(
            Column::Status,
            sea_orm::sea_query::Expr::value(status.to_string()),
        )
        .col_expr(
            Column::UpdatedAt,
            sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
        )
        .filter(Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| CourseworkError::database_operation(format!("更新作业状态失败: {e}")))?;

    Ok(result.rows_affected > 0)
}

/// 用重查得到的计数覆盖派生字段
pub(crate) async fn update_counters<C: ConnectionTrait>(
    db: &C,
    id: i64,
    submitted_count: i64,
    graded_count: i64,
    status: AssignmentStatus,
) -> Result<bool> {
    let result = Assignments::update_many()
        .col_expr(
            Column::SubmittedCount,
            sea_orm::sea_query::Expr::value(submitted_count),
        )
        .col_expr(
            Column::GradedCount,
            sea_orm::sea_query::Expr::value(graded_count),
        )
        .col_expr(
            Column::Status,
            sea_orm::sea_query::Expr::value(status.to_string()),
        )
        .col_expr(
            Column::UpdatedAt,
            sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
        )
        .filter(Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| CourseworkError::database_operation(format!("更新作业计数失败: {e}")))?;

    Ok(result.rows_affected > 0)
}
