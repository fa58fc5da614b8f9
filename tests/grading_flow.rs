//! 评分流程集成测试
//!
//! 覆盖评分服务的完整事务：策略裁决、分数校验、幂等重评、
//! 计数重算与统计计算。

mod common;

use common::{harness, open_assignment, submit};
use coursework_core::models::actors::Actor;
use coursework_core::models::assignments::entities::AssignmentStatus;
use coursework_core::models::submissions::entities::SubmissionStatus;
use coursework_core::storage::Storage;

#[tokio::test]
async fn test_grade_and_stats_reference_scenario() {
    let h = harness();
    let teacher = Actor::teacher(7);
    let assignment = open_assignment(&h, &teacher, 100, None).await;

    // 5 个学生提交，其中 4 份被评分
    let mut submission_ids = Vec::new();
    for student_id in 1..=5 {
        let sub = submit(&h, &Actor::student(student_id), assignment.id, "答案").await;
        submission_ids.push(sub.id);
    }

    let scores = [85, 92, 55, 70];
    let mut stats = None;
    for (sub_id, score) in submission_ids.iter().zip(scores) {
        stats = Some(
            h.grading
                .grade(&teacher, *sub_id, score, None)
                .await
                .expect("grade submission"),
        );
    }

    let stats = stats.unwrap();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.graded_count, 4);
    assert_eq!(stats.avg_score, 75.5);
    assert_eq!(stats.max_observed, 92);
    assert_eq!(stats.min_observed, 55);
    assert_eq!(stats.pass_rate, 75.0);
    assert_eq!(stats.distribution, [1, 1, 1, 0, 1]);

    // 计数与状态来自事务内的重查
    let assignment = h
        .storage
        .get_assignment(assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assignment.submitted_count, 5);
    assert_eq!(assignment.graded_count, 4);
    assert_eq!(assignment.status, AssignmentStatus::Grading);
}

#[tokio::test]
async fn test_grade_out_of_range_leaves_submission_unchanged() {
    let h = harness();
    let teacher = Actor::teacher(7);
    let student = Actor::student(42);
    let assignment = open_assignment(&h, &teacher, 100, None).await;
    let sub = submit(&h, &student, assignment.id, "答案").await;

    for bad_score in [-1, 101] {
        let err = h
            .grading
            .grade(&teacher, sub.id, bad_score, None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E002", "score {bad_score}");
    }

    // 校验失败不留任何状态变化
    let unchanged = h.submissions.get_submission(&student, sub.id).await.unwrap();
    assert_eq!(unchanged.status, SubmissionStatus::Submitted);
    assert_eq!(unchanged.score, None);
    assert_eq!(unchanged.graded_at, None);
    assert_eq!(unchanged.graded_by, None);

    let assignment = h
        .storage
        .get_assignment(assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assignment.graded_count, 0);
}

#[tokio::test]
async fn test_grade_by_non_owner_teacher_denied() {
    let h = harness();
    let teacher = Actor::teacher(7);
    let assignment = open_assignment(&h, &teacher, 100, None).await;
    let sub = submit(&h, &Actor::student(42), assignment.id, "答案").await;

    let err = h
        .grading
        .grade(&Actor::teacher(8), sub.id, 90, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E001");

    let err = h
        .grading
        .grade(&Actor::student(42), sub.id, 90, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E001");

    // 管理员绕过归属限制
    h.grading
        .grade(&Actor::admin(999), sub.id, 90, None)
        .await
        .expect("admin grades");
}

#[tokio::test]
async fn test_regrade_overwrites_single_row() {
    let h = harness();
    let teacher = Actor::teacher(7);
    let student = Actor::student(42);
    let assignment = open_assignment(&h, &teacher, 100, None).await;
    let sub = submit(&h, &student, assignment.id, "答案").await;

    h.grading
        .grade(&teacher, sub.id, 60, Some("及格".to_string()))
        .await
        .unwrap();
    let stats = h
        .grading
        .grade(&teacher, sub.id, 90, Some("复核后改分".to_string()))
        .await
        .unwrap();

    // 重复评分不会产生第二行
    assert_eq!(stats.total, 1);
    assert_eq!(stats.graded_count, 1);
    assert_eq!(stats.max_observed, 90);

    let graded = h.submissions.get_submission(&student, sub.id).await.unwrap();
    assert_eq!(graded.id, sub.id);
    assert_eq!(graded.score, Some(90));
    assert_eq!(graded.comment.as_deref(), Some("复核后改分"));
    assert_eq!(graded.graded_by, Some(teacher.id));
    assert!(graded.graded_at.is_some());
}

#[tokio::test]
async fn test_grade_missing_submission_is_not_found() {
    let h = harness();
    let err = h
        .grading
        .grade(&Actor::teacher(7), 12345, 60, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E003");
}

#[tokio::test]
async fn test_full_grading_closes_assignment() {
    let h = harness();
    let teacher = Actor::teacher(7);
    let assignment = open_assignment(&h, &teacher, 100, None).await;

    let sub_a = submit(&h, &Actor::student(1), assignment.id, "答案 A").await;
    let sub_b = submit(&h, &Actor::student(2), assignment.id, "答案 B").await;

    h.grading.grade(&teacher, sub_a.id, 80, None).await.unwrap();
    let stats = h.grading.grade(&teacher, sub_b.id, 70, None).await.unwrap();
    assert_eq!(stats.graded_count, 2);

    let assignment = h
        .storage
        .get_assignment(assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assignment.status, AssignmentStatus::Closed);
    assert_eq!(assignment.submitted_count, 2);
    assert_eq!(assignment.graded_count, 2);
}

#[tokio::test]
async fn test_stats_read_is_owner_scoped() {
    let h = harness();
    let teacher = Actor::teacher(7);
    let assignment = open_assignment(&h, &teacher, 100, None).await;
    let sub = submit(&h, &Actor::student(42), assignment.id, "答案").await;
    h.grading.grade(&teacher, sub.id, 60, None).await.unwrap();

    let stats = h.assignments.get_stats(&teacher, assignment.id).await.unwrap();
    assert_eq!(stats.graded_count, 1);
    assert_eq!(stats.pass_rate, 100.0);

    // 非归属教师与学生都被拒绝，管理员放行
    let err = h
        .assignments
        .get_stats(&Actor::teacher(8), assignment.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E001");

    let err = h
        .assignments
        .get_stats(&Actor::student(42), assignment.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E001");

    h.assignments
        .get_stats(&Actor::admin(999), assignment.id)
        .await
        .expect("admin reads stats");
}
