//! 集成测试公共设施
//!
//! 所有服务共享同一个内存存储实例，策略引擎使用默认（非放行）配置。

#![allow(dead_code)]

use std::sync::Arc;

use coursework_core::models::actors::Actor;
use coursework_core::models::assignments::entities::Assignment;
use coursework_core::models::assignments::requests::CreateAssignmentRequest;
use coursework_core::models::submissions::entities::Submission;
use coursework_core::models::submissions::requests::CreateSubmissionRequest;
use coursework_core::policy::PolicyEngine;
use coursework_core::services::assignments::AssignmentService;
use coursework_core::services::grading::GradingService;
use coursework_core::services::submissions::SubmissionService;
use coursework_core::storage::Storage;
use coursework_core::storage::memory::MemoryStorage;

pub struct TestHarness {
    pub assignments: AssignmentService,
    pub submissions: SubmissionService,
    pub grading: GradingService,
    pub storage: Arc<dyn Storage>,
}

pub fn harness() -> TestHarness {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    TestHarness {
        assignments: AssignmentService::with_policy(storage.clone(), PolicyEngine::new()),
        submissions: SubmissionService::with_policy(storage.clone(), PolicyEngine::new()),
        grading: GradingService::with_policy(storage.clone(), PolicyEngine::new()),
        storage,
    }
}

/// 创建并发布一份作业
pub async fn open_assignment(
    h: &TestHarness,
    teacher: &Actor,
    max_score: i64,
    deadline: Option<chrono::DateTime<chrono::Utc>>,
) -> Assignment {
    let assignment = h
        .assignments
        .create_assignment(
            teacher,
            CreateAssignmentRequest {
                title: "第一次作业".to_string(),
                max_score,
                deadline,
            },
        )
        .await
        .expect("create assignment");

    h.assignments
        .publish_assignment(teacher, assignment.id)
        .await
        .expect("publish assignment")
}

/// 学生提交自己的作业
pub async fn submit(
    h: &TestHarness,
    student: &Actor,
    assignment_id: i64,
    content: &str,
) -> Submission {
    h.submissions
        .create_submission(
            student,
            CreateSubmissionRequest {
                assignment_id,
                student_id: None,
                content: content.to_string(),
                attachments: vec![],
            },
        )
        .await
        .expect("create submission")
}
