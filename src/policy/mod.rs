//! 策略引擎
//!
//! 纯决策函数：evaluate(actor, action, resource) -> Allow | Deny。
//! 规则在应用代码里显式求值，不依赖任何存储层的行级规则，
//! 同一套规则可以在没有数据库的情况下被单元测试覆盖。
//!
//! 规则按声明顺序求值，首个匹配生效，未匹配一律拒绝。

use crate::config::PolicyConfig;
use crate::models::actors::{Actor, ActorRole};
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::submissions::entities::Submission;

/// 受策略约束的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadSubmission,
    CreateSubmission,
    UpdateSubmission,
    GradeSubmission,
    ReadAssignmentStats,
    CreateAssignment,
    PublishAssignment,
}

/// 裁决结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// 裁决所依据的资源快照
///
/// 对给定快照裁决是确定性的；submission 是 CreateSubmission 时
/// 该 (assignment, student) 对已存在的行（如有）。
#[derive(Debug, Clone, Copy)]
pub struct PolicyResource<'a> {
    pub assignment: Option<&'a Assignment>,
    pub submission: Option<&'a Submission>,
    /// CreateSubmission 的目标学生
    pub student_id: Option<i64>,
}

impl<'a> PolicyResource<'a> {
    pub fn assignment(assignment: &'a Assignment) -> Self {
        Self {
            assignment: Some(assignment),
            submission: None,
            student_id: None,
        }
    }

    pub fn submission(assignment: &'a Assignment, submission: &'a Submission) -> Self {
        Self {
            assignment: Some(assignment),
            submission: Some(submission),
            student_id: None,
        }
    }

    pub fn none() -> Self {
        Self {
            assignment: None,
            submission: None,
            student_id: None,
        }
    }

    pub fn with_student(mut self, student_id: i64) -> Self {
        self.student_id = Some(student_id);
        self
    }
}

/// 策略引擎
///
/// allow_all 只能通过配置显式开启（见 PolicyConfig），开启即全量放行，
/// 用于受控的运维场景，构造时记录 warn 日志。
pub struct PolicyEngine {
    allow_all: bool,
}

impl PolicyEngine {
    pub fn new() -> Self {
        Self { allow_all: false }
    }

    pub fn from_config(config: &PolicyConfig) -> Self {
        if config.allow_all {
            tracing::warn!("策略引擎以 allow_all 模式运行：所有操作将被放行");
        }
        Self {
            allow_all: config.allow_all,
        }
    }

    /// 对 (actor, action, resource) 做出裁决
    pub fn evaluate(&self, actor: &Actor, action: Action, resource: &PolicyResource) -> Decision {
        if self.allow_all {
            return Decision::Allow;
        }

        match (actor.role, action) {
            // 规则 1：管理员全量放行
            (ActorRole::Admin, _) => Decision::Allow,

            // 规则 2：学生只能读取/修改自己的提交
            (ActorRole::Student, Action::ReadSubmission | Action::UpdateSubmission) => {
                match resource.submission {
                    Some(sub) if sub.student_id == actor.id => Decision::Allow,
                    _ => Decision::Deny,
                }
            }

            // 规则 3：学生创建提交
            // 要求目标学生是自己、作业处于 Open、且已有提交（如存在）未评分。
            // 评分后的重交被拒绝（产品决策，见 DESIGN.md）。
            (ActorRole::Student, Action::CreateSubmission) => {
                let own_target = resource.student_id == Some(actor.id);
                let open = resource
                    .assignment
                    .is_some_and(|a| a.status == AssignmentStatus::Open);
                let resubmittable = resource.submission.is_none_or(|sub| !sub.is_graded());

                if own_target && open && resubmittable {
                    Decision::Allow
                } else {
                    Decision::Deny
                }
            }

            // 规则 4：作业归属教师可以评分、查看统计、发布
            (
                ActorRole::Teacher,
                Action::GradeSubmission | Action::ReadAssignmentStats | Action::PublishAssignment,
            ) => match resource.assignment {
                Some(assignment) if assignment.owner_id == actor.id => Decision::Allow,
                _ => Decision::Deny,
            },

            // 教师创建作业（归属自动落在其本人名下）
            (ActorRole::Teacher, Action::CreateAssignment) => Decision::Allow,

            // 规则 5：未匹配一律拒绝
            _ => Decision::Deny,
        }
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionStatus;
    use chrono::Utc;

    fn assignment(owner_id: i64, status: AssignmentStatus) -> Assignment {
        Assignment {
            id: 1,
            owner_id,
            title: "第一次作业".to_string(),
            max_score: 100,
            deadline: None,
            status,
            submitted_count: 0,
            graded_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn submission(student_id: i64, status: SubmissionStatus) -> Submission {
        Submission {
            id: 10,
            assignment_id: 1,
            student_id,
            content: "答案".to_string(),
            attachments: vec![],
            submitted_at: Utc::now(),
            status,
            score: None,
            comment: None,
            graded_at: None,
            graded_by: None,
        }
    }

    #[test]
    fn test_admin_bypasses_every_rule() {
        let engine = PolicyEngine::new();
        let a = assignment(7, AssignmentStatus::Draft);
        let sub = submission(42, SubmissionStatus::Graded);
        let resource = PolicyResource::submission(&a, &sub);

        for action in [
            Action::ReadSubmission,
            Action::CreateSubmission,
            Action::UpdateSubmission,
            Action::GradeSubmission,
            Action::ReadAssignmentStats,
            Action::PublishAssignment,
        ] {
            assert_eq!(
                engine.evaluate(&Actor::admin(999), action, &resource),
                Decision::Allow
            );
        }
    }

    #[test]
    fn test_student_reads_own_submission_only() {
        let engine = PolicyEngine::new();
        let a = assignment(7, AssignmentStatus::Open);
        let sub = submission(42, SubmissionStatus::Submitted);
        let resource = PolicyResource::submission(&a, &sub);

        assert_eq!(
            engine.evaluate(&Actor::student(42), Action::ReadSubmission, &resource),
            Decision::Allow
        );
        // 学生 A 读学生 B 的提交：拒绝，与作业状态无关
        assert_eq!(
            engine.evaluate(&Actor::student(43), Action::ReadSubmission, &resource),
            Decision::Deny
        );
    }

    #[test]
    fn test_teacher_read_submission_falls_through_to_deny() {
        let engine = PolicyEngine::new();
        let a = assignment(7, AssignmentStatus::Open);
        let sub = submission(42, SubmissionStatus::Submitted);
        let resource = PolicyResource::submission(&a, &sub);

        assert_eq!(
            engine.evaluate(&Actor::teacher(7), Action::ReadSubmission, &resource),
            Decision::Deny
        );
    }

    #[test]
    fn test_create_requires_open_assignment() {
        let engine = PolicyEngine::new();
        let actor = Actor::student(42);

        for status in [
            AssignmentStatus::Draft,
            AssignmentStatus::Grading,
            AssignmentStatus::Closed,
        ] {
            let a = assignment(7, status);
            let resource = PolicyResource::assignment(&a).with_student(42);
            assert_eq!(
                engine.evaluate(&actor, Action::CreateSubmission, &resource),
                Decision::Deny,
                "status {status} should deny create"
            );
        }

        let a = assignment(7, AssignmentStatus::Open);
        let resource = PolicyResource::assignment(&a).with_student(42);
        assert_eq!(
            engine.evaluate(&actor, Action::CreateSubmission, &resource),
            Decision::Allow
        );
    }

    #[test]
    fn test_create_denied_for_other_student_target() {
        let engine = PolicyEngine::new();
        let a = assignment(7, AssignmentStatus::Open);
        let resource = PolicyResource::assignment(&a).with_student(43);

        assert_eq!(
            engine.evaluate(&Actor::student(42), Action::CreateSubmission, &resource),
            Decision::Deny
        );
    }

    #[test]
    fn test_resubmission_allowed_until_graded() {
        let engine = PolicyEngine::new();
        let actor = Actor::student(42);
        let a = assignment(7, AssignmentStatus::Open);

        let pending = submission(42, SubmissionStatus::Submitted);
        let resource = PolicyResource::submission(&a, &pending).with_student(42);
        assert_eq!(
            engine.evaluate(&actor, Action::CreateSubmission, &resource),
            Decision::Allow
        );

        let graded = submission(42, SubmissionStatus::Graded);
        let resource = PolicyResource::submission(&a, &graded).with_student(42);
        assert_eq!(
            engine.evaluate(&actor, Action::CreateSubmission, &resource),
            Decision::Deny
        );
    }

    #[test]
    fn test_only_owner_teacher_grades_and_reads_stats() {
        let engine = PolicyEngine::new();
        let a = assignment(7, AssignmentStatus::Grading);
        let resource = PolicyResource::assignment(&a);

        for action in [Action::GradeSubmission, Action::ReadAssignmentStats] {
            assert_eq!(
                engine.evaluate(&Actor::teacher(7), action, &resource),
                Decision::Allow
            );
            assert_eq!(
                engine.evaluate(&Actor::teacher(8), action, &resource),
                Decision::Deny
            );
            assert_eq!(
                engine.evaluate(&Actor::student(42), action, &resource),
                Decision::Deny
            );
        }
    }

    #[test]
    fn test_allow_all_is_explicit_bypass() {
        let engine = PolicyEngine::from_config(&crate::config::PolicyConfig { allow_all: true });
        let a = assignment(7, AssignmentStatus::Closed);
        let sub = submission(42, SubmissionStatus::Graded);
        let resource = PolicyResource::submission(&a, &sub).with_student(99);

        assert_eq!(
            engine.evaluate(&Actor::student(99), Action::CreateSubmission, &resource),
            Decision::Allow
        );
    }
}
