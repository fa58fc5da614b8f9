//! 内存存储实现
//!
//! 供集成测试与不需要数据库的嵌入场景使用。事务模型与数据库实现
//! 对齐：begin 时克隆整份状态作为快照（可重复读），写入先落在快照
//! 上（事务内读己之写），commit 时在锁内把整行写回共享状态——
//! 行级最后写入者生效。未 commit 即 drop 的事务不留任何痕迹。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::submissions::entities::Submission;
use crate::storage::{NewAssignment, Storage, StorageTransaction, SubmissionRecord};

const POISONED: &str = "memory storage mutex poisoned";

#[derive(Debug, Default, Clone)]
struct MemoryState {
    assignments: HashMap<i64, Assignment>,
    submissions: HashMap<i64, Submission>,
    // 最近一次分配出去的 ID（回滚产生空洞，与数据库序列一致）
    last_assignment_id: i64,
    last_submission_id: i64,
}

/// 内存存储实例
#[derive(Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn begin(&self) -> Result<Box<dyn StorageTransaction>> {
        let snapshot = self.state.lock().expect(POISONED).clone();
        Ok(Box::new(MemoryTransaction {
            shared: self.state.clone(),
            inner: Mutex::new(TxnInner {
                snapshot,
                ops: Vec::new(),
            }),
        }))
    }

    async fn get_assignment(&self, id: i64) -> Result<Option<Assignment>> {
        Ok(self.state.lock().expect(POISONED).assignments.get(&id).cloned())
    }

    async fn get_submission(&self, id: i64) -> Result<Option<Submission>> {
        Ok(self.state.lock().expect(POISONED).submissions.get(&id).cloned())
    }
}

/// 事务内暂存的整行写入，commit 时按序回放
#[derive(Debug, Clone)]
enum WriteOp {
    PutAssignment(Assignment),
    PutSubmission(Submission),
}

struct TxnInner {
    snapshot: MemoryState,
    ops: Vec<WriteOp>,
}

struct MemoryTransaction {
    shared: Arc<Mutex<MemoryState>>,
    inner: Mutex<TxnInner>,
}

impl MemoryTransaction {
    fn next_assignment_id(&self) -> i64 {
        let mut state = self.shared.lock().expect(POISONED);
        state.last_assignment_id += 1;
        state.last_assignment_id
    }

    fn next_submission_id(&self) -> i64 {
        let mut state = self.shared.lock().expect(POISONED);
        state.last_submission_id += 1;
        state.last_submission_id
    }
}

#[async_trait]
impl StorageTransaction for MemoryTransaction {
    async fn get_assignment(&self, id: i64) -> Result<Option<Assignment>> {
        Ok(self
            .inner
            .lock()
            .expect(POISONED)
            .snapshot
            .assignments
            .get(&id)
            .cloned())
    }

    async fn insert_assignment(&self, record: NewAssignment) -> Result<Assignment> {
        let assignment = Assignment {
            id: self.next_assignment_id(),
            owner_id: record.owner_id,
            title: record.title,
            max_score: record.max_score,
            deadline: record.deadline,
            status: record.status,
            submitted_count: 0,
            graded_count: 0,
            created_at: record.created_at,
            updated_at: record.updated_at,
        };

        let mut inner = self.inner.lock().expect(POISONED);
        inner
            .snapshot
            .assignments
            .insert(assignment.id, assignment.clone());
        inner.ops.push(WriteOp::PutAssignment(assignment.clone()));
        Ok(assignment)
    }

    async fn update_assignment_status(&self, id: i64, status: AssignmentStatus) -> Result<bool> {
        let mut inner = self.inner.lock().expect(POISONED);
        let Some(assignment) = inner.snapshot.assignments.get_mut(&id) else {
            return Ok(false);
        };
        assignment.status = status;
        assignment.updated_at = chrono::Utc::now();
        let updated = assignment.clone();
        inner.ops.push(WriteOp::PutAssignment(updated));
        Ok(true)
    }

    async fn update_assignment_counters(
        &self,
        id: i64,
        submitted_count: i64,
        graded_count: i64,
        status: AssignmentStatus,
    ) -> Result<bool> {
        let mut inner = self.inner.lock().expect(POISONED);
        let Some(assignment) = inner.snapshot.assignments.get_mut(&id) else {
            return Ok(false);
        };
        assignment.submitted_count = submitted_count;
        assignment.graded_count = graded_count;
        assignment.status = status;
        assignment.updated_at = chrono::Utc::now();
        let updated = assignment.clone();
        inner.ops.push(WriteOp::PutAssignment(updated));
        Ok(true)
    }

    async fn get_submission(&self, id: i64) -> Result<Option<Submission>> {
        Ok(self
            .inner
            .lock()
            .expect(POISONED)
            .snapshot
            .submissions
            .get(&id)
            .cloned())
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        Ok(self
            .inner
            .lock()
            .expect(POISONED)
            .snapshot
            .submissions
            .values()
            .find(|s| s.assignment_id == assignment_id && s.student_id == student_id)
            .cloned())
    }

    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        let mut submissions: Vec<Submission> = self
            .inner
            .lock()
            .expect(POISONED)
            .snapshot
            .submissions
            .values()
            .filter(|s| s.assignment_id == assignment_id)
            .cloned()
            .collect();
        submissions.sort_by_key(|s| s.id);
        Ok(submissions)
    }

    async fn upsert_submission(&self, record: SubmissionRecord) -> Result<Submission> {
        let row_id = match record.id {
            Some(id) => Some(id),
            None => self
                .get_submission_by_assignment_and_student(record.assignment_id, record.student_id)
                .await?
                .map(|s| s.id),
        };

        let submission = Submission {
            id: match row_id {
                Some(id) => id,
                None => self.next_submission_id(),
            },
            assignment_id: record.assignment_id,
            student_id: record.student_id,
            content: record.content,
            attachments: record.attachments,
            submitted_at: record.submitted_at,
            status: record.status,
            score: record.score,
            comment: record.comment,
            graded_at: record.graded_at,
            graded_by: record.graded_by,
        };

        let mut inner = self.inner.lock().expect(POISONED);
        inner
            .snapshot
            .submissions
            .insert(submission.id, submission.clone());
        inner.ops.push(WriteOp::PutSubmission(submission.clone()));
        Ok(submission)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTransaction { shared, inner } = *self;
        let inner = inner.into_inner().expect(POISONED);
        let mut state = shared.lock().expect(POISONED);
        for op in inner.ops {
            match op {
                WriteOp::PutAssignment(assignment) => {
                    state.assignments.insert(assignment.id, assignment);
                }
                WriteOp::PutSubmission(submission) => {
                    state.submissions.insert(submission.id, submission);
                }
            }
        }
        Ok(())
    }
}
