pub mod create;
pub mod detail;
pub mod update;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::actors::Actor;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::{CreateSubmissionRequest, UpdateSubmissionRequest};
use crate::policy::PolicyEngine;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Arc<dyn Storage>,
    policy: PolicyEngine,
}

impl SubmissionService {
    /// 使用全局配置中的策略设置创建服务
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_policy(storage, PolicyEngine::from_config(&AppConfig::get().policy))
    }

    /// 显式注入策略引擎
    pub fn with_policy(storage: Arc<dyn Storage>, policy: PolicyEngine) -> Self {
        Self { storage, policy }
    }

    /// 创建（或重交）提交
    pub async fn create_submission(
        &self,
        actor: &Actor,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        create::create_submission(self, actor, req).await
    }

    /// 获取提交详情
    pub async fn get_submission(&self, actor: &Actor, submission_id: i64) -> Result<Submission> {
        detail::get_submission(self, actor, submission_id).await
    }

    /// 修改自己提交的正文/附件
    pub async fn update_submission(
        &self,
        actor: &Actor,
        submission_id: i64,
        req: UpdateSubmissionRequest,
    ) -> Result<Submission> {
        update::update_submission(self, actor, submission_id, req).await
    }
}
