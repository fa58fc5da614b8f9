pub mod create;
pub mod publish;
pub mod stats;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::actors::Actor;
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::assignments::stats_responses::AssignmentStats;
use crate::policy::PolicyEngine;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Arc<dyn Storage>,
    policy: PolicyEngine,
}

impl AssignmentService {
    /// 使用全局配置中的策略设置创建服务
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_policy(storage, PolicyEngine::from_config(&AppConfig::get().policy))
    }

    /// 显式注入策略引擎
    pub fn with_policy(storage: Arc<dyn Storage>, policy: PolicyEngine) -> Self {
        Self { storage, policy }
    }

    /// 创建作业（Draft 状态）
    pub async fn create_assignment(
        &self,
        actor: &Actor,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        create::create_assignment(self, actor, req).await
    }

    /// 发布作业（Draft -> Open）
    pub async fn publish_assignment(&self, actor: &Actor, assignment_id: i64) -> Result<Assignment> {
        publish::publish_assignment(self, actor, assignment_id).await
    }

    /// 获取作业成绩统计
    pub async fn get_stats(&self, actor: &Actor, assignment_id: i64) -> Result<AssignmentStats> {
        stats::get_stats(self, actor, assignment_id).await
    }
}
