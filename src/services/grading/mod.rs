pub mod grade;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::actors::Actor;
use crate::models::assignments::stats_responses::AssignmentStats;
use crate::policy::PolicyEngine;
use crate::storage::Storage;

pub struct GradingService {
    storage: Arc<dyn Storage>,
    policy: PolicyEngine,
}

impl GradingService {
    /// 使用全局配置中的策略设置创建服务
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_policy(storage, PolicyEngine::from_config(&AppConfig::get().policy))
    }

    /// 显式注入策略引擎
    pub fn with_policy(storage: Arc<dyn Storage>, policy: PolicyEngine) -> Self {
        Self { storage, policy }
    }

    /// 对一份提交评分，返回该作业基于最新提交集合的统计
    pub async fn grade(
        &self,
        actor: &Actor,
        submission_id: i64,
        score: i64,
        comment: Option<String>,
    ) -> Result<AssignmentStats> {
        grade::grade(self, actor, submission_id, score, comment).await
    }
}
