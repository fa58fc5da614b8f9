//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//!
//! 计数重算所需的隔离级别由事务保证：SQLite 在 WAL 模式下写事务
//! 串行执行且读取快照一致；PostgreSQL / MySQL 依赖各自默认的
//! 事务快照读。同一提交的并发评分按最后写入者生效。

mod assignments;
mod submissions;

use crate::config::AppConfig;
use crate::errors::{CourseworkError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait,
};
use std::time::Duration;
use tracing::info;

use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::submissions::entities::Submission;
use crate::storage::{NewAssignment, Storage, StorageTransaction, SubmissionRecord};
use async_trait::async_trait;

/// SeaORM 存储实例
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseworkError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseworkError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CourseworkError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseworkError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseworkError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn begin(&self) -> Result<Box<dyn StorageTransaction>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseworkError::database_operation(format!("开启事务失败: {e}")))?;
        Ok(Box::new(SeaOrmTransaction { txn }))
    }

    async fn get_assignment(&self, id: i64) -> Result<Option<Assignment>> {
        assignments::get_by_id(&self.db, id).await
    }

    async fn get_submission(&self, id: i64) -> Result<Option<Submission>> {
        submissions::get_by_id(&self.db, id).await
    }
}

/// 进行中的数据库事务；drop 而未 commit 即回滚
pub struct SeaOrmTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl StorageTransaction for SeaOrmTransaction {
    async fn get_assignment(&self, id: i64) -> Result<Option<Assignment>> {
        assignments::get_by_id(&self.txn, id).await
    }

    async fn insert_assignment(&self, record: NewAssignment) -> Result<Assignment> {
        assignments::insert(&self.txn, record).await
    }

    async fn update_assignment_status(&self, id: i64, status: AssignmentStatus) -> Result<bool> {
        assignments::update_status(&self.txn, id, status).await
    }

    async fn update_assignment_counters(
        &self,
        id: i64,
        submitted_count: i64,
        graded_count: i64,
        status: AssignmentStatus,
    ) -> Result<bool> {
        assignments::update_counters(&self.txn, id, submitted_count, graded_count, status).await
    }

    async fn get_submission(&self, id: i64) -> Result<Option<Submission>> {
        submissions::get_by_id(&self.txn, id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        submissions::get_by_assignment_and_student(&self.txn, assignment_id, student_id).await
    }

    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        submissions::list_by_assignment(&self.txn, assignment_id).await
    }

    async fn upsert_submission(&self, record: SubmissionRecord) -> Result<Submission> {
        submissions::upsert(&self.txn, record).await
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        (*self)
            .txn
            .commit()
            .await
            .map_err(|e| CourseworkError::database_operation(format!("提交事务失败: {e}")))
    }
}
