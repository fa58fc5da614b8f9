//! coursework-core - 作业提交生命周期核心
//!
//! 教学平台里真正带不变量的那部分：提交状态机、按归属划界的
//! 访问策略、成绩统计聚合。认证、HTTP、文件存储、前端渲染都是
//! 外部协作方，通过 services 层的接口调用进来。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `lifecycle`: 提交状态机与作业派生状态（纯函数）
//! - `models`: 数据模型定义
//! - `policy`: 访问策略引擎（纯函数，默认拒绝）
//! - `runtime`: 日志等运行时辅助
//! - `services`: 业务编排层（评分、提交、作业）
//! - `stats`: 成绩统计引擎（纯函数）
//! - `storage`: 数据存储层（SeaORM / 内存）

pub mod config;
pub mod entity;
pub mod errors;
pub mod lifecycle;
pub mod models;
pub mod policy;
pub mod runtime;
pub mod services;
pub mod stats;
pub mod storage;
