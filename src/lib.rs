//! # Document Demystifier
//!
//! 把本地 PDF 提交给文档分析服务并展示结构化结果的客户端
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 只负责和分析服务的 HTTP 交互
//! - `AnalysisClient` - `POST /analyze`（multipart）与 `GET /health`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯函数能力，不持有状态
//! - `Validator` - 上传前的大小 / 扩展名校验
//! - `result_renderer` - 把分析结果映射为展示结构
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 持有并修改会话状态
//! - `SessionState` - 界面的唯一数据来源
//! - `SubmissionFlow` - 提交生命周期（idle → submitting → succeeded / failed）
//! - `HealthProber` - 独立的健康检查，只写状态消息
//!
//! ### ④ 编排层（App）
//! - `app` - 命令行外壳，组合流程并输出结果
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, RunOptions};
pub use clients::AnalysisClient;
pub use config::Config;
pub use error::{AppError, AppResult, HealthError, SubmissionError, ValidationError};
pub use models::{AnalysisResult, CandidateFile, HealthReport, StatusMessage, WorkflowStatus};
pub use services::{render, DisplayModel, Validator};
pub use workflow::{HealthProber, SessionState, SessionView, SubmissionFlow};
