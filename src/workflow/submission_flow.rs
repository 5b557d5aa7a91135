//! 提交流程 - 流程层
//!
//! 核心职责：定义"一次分析提交"的完整生命周期
//!
//! 流程顺序：
//! 1. 检查闸门（无文件 / 正在提交）→ 进入 submitting
//! 2. multipart POST /analyze（唯一的挂起点）
//! 3. 根据结果进入 succeeded / failed
//!
//! 无论结果如何（包括 future 被中途丢弃），最后都会离开 submitting 状态。
//! 失败不会自动重试，需要用户重新提交。

use std::path::Path;
use std::sync::Mutex;

use tracing::{error, info, warn};

use crate::clients::AnalysisClient;
use crate::config::Config;
use crate::error::{AppResult, ConfigError, SubmissionError};
use crate::models::{AnalysisResult, CandidateFile};
use crate::services::Validator;
use crate::utils::logging::truncate_text;
use crate::workflow::session::{lock_session, SessionState, SessionView, SharedSession};

/// 提交流程
pub struct SubmissionFlow {
    client: AnalysisClient,
    validator: Validator,
    session: SharedSession,
}

impl SubmissionFlow {
    /// 创建新的提交流程，使用独立的会话
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_session(config, SessionState::shared())
    }

    /// 使用外部会话创建（与健康检查共享状态消息）
    pub fn with_session(config: &Config, session: SharedSession) -> Result<Self, ConfigError> {
        Ok(Self {
            client: AnalysisClient::new(config)?,
            validator: Validator::new(config),
            session,
        })
    }

    pub fn session(&self) -> SharedSession {
        self.session.clone()
    }

    pub fn view(&self) -> SessionView {
        lock_session(&self.session).view()
    }

    /// 选择内存中的文件
    pub fn select_file(&self, candidate: CandidateFile) -> AppResult<()> {
        info!("📄 选择文件: {}", candidate.name);
        lock_session(&self.session).select_file(&self.validator, candidate)
    }

    /// 从磁盘读取并选择文件
    ///
    /// 读取失败与校验失败一样：清空已选文件、隐藏之前的结果并写入错误消息
    pub async fn select_path(&self, path: &Path) -> AppResult<()> {
        match CandidateFile::from_path(path).await {
            Ok(candidate) => self.select_file(candidate),
            Err(e) => {
                warn!("读取文件失败: {}", e);
                lock_session(&self.session).fail_selection(e.to_string())?;
                Err(e)
            }
        }
    }

    pub fn set_question(&self, question: impl Into<String>) {
        lock_session(&self.session).set_question(question);
    }

    /// 提交当前选中的文件进行分析
    ///
    /// # 返回
    /// 成功时返回分析结果（同时已写入会话）
    pub async fn submit(&self) -> Result<AnalysisResult, SubmissionError> {
        let (file, question) = lock_session(&self.session).begin_submission()?;

        info!(
            "🚀 开始分析: {} ({:.2} MB), 问题: {}",
            file.name,
            file.size_mb(),
            question
                .as_deref()
                .map(|q| truncate_text(q, 40))
                .unwrap_or_else(|| "无".to_string())
        );

        let guard = InFlightGuard::new(&self.session);
        let outcome = self.client.analyze(&file, question.as_deref()).await;
        guard.finish(&outcome);

        match &outcome {
            Ok(result) => info!(
                "✓ 分析完成: {} 页, {} 词, 方式 {}",
                result.info.pages,
                result.info.words,
                result.info.method
            ),
            Err(e) => error!("❌ 分析失败: {}", e),
        }

        outcome
    }
}

/// 保证提交结束后离开 submitting 状态
struct InFlightGuard<'a> {
    session: &'a Mutex<SessionState>,
    finished: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new(session: &'a Mutex<SessionState>) -> Self {
        Self {
            session,
            finished: false,
        }
    }

    fn finish(mut self, outcome: &Result<AnalysisResult, SubmissionError>) {
        lock_session(self.session).complete_submission(outcome);
        self.finished = true;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("⚠️ 提交在完成前被中断");
            lock_session(self.session).abandon_submission();
        }
    }
}
