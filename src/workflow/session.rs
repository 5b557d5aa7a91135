//! 会话状态
//!
//! 界面的唯一数据来源。所有字段只能通过下面的状态转换方法修改。

use crate::error::{AppResult, SubmissionError, ValidationError};
use crate::models::{AnalysisResult, CandidateFile, Severity, StatusMessage, WorkflowStatus};
use crate::services::result_renderer::{render, DisplayModel};
use crate::services::Validator;
use chrono::Local;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// 在提交流程和健康检查之间共享的会话
pub type SharedSession = Arc<Mutex<SessionState>>;

/// 获取会话锁。锁只在同步代码里短暂持有，不会跨越 await
pub fn lock_session(session: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub const ANALYZING_MESSAGE: &str = "Analyzing document… this can take a while.";
pub const SUCCESS_MESSAGE: &str = "Analysis complete.";

/// 会话状态
#[derive(Debug, Default)]
pub struct SessionState {
    selected_file: Option<CandidateFile>,
    question: String,
    status: WorkflowStatus,
    message: Option<StatusMessage>,
    result: Option<AnalysisResult>,
    result_visible: bool,
    next_seq: u64,
}

/// 供界面读取的只读快照
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub status: WorkflowStatus,
    pub message: Option<StatusMessage>,
    /// 已选文件的 (文件名, 字节数)
    pub selected: Option<(String, u64)>,
    pub question: String,
    pub can_submit: bool,
    pub display: Option<DisplayModel>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSession {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn selected_file(&self) -> Option<&CandidateFile> {
        self.selected_file.as_ref()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        !self.status.is_submitting()
    }

    /// 去除首尾空白后的问题，空串视为未提问
    pub fn trimmed_question(&self) -> Option<String> {
        let trimmed = self.question.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// 写入状态消息，覆盖上一条
    ///
    /// # 返回
    /// 本次写入的序号
    pub fn post_status(&mut self, severity: Severity, text: impl Into<String>) -> u64 {
        self.next_seq += 1;
        let message = StatusMessage {
            severity,
            text: text.into(),
            seq: self.next_seq,
            at: Local::now(),
        };
        debug!("状态消息 #{}: {}", message.seq, message.text);
        self.message = Some(message);
        self.next_seq
    }

    /// 选择文件
    ///
    /// 校验失败时清空已选文件；无论成败都不再显示之前的结果。
    /// 提交进行中时文件选择被禁用。
    pub fn select_file(&mut self, validator: &Validator, candidate: CandidateFile) -> AppResult<()> {
        if self.status.is_submitting() {
            return Err(SubmissionError::SubmissionInProgress.into());
        }

        self.result_visible = false;

        match validator.validate(candidate) {
            Ok(accepted) => {
                self.post_status(Severity::Info, accepted.message);
                self.selected_file = Some(accepted.file);
                self.status = WorkflowStatus::Ready;
                Ok(())
            }
            Err(err) => {
                self.reject(&err);
                Err(err.into())
            }
        }
    }

    /// 选择的文件无法读取：清空已选文件并隐藏之前的结果
    pub fn fail_selection(&mut self, text: impl Into<String>) -> AppResult<()> {
        if self.status.is_submitting() {
            return Err(SubmissionError::SubmissionInProgress.into());
        }
        self.selected_file = None;
        self.result_visible = false;
        self.status = WorkflowStatus::ValidatingRejected;
        self.post_status(Severity::Error, text);
        Ok(())
    }

    /// 取消选择
    pub fn clear_file(&mut self) -> AppResult<()> {
        if self.status.is_submitting() {
            return Err(SubmissionError::SubmissionInProgress.into());
        }
        self.selected_file = None;
        self.result_visible = false;
        self.status = WorkflowStatus::Idle;
        Ok(())
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    /// 进入提交中状态
    ///
    /// # 返回
    /// 本次要上传的文件和问题
    pub fn begin_submission(&mut self) -> Result<(CandidateFile, Option<String>), SubmissionError> {
        if self.status.is_submitting() {
            return Err(SubmissionError::SubmissionInProgress);
        }

        let Some(file) = self.selected_file.clone() else {
            let err = SubmissionError::NoFileSelected;
            self.post_status(Severity::Error, err.to_string());
            return Err(err);
        };

        self.status = WorkflowStatus::Submitting;
        self.post_status(Severity::Info, ANALYZING_MESSAGE);
        self.result = None;
        self.result_visible = false;

        Ok((file, self.trimmed_question()))
    }

    /// 记录提交结果。不在提交中时忽略
    pub fn complete_submission(&mut self, outcome: &Result<AnalysisResult, SubmissionError>) {
        if !self.status.is_submitting() {
            return;
        }

        match outcome {
            Ok(result) => {
                self.result = Some(result.clone());
                self.result_visible = true;
                self.status = WorkflowStatus::Succeeded;
                self.post_status(Severity::Success, SUCCESS_MESSAGE);
            }
            Err(err) => {
                self.result = None;
                self.result_visible = false;
                self.status = WorkflowStatus::Failed;
                self.post_status(Severity::Error, err.to_string());
            }
        }
    }

    /// 提交在完成前被放弃，回到可重新提交的状态
    pub fn abandon_submission(&mut self) {
        self.complete_submission(&Err(SubmissionError::Interrupted));
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            status: self.status,
            message: self.message.clone(),
            selected: self
                .selected_file
                .as_ref()
                .map(|f| (f.name.clone(), f.size_bytes)),
            question: self.question.clone(),
            can_submit: self.can_submit(),
            display: self
                .result
                .as_ref()
                .filter(|_| self.result_visible)
                .map(render),
        }
    }

    fn reject(&mut self, err: &ValidationError) {
        self.selected_file = None;
        self.status = WorkflowStatus::ValidatingRejected;
        self.post_status(Severity::Error, err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::DocumentInfo;

    fn pdf(name: &str) -> CandidateFile {
        CandidateFile::new(name, b"%PDF-1.4".to_vec())
    }

    fn create_test_result() -> AnalysisResult {
        AnalysisResult {
            info: DocumentInfo {
                filename: "a.pdf".to_string(),
                pages: 1,
                words: 10,
                method: "Text Extraction".to_string(),
                size_mb: None,
                has_question: None,
            },
            explanation: "<p>ok</p>".to_string(),
            extracted_text: None,
            success: None,
        }
    }

    fn ready_session() -> SessionState {
        let mut session = SessionState::new();
        session.select_file(&Validator::default(), pdf("a.pdf")).unwrap();
        session
    }

    #[test]
    fn test_initial_state() {
        let session = SessionState::new();
        assert_eq!(session.status(), WorkflowStatus::Idle);
        assert!(session.message().is_none());
        assert!(session.can_submit());
        assert_eq!(session.question(), "");
    }

    #[test]
    fn test_select_valid_file() {
        let session = ready_session();
        assert_eq!(session.status(), WorkflowStatus::Ready);
        let message = session.message().unwrap();
        assert_eq!(message.severity, Severity::Info);
        assert!(message.text.starts_with("Selected a.pdf ("));
    }

    #[test]
    fn test_rejected_file_clears_previous_selection() {
        let mut session = ready_session();
        let err = session
            .select_file(&Validator::default(), pdf("notes.docx"))
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(ValidationError::NotPdf)));
        assert!(session.selected_file().is_none());
        assert_eq!(session.status(), WorkflowStatus::ValidatingRejected);
        assert_eq!(session.message().unwrap().text, "Only PDF files are allowed.");
        assert!(session.message().unwrap().is_error());
    }

    #[test]
    fn test_begin_without_file_posts_error() {
        let mut session = SessionState::new();
        let err = session.begin_submission().unwrap_err();
        assert_eq!(err, SubmissionError::NoFileSelected);
        assert_eq!(session.status(), WorkflowStatus::Idle);
        assert!(session.message().unwrap().is_error());
    }

    #[test]
    fn test_begin_trims_question() {
        let mut session = ready_session();
        session.set_question("   What is due?  ");
        let (_, question) = session.begin_submission().unwrap();
        assert_eq!(question.as_deref(), Some("What is due?"));

        let mut session = ready_session();
        session.set_question("   ");
        let (_, question) = session.begin_submission().unwrap();
        assert_eq!(question, None);
    }

    #[test]
    fn test_second_begin_is_gated() {
        let mut session = ready_session();
        session.begin_submission().unwrap();
        assert!(!session.can_submit());

        let seq = session.message().unwrap().seq;
        assert_eq!(
            session.begin_submission().unwrap_err(),
            SubmissionError::SubmissionInProgress
        );
        assert_eq!(session.message().unwrap().seq, seq);
        assert_eq!(session.status(), WorkflowStatus::Submitting);
    }

    #[test]
    fn test_selection_blocked_while_submitting() {
        let mut session = ready_session();
        session.begin_submission().unwrap();
        assert!(session.select_file(&Validator::default(), pdf("b.pdf")).is_err());
        assert!(session.clear_file().is_err());
        assert_eq!(session.selected_file().unwrap().name, "a.pdf");
    }

    #[test]
    fn test_success_stores_result() {
        let mut session = ready_session();
        session.begin_submission().unwrap();
        session.complete_submission(&Ok(create_test_result()));

        assert_eq!(session.status(), WorkflowStatus::Succeeded);
        assert_eq!(session.result(), Some(&create_test_result()));
        assert_eq!(session.message().unwrap().text, SUCCESS_MESSAGE);
        assert!(session.view().display.is_some());
    }

    #[test]
    fn test_failure_discards_result() {
        let mut session = ready_session();
        session.begin_submission().unwrap();
        session.complete_submission(&Ok(create_test_result()));

        session.begin_submission().unwrap();
        assert!(session.result().is_none());
        session.complete_submission(&Err(SubmissionError::server(
            400,
            Some("bad pdf".to_string()),
        )));

        assert_eq!(session.status(), WorkflowStatus::Failed);
        assert!(session.result().is_none());
        assert_eq!(session.message().unwrap().text, "bad pdf");
        assert!(session.can_submit());
    }

    #[test]
    fn test_new_selection_hides_result() {
        let mut session = ready_session();
        session.begin_submission().unwrap();
        session.complete_submission(&Ok(create_test_result()));

        session.select_file(&Validator::default(), pdf("b.pdf")).unwrap();
        assert_eq!(session.status(), WorkflowStatus::Ready);
        assert!(session.result().is_some());
        assert!(session.view().display.is_none());
    }

    #[test]
    fn test_failed_selection_clears_file_and_hides_result() {
        let mut session = ready_session();
        session.begin_submission().unwrap();
        session.complete_submission(&Ok(create_test_result()));

        session.fail_selection("Could not read file (b.pdf): denied").unwrap();
        assert!(session.selected_file().is_none());
        assert_eq!(session.status(), WorkflowStatus::ValidatingRejected);
        assert!(session.view().display.is_none());
        assert!(session.message().unwrap().is_error());
    }

    #[test]
    fn test_complete_outside_submission_is_ignored() {
        let mut session = ready_session();
        session.complete_submission(&Ok(create_test_result()));
        assert_eq!(session.status(), WorkflowStatus::Ready);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_abandon_returns_to_resubmittable() {
        let mut session = ready_session();
        session.begin_submission().unwrap();
        session.abandon_submission();
        assert_eq!(session.status(), WorkflowStatus::Failed);
        assert_eq!(session.message().unwrap().text, "Submission interrupted.");
        assert!(session.can_submit());
    }

    #[test]
    fn test_status_sequence_is_monotonic() {
        let mut session = SessionState::new();
        let first = session.post_status(Severity::Info, "one");
        let second = session.post_status(Severity::Error, "two");
        assert!(second > first);
        assert_eq!(session.message().unwrap().text, "two");
    }
}
