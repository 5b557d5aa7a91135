use chrono::{DateTime, Local};
use std::fmt::Display;

/// 提交流程的状态，任一时刻只有一个
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStatus {
    /// 尚未选择文件
    #[default]
    Idle,
    /// 选中的文件未通过校验
    ValidatingRejected,
    /// 已选中合法文件，可以提交
    Ready,
    /// 请求进行中
    Submitting,
    /// 分析成功
    Succeeded,
    /// 分析失败
    Failed,
}

impl WorkflowStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowStatus::Submitting)
    }
}

impl Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WorkflowStatus::Idle => "idle",
            WorkflowStatus::ValidatingRejected => "validating-rejected",
            WorkflowStatus::Ready => "ready",
            WorkflowStatus::Submitting => "submitting",
            WorkflowStatus::Succeeded => "succeeded",
            WorkflowStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// 状态消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// 状态栏消息，每次状态变化时整体覆盖
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
    /// 会话内单调递增的写入序号，只用于诊断，不参与覆盖判断
    pub seq: u64,
    pub at: DateTime<Local>,
}

impl StatusMessage {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.severity {
            Severity::Info => "ℹ️",
            Severity::Success => "✅",
            Severity::Error => "❌",
        };
        write!(f, "{} {}", tag, self.text)
    }
}
