//! 错误类型
//!
//! 三类面向用户的错误（校验、服务端、传输）都会以同一条状态消息的形式展示，
//! 所以它们的 `Display` 文本就是最终给用户看的文字。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件校验错误
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 提交分析错误
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    /// 健康检查错误
    #[error(transparent)]
    Health(#[from] HealthError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件读取错误
    #[error("Could not read file ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 文件校验错误，只在本地产生，永远不会到达网络层
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// 文件超过大小上限
    #[error("File too large ({size_mb:.2} MB). Max {max_mb} MB.")]
    TooLarge { size_mb: f64, max_mb: u64 },
    /// 扩展名不符合要求
    #[error("Only PDF files are allowed.")]
    NotPdf,
}

/// 提交分析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// 尚未选择文件
    #[error("Please select a PDF first.")]
    NoFileSelected,
    /// 已有一次提交正在进行
    #[error("An analysis is already in progress.")]
    SubmissionInProgress,
    /// 服务端返回了非 2xx 状态码
    #[error("{message}")]
    Server { status: u16, message: String },
    /// 没有拿到响应（DNS、连接被拒绝、超时）或响应体无法解析
    #[error("Connection error: {0}")]
    Transport(String),
    /// 提交过程在完成前被中断
    #[error("Submission interrupted.")]
    Interrupted,
}

/// 健康检查错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Health check failed: {0}")]
pub struct HealthError(pub String);

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {message}")]
    ReadFailed { path: String, message: String },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {message}")]
    TomlParseFailed { path: String, message: String },
    /// HTTP 客户端构建失败
    #[error("HTTP 客户端初始化失败: {0}")]
    ClientBuildFailed(String),
}

impl SubmissionError {
    /// 服务端错误，空消息回退为 "Server error"
    pub fn server(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Server error".to_string());
        SubmissionError::Server { status, message }
    }

    /// 是否属于传输类错误
    pub fn is_transport(&self) -> bool {
        matches!(self, SubmissionError::Transport(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
