//! 程序配置
//!
//! 配置作为显式的值传入各组件的构造函数，不使用全局状态。
//! 加载顺序：默认值 → TOML 文件 → 环境变量 → 命令行参数。

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// 分析服务的基础地址
    pub api_base_url: String,
    /// 上传文件大小上限（MB）
    pub max_upload_mb: u64,
    /// 允许的文件扩展名（含点号，小写）
    pub allowed_extension: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            max_upload_mb: 50,
            allowed_extension: ".pdf".to_string(),
            request_timeout_secs: 300,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件的结构，所有字段均可省略
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api_base_url: Option<String>,
    max_upload_mb: Option<u64>,
    allowed_extension: Option<String>,
    request_timeout_secs: Option<u64>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 默认值 + 环境变量
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 用环境变量覆盖当前配置，无法解析的值保持原样
    pub fn with_env_overrides(self) -> Self {
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(self.api_base_url),
            max_upload_mb: std::env::var("MAX_UPLOAD_MB").ok().and_then(|v| v.parse().ok()).unwrap_or(self.max_upload_mb),
            allowed_extension: self.allowed_extension,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 从 TOML 字符串解析配置，缺省字段取默认值
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| ConfigError::TomlParseFailed {
            path: String::new(),
            message: e.to_string(),
        })?;
        Ok(Self::default().merge(file))
    }

    /// 从 TOML 文件加载配置
    ///
    /// # 参数
    /// - `path`: 配置文件路径
    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::TomlParseFailed { message, .. } => ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// 请求超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 拼接接口地址，容忍基础地址末尾的斜杠
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn merge(self, file: ConfigFile) -> Self {
        Self {
            api_base_url: file.api_base_url.unwrap_or(self.api_base_url),
            max_upload_mb: file.max_upload_mb.unwrap_or(self.max_upload_mb),
            allowed_extension: file
                .allowed_extension
                .map(|ext| normalize_extension(&ext))
                .unwrap_or(self.allowed_extension),
            request_timeout_secs: file.request_timeout_secs.unwrap_or(self.request_timeout_secs),
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
        }
    }
}

/// 统一为小写并补上前导点号
pub(crate) fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}
