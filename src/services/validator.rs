//! 文件校验服务 - 业务能力层
//!
//! 只负责判断"这个文件能不能进入提交流程"，纯函数，不碰网络也不碰会话状态

use crate::config::{normalize_extension, Config};
use crate::error::ValidationError;
use crate::models::CandidateFile;
use tracing::debug;

/// 校验通过的文件及提示消息
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted {
    pub file: CandidateFile,
    pub message: String,
}

/// 文件校验服务
///
/// 规则按顺序检查，第一条失败即返回：
/// 1. 大小超过上限
/// 2. 扩展名不匹配（忽略大小写）
#[derive(Debug, Clone)]
pub struct Validator {
    max_mb: u64,
    extension: String,
}

impl Validator {
    pub fn new(config: &Config) -> Self {
        Self::with_limits(config.max_upload_mb, &config.allowed_extension)
    }

    pub fn with_limits(max_mb: u64, extension: &str) -> Self {
        Self {
            max_mb,
            extension: normalize_extension(extension),
        }
    }

    /// 校验候选文件
    ///
    /// # 返回
    /// 通过时返回文件本身和 "Selected NAME (X.XX MB)" 提示
    pub fn validate(&self, candidate: CandidateFile) -> Result<Accepted, ValidationError> {
        let size_mb = candidate.size_mb();

        if size_mb > self.max_mb as f64 {
            debug!("文件过大: {} ({:.2} MB)", candidate.name, size_mb);
            return Err(ValidationError::TooLarge {
                size_mb,
                max_mb: self.max_mb,
            });
        }

        if !candidate.name.to_lowercase().ends_with(&self.extension) {
            debug!("扩展名不符: {}", candidate.name);
            return Err(ValidationError::NotPdf);
        }

        let message = format!("Selected {} ({:.2} MB)", candidate.name, size_mb);
        Ok(Accepted {
            file: candidate,
            message,
        })
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
