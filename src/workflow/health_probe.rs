//! 健康检查
//!
//! 只读查询分析服务状态，只写状态消息，不碰提交状态、已选文件和分析结果，
//! 所以可以和进行中的提交并发执行。两者的状态消息按"后写覆盖"处理。

use tracing::{info, warn};

use crate::clients::AnalysisClient;
use crate::config::Config;
use crate::error::{ConfigError, HealthError};
use crate::models::{HealthReport, Severity};
use crate::workflow::session::{lock_session, SharedSession};

pub const CHECKING_MESSAGE: &str = "Checking server health…";

/// 健康检查
pub struct HealthProber {
    client: AnalysisClient,
    session: SharedSession,
}

impl HealthProber {
    pub fn new(config: &Config, session: SharedSession) -> Result<Self, ConfigError> {
        Ok(Self {
            client: AnalysisClient::new(config)?,
            session,
        })
    }

    /// 查询 /health 并把结果写入状态消息
    pub async fn check_health(&self) -> Result<HealthReport, HealthError> {
        lock_session(&self.session).post_status(Severity::Info, CHECKING_MESSAGE);

        match self.client.health().await {
            Ok(report) => {
                info!("🩺 {}", report.summary());
                lock_session(&self.session).post_status(Severity::Info, report.summary());
                Ok(report)
            }
            Err(e) => {
                warn!("健康检查失败: {}", e);
                lock_session(&self.session).post_status(Severity::Error, e.to_string());
                Err(e)
            }
        }
    }
}
