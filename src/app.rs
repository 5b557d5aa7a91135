//! 应用编排
//!
//! 相当于页面外壳：把命令行给出的文件和问题送进提交流程，
//! 按需并发执行健康检查，最后输出状态消息和渲染结果。

use crate::config::Config;
use crate::models::Severity;
use crate::utils::logging::log_startup;
use crate::workflow::{HealthProber, SessionState, SessionView, SubmissionFlow};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// 一次运行的参数
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 要分析的文件
    pub file: Option<PathBuf>,
    /// 可选问题
    pub question: Option<String>,
    /// 是否执行健康检查
    pub health: bool,
    /// 把结果写成 HTML 文件
    pub html_out: Option<PathBuf>,
    /// 在终端展开提取文本
    pub show_text: bool,
}

/// 应用主结构
pub struct App {
    config: Config,
    flow: SubmissionFlow,
    prober: HealthProber,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let session = SessionState::shared();
        let flow = SubmissionFlow::with_session(&config, session.clone())?;
        let prober = HealthProber::new(&config, session)?;

        Ok(Self {
            config,
            flow,
            prober,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行应用主逻辑
    ///
    /// # 返回
    /// 本次运行是否没有出错
    pub async fn run(&self, options: RunOptions) -> Result<bool> {
        let health = async {
            if options.health {
                Some(self.prober.check_health().await.is_ok())
            } else {
                None
            }
        };

        let analysis = async {
            if options.file.is_none() && options.health {
                return None;
            }

            if let Some(path) = &options.file {
                if self.flow.select_path(path).await.is_err() {
                    return Some(false);
                }
            }
            if let Some(question) = &options.question {
                self.flow.set_question(question.clone());
            }

            Some(self.flow.submit().await.is_ok())
        };

        // 两个请求并发，状态消息以后完成的为准
        let (health_ok, analysis_ok) = futures::join!(health, analysis);
        debug!("健康检查: {:?}, 分析: {:?}", health_ok, analysis_ok);

        let view = self.flow.view();
        self.present(&view, &options).await?;

        Ok(health_ok.unwrap_or(true) && analysis_ok.unwrap_or(true))
    }

    async fn present(&self, view: &SessionView, options: &RunOptions) -> Result<()> {
        if let Some(message) = &view.message {
            match message.severity {
                Severity::Error => eprintln!("{}", message),
                Severity::Info | Severity::Success => println!("{}", message),
            }
        }

        let Some(display) = &view.display else {
            return Ok(());
        };

        println!("{}", display);

        if options.show_text {
            if let Some(section) = &display.extracted {
                println!("{}", section.text);
            }
        }

        if let Some(path) = &options.html_out {
            tokio::fs::write(path, display.to_html_document())
                .await
                .with_context(|| format!("无法写入HTML文件: {}", path.display()))?;
            info!("📝 结果已保存至: {}", path.display());
        }

        Ok(())
    }
}
