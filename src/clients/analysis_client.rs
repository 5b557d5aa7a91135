/// 分析服务 API 客户端
///
/// 封装所有与分析服务 HTTP 接口相关的调用逻辑
use crate::config::Config;
use crate::error::{ConfigError, HealthError, SubmissionError};
use crate::models::{AnalysisResult, CandidateFile, ErrorBody, HealthReport};
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

/// multipart 中文件字段名
pub const FILE_FIELD: &str = "file";
/// multipart 中问题字段名
pub const QUESTION_FIELD: &str = "question";

/// 分析服务客户端
#[derive(Clone, Debug)]
pub struct AnalysisClient {
    http: reqwest::Client,
    analyze_url: String,
    health_url: String,
}

impl AnalysisClient {
    /// 创建新的分析服务客户端
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConfigError::ClientBuildFailed(e.to_string()))?;

        Ok(Self {
            http,
            analyze_url: config.endpoint("analyze"),
            health_url: config.endpoint("health"),
        })
    }

    /// 提交文件进行分析
    ///
    /// # 参数
    /// - `file`: 已校验的文件
    /// - `question`: 已去除首尾空白且非空的问题
    ///
    /// # 返回
    /// 2xx 时返回解析后的结果；非 2xx 返回服务端错误；没拿到响应或 2xx 响应体无法解析时返回传输错误
    pub async fn analyze(
        &self,
        file: &CandidateFile,
        question: Option<&str>,
    ) -> Result<AnalysisResult, SubmissionError> {
        let part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str("application/pdf")
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let mut form = Form::new().part(FILE_FIELD, part);
        if let Some(question) = question {
            form = form.text(QUESTION_FIELD, question.to_string());
        }

        debug!("POST {} ({}, {} 字节)", self.analyze_url, file.name, file.size_bytes);

        let response = self
            .http
            .post(&self.analyze_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("分析请求失败: {}", e);
                SubmissionError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        debug!("分析响应: HTTP {} ({} 字节)", status.as_u16(), body.len());

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            return Err(SubmissionError::server(status.as_u16(), message));
        }

        serde_json::from_slice::<AnalysisResult>(&body).map_err(|e| {
            warn!("分析响应无法解析: {}", e);
            SubmissionError::Transport(format!("invalid response body: {}", e))
        })
    }

    /// 查询服务健康状态
    pub async fn health(&self) -> Result<HealthReport, HealthError> {
        debug!("GET {}", self.health_url);

        let response = self
            .http
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| HealthError(e.to_string()))?;

        response
            .json::<HealthReport>()
            .await
            .map_err(|e| HealthError(e.to_string()))
    }
}
