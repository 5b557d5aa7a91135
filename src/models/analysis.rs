use serde::{Deserialize, Serialize};

/// 文本提取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    /// 直接提取 PDF 文本层
    Text,
    /// 光学字符识别
    Ocr,
}

impl ExtractionMethod {
    /// 按服务端标签归类："OCR"（忽略大小写）之外都算文本提取
    pub fn classify(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("ocr") {
            ExtractionMethod::Ocr
        } else {
            ExtractionMethod::Text
        }
    }
}

/// 文档元信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub filename: String,
    pub pages: u32,
    pub words: u64,
    /// 服务端给出的原始标签，如 "OCR"、"Text Extraction"
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_mb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_question: Option<bool>,
}

impl DocumentInfo {
    pub fn method_kind(&self) -> ExtractionMethod {
        ExtractionMethod::classify(&self.method)
    }
}

/// 分析服务的成功响应
///
/// `explanation` 是服务端生成的 HTML 片段，见 [`crate::services::result_renderer`]
/// 中关于信任边界的说明。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub info: DocumentInfo,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

/// 分析服务的失败响应体 `{error: string}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// 健康检查响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tesseract: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opencv: Option<String>,
}

impl HealthReport {
    /// 状态栏展示用的一行摘要
    pub fn summary(&self) -> String {
        format!(
            "Server: {}; Tesseract: {}; API Key: {}",
            self.status, self.tesseract, self.api_key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_server_payload() {
        let body = json!({
            "success": true,
            "explanation": "<h2>Key Points</h2><p>Short.</p>",
            "extracted_text": "Hello world",
            "info": {
                "filename": "report.pdf",
                "pages": 3,
                "words": 2,
                "method": "Text Extraction",
                "size_mb": 0.12,
                "has_question": false
            }
        });

        let result: AnalysisResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.info.method, "Text Extraction");
        assert_eq!(result.info.method_kind(), ExtractionMethod::Text);
        assert_eq!(result.info.pages, 3);
        assert_eq!(result.info.size_mb, Some(0.12));
        assert_eq!(result.extracted_text.as_deref(), Some("Hello world"));
        assert_eq!(result.success, Some(true));
    }

    #[test]
    fn test_parse_minimal_payload() {
        let body = json!({
            "explanation": "<p>x</p>",
            "info": {"filename": "scan.pdf", "pages": 1, "words": 0, "method": "OCR"}
        });

        let result: AnalysisResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.info.method_kind(), ExtractionMethod::Ocr);
        assert_eq!(result.extracted_text, None);
        assert_eq!(result.info.has_question, None);
    }

    #[test]
    fn test_server_method_label_survives_reserialization() {
        let body = json!({
            "success": true,
            "explanation": "<p>Plain summary.</p>",
            "extracted_text": "one two",
            "info": {
                "filename": "a.pdf",
                "pages": 1,
                "words": 2,
                "method": "Text Extraction",
                "size_mb": 0.5,
                "has_question": true
            }
        });

        let result: AnalysisResult = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), body);
    }

    #[test]
    fn test_classify_method_labels() {
        assert_eq!(ExtractionMethod::classify("OCR"), ExtractionMethod::Ocr);
        assert_eq!(ExtractionMethod::classify("ocr"), ExtractionMethod::Ocr);
        assert_eq!(ExtractionMethod::classify("Text Extraction"), ExtractionMethod::Text);
        assert_eq!(ExtractionMethod::classify("text"), ExtractionMethod::Text);
    }

    #[test]
    fn test_negative_counts_are_rejected() {
        let body = json!({
            "explanation": "",
            "info": {"filename": "a.pdf", "pages": -1, "words": 0, "method": "OCR"}
        });
        assert!(serde_json::from_value::<AnalysisResult>(body).is_err());
    }

    #[test]
    fn test_error_body_tolerates_missing_field() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.error, None);

        let body: ErrorBody = serde_json::from_str(r#"{"success":false,"error":"bad pdf"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("bad pdf"));
    }

    #[test]
    fn test_health_summary() {
        let report: HealthReport = serde_json::from_str(
            r#"{"status":"ok","tesseract":"available","api_key":"set","opencv":"Available"}"#,
        )
        .unwrap();
        assert_eq!(report.summary(), "Server: ok; Tesseract: available; API Key: set");
        assert_eq!(report.opencv.as_deref(), Some("Available"));
    }
}
