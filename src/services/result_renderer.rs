//! 结果渲染服务 - 业务能力层
//!
//! 把分析结果映射为展示结构：元信息行 + 说明（富文本）+ 可折叠的提取文本。
//!
//! ## 信任边界
//!
//! `explanation` 由分析服务生成，按约定是可以直接渲染的 HTML。这里刻意不做转义也不做清洗：
//! 它被包装成 [`TrustedMarkup`]，调用方必须原样插入页面。
//! 如果分析服务不可信，应该在服务端解决，而不是在这里悄悄改变渲染结果。
//! 元信息和提取文本是纯文本，输出 HTML 时照常转义。

use crate::models::{AnalysisResult, ExtractionMethod};
use std::fmt::{self, Display};

/// 提取方式徽章的样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Ocr,
    Text,
}

impl BadgeStyle {
    fn css_class(&self) -> &'static str {
        match self {
            BadgeStyle::Ocr => "badge badge-ocr",
            BadgeStyle::Text => "badge badge-text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBadge {
    pub label: String,
    pub style: BadgeStyle,
}

/// 元信息行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataLine {
    pub filename: String,
    pub pages: u32,
    pub words: u64,
    pub badge: MethodBadge,
}

/// 来自分析服务、按富文本渲染的 HTML 片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 可折叠的提取文本区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSection {
    pub label: String,
    pub char_count: usize,
    pub text: String,
}

/// 展示结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    pub metadata: MetadataLine,
    pub explanation: TrustedMarkup,
    pub extracted: Option<ExtractedSection>,
}

/// 渲染分析结果
pub fn render(result: &AnalysisResult) -> DisplayModel {
    let info = &result.info;

    let style = match info.method_kind() {
        ExtractionMethod::Ocr => BadgeStyle::Ocr,
        ExtractionMethod::Text => BadgeStyle::Text,
    };

    let extracted = result
        .extracted_text
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(|text| {
            let char_count = text.chars().count();
            ExtractedSection {
                label: format!("View Extracted Text ({} chars)", char_count),
                char_count,
                text: text.to_string(),
            }
        });

    DisplayModel {
        metadata: MetadataLine {
            filename: info.filename.clone(),
            pages: info.pages,
            words: info.words,
            badge: MethodBadge {
                label: info.method.clone(),
                style,
            },
        },
        explanation: TrustedMarkup(result.explanation.clone()),
        extracted,
    }
}

impl DisplayModel {
    /// 生成独立的 HTML 页面，说明部分原样插入
    pub fn to_html_document(&self) -> String {
        let meta = &self.metadata;
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!(
            "<title>{}</title>\n</head>\n<body>\n",
            escape_html(&meta.filename)
        ));
        html.push_str("<h2>Analysis Complete</h2>\n");
        html.push_str(&format!(
            "<div class=\"meta\"><span><strong>File:</strong> {}</span> | <span><strong>Pages:</strong> {}</span> | <span><strong>Words:</strong> {}</span> <span class=\"{}\">{}</span></div>\n",
            escape_html(&meta.filename),
            meta.pages,
            meta.words,
            meta.badge.style.css_class(),
            escape_html(&meta.badge.label)
        ));
        html.push_str("<h3>Summary:</h3>\n<div class=\"explanation\">\n");
        html.push_str(self.explanation.as_str());
        html.push_str("\n</div>\n");

        if let Some(section) = &self.extracted {
            html.push_str(&format!(
                "<details>\n<summary>{}</summary>\n<pre>{}</pre>\n</details>\n",
                escape_html(&section.label),
                escape_html(&section.text)
            ));
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

impl Display for DisplayModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = &self.metadata;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "✨ Analysis Complete")?;
        writeln!(
            f,
            "File: {} | Pages: {} | Words: {} | [{}]",
            meta.filename, meta.pages, meta.words, meta.badge.label
        )?;
        writeln!(f, "{}", "-".repeat(60))?;
        writeln!(f, "Summary:")?;
        writeln!(f, "{}", self.explanation.as_str())?;
        if let Some(section) = &self.extracted {
            writeln!(f, "{}", "-".repeat(60))?;
            writeln!(f, "📄 {}", section.label)?;
        }
        write!(f, "{}", "=".repeat(60))
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
