use crate::error::{AppError, AppResult};
use std::fmt;
use std::path::Path;
use tokio::fs;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// 用户选中、尚未提交的文件
#[derive(Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub size_bytes: u64,
    pub content: Vec<u8>,
}

impl CandidateFile {
    /// 从内存数据创建，大小取内容长度
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: content.len() as u64,
            content,
        }
    }

    /// 从磁盘读取文件，文件名取路径最后一段
    ///
    /// # 参数
    /// - `path`: 文件路径
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let content = fs::read(path).await.map_err(|source| AppError::FileRead {
            path: path.display().to_string(),
            source,
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        tracing::debug!("读取文件 {} ({} 字节)", name, content.len());

        Ok(Self::new(name, content))
    }

    /// 文件大小（MB）
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_MB
    }
}

// 内容可能有几十 MB，调试输出时省略
impl fmt::Debug for CandidateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateFile")
            .field("name", &self.name)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mb_uses_binary_megabytes() {
        let file = CandidateFile {
            name: "a.pdf".to_string(),
            size_bytes: 3 * 1024 * 1024 / 2,
            content: Vec::new(),
        };
        assert_eq!(file.size_mb(), 1.5);
    }

    #[test]
    fn test_debug_omits_content() {
        let file = CandidateFile::new("a.pdf", vec![0u8; 16]);
        let rendered = format!("{:?}", file);
        assert!(rendered.contains("a.pdf"));
        assert!(rendered.contains("16"));
        assert!(!rendered.contains("content"));
    }

    #[tokio::test]
    async fn test_from_path_reads_name_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Report.PDF");
        std::fs::write(&path, b"%PDF-1.4 test").unwrap();

        let file = CandidateFile::from_path(&path).await.unwrap();
        assert_eq!(file.name, "Report.PDF");
        assert_eq!(file.size_bytes, 13);
        assert_eq!(file.content, b"%PDF-1.4 test");
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let err = CandidateFile::from_path(Path::new("/definitely/not/here.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FileRead { .. }));
    }
}
