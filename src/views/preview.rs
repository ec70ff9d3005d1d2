//! File Preview - 待上传文件与已托管文件的简要信息

use crate::application::ports::FileUpload;
use crate::domain::MediaRef;

#[derive(Debug, Clone, PartialEq)]
pub struct FilePreview {
    pub name: String,
    pub content_type: Option<String>,
    pub size: Option<u64>,
}

impl FilePreview {
    /// 已托管文件：名称取 URL 最后一段
    pub fn from_media(media: &MediaRef) -> Self {
        let url = media.url();
        let name = url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').find(|segment| !segment.is_empty()))
            .unwrap_or(url);
        Self {
            name: name.to_string(),
            content_type: None,
            size: None,
        }
    }

    pub fn render(&self) -> String {
        match (&self.content_type, self.size) {
            (Some(content_type), Some(size)) => {
                format!("{} ({}, {})", self.name, content_type, format_bytes(size))
            }
            (Some(content_type), None) => format!("{} ({})", self.name, content_type),
            (None, Some(size)) => format!("{} ({})", self.name, format_bytes(size)),
            (None, None) => self.name.clone(),
        }
    }
}

impl From<&FileUpload> for FilePreview {
    fn from(file: &FileUpload) -> Self {
        Self {
            name: file.file_name.clone(),
            content_type: Some(file.content_type.clone()),
            size: Some(file.size() as u64),
        }
    }
}

/// 可读的字节大小，例如 "1.2 MB"
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.1} GB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1_024 {
        format!("{:.1} KB", bytes as f64 / 1_024.0)
    } else {
        format!("{} B", bytes)
    }
}
