use std::path::Path;

use bytes::Bytes;

use crate::errors::ValidationError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A file the user picked, with the content type it declares.
/// The declared type comes from the extension; contents are never sniffed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk and declares its type from the extension.
    /// Type and size are checked before any contents are read.
    pub async fn from_path(path: &Path, max_bytes: u64) -> Result<Self, ValidationError> {
        let unreadable = |e: std::io::Error| ValidationError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = declared_content_type(&name);
        if content_type != PDF_CONTENT_TYPE {
            return Err(ValidationError::NotPdf {
                file_name: name,
                content_type: content_type.to_string(),
            });
        }

        let size = tokio::fs::metadata(path).await.map_err(unreadable)?.len();
        if size > max_bytes {
            return Err(ValidationError::TooLarge {
                size,
                limit: max_bytes,
            });
        }

        let bytes = tokio::fs::read(path).await.map_err(unreadable)?;
        Ok(Self::new(name, content_type, bytes))
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Maps a file name to the MIME type a browser file picker would report.
pub fn declared_content_type(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => PDF_CONTENT_TYPE,
        Some("txt") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
