use tracing::{error, info};

use crate::errors::{ClientError, ValidationError, ViewError};
use crate::file::SelectedFile;
use crate::models::AnalysisResult;

pub const UPLOAD_FAILED_ALERT: &str = "Error processing file. Please try again.";

/// State behind the "Analyse" tab: the chosen file, the busy flag, and the
/// last successful analysis.
#[derive(Debug)]
pub struct UploadView {
    file: Option<SelectedFile>,
    is_uploading: bool,
    response: Option<AnalysisResult>,
    max_upload_bytes: u64,
}

impl UploadView {
    pub fn new(max_upload_bytes: u64) -> Self {
        Self {
            file: None,
            is_uploading: false,
            response: None,
            max_upload_bytes,
        }
    }

    /// Accepts a PDF-typed file and clears the previous analysis.
    /// Anything else is refused and leaves no file selected.
    pub fn select_file(&mut self, candidate: SelectedFile) -> Result<(), ValidationError> {
        if !candidate.is_pdf() {
            self.file = None;
            return Err(ValidationError::NotPdf {
                file_name: candidate.name,
                content_type: candidate.content_type,
            });
        }
        if candidate.size() > self.max_upload_bytes {
            self.file = None;
            return Err(ValidationError::TooLarge {
                size: candidate.size(),
                limit: self.max_upload_bytes,
            });
        }
        info!(file = %candidate.name, bytes = candidate.size(), "Selected resume");
        self.file = Some(candidate);
        self.response = None;
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.file = None;
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn response(&self) -> Option<&AnalysisResult> {
        self.response.as_ref()
    }

    /// Whether the analyze control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_uploading && self.file.is_some()
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_uploading {
            "Analyzing Resume..."
        } else {
            "Analyze Resume"
        }
    }

    pub fn file_label(&self) -> &str {
        self.file
            .as_ref()
            .map(|f| f.name.as_str())
            .unwrap_or("No PDF selected")
    }

    /// Marks the view busy and hands back the file to send.
    pub fn begin_upload(&mut self) -> Result<SelectedFile, ViewError> {
        if self.is_uploading {
            return Err(ViewError::Busy);
        }
        let file = self.file.clone().ok_or(ValidationError::NoFileSelected)?;
        self.is_uploading = true;
        Ok(file)
    }

    /// Clears the busy flag. On failure the previous analysis is kept and the
    /// alert text to show is returned.
    pub fn finish_upload(
        &mut self,
        result: Result<AnalysisResult, ClientError>,
    ) -> Option<&'static str> {
        self.is_uploading = false;
        match result {
            Ok(analysis) => {
                self.response = Some(analysis);
                None
            }
            Err(e) => {
                error!("Resume upload failed: {e}");
                Some(UPLOAD_FAILED_ALERT)
            }
        }
    }
}
