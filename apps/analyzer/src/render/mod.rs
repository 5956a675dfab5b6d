//! Turns view state into terminal text. Renderers are pure: they never touch
//! the network and only read the views they are given.

pub mod analysis;
pub mod history;
pub mod rating;

use colored::{Color, Colorize};

use crate::views::{Tab, UploadView};

/// A titled block of output lines, optionally tinted.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub lines: Vec<String>,
    pub accent: Option<Color>,
}

impl Section {
    pub fn new(title: &'static str, lines: Vec<String>) -> Self {
        Self {
            title,
            lines,
            accent: None,
        }
    }

    pub fn with_accent(mut self, color: Color) -> Self {
        self.accent = Some(color);
        self
    }

    pub fn paint(&self) -> String {
        let mut out = format!("{}\n", self.title.bold().underline());
        for line in &self.lines {
            let line = match self.accent {
                Some(color) => line.color(color).to_string(),
                None => line.clone(),
            };
            out.push_str(&format!("  {line}\n"));
        }
        out
    }
}

pub fn render_tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!(" {} ", tab.label()).white().on_blue().bold().to_string()
            } else {
                format!(" {} ", tab.label()).dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_upload_view(view: &UploadView, max_upload_bytes: u64) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Resume Analyzer".bold()));
    out.push_str("Upload your resume and get AI-powered insights\n\n");
    out.push_str(&format!(
        "File: {}  {}\n",
        view.file_label(),
        format!("(PDF files only, max {})", human_size(max_upload_bytes)).dimmed()
    ));

    let button = format!("[{}]", view.button_label());
    if view.can_submit() {
        out.push_str(&format!("{}\n", button.blue().bold()));
    } else {
        out.push_str(&format!("{}\n", button.dimmed()));
    }

    if let Some(result) = view.response() {
        out.push('\n');
        out.push_str(&analysis::render_analysis(result));
    }
    out
}

fn human_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= 1024 {
        format!("{}KB", bytes / 1024)
    } else {
        format!("{bytes}B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{SelectedFile, PDF_CONTENT_TYPE};
    use crate::models::AnalysisResult;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(10 * 1024 * 1024), "10MB");
        assert_eq!(human_size(2048), "2KB");
        assert_eq!(human_size(10), "10B");
    }

    #[test]
    fn test_section_paint_contains_title_and_lines() {
        let painted = Section::new("Certifications", vec!["• AWS".into()]).paint();
        assert!(painted.contains("Certifications"));
        assert!(painted.contains("• AWS"));
    }

    #[test]
    fn test_upload_view_shows_busy_label() {
        let mut view = UploadView::new(1024);
        view.select_file(SelectedFile::new("cv.pdf", PDF_CONTENT_TYPE, &b"%PDF"[..]))
            .unwrap();
        assert!(render_upload_view(&view, 1024).contains("[Analyze Resume]"));

        view.begin_upload().unwrap();
        let screen = render_upload_view(&view, 1024);
        assert!(screen.contains("cv.pdf"));
        assert!(screen.contains("[Analyzing Resume...]"));
    }

    #[test]
    fn test_upload_view_renders_response() {
        let mut view = UploadView::new(1024);
        view.select_file(SelectedFile::new("cv.pdf", PDF_CONTENT_TYPE, &b"%PDF"[..]))
            .unwrap();
        view.begin_upload().unwrap();
        view.finish_upload(Ok(AnalysisResult {
            certifications: Some(vec!["CKA".into()]),
            ..Default::default()
        }));
        let screen = render_upload_view(&view, 1024);
        assert!(screen.contains("Certifications"));
        assert!(!screen.contains("Work Experience"));
    }
}
