use chrono::{DateTime, Local, TimeZone};
use colored::Colorize;

use super::rating::{paint_rating, MISSING};
use crate::models::ResumeRecord;
use crate::views::{HistoryState, HistoryView};

const HEADERS: [&str; 6] = ["FILENAME", "NAME", "EMAIL", "PHONE", "UPLOAD DATE", "RATING"];

/// `Jan 5, 2024, 03:04 PM`
pub fn format_upload_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%b %-d, %Y, %I:%M %p").to_string()
}

pub fn render_history(view: &HistoryView) -> String {
    render_history_in(view, &Local)
}

/// Same as [`render_history`] with timestamps shown in `tz`.
pub fn render_history_in<Tz: TimeZone>(view: &HistoryView, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Resume History".bold()));
    out.push_str("View all uploaded resumes and their analysis\n");
    out.push_str(&format!("[{}]\n\n", view.refresh_label()));

    match view.state() {
        HistoryState::Unfetched => {
            out.push_str("No data loaded yet\n");
            out.push_str(&format!("{}\n", "Run 'refresh' to load resume history".dimmed()));
        }
        HistoryState::Loading => {
            out.push_str(&format!("{}\n", "Loading...".yellow()));
        }
        HistoryState::Loaded(Err(message)) => {
            out.push_str(&format!("{}\n", format!("Error: {message}").red().bold()));
        }
        HistoryState::Loaded(Ok(records)) => {
            out.push_str(&render_table(records, tz));
            if !records.is_empty() {
                let plural = if records.len() == 1 { "" } else { "s" };
                out.push_str(&format!("\nShowing {} resume{plural}\n", records.len()));
            }
        }
    }
    out
}

fn render_table<Tz: TimeZone>(records: &[ResumeRecord], tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|r| {
            [
                r.filename.clone(),
                cell(&r.name),
                cell(&r.email),
                cell(&r.phone),
                format_upload_date(&r.upload_date.with_timezone(tz)),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, value) in row.iter().enumerate() {
            widths[i] = widths[i].max(value.chars().count());
        }
    }

    let mut out = String::new();
    let header = HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i]))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&format!("{}\n", header.trim_end().bold()));

    if records.is_empty() {
        out.push_str("No resumes found\n");
        out.push_str(&format!("{}\n", "Upload some resumes to see them here".dimmed()));
        return out;
    }

    for (row, record) in rows.iter().zip(records) {
        let cells = row
            .iter()
            .enumerate()
            .map(|(i, value)| pad(value, widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        // rating is last so its color codes never throw off the padding
        out.push_str(&format!("{cells}  {}\n", paint_rating(record.resume_rating)));
    }
    out
}

fn cell(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{value}{}", " ".repeat(width.saturating_sub(len)))
}
