use std::io::{stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use resume_analyzer::api::ResumeApi;
use resume_analyzer::config::Config;
use resume_analyzer::file::SelectedFile;
use resume_analyzer::render::{analysis::render_analysis, history::render_history};
use resume_analyzer::session::{Command, Notice, Session};
use resume_analyzer::views::{HistoryView, UploadView};

#[derive(Parser)]
#[command(
    name = "resume-analyzer",
    version,
    about = "Upload PDF resumes for AI analysis and browse past results"
)]
pub struct Cli {
    /// Base URL of the resume analysis API (overrides API_BASE_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Tabbed terminal session (the default)
    Interactive,
    /// Analyze a single PDF resume and print the result
    Analyze { path: PathBuf },
    /// Print the list of previously analyzed resumes
    History,
}

pub async fn run(cli: Cli, api: Arc<dyn ResumeApi>, config: &Config) -> Result<()> {
    match cli.command.unwrap_or(CliCommand::Interactive) {
        CliCommand::Interactive => run_interactive(api, config).await,
        CliCommand::Analyze { path } => run_analyze(api.as_ref(), config, &path).await,
        CliCommand::History => run_history(api.as_ref()).await,
    }
}

async fn run_interactive(api: Arc<dyn ResumeApi>, config: &Config) -> Result<()> {
    let (mut session, mut events) = Session::new(api, config);

    println!("{}", session.screen());
    println!("\nType 'help' for available commands.\n");
    print_prompt(&session)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let notices = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break; // EOF
                };
                let line = line.trim();
                if line.is_empty() {
                    print_prompt(&session)?;
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => session.handle_command(command).await,
                    Err(message) => vec![Notice::Info(message)],
                }
            }
            Some(event) = events.recv() => session.handle_event(event),
        };

        if print_notices(&notices) {
            break;
        }
        print_prompt(&session)?;
    }

    Ok(())
}

async fn run_analyze(api: &dyn ResumeApi, config: &Config, path: &Path) -> Result<()> {
    let mut view = UploadView::new(config.max_upload_bytes);
    view.select_file(SelectedFile::from_path(path, config.max_upload_bytes).await?)?;

    let file = view.begin_upload()?;
    eprintln!("{}", view.button_label().dimmed());
    let result = api.upload_resume(&file).await;

    if let Some(alert) = view.finish_upload(result) {
        bail!("{alert}");
    }
    if let Some(analysis) = view.response() {
        println!("{}", render_analysis(analysis));
    }
    Ok(())
}

async fn run_history(api: &dyn ResumeApi) -> Result<()> {
    let mut view = HistoryView::default();
    view.refresh()?;
    let result = api.list_resumes().await;
    view.finish_fetch(result);

    println!("{}", history_output(&view)?);
    Ok(())
}

/// A failed fetch is reported once, through the non-zero exit, instead of
/// also printing the rendered error banner.
fn history_output(view: &HistoryView) -> Result<String> {
    if let Some(message) = view.error() {
        bail!("{message}");
    }
    Ok(render_history(view))
}

fn print_prompt(session: &Session) -> Result<()> {
    print!("{}", session.prompt());
    stdout().flush()?;
    Ok(())
}

/// Returns true when the session asked to exit.
fn print_notices(notices: &[Notice]) -> bool {
    for notice in notices {
        match notice {
            Notice::Alert(message) => {
                println!("\n{} {}", "⚠".red().bold(), message.red().bold());
            }
            Notice::Info(message) => println!("{message}"),
            Notice::Screen(screen) => println!("\n{screen}"),
            Notice::Exit => return true,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_analyzer::errors::ClientError;

    #[test]
    fn test_failed_history_is_reported_once() {
        let mut view = HistoryView::default();
        view.refresh().unwrap();
        view.finish_fetch(Err(ClientError::Status {
            status: 500,
            detail: "database unavailable".into(),
        }));

        let err = history_output(&view).unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch resumes");
        assert!(!err.to_string().contains("Error:"));
    }

    #[test]
    fn test_loaded_history_is_printed() {
        let mut view = HistoryView::default();
        view.refresh().unwrap();
        view.finish_fetch(Ok(vec![]));

        let out = history_output(&view).unwrap();
        assert!(out.contains("No resumes found"));
        assert!(!out.contains("Error:"));
    }
}
