use std::sync::Arc;

use axum::{
    extract::Multipart,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use resume_analyzer::api::{HttpResumeApi, ResumeApi};
use resume_analyzer::config::Config;
use resume_analyzer::errors::ClientError;
use resume_analyzer::file::{SelectedFile, PDF_CONTENT_TYPE};
use resume_analyzer::render::analysis::analysis_sections;
use resume_analyzer::session::{Command, Notice, Session};
use resume_analyzer::views::{HistoryState, HistoryView, Tab};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: String) -> HttpResumeApi {
    HttpResumeApi::new(&Config {
        api_base_url: base_url,
        ..Config::default()
    })
    .unwrap()
}

/// Mirrors the real endpoint: expects a single PDF in the `file` field.
async fn upload_handler(mut multipart: Multipart) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let bad = |msg: &str| (StatusCode::BAD_REQUEST, Json(json!({ "detail": msg })));

    while let Some(field) = multipart.next_field().await.map_err(|_| bad("bad multipart"))? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.ends_with(".pdf") || field.content_type() != Some("application/pdf") {
            return Err(bad("Only PDF files are supported"));
        }
        let data = field.bytes().await.map_err(|_| bad("unreadable"))?;
        if data.is_empty() {
            return Err(bad("Uploaded file is empty"));
        }
        return Ok(Json(json!({
            "personal_info": { "name": "Ada Lovelace", "email": "ada@example.com", "phone": null, "location": "London" },
            "professional_summary": format!("Parsed {} bytes from {filename}", data.len()),
            "core_skills": ["Mathematics"],
            "soft_skills": [],
            "education": [{ "degree": "Tutoring", "institution": "Home", "year": "1830", "details": null }],
            "certifications": [],
            "ai_analysis": { "rating": 8.0, "improvement_areas": ["Add dates"], "upskill_suggestions": [] }
        })));
    }
    Err(bad("file field missing"))
}

async fn resumes_handler() -> Json<Value> {
    Json(json!([
        {
            "id": "0b4f8f66-2f5c-4c38-9f55-2b8f4f1f7f01",
            "filename": "ada.pdf",
            "upload_date": "2024-01-05T15:04:00.123456",
            "name": "Ada Lovelace",
            "email": null,
            "phone": null,
            "resume_rating": 8.0
        },
        {
            "id": "0b4f8f66-2f5c-4c38-9f55-2b8f4f1f7f02",
            "filename": "anon.pdf",
            "upload_date": "2024-01-06T09:00:00Z"
        }
    ]))
}

async fn failing_resumes() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "database unavailable" })),
    )
}

fn pdf() -> SelectedFile {
    SelectedFile::new("ada.pdf", PDF_CONTENT_TYPE, &b"%PDF-1.4 analytical engine"[..])
}

#[tokio::test]
async fn upload_sends_multipart_pdf_and_decodes_analysis() {
    let base = serve(Router::new().route("/api/upload-resume", post(upload_handler))).await;
    let api = client(base);

    let result = api.upload_resume(&pdf()).await.unwrap();

    assert_eq!(
        result.professional_summary.as_deref(),
        Some("Parsed 26 bytes from ada.pdf")
    );
    assert!(result.work_experience.is_none());
    let titles: Vec<_> = analysis_sections(&result).iter().map(|s| s.title).collect();
    assert!(!titles.contains(&"Work Experience"));
    assert!(!titles.contains(&"Soft Skills"));
    assert!(!titles.contains(&"Certifications"));
    assert!(titles.contains(&"Education"));
    assert!(titles.contains(&"Improvement Areas"));
}

#[tokio::test]
async fn upload_rejection_surfaces_status_and_detail() {
    let base = serve(Router::new().route("/api/upload-resume", post(upload_handler))).await;
    let api = client(base);
    let empty = SelectedFile::new("empty.pdf", PDF_CONTENT_TYPE, Vec::<u8>::new());

    match api.upload_resume(&empty).await {
        Err(ClientError::Status { status, detail }) => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Uploaded file is empty");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_resumes_decodes_records() {
    let base = serve(Router::new().route("/resumes", get(resumes_handler))).await;
    let api = client(base);

    let records = api.list_resumes().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(records[0].resume_rating, Some(8.0));
    assert_eq!(records[1].name, None);
    assert_eq!(records[1].resume_rating, None);
    assert!(records[0].upload_date < records[1].upload_date);
}

#[tokio::test]
async fn failed_listing_leaves_history_empty_with_error() {
    let base = serve(Router::new().route("/resumes", get(failing_resumes))).await;
    let api = client(base);

    let result = api.list_resumes().await;
    assert_eq!(result.as_ref().map_err(ClientError::status).err(), Some(Some(500)));

    let mut view = HistoryView::default();
    view.refresh().unwrap();
    view.finish_fetch(result);
    assert_eq!(
        view.state(),
        &HistoryState::Loaded(Err("Failed to fetch resumes".to_string()))
    );
    assert!(view.records().is_empty());
}

#[tokio::test]
async fn non_json_body_is_a_parse_error() {
    let base = serve(Router::new().route("/resumes", get(|| async { "not json" }))).await;
    let api = client(base);

    assert!(matches!(api.list_resumes().await, Err(ClientError::Parse(_))));
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api = client(format!("http://{addr}"));

    assert!(matches!(api.list_resumes().await, Err(ClientError::Http(_))));
}

#[tokio::test]
async fn session_shows_error_banner_when_history_fails() {
    let base = serve(Router::new().route("/resumes", get(failing_resumes))).await;
    let api: Arc<dyn ResumeApi> = Arc::new(client(base));
    let (mut session, mut events) = Session::new(api, &Config::default());

    session.handle_command(Command::Tab(Tab::History)).await;
    assert!(session.history_view().is_loading());

    let notices = session.handle_event(events.recv().await.unwrap());
    assert!(notices
        .iter()
        .any(|n| matches!(n, Notice::Screen(s) if s.contains("Error: Failed to fetch resumes"))));
    assert!(session.history_view().records().is_empty());
    assert!(!session.history_view().is_loading());
}

#[tokio::test]
async fn session_uploads_and_renders_analysis() {
    let base = serve(Router::new().route("/api/upload-resume", post(upload_handler))).await;
    let api: Arc<dyn ResumeApi> = Arc::new(client(base));
    let (mut session, mut events) = Session::new(api, &Config::default());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ada.pdf");
    std::fs::write(&path, b"%PDF-1.4 analytical engine").unwrap();

    session.handle_command(Command::Select(path)).await;
    session.handle_command(Command::Upload).await;
    assert!(!session.upload_view().can_submit());

    session.handle_event(events.recv().await.unwrap());
    let screen = session.screen();
    assert!(screen.contains("Personal Information"));
    assert!(screen.contains("8.0 / 10"));
    assert!(!screen.contains("Work Experience"));
}
