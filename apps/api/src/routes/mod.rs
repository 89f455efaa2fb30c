pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::ingest::handlers as ingest;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/resumes", post(catalog::handle_create_resume))
        .route(
            "/api/jobs",
            get(catalog::handle_list_jobs).post(catalog::handle_create_job),
        )
        // Matching
        .route("/api/match", get(matching::handle_match))
        .route("/api/recommendations", get(matching::handle_recommendations))
        .route(
            "/api/jobs/:id/candidates",
            get(matching::handle_job_candidates),
        )
        // Uploads
        .route("/api/extract-resume", post(ingest::handle_extract_resume))
        .route("/api/bulk-match", post(matching::handle_bulk_match))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::ingest::text::DocumentTextExtractor;

    const BOUNDARY: &str = "resumatch-test-boundary";

    fn app() -> Router {
        build_router(AppState::in_memory(
            Config::default(),
            Arc::new(DocumentTextExtractor),
        ))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response: Response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// (field name, file name, content)
    fn post_multipart(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(f) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn create_resume(app: &Router, text: &str) -> i64 {
        let (status, body) = send(app, post_json("/api/resumes", json!({ "resume_text": text }))).await;
        assert_eq!(status, StatusCode::CREATED);
        body["candidate_id"].as_i64().unwrap()
    }

    async fn create_job(app: &Router, title: &str, description: &str, skills: &[&str]) -> i64 {
        let (status, body) = send(
            app,
            post_json(
                "/api/jobs",
                json!({ "title": title, "description": description, "required_skills": skills }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["job_id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resumatch-api");
    }

    #[tokio::test]
    async fn test_create_resume_returns_skills() {
        let app = app();
        let (status, body) = send(
            &app,
            post_json(
                "/api/resumes",
                json!({ "name": "Jane", "resume_text": "Python and SQL on AWS with Docker" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["candidate_id"], 1);
        let skills: Vec<&str> = body["skills"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(skills, vec!["aws", "docker", "python", "sql"]);
    }

    #[tokio::test]
    async fn test_create_resume_requires_text() {
        let (status, body) = send(&app(), post_json("/api/resumes", json!({ "name": "x" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_job_requires_title_and_description() {
        let (status, _) = send(&app(), post_json("/api/jobs", json!({ "title": "Only title" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_jobs_listed_newest_first() {
        let app = app();
        create_job(&app, "First", "one", &["python"]).await;
        create_job(&app, "Second", "two", &[" SQL "]).await;

        let (status, body) = send(&app, get("/api/jobs")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "Second");
        assert_eq!(body[0]["required_skills"], json!(["sql"]));
        assert_eq!(body[1]["title"], "First");
    }

    #[tokio::test]
    async fn test_match_flow() {
        let app = app();
        let candidate = create_resume(&app, "Python and SQL developer").await;
        let job = create_job(&app, "Data", "Python SQL AWS", &["python", "sql", "aws"]).await;

        let (status, body) = send(
            &app,
            get(&format!("/api/match?candidate_id={candidate}&job_id={job}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills_match_score"], 0.6667);
        assert_eq!(body["overlap_skills"], json!(["python", "sql"]));
        assert_eq!(body["missing_skills"], json!(["aws"]));

        let (status, body) = send(&app, get("/api/match?candidate_id=1&job_id=99")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, _) = send(&app, get("/api/match?candidate_id=1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recommendations() {
        let app = app();
        let candidate = create_resume(&app, "Python developer").await;
        create_job(&app, "Rust", "Systems work", &["rust"]).await;
        create_job(&app, "Python", "Python services", &["python"]).await;
        create_job(&app, "Go", "Backend", &["golang"]).await;

        let (status, body) = send(
            &app,
            get(&format!("/api/recommendations?candidate_id={candidate}&k=2")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0]["title"], "Python");

        let (status, body) = send(
            &app,
            get(&format!("/api/recommendations?candidate_id={candidate}&k=-1")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(&app, get("/api/recommendations?candidate_id=42")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_job_candidates() {
        let app = app();
        create_resume(&app, "Java developer").await;
        create_resume(&app, "Python and SQL analyst").await;
        let job = create_job(&app, "Analyst", "SQL reporting in Python", &["python", "sql"]).await;

        let (status, body) = send(&app, get(&format!("/api/jobs/{job}/candidates?k=1"))).await;
        assert_eq!(status, StatusCode::OK);
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["candidate_id"], 2);
        assert_eq!(recs[0]["skills_match_score"], 1.0);
    }

    #[tokio::test]
    async fn test_extract_resume() {
        let app = app();
        let (status, body) = send(
            &app,
            post_multipart(
                "/api/extract-resume",
                &[("file", Some("jane.txt"), "Jane Smith\njane@example.com\nPython")],
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "Jane Smith\njane@example.com\nPython");
        assert_eq!(body["name"], "Jane Smith");
        assert_eq!(body["contact"], "jane@example.com");

        let (status, _) = send(
            &app,
            post_multipart("/api/extract-resume", &[("file", Some("cv.docx"), "x")]),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            post_multipart("/api/extract-resume", &[("other", None, "x")]),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bulk_match() {
        let app = app();
        let (status, body) = send(
            &app,
            post_multipart(
                "/api/bulk-match",
                &[
                    ("title", None, "Data Engineer"),
                    ("description", None, "Python SQL AWS pipelines"),
                    ("required_skills", None, "Python, SQL, , AWS"),
                    ("resume_files", Some("a.txt"), "Ana Lima\nPython"),
                    ("resume_files", Some("b.txt"), "Ben Ode\nPython SQL AWS"),
                ],
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_title"], "Data Engineer");
        assert_eq!(body["total_candidates"], 2);
        assert_eq!(body["candidates"][0]["name"], "Ben Ode");
        assert_eq!(body["candidates"][1]["missing_skills"], json!(["aws", "sql"]));

        let (status, _) = send(
            &app,
            post_multipart(
                "/api/bulk-match",
                &[("title", None, "t"), ("description", None, "d")],
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
