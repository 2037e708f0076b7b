pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::generation::handlers;
use crate::profile::handlers as profile_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route(
            "/api/v1/profile",
            get(profile_handlers::handle_get_profile).put(profile_handlers::handle_put_profile),
        )
        // Resume API
        .route("/api/v1/resumes/generate", post(handlers::handle_generate))
        .route("/api/v1/resumes/jobs/:job_id", get(handlers::handle_get_job))
        .route("/api/v1/resumes/:job_id", put(handlers::handle_update_resume))
        .route(
            "/api/v1/resumes/:job_id/latex",
            get(handlers::handle_export_latex),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::jobs::memory::{MemoryJobStore, MemoryProfileStore};
    use crate::jobs::orchestrator::{Orchestrator, StagePacing};
    use crate::llm_client::testing::{test_client, FnBackend};
    use crate::models::resume::{JobStatus, ResumeJob, ResumeSections};

    fn app() -> (Router, Arc<MemoryJobStore>) {
        let jobs = Arc::new(MemoryJobStore::default());
        let profiles = Arc::new(MemoryProfileStore::default());
        // Every model reply is unparseable, so runs fail fast at analysis.
        let llm = test_client(FnBackend::new(|_: &str| Ok("no json here".to_string())));
        let orchestrator = Orchestrator::new(
            jobs.clone(),
            profiles.clone(),
            llm,
            StagePacing::default(),
        );
        let state = AppState {
            orchestrator: Arc::new(orchestrator),
            profiles,
        };
        (build_router(state), jobs)
    }

    async fn send(
        app: Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json_body(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let (status, body) = send(app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["status"], "ok");
    }

    #[tokio::test]
    async fn test_profile_defaults_to_empty_then_round_trips() {
        let (app, _) = app();
        let user_id = Uuid::new_v4();
        let uri = format!("/api/v1/profile?user_id={user_id}");

        let (status, body) = send(app.clone(), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let empty = json_body(&body);
        assert_eq!(empty["userId"], json!(user_id));
        assert_eq!(empty["experiences"], json!([]));

        let profile = json!({
            "userId": user_id,
            "basicInfo": {"fullName": "Ada Lovelace"},
            "skills": ["Rust"]
        });
        let (status, _) = send(app.clone(), Method::PUT, "/api/v1/profile", Some(profile)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(app, Method::GET, &uri, None).await;
        let saved = json_body(&body);
        assert_eq!(saved["basicInfo"]["fullName"], "Ada Lovelace");
        assert_eq!(saved["skills"], json!(["Rust"]));
    }

    #[tokio::test]
    async fn test_generate_rejects_short_job_description() {
        let (app, jobs) = app();
        let request = json!({"userId": Uuid::new_v4(), "jobDescription": "too short"});

        let (status, body) =
            send(app, Method::POST, "/api/v1/resumes/generate", Some(request)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&body)["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(jobs.len(), 0);
    }

    #[tokio::test]
    async fn test_generate_returns_job_id_even_when_the_run_fails() {
        let (app, _) = app();
        let request = json!({
            "userId": Uuid::new_v4(),
            "jobDescription": "We are hiring a backend engineer to build reliable Rust services."
        });

        let (status, body) =
            send(app.clone(), Method::POST, "/api/v1/resumes/generate", Some(request)).await;
        assert_eq!(status, StatusCode::OK);
        let response = json_body(&body);
        assert!(response.get("job_id").is_none());
        let job_id = response["jobId"].as_str().unwrap().to_string();

        let (status, body) = send(
            app,
            Method::GET,
            &format!("/api/v1/resumes/jobs/{job_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let job = json_body(&body);
        assert_eq!(job["status"], "failed");
        assert_eq!(job["progress"], 0);
        assert!(job["errorMessage"]
            .as_str()
            .unwrap()
            .starts_with("Failed to parse AI response as JSON"));
    }

    #[tokio::test]
    async fn test_unknown_job_is_404() {
        let (app, _) = app();
        let (status, body) = send(
            app,
            Method::GET,
            &format!("/api/v1/resumes/jobs/{}", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_body(&body)["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_update_then_export_latex() {
        let (app, jobs) = app();
        let mut job = ResumeJob::new(Uuid::new_v4(), "jd".to_string());
        job.status = JobStatus::Complete;
        let job_id = job.id;
        jobs.insert(job);

        let uri = format!("/api/v1/resumes/{job_id}");
        let (status, _) = send(app.clone(), Method::PUT, &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "sections are required");

        let mut sections = ResumeSections::default();
        sections.summary.content = "Ships R&D tooling".to_string();
        let (status, body) = send(
            app.clone(),
            Method::PUT,
            &uri,
            Some(json!({ "sections": sections })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_body(&body)["finalResume"]["summary"]["content"],
            "Ships R&D tooling"
        );

        let (status, body) = send(app, Method::GET, &format!("{uri}/latex"), None).await;
        assert_eq!(status, StatusCode::OK);
        let tex = String::from_utf8(body).unwrap();
        assert!(tex.contains(r"\item Ships R\&D tooling"));
    }
}
