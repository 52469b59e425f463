//! Unit tests for the interview crate

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::entities::{InterviewSession, Question};
    use crate::domain::value_objects::{InterviewDuration, InterviewId, QuestionId, UserId};
    use crate::infra::memory::MemoryInterviewRepository;

    pub const USER: UserId = UserId::new(1);
    pub const TOKEN: &str = "tok-5f1c9a";

    /// Seed a three question interview answered `{1: "A", 2: "B", 3: "C"}`
    /// and issue `TOKEN` to `USER`
    pub async fn seed_abc_interview(repo: &MemoryInterviewRepository) -> InterviewId {
        let interview_id = InterviewId::new(7);
        let questions = [(1, "A"), (2, "B"), (3, "C")]
            .into_iter()
            .map(|(id, answer)| Question {
                interview_id,
                id: QuestionId::new(id),
                prompt: format!("Question {id}"),
                correct_answer: answer.to_string(),
            })
            .collect();

        repo.insert_interview(
            InterviewSession {
                id: interview_id,
                topic: "Rust".to_string(),
                duration: InterviewDuration::from_minutes(30).unwrap(),
                total_questions: 3,
            },
            questions,
        )
        .await;
        repo.issue_token(USER, TOKEN, None).await;

        interview_id
    }
}

#[cfg(test)]
mod config_tests {
    use crate::application::config::*;

    #[test]
    fn test_default_config() {
        let config = InterviewConfig::default();
        assert_eq!(config.auth_header_name, "auth");
        assert_eq!(config.history_failure_policy, HistoryFailurePolicy::Warn);
    }

    #[test]
    fn test_policy_defaults_to_warn_without_override() {
        // Test builds carry debug assertions; the default must not follow them.
        let config = InterviewConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.history_failure_policy, HistoryFailurePolicy::Warn);
        assert_eq!(config.auth_header_name, "auth");
        assert_eq!(config.auth_token_ttl, None);
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = InterviewConfig::from_lookup(|key| match key {
            "HISTORY_FAILURE_POLICY" => Some("propagate".to_string()),
            "AUTH_HEADER_NAME" => Some(" X-Auth ".to_string()),
            "AUTH_TOKEN_TTL_SECS" => Some("3600".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.history_failure_policy, HistoryFailurePolicy::Propagate);
        assert_eq!(config.auth_header_name, "x-auth");
        assert_eq!(config.auth_token_ttl, Some(std::time::Duration::from_secs(3600)));
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        let bad_policy = InterviewConfig::from_lookup(|key| {
            (key == "HISTORY_FAILURE_POLICY").then(|| "ignore".to_string())
        });
        assert!(bad_policy.is_err());

        let bad_ttl = InterviewConfig::from_lookup(|key| {
            (key == "AUTH_TOKEN_TTL_SECS").then(|| "-1".to_string())
        });
        assert!(bad_ttl.is_err());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "warn".parse::<HistoryFailurePolicy>().unwrap(),
            HistoryFailurePolicy::Warn
        );
        assert_eq!(
            " Propagate ".parse::<HistoryFailurePolicy>().unwrap(),
            HistoryFailurePolicy::Propagate
        );
        assert!("ignore".parse::<HistoryFailurePolicy>().is_err());
    }

    #[test]
    fn test_policy_display_round_trips() {
        for policy in [HistoryFailurePolicy::Warn, HistoryFailurePolicy::Propagate] {
            assert_eq!(policy.to_string().parse::<HistoryFailurePolicy>().unwrap(), policy);
        }
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::domain::entities::{HistoryEntry, InterviewSession, ScoreSummary};
    use crate::domain::value_objects::{InterviewDuration, InterviewId, ScoreTally, UserId};
    use crate::presentation::dto::*;
    use chrono::NaiveDate;

    #[test]
    fn test_submit_request_deserialization() {
        let json = r#"{"userId":1,"responses":[{"questionId":2,"response":"B"}]}"#;
        let req: SubmitRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.user_id, 1);
        let answers = req.answers();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].question_id.value(), 2);
        assert_eq!(answers[0].response, "B");
    }

    #[test]
    fn test_submit_request_accepts_legacy_field_name() {
        let json = r#"{"userId":1,"respnonses":[{"questionId":1,"response":"A"}]}"#;
        let req: SubmitRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.responses.len(), 1);
    }

    #[test]
    fn test_submit_request_without_responses() {
        let req: SubmitRequest = serde_json::from_str(r#"{"userId":1}"#).unwrap();
        assert!(req.responses.is_empty());
    }

    #[test]
    fn test_submit_response_renders_counts_as_strings() {
        let session = InterviewSession {
            id: InterviewId::new(7),
            topic: "Rust".to_string(),
            duration: InterviewDuration::from_minutes(30).unwrap(),
            total_questions: 3,
        };
        let summary = ScoreSummary::from_tally(&session, ScoreTally { correct: 2, wrong: 1 });

        let json = serde_json::to_value(SubmitResponse::from(summary)).unwrap();

        assert_eq!(json["interviewId"], "7");
        assert_eq!(json["totalQuestions"], "3");
        assert_eq!(json["correct"], "2");
        assert_eq!(json["wrong"], "1");
        assert_eq!(json["skipped"], "0");
        assert_eq!(json["topic"], "Rust");
        assert_eq!(json["duration"], "PT30M");
        assert_eq!(json["score"], "2/3");
    }

    #[test]
    fn test_history_entry_date_format() {
        let entry = HistoryEntry::new(
            UserId::new(1),
            "SQL",
            NaiveDate::from_ymd_opt(2024, 2, 9).unwrap(),
            "1/2",
        );
        let json = serde_json::to_value(HistoryEntryResponse::from(entry)).unwrap();
        assert_eq!(json["date"], "2024-02-09");
        assert_eq!(json["score"], "1/2");
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::InterviewError;
    use axum::http::StatusCode;
    use kernel::error::app_error::AppError;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(InterviewError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            InterviewError::MissingHeader("auth".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(InterviewError::InterviewNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            InterviewError::HistoryUnavailable("down".to_string()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(InterviewError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(InterviewError::UserNameTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            InterviewError::Validation("too short".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_database_errors_follow_kernel_classification() {
        assert_eq!(
            InterviewError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            InterviewError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            InterviewError::Database(sqlx::Error::Protocol("bad frame".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let app: AppError = InterviewError::Database(sqlx::Error::PoolClosed).into();
        assert_eq!(app.message(), "Database unavailable");
        let app: AppError =
            InterviewError::Database(sqlx::Error::Protocol("bad frame".to_string())).into();
        assert!(!app.message().contains("frame"));
    }

    #[test]
    fn test_status_code_matches_kind() {
        let errors = [
            InterviewError::Unauthorized,
            InterviewError::InterviewNotFound,
            InterviewError::MissingHeader("auth".to_string()),
            InterviewError::HistoryUnavailable("down".to_string()),
            InterviewError::Internal("boom".to_string()),
            InterviewError::InvalidCredentials,
            InterviewError::UserNameTaken,
            InterviewError::Database(sqlx::Error::PoolClosed),
        ];
        for err in errors {
            assert_eq!(err.status_code().as_u16(), err.kind().status_code());
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let app: AppError = InterviewError::Internal("secret table name".to_string()).into();
        assert_eq!(app.kind(), ErrorKind::InternalServerError);
        assert!(!app.message().contains("secret"));

        let app: AppError = InterviewError::HistoryUnavailable("pool closed".to_string()).into();
        assert!(!app.message().contains("pool"));
    }
}

#[cfg(test)]
mod router_tests {
    use super::fixtures::{TOKEN, USER, seed_abc_interview};
    use crate::application::config::{HistoryFailurePolicy, InterviewConfig};
    use crate::infra::memory::MemoryInterviewRepository;
    use crate::presentation::router::{auth_router_generic, interview_router_generic};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app(repo: &MemoryInterviewRepository, config: InterviewConfig) -> Router {
        interview_router_generic(repo.clone(), config)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(path: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn submit(path: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("auth", token);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(path: &str, token: &str) -> Request<Body> {
        Request::builder()
            .uri(path)
            .header("auth", token)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_submit_returns_summary() {
        let repo = MemoryInterviewRepository::new();
        seed_abc_interview(&repo).await;

        let body = json!({
            "userId": USER.value(),
            "responses": [
                {"questionId": 1, "response": "A"},
                {"questionId": 2, "response": "X"},
                {"questionId": 3, "response": "C"}
            ]
        });
        let (status, json) = send(
            app(&repo, InterviewConfig::default()),
            submit("/7", Some(TOKEN), body),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["correct"], "2");
        assert_eq!(json["wrong"], "1");
        assert_eq!(json["skipped"], "0");
        assert_eq!(json["score"], "2/3");
        assert_eq!(json["topic"], "Rust");
        assert_eq!(repo.history_entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_without_header_is_unauthorized() {
        let repo = MemoryInterviewRepository::new();
        seed_abc_interview(&repo).await;

        let (status, json) = send(
            app(&repo, InterviewConfig::default()),
            submit("/7", None, json!({"userId": 1, "responses": []})),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["status"], 401);
        assert_eq!(repo.session_lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_with_wrong_token_is_unauthorized() {
        let repo = MemoryInterviewRepository::new();
        seed_abc_interview(&repo).await;

        let (status, json) = send(
            app(&repo, InterviewConfig::default()),
            submit("/7", Some("stolen"), json!({"userId": 1, "responses": []})),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["title"], "Unauthorized");
        assert!(repo.history_entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_submit_unknown_interview_is_not_found() {
        let repo = MemoryInterviewRepository::new();
        seed_abc_interview(&repo).await;

        let (status, _) = send(
            app(&repo, InterviewConfig::default()),
            submit("/8", Some(TOKEN), json!({"userId": 1, "responses": []})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_submit_history_failure_under_propagate_is_unavailable() {
        let repo = MemoryInterviewRepository::new();
        seed_abc_interview(&repo).await;
        repo.set_history_offline(true);

        let config =
            InterviewConfig::default().with_history_failure_policy(HistoryFailurePolicy::Propagate);
        let (status, json) = send(
            app(&repo, config),
            submit("/7", Some(TOKEN), json!({"userId": 1, "responses": []})),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["status"], 503);
    }

    #[tokio::test]
    async fn test_custom_auth_header_name() {
        let repo = MemoryInterviewRepository::new();
        seed_abc_interview(&repo).await;

        let config = InterviewConfig {
            auth_header_name: "x-interview-token".to_string(),
            ..InterviewConfig::default()
        };
        let request = Request::builder()
            .uri("/7?userId=1")
            .header("x-interview-token", TOKEN)
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(app(&repo, config), request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_interview_hides_answers() {
        let repo = MemoryInterviewRepository::new();
        seed_abc_interview(&repo).await;

        let (status, json) = send(
            app(&repo, InterviewConfig::default()),
            get("/7?userId=1", TOKEN),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["interviewId"], 7);
        assert_eq!(json["duration"], "PT30M");
        assert_eq!(json["questions"].as_array().map(Vec::len), Some(3));
        assert!(json["questions"][0].get("correctAnswer").is_none());
        assert!(!json.to_string().contains("\"A\""));
    }

    #[tokio::test]
    async fn test_history_lists_recorded_submissions() {
        let repo = MemoryInterviewRepository::new();
        seed_abc_interview(&repo).await;

        for response in ["A", "X"] {
            let body = json!({
                "userId": 1,
                "responses": [{"questionId": 1, "response": response}]
            });
            let (status, _) = send(
                app(&repo, InterviewConfig::default()),
                submit("/7", Some(TOKEN), body),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, json) = send(
            app(&repo, InterviewConfig::default()),
            get("/history/1", TOKEN),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let entries = json["entries"].as_array().cloned().unwrap_or_default();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["score"], "0/3");
        assert_eq!(entries[1]["score"], "1/3");
        assert_eq!(entries[0]["date"].as_str().map(str::len), Some(10));
    }

    #[tokio::test]
    async fn test_history_of_other_user_is_unauthorized() {
        let repo = MemoryInterviewRepository::new();
        seed_abc_interview(&repo).await;

        let (status, _) = send(
            app(&repo, InterviewConfig::default()),
            get("/history/2", TOKEN),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in_then_submit() {
        let repo = MemoryInterviewRepository::new();
        seed_abc_interview(&repo).await;
        let auth = auth_router_generic(repo.clone(), InterviewConfig::default());

        let (status, json) = send(
            auth.clone(),
            post_json(
                "/signup",
                json!({"userName": "Ferris", "password": "correct horse", "country": "NL"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["userName"], "ferris");
        let user_id = json["userId"].as_i64().unwrap();

        let (status, json) = send(
            auth,
            post_json("/signin", json!({"userName": "ferris", "password": "correct horse"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["userId"], user_id);
        assert!(json.get("expiresAtMs").is_none());
        let token = json["authToken"].as_str().unwrap().to_string();

        let body = json!({
            "userId": user_id,
            "responses": [{"questionId": 1, "response": "A"}]
        });
        let (status, json) = send(
            app(&repo, InterviewConfig::default()),
            submit("/7", Some(&token), body),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["score"], "1/3");
    }

    #[tokio::test]
    async fn test_sign_in_again_revokes_previous_token() {
        let repo = MemoryInterviewRepository::new();
        seed_abc_interview(&repo).await;
        let auth = auth_router_generic(repo.clone(), InterviewConfig::default());
        let credentials = json!({"userName": "ferris", "password": "correct horse"});

        let (status, _) = send(auth.clone(), post_json("/signup", credentials.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (_, first) = send(auth.clone(), post_json("/signin", credentials.clone())).await;
        let (_, second) = send(auth, post_json("/signin", credentials)).await;
        let user_id = first["userId"].as_i64().unwrap();
        let first = first["authToken"].as_str().unwrap().to_string();
        let second = second["authToken"].as_str().unwrap().to_string();
        assert_ne!(first, second);

        let path = format!("/history/{user_id}");
        let (status, _) = send(app(&repo, InterviewConfig::default()), get(&path, &first)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(app(&repo, InterviewConfig::default()), get(&path, &second)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_sign_in_failures() {
        let repo = MemoryInterviewRepository::new();
        let auth = auth_router_generic(repo.clone(), InterviewConfig::default());

        let (status, _) = send(
            auth.clone(),
            post_json("/signup", json!({"userName": "ferris", "password": "correct horse"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(
            auth.clone(),
            post_json("/signup", json!({"userName": "FERRIS", "password": "correct horse"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["status"], 409);

        let (status, _) = send(
            auth.clone(),
            post_json("/signup", json!({"userName": "x", "password": "correct horse"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = send(
            auth,
            post_json("/signin", json!({"userName": "ferris", "password": "wrong horse"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(json.get("authToken").is_none());
    }
}
