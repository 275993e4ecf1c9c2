use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use classroom_api::types::{CourseRecord, PaginatedResponse};
use classroom_api::{
    ApiRequest, Client, CourseQuery, Error, MemorySession, Method, PageQuery, Query,
    SessionCredentials, SessionStore,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn logged_in(token: &str) -> Arc<MemorySession> {
    Arc::new(MemorySession::with_credentials(SessionCredentials {
        access_token: Some(token.to_string()),
        refresh_token: Some("refresh".to_string()),
    }))
}

/// Session that counts how often it was logged out.
#[derive(Default)]
struct CountingSession {
    inner: MemorySession,
    logouts: AtomicUsize,
}

impl SessionStore for CountingSession {
    fn access_token(&self) -> Option<String> {
        self.inner.access_token()
    }

    fn logout(&self) {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        self.inner.logout();
    }
}

#[tokio::test]
async fn list_courses_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("courses_page1.json");

    Mock::given(method("GET"))
        .and(path("/api/courses/courses/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), Arc::new(MemorySession::new())).unwrap();
    let resp = client.list_courses(&CourseQuery::default()).await.unwrap();

    assert_eq!(resp.count, 13);
    assert_eq!(resp.results.len(), 6);
    assert!(resp.has_next());
    assert_eq!(resp.results[0].title.as_deref(), Some("Algebra I"));
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/courses/"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("empty.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), logged_in("secret-token")).unwrap();
    let resp = client.list_courses(&CourseQuery::default()).await.unwrap();
    assert_eq!(resp.count, 0);
}

#[tokio::test]
async fn no_authorization_header_when_logged_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/lectures/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("lectures.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), Arc::new(MemorySession::new())).unwrap();
    client.list_lectures(&PageQuery::default()).await.unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("authorization").is_none());
    assert_eq!(
        received[0]
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
}

#[tokio::test]
async fn duplicate_api_prefix_is_collapsed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("empty.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = format!("{}/api", mock_server.uri());
    let client = Client::with_base_url(&base, Arc::new(MemorySession::new())).unwrap();
    let resp = client.send(ApiRequest::get("/api/courses/")).await.unwrap();
    assert_eq!(resp.status, 200);
}

#[tokio::test]
async fn lookalike_prefix_is_preserved() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/apiextra/courses/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = format!("{}/api", mock_server.uri());
    let client = Client::with_base_url(&base, Arc::new(MemorySession::new())).unwrap();
    client
        .send(ApiRequest::get("/apiextra/courses/"))
        .await
        .unwrap();
}

#[tokio::test]
async fn unauthorized_clears_session_before_returning() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/courses/"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"detail": "Token expired"}"#))
        .mount(&mock_server)
        .await;

    let session = logged_in("stale");
    let client = Client::with_base_url(&mock_server.uri(), session.clone()).unwrap();
    let err = client
        .list_courses(&CourseQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unauthorized { .. }));
    assert!(err.body().unwrap().contains("Token expired"));
    assert_eq!(session.credentials(), SessionCredentials::default());
}

#[tokio::test]
async fn unreadable_unauthorized_body_still_logs_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/courses/"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("Content-Encoding", "gzip")
                .set_body_bytes(b"definitely not gzip".to_vec()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = Arc::new(CountingSession {
        inner: MemorySession::with_credentials(SessionCredentials {
            access_token: Some("stale".to_string()),
            refresh_token: None,
        }),
        logouts: AtomicUsize::new(0),
    });
    let client = Client::with_base_url(&mock_server.uri(), session.clone()).unwrap();
    let err = client
        .list_courses(&CourseQuery::default())
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(session.logouts.load(Ordering::SeqCst), 1);
    assert_eq!(session.access_token(), None);
}

#[tokio::test]
async fn json_content_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/courses/"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("empty.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), Arc::new(MemorySession::new())).unwrap();
    client.list_courses(&CourseQuery::default()).await.unwrap();
}

#[tokio::test]
async fn concurrent_unauthorized_responses_are_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/courses/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&mock_server)
        .await;

    let session = Arc::new(CountingSession::default());
    session.inner.login("old-token".to_string(), None);
    let client = Client::with_base_url(&mock_server.uri(), session.clone()).unwrap();

    let first_query = CourseQuery::default();
    let second_query = CourseQuery::default().with_page(2);
    let (first, second) = tokio::join!(
        client.list_courses(&first_query),
        client.list_courses(&second_query),
    );

    assert!(first.unwrap_err().is_unauthorized());
    assert!(second.unwrap_err().is_unauthorized());
    assert_eq!(session.logouts.load(Ordering::SeqCst), 2);
    assert_eq!(session.access_token(), None);
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/courses/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let session = logged_in("token");
    let client = Client::with_base_url(&mock_server.uri(), session.clone()).unwrap();
    let err = client
        .list_courses(&CourseQuery::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.body(), Some("Internal Server Error"));
    // Only 401 touches the session.
    assert!(session.credentials().is_authenticated());
}

#[tokio::test]
async fn malformed_json_is_a_deserialize_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/courses/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), Arc::new(MemorySession::new())).unwrap();
    let err = client
        .list_courses(&CourseQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Deserialize { .. }));
}

#[tokio::test]
async fn network_failure_is_request_failed() {
    // Nothing listens on the discard port.
    let client = Client::with_base_url("http://127.0.0.1:9", Arc::new(MemorySession::new())).unwrap();
    let err = client
        .get_json::<PaginatedResponse<CourseRecord>, CourseQuery>(
            "/api/courses/courses/",
            Some(&CourseQuery::default()),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RequestFailed));
}

#[tokio::test]
async fn filters_are_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/courses/"))
        .and(query_param("page", "3"))
        .and(query_param("search", "algebra"))
        .and(query_param("status", "published"))
        .and(query_param("category", "Math"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("empty.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), Arc::new(MemorySession::new())).unwrap();
    let query = CourseQuery::default()
        .with_page(3)
        .with_search("algebra")
        .with_status("published")
        .with_category("Math");
    client.list_courses(&query).await.unwrap();
}

#[tokio::test]
async fn reject_course_sends_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/courses/courses/4/reject/"))
        .and(body_json(serde_json::json!({ "reason": "Missing syllabus" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "rejected" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), logged_in("admin")).unwrap();
    let resp = client.reject_course(4, "Missing syllabus").await.unwrap();
    assert_eq!(resp["status"], "rejected");
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/quizzes/quizzes/9/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), logged_in("instructor")).unwrap();
    client.delete_quiz(9).await.unwrap();
}

#[tokio::test]
async fn grade_attempt_posts_score_and_feedback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/quizzes/attempts/21/grade/"))
        .and(body_json(serde_json::json!({ "score": 8.5, "feedback": "Good" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 21 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), logged_in("instructor")).unwrap();
    let resp = client.grade_attempt(21, 8.5, "Good").await.unwrap();
    assert_eq!(resp["id"], 21);
}

#[tokio::test]
async fn patch_is_sent_with_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/courses/courses/2/"))
        .and(body_json(serde_json::json!({ "title": "Physics II" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": 2, "title": "Physics II" })),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), logged_in("admin")).unwrap();
    let course = client
        .update_course(2, &serde_json::json!({ "title": "Physics II" }))
        .await
        .unwrap();
    assert_eq!(course.id, 2);
    assert_eq!(course.title.as_deref(), Some("Physics II"));

    let raw = client
        .send(ApiRequest::new(Method::PATCH, "/api/courses/courses/2/")
            .with_body(&serde_json::json!({ "title": "Physics II" }))
            .unwrap())
        .await
        .unwrap();
    assert_eq!(raw.status, 200);
    assert_eq!(PageQuery::default().page(), 1);
}
