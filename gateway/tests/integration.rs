//! Integration tests for the REST gateway.
//!
//! These exercise the full request pipeline against a mock backend:
//! URL shape, headers, body shape, retry, and envelope normalization.

use std::time::Duration;

use chrono::NaiveDate;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roster_gateway::retry::RetryConfig;
use roster_gateway::{BaseUrl, ResourceClient};
use roster_types::{EventDraft, EventId, EventRecord, UserId, UserRecord};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fast retry config so failure-path tests don't sleep.
fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_retries: 2,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
        jitter_factor: 0.0,
    }
}

fn event_client(server: &MockServer) -> ResourceClient<EventRecord> {
    let base = BaseUrl::parse(&format!("{}/api", server.uri())).unwrap();
    ResourceClient::new(base).with_retry(fast_retry())
}

fn user_client(server: &MockServer) -> ResourceClient<UserRecord> {
    let base = BaseUrl::parse(&format!("{}/api", server.uri())).unwrap();
    ResourceClient::new(base).with_retry(fast_retry())
}

fn event_rows() -> serde_json::Value {
    serde_json::json!([
        {"id": 1, "title": "Kickoff", "description": "Project kickoff", "date": "2026-08-10"},
        {"id": 2, "title": "Retro", "description": "Sprint retrospective", "date": "2026-08-24"}
    ])
}

#[tokio::test]
async fn list_decodes_a_bare_array_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "message": "ok", "data": event_rows()
        })))
        .mount(&server)
        .await;

    let envelope = event_client(&server).list().await;
    assert!(envelope.succeeded);
    let events = envelope.payload.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, Some(EventId::new(1)));
    assert_eq!(events[1].title, "Retro");
}

#[tokio::test]
async fn wrapped_list_normalizes_to_the_same_payload_as_bare() {
    let bare_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "message": "ok", "data": event_rows()
        })))
        .mount(&bare_server)
        .await;

    let wrapped_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "message": "ok", "data": {"events": event_rows()}
        })))
        .mount(&wrapped_server)
        .await;

    let bare = event_client(&bare_server).list().await;
    let wrapped = event_client(&wrapped_server).list().await;
    assert!(bare.succeeded && wrapped.succeeded);
    assert_eq!(bare.payload, wrapped.payload);
}

#[tokio::test]
async fn fetch_decodes_a_single_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "ok",
            "data": {"id": 7, "title": "Demo", "description": "Customer demo", "date": "2026-09-02"}
        })))
        .mount(&server)
        .await;

    let envelope = event_client(&server).fetch(&EventId::new(7)).await;
    assert!(envelope.succeeded);
    assert_eq!(envelope.payload.unwrap().date, date(2026, 9, 2));
}

#[tokio::test]
async fn create_posts_the_draft_body_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "title": "Launch",
            "description": "Quarterly launch review",
            "date": "2026-09-01"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "success": true,
            "message": "Event created",
            "data": {
                "id": 41,
                "title": "Launch",
                "description": "Quarterly launch review",
                "date": "2026-09-01",
                "created_at": "2026-08-05T08:30:00Z",
                "updated_at": "2026-08-05T08:30:00Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = EventDraft {
        title: "Launch".to_string(),
        description: "Quarterly launch review".to_string(),
        date: Some(date(2026, 9, 1)),
    };
    let envelope = event_client(&server).create(&draft).await;
    assert!(envelope.succeeded, "message: {}", envelope.message);
    let created = envelope.payload.unwrap();
    assert_eq!(created.id, Some(EventId::new(41)));
    assert!(created.created_at.is_some());
}

#[tokio::test]
async fn update_puts_to_the_record_url() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/events/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Event updated",
            "data": {"id": 5, "title": "New", "description": "Updated description", "date": "2026-09-01"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = EventDraft {
        title: "New".to_string(),
        description: "Updated description".to_string(),
        date: Some(date(2026, 9, 1)),
    };
    let envelope = event_client(&server).update(&EventId::new(5), &draft).await;
    assert!(envelope.succeeded);
    assert_eq!(envelope.payload.unwrap().title, "New");
}

#[tokio::test]
async fn delete_treats_an_empty_body_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/events/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = event_client(&server).delete(&EventId::new(7)).await;
    assert!(envelope.succeeded);
    assert_eq!(envelope.payload, None);
}

#[tokio::test]
async fn backend_rejection_with_200_is_a_failure_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "Title already taken",
            "errors": {"title": ["already taken"]}
        })))
        .mount(&server)
        .await;

    let envelope = event_client(&server).create(&EventDraft::default()).await;
    assert!(!envelope.succeeded);
    assert_eq!(envelope.message, "Title already taken");
    assert!(envelope.errors.is_some());
}

#[tokio::test]
async fn non_success_status_never_raises() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/u-1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "success": false, "message": "User not found"
        })))
        .mount(&server)
        .await;

    let envelope = user_client(&server).fetch(&UserId::new("u-1")).await;
    assert!(!envelope.succeeded);
    assert_eq!(envelope.message, "User not found");
}

#[tokio::test]
async fn plain_text_error_body_is_excerpted_with_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/events/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let envelope = event_client(&server).delete(&EventId::new(3)).await;
    assert!(!envelope.succeeded);
    assert!(envelope.message.contains("500"), "got: {}", envelope.message);
    assert!(envelope.message.contains("boom"));
}

#[tokio::test]
async fn connection_refused_becomes_a_failure_envelope() {
    // Start then drop a server so the port is very likely unbound.
    let refused_uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let base = BaseUrl::parse(&format!("{refused_uri}/api")).unwrap();
    let client = ResourceClient::<EventRecord>::new(base).with_retry(fast_retry());

    let envelope = client.list().await;
    assert!(!envelope.succeeded);
    assert!(envelope.payload.is_none());
    assert!(!envelope.message.is_empty());
}

#[tokio::test]
async fn list_retries_past_a_transient_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "message": "ok", "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = event_client(&server).list().await;
    assert!(envelope.succeeded);
    assert_eq!(envelope.payload.unwrap().len(), 0);
}

#[tokio::test]
async fn malformed_json_body_is_a_failure_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let envelope = event_client(&server).list().await;
    assert!(!envelope.succeeded);
    assert!(envelope.message.contains("malformed"));
}
