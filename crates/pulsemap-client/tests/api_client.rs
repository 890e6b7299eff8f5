// Wire-level tests for the map API client against a mock backend.

use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pulsemap_client::{ClientError, MapApiClient};
use pulsemap_contracts::{AlertKind, AlertMarker, LocationUpdate};

fn client_for(server: &MockServer) -> MapApiClient {
    MapApiClient::with_base_url(format!("{}/api", server.uri()))
}

#[tokio::test]
async fn push_location_sends_camel_case_body_and_reads_ack() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/location"))
        .and(body_partial_json(serde_json::json!({
            "sessionId": "s1",
            "position": [40.7128, -74.006],
            "timestamp": 1_754_300_000_000i64,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "activeConnections": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = LocationUpdate {
        session_id: "s1".to_string(),
        position: [40.7128, -74.006],
        timestamp: 1_754_300_000_000,
        joined_at: "2026-08-04T12:00:00Z".parse().unwrap(),
        alert: None,
    };

    let ack = client_for(&server).push_location(&update).await.unwrap();
    assert!(ack.success);
    assert_eq!(ack.active_connections, Some(12));
}

#[tokio::test]
async fn notify_disconnect_sends_the_zero_timestamp_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/location"))
        .and(body_partial_json(serde_json::json!({
            "sessionId": "s1",
            "timestamp": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .notify_disconnect("s1", "2026-08-04T12:00:00Z".parse().unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn fetch_sessions_passes_dummy_count_and_creator_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions"))
        .and(query_param("dummy_count", "5"))
        .and(query_param("creator_id", "me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "a",
                "position": [40.0, -74.0],
                "lastUpdate": 1_754_300_000_000i64,
                "joinedAt": "2026-08-04T12:00:00Z",
                "isDummy": false
            },
            {
                "id": "dummy-1",
                "position": [40.1, -74.1],
                "lastUpdate": 1_754_300_000_000i64,
                "joinedAt": "2026-08-04T12:00:00Z",
                "isDummy": true,
                "alert": {"type": "water", "expiresAt": 1_754_300_030_000i64}
            }
        ])))
        .mount(&server)
        .await;

    let sessions = client_for(&server).fetch_sessions(5, "me").await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions[1].is_dummy);
    assert_eq!(sessions[1].alert.unwrap().kind, AlertKind::Water);
}

#[tokio::test]
async fn fetch_sessions_rejects_non_array_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"error": "maintenance"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_sessions(0, "me").await.unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedBody { endpoint: "sessions", .. }));
}

#[tokio::test]
async fn alert_lifecycle_hits_create_list_and_delete_endpoints() {
    let server = MockServer::start().await;
    let marker = AlertMarker {
        id: "m1".to_string(),
        position: [40.7, -74.0],
        kind: AlertKind::Medical,
        created_at: 1_754_300_000_000,
        creator_id: "me".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/api/alert"))
        .and(body_partial_json(serde_json::json!({
            "id": "m1",
            "type": "medical",
            "creatorId": "me"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "m1",
            "position": [40.7, -74.0],
            "type": "medical",
            "createdAt": 1_754_300_000_000i64,
            "creatorId": "me"
        }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/alert/m1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.create_alert(&marker).await.unwrap();
    let listed = client.fetch_alerts().await.unwrap();
    assert_eq!(listed, vec![marker]);
    client.delete_alert("m1").await.unwrap();
}

#[tokio::test]
async fn server_errors_surface_as_status_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/activeConnections"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).active_connections().await.unwrap_err();
    assert!(matches!(err, ClientError::Status { endpoint: "activeConnections", .. }));
}
