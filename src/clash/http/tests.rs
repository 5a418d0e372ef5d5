//! Unit tests for the upstream player client

use super::*;
use crate::clash::transport::TransportError;
use async_trait::async_trait;
use serde_json::json;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Transport double that answers every call with the same canned result and
/// records what it was asked for.
struct StubTransport {
    reply: std::result::Result<RawResponse, String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, HeaderMap)>>,
}

impl StubTransport {
    fn responding(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(RawResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn failing(description: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(description.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> std::result::Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((url.to_string(), headers));
        self.reply.clone().map_err(TransportError)
    }
}

fn client_with(transport: Arc<StubTransport>) -> UpstreamClient {
    UpstreamClient::new(
        transport,
        BearerToken::new("test-token").unwrap(),
        "https://api.example.test/v1",
    )
}

#[cfg(test)]
mod stub_tests {
    use super::*;

    #[tokio::test]
    async fn test_success_returns_document_unmodified() {
        let body = r##"{"tag":"#ABC","name":"Foo","townHallLevel":12,"troops":[]}"##;
        let transport = StubTransport::responding(200, body);
        let client = client_with(transport.clone());

        let result = client.lookup(Some("ABC")).await.unwrap();

        let expected: Value = serde_json::from_str(body).unwrap();
        assert_eq!(result, expected);
        assert_eq!(serde_json::to_string(&result).unwrap(), body);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_request_url_and_headers() {
        let transport = StubTransport::responding(200, "{}");
        let client = client_with(transport.clone());

        client.lookup(Some("#2PP")).await.unwrap();

        let (url, headers) = transport.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(url, "https://api.example.test/v1/players/%232PP");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer test-token");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[tokio::test]
    async fn test_missing_input_makes_no_call() {
        let transport = StubTransport::responding(200, "{}");
        let client = client_with(transport.clone());

        assert_eq!(client.lookup(None).await, Err(LookupError::MissingInput));
        assert_eq!(client.lookup(Some("")).await, Err(LookupError::MissingInput));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_forbidden() {
        let transport = StubTransport::responding(403, r#"{"reason":"accessDenied.invalidIp"}"#);
        let client = client_with(transport);

        let err = client.lookup(Some("ABC")).await.unwrap_err();

        assert!(matches!(err, LookupError::Forbidden { .. }));
        assert!(err.to_string().contains("whitelisted"));
        assert_eq!(
            err.details(),
            Some(json!({"reason": "accessDenied.invalidIp"}))
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        let transport = StubTransport::responding(404, r#"{"reason":"notFound"}"#);
        let client = client_with(transport);

        let err = client.lookup(Some("NOPE")).await.unwrap_err();

        assert!(matches!(err, LookupError::NotFound { .. }));
        assert!(err.to_string().contains("tag is correct"));
    }

    #[tokio::test]
    async fn test_rate_limited_is_not_retried() {
        let transport = StubTransport::responding(429, r#"{"reason":"requestThrottled"}"#);
        let client = client_with(transport.clone());

        let err = client.lookup(Some("ABC")).await.unwrap_err();

        assert!(matches!(err, LookupError::RateLimited { .. }));
        assert!(err.to_string().contains("try again later"));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_other_status_uses_upstream_message() {
        let transport = StubTransport::responding(
            503,
            r#"{"reason":"inMaintenance","message":"Service is in maintenance."}"#,
        );
        let client = client_with(transport);

        let err = client.lookup(Some("ABC")).await.unwrap_err();

        match &err {
            LookupError::Upstream { status, message, .. } => {
                assert_eq!(*status, 503);
                assert_eq!(message, "Service is in maintenance.");
            }
            other => panic!("Expected Upstream, got {:?}", other),
        }
        assert_eq!(err.to_string(), "API Error: Service is in maintenance.");
    }

    #[tokio::test]
    async fn test_other_status_without_message() {
        let transport = StubTransport::responding(500, r#"{"reason":"unknownException"}"#);
        let client = client_with(transport);

        let err = client.lookup(Some("ABC")).await.unwrap_err();

        assert_eq!(err.to_string(), "API Error: Unknown error");
        assert_eq!(err.details(), Some(json!({"reason": "unknownException"})));
    }

    #[tokio::test]
    async fn test_malformed_body_is_upstream_error() {
        let transport = StubTransport::responding(200, "<html>gateway</html>");
        let client = client_with(transport);

        let err = client.lookup(Some("ABC")).await.unwrap_err();

        match &err {
            LookupError::Upstream {
                status, details, ..
            } => {
                assert_eq!(*status, MALFORMED_RESPONSE_STATUS);
                assert_eq!(details, &Some(json!("<html>gateway</html>")));
            }
            other => panic!("Expected Upstream, got {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            format!("API Error: {MALFORMED_RESPONSE_MESSAGE}")
        );
    }

    #[tokio::test]
    async fn test_empty_body_has_no_details() {
        let transport = StubTransport::responding(502, "");
        let client = client_with(transport);

        let err = client.lookup(Some("ABC")).await.unwrap_err();

        assert_eq!(err.details(), None);
    }

    #[tokio::test]
    async fn test_network_failure() {
        let transport = StubTransport::failing("error sending request: connection refused");
        let client = client_with(transport.clone());

        let err = client.lookup(Some("ABC")).await.unwrap_err();

        assert_eq!(
            err,
            LookupError::Network {
                description: "error sending request: connection refused".to_string()
            }
        );
        assert_eq!(err.status_code().as_u16(), 500);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_repeated_lookup_is_identical() {
        let body = r##"{"tag":"#ABC","name":"Foo","expLevel":200}"##;
        let transport = StubTransport::responding(200, body);
        let client = client_with(transport.clone());

        let first = serde_json::to_vec(&client.lookup(Some("ABC")).await.unwrap()).unwrap();
        let second = serde_json::to_vec(&client.lookup(Some("ABC")).await.unwrap()).unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.call_count(), 2);
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let client = UpstreamClient::new(
            StubTransport::responding(200, "{}"),
            BearerToken::new("t").unwrap(),
            "http://localhost:9000/v1/",
        );
        let tag = PlayerTag::parse(Some("ABC")).unwrap();
        assert_eq!(client.player_url(&tag), "http://localhost:9000/v1/players/%23ABC");
    }
}

/// Transport that holds each request until released, then records completion.
struct GatedTransport {
    release: tokio::sync::Notify,
    completed: AtomicUsize,
}

#[async_trait]
impl Transport for GatedTransport {
    async fn get(
        &self,
        _url: &str,
        _headers: HeaderMap,
    ) -> std::result::Result<RawResponse, TransportError> {
        self.release.notified().await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(RawResponse {
            status: 200,
            body: b"{}".to_vec(),
        })
    }
}

#[cfg(test)]
mod abandonment_tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_abandoned_lookup_still_completes_upstream_request() {
        let transport = Arc::new(GatedTransport {
            release: tokio::sync::Notify::new(),
            completed: AtomicUsize::new(0),
        });
        let client = UpstreamClient::new(
            transport.clone(),
            BearerToken::new("t").unwrap(),
            "https://api.example.test/v1",
        );

        // Give up on the lookup while the request is still in flight.
        let abandoned =
            tokio::time::timeout(Duration::from_millis(20), client.lookup(Some("ABC"))).await;
        assert!(abandoned.is_err());
        assert_eq!(transport.completed.load(Ordering::SeqCst), 0);

        transport.release.notify_one();
        for _ in 0..100 {
            if transport.completed.load(Ordering::SeqCst) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert_eq!(transport.completed.load(Ordering::SeqCst), 1);
    }
}

#[cfg(test)]
mod wiremock_tests {
    use super::*;

    async fn client_for(server: &MockServer) -> UpstreamClient {
        UpstreamClient::new(
            Arc::new(ReqwestTransport::new().unwrap()),
            BearerToken::new("wiremock-token").unwrap(),
            format!("{}/v1", server.uri()),
        )
    }

    #[tokio::test]
    async fn test_get_player_success() {
        let mock_server = MockServer::start().await;

        let mock_response = json!({
            "tag": "#2PP",
            "name": "Test Player",
            "townHallLevel": 15,
            "trophies": 5123
        });

        Mock::given(method("GET"))
            .and(path("/v1/players/%232PP"))
            .and(header("authorization", "Bearer wiremock-token"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&mock_response))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let result = client.lookup(Some("2PP")).await.unwrap();

        assert_eq!(result, mock_response);
    }

    #[tokio::test]
    async fn test_get_player_rate_limited_single_attempt() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(json!({"reason": "requestThrottled"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.lookup(Some("2PP")).await.unwrap_err();

        assert!(matches!(err, LookupError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_get_player_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"reason": "notFound"})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.lookup(Some("#NOPE")).await.unwrap_err();

        assert_eq!(
            err,
            LookupError::NotFound {
                details: Some(json!({"reason": "notFound"}))
            }
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop a listener so nothing answers on the port.
        let uri = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };

        let client = UpstreamClient::new(
            Arc::new(ReqwestTransport::new().unwrap()),
            BearerToken::new("t").unwrap(),
            uri,
        );
        let err = client.lookup(Some("2PP")).await.unwrap_err();

        match err {
            LookupError::Network { description } => assert!(!description.is_empty()),
            other => panic!("Expected Network error, got {:?}", other),
        }
    }
}
