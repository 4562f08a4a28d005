//! Source document client behavior against a local HTTP fixture.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use specgate::client::{DocumentCache, SourceDocumentClient};
use specgate::config::ApiConfig;

/// Serve exactly one canned HTTP response, then shut down. Returns the base
/// URL and a handle resolving to the raw request that was received.
fn one_shot_server(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind fixture server");
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("Fixture server accept failed");

        // Read until the end of the request headers (GET has no body).
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
        let request = String::from_utf8_lossy(&buf).to_string();

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        request
    });

    (format!("http://{addr}"), handle)
}

fn enabled_config(base_url: String) -> ApiConfig {
    ApiConfig {
        base_url,
        api_key: "test-key".to_string(),
        timeout: 5,
        enabled: true,
    }
}

const TRANSCRIPT_BODY: &str = r#"{
    "id": "transcript-001",
    "type": "transcript",
    "title": "Stakeholder Meeting - Product Requirements",
    "date": "2024-01-15",
    "participants": ["Jane Smith (Product Owner)"],
    "content": "The shopping cart MUST persist across sessions."
}"#;

#[test]
fn test_fetch_decodes_payload_and_sends_bearer_token() {
    let (base_url, handle) = one_shot_server("200 OK", TRANSCRIPT_BODY);
    let mut client =
        SourceDocumentClient::new(enabled_config(base_url), DocumentCache::new()).unwrap();

    let doc = client.fetch("transcript-001").expect("fetch should succeed");
    assert_eq!(doc.doc_type, "transcript");
    assert_eq!(doc.title, "Stakeholder Meeting - Product Requirements");
    assert!(doc.fetched);
    assert!(doc.content.unwrap().contains("persist across sessions"));

    let request = handle.join().unwrap();
    assert!(request.starts_with("GET /documents/transcript-001 HTTP/1.1"));
    assert!(request.contains("authorization: Bearer test-key")
        || request.contains("Authorization: Bearer test-key"));
}

#[test]
fn test_second_fetch_is_served_from_cache() {
    let (base_url, handle) = one_shot_server("200 OK", TRANSCRIPT_BODY);
    let mut client =
        SourceDocumentClient::new(enabled_config(base_url), DocumentCache::new()).unwrap();

    assert!(client.fetch("transcript-001").is_some());
    handle.join().unwrap();

    // The server is gone; only the cache can answer now.
    let cached = client.fetch("transcript-001");
    assert!(cached.is_some());
    assert_eq!(client.cache().len(), 1);
}

#[test]
fn test_not_found_degrades_to_absence() {
    let (base_url, handle) = one_shot_server("404 Not Found", r#"{"error": "unknown document"}"#);
    let mut client =
        SourceDocumentClient::new(enabled_config(base_url), DocumentCache::new()).unwrap();

    assert!(client.fetch("no-such-doc").is_none());
    assert!(client.cache().is_empty());
    handle.join().unwrap();
}

#[test]
fn test_auth_failure_degrades_to_absence() {
    let (base_url, handle) = one_shot_server("401 Unauthorized", r#"{"error": "bad token"}"#);
    let mut client =
        SourceDocumentClient::new(enabled_config(base_url), DocumentCache::new()).unwrap();

    assert!(client.fetch("transcript-001").is_none());
    handle.join().unwrap();
}

#[test]
fn test_unreachable_server_degrades_to_absence() {
    // Bind then drop, so the port is very likely closed.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut client = SourceDocumentClient::new(
        enabled_config(format!("http://{addr}")),
        DocumentCache::new(),
    )
    .unwrap();

    assert!(client.fetch("transcript-001").is_none());
}

#[test]
fn test_fetch_multiple_returns_successful_subset() {
    let (base_url, handle) = one_shot_server("200 OK", TRANSCRIPT_BODY);
    let mut client =
        SourceDocumentClient::new(enabled_config(base_url), DocumentCache::new()).unwrap();

    // First id succeeds; the second finds the fixture server gone.
    let docs = client.fetch_multiple(&[
        "transcript-001".to_string(),
        "email-002".to_string(),
    ]);
    handle.join().unwrap();

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].doc_id, "transcript-001");
}
