//! Shared helpers for the cross-module tests.
//!
//! Most tests run against a backend that does not exist (a refused
//! localhost port), which is exactly the point: they cover the client's
//! durable state and failure behavior, not the backend. The refresh
//! discipline needs real responses, so [`spawn_stub_backend`] serves a
//! handful of canned routes over a loopback socket.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use kiogloss_client::storage::{FileStore, KeyValueStore, keys};
use kiogloss_client::{ClientConfig, Storefront};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Config pointing at a port nothing listens on, with file-backed state in
/// `dir`.
#[must_use]
pub fn offline_config(dir: &Path) -> ClientConfig {
    ClientConfig {
        api_base_url: "http://127.0.0.1:9".parse().expect("static url"),
        storage_dir: dir.to_path_buf(),
        ..ClientConfig::default()
    }
}

/// A storefront whose durable state lives in `dir`.
#[must_use]
pub fn offline_storefront(dir: &Path) -> Storefront {
    Storefront::new(&offline_config(dir)).expect("assemble storefront")
}

/// Build an unsigned access token with the backend's claim shape.
#[must_use]
pub fn access_token(user_id: i64, roles: &[&str], exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({
            "sub": "tester@example.com",
            "user_id": user_id,
            "roles": roles,
            "exp": exp,
        })
        .to_string(),
    );
    format!("{header}.{payload}.sig")
}

/// Persist a credential pair into `dir` the way the client itself would.
pub fn seed_credentials(dir: &Path, access: &str) {
    let store = FileStore::new(dir).expect("file store");
    let raw = serde_json::json!({ "access": access, "refresh": "refresh-token" }).to_string();
    store.put(keys::AUTH, &raw).expect("seed credentials");
}

/// Read raw persisted state for assertions.
#[must_use]
pub fn raw_state(dir: &Path, key: &str) -> Option<String> {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir).expect("file store"));
    store.get(key)
}

/// Config pointing at a [`spawn_stub_backend`] address.
#[must_use]
pub fn stub_config(dir: &Path, addr: SocketAddr) -> ClientConfig {
    ClientConfig {
        api_base_url: format!("http://{addr}").parse().expect("stub url"),
        storage_dir: dir.to_path_buf(),
        ..ClientConfig::default()
    }
}

/// Canned backend over a loopback socket, speaking just enough HTTP/1.1
/// for the client.
///
/// Routes: `POST /refresh` answers with a fresh credential pair,
/// `GET /user/7` answers with the profile, `PUT /admin/sizes/1` echoes a
/// rename, and everything else is a 401. The listener lives until the
/// runtime shuts down.
pub async fn spawn_stub_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(handle_connection(socket));
        }
    });
    addr
}

async fn handle_connection(mut socket: tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];

    // Read up to the blank line ending the headers.
    let head_end = loop {
        let Ok(read) = socket.read(&mut chunk).await else {
            return;
        };
        if read == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..read]);
        if let Some(pos) = buf.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos;
        }
    };

    let header = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let content_length = header
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    // Drain the body before answering so the client never sees a reset.
    let mut received = buf.len();
    let expected = head_end + 4 + content_length;
    while received < expected {
        let Ok(read) = socket.read(&mut chunk).await else {
            return;
        };
        if read == 0 {
            break;
        }
        received += read;
    }

    let request_line = header.lines().next().unwrap_or_default();
    let (status, body) = route(request_line);
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

fn route(request_line: &str) -> (&'static str, String) {
    if request_line.starts_with("POST /refresh ") {
        let pair = serde_json::json!({
            "access": access_token(7, &["ROLE_USER", "ROLE_ADMIN"], i64::MAX),
            "refresh": "refresh-token-2",
        });
        return ("200 OK", pair.to_string());
    }
    if request_line.starts_with("GET /user/7 ") {
        let detail = serde_json::json!({
            "id": 7,
            "name": "Tester",
            "email": "tester@example.com",
            "account": {
                "id": 14,
                "favorite": [],
                "pointsPerPurchase": 5,
                "isActive": true,
            },
        });
        return ("200 OK", detail.to_string());
    }
    if request_line.starts_with("PUT /admin/sizes/1 ") {
        return (
            "200 OK",
            serde_json::json!({ "id": 1, "name": "30ml" }).to_string(),
        );
    }
    (
        "401 Unauthorized",
        serde_json::json!({ "message": "bad credentials" }).to_string(),
    )
}
