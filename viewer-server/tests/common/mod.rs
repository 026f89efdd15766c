//! Test server: the real router over an in-memory store, bound to an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::json;
use storage::{Repository, SqlitePoolManager, Tables, ViewerStore};
use viewer_server::{build_router, AppState, Credentials};

pub const INSTANCE: &str = "inst-x";
pub const JID: &str = "5511999990000@s.whatsapp.net";

/// 2024-01-01 00:00:00 UTC.
pub const T0: i64 = 1_704_067_200;

/// `Basic base64("admin:s3cret")`
pub const GOOD_AUTH: &str = "Basic YWRtaW46czNjcmV0";
/// `Basic base64("admin:wrong")`
pub const BAD_AUTH: &str = "Basic YWRtaW46d3Jvbmc=";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET with the admin credentials.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .header("Authorization", GOOD_AUTH)
            .send()
            .await
            .expect("request failed")
    }
}

/// Serves `repo` with the gate closed by `admin:s3cret`, or open when `protected` is false.
pub async fn spawn_server(repo: Arc<dyn Repository>, protected: bool) -> TestServer {
    let credentials = if protected {
        Credentials::from_config("admin", "s3cret")
    } else {
        Credentials::from_config("admin", "")
    };
    let app = build_router(AppState::new(repo, credentials));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr: SocketAddr = listener.local_addr().expect("no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    }
}

async fn execute(pool_manager: &SqlitePoolManager, sql: &str) {
    sqlx::query(sql)
        .execute(pool_manager.pool())
        .await
        .expect("Failed to run fixture SQL");
}

async fn insert_message(
    pool_manager: &SqlitePoolManager,
    id: &str,
    remote_jid: &str,
    from_me: bool,
    offset: i64,
    payload: serde_json::Value,
) {
    let key = json!({ "remoteJid": remote_jid, "fromMe": from_me, "id": id });
    let message_type = payload
        .as_object()
        .and_then(|o| o.keys().next().cloned())
        .unwrap_or_default();
    sqlx::query(
        r#"INSERT INTO "Message" (id, "instanceId", "key", "message", "messageType", status, "messageTimestamp")
           VALUES (?1, ?2, ?3, ?4, ?5, 'READ', ?6)"#,
    )
    .bind(id)
    .bind(INSTANCE)
    .bind(key.to_string())
    .bind(payload.to_string())
    .bind(message_type)
    .bind(T0 + offset)
    .execute(pool_manager.pool())
    .await
    .expect("Failed to insert message");
}

/// One instance, two chats, four messages in [`JID`] (`m0` oldest) and one elsewhere.
pub async fn seeded_store() -> ViewerStore {
    let pool_manager = SqlitePoolManager::new("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");

    execute(
        &pool_manager,
        r#"CREATE TABLE "Instance" (id TEXT PRIMARY KEY, name TEXT NOT NULL, number TEXT,
            "connectionStatus" TEXT, "updatedAt" TEXT)"#,
    )
    .await;
    execute(
        &pool_manager,
        r#"CREATE TABLE "Chat" (id TEXT PRIMARY KEY, "instanceId" TEXT NOT NULL,
            "remoteJid" TEXT NOT NULL, name TEXT, "updatedAt" TEXT)"#,
    )
    .await;
    execute(
        &pool_manager,
        r#"CREATE TABLE "Message" (id TEXT PRIMARY KEY, "instanceId" TEXT NOT NULL,
            "key" TEXT NOT NULL, "message" TEXT, "messageType" TEXT NOT NULL, status TEXT,
            "messageTimestamp" INTEGER NOT NULL)"#,
    )
    .await;

    execute(
        &pool_manager,
        r#"INSERT INTO "Instance" VALUES ('inst-x', 'Sales', '5511999990000', 'open', '2024-01-01 00:00:00')"#,
    )
    .await;
    execute(
        &pool_manager,
        r#"INSERT INTO "Chat" VALUES
            ('c1', 'inst-x', '5511999990000@s.whatsapp.net', 'Alice', '2024-01-02 00:00:00'),
            ('c2', 'inst-x', '5511888880000@s.whatsapp.net', 'Bob', '2024-01-01 00:00:00')"#,
    )
    .await;

    insert_message(&pool_manager, "m0", JID, true, 0, json!({"conversation": "Hello there"})).await;
    insert_message(&pool_manager, "m1", JID, false, 60, json!({"conversation": "line one\nsaid \"hi\""})).await;
    insert_message(
        &pool_manager,
        "m2",
        JID,
        true,
        120,
        json!({"imageMessage": {"caption": "a hello photo", "mimetype": "image/jpeg", "jpegThumbnail": "/9j/4AAQ"}}),
    )
    .await;
    insert_message(&pool_manager, "m3", JID, false, 180, json!({"conversation": "bye"})).await;
    insert_message(
        &pool_manager,
        "elsewhere",
        "5511888880000@s.whatsapp.net",
        true,
        240,
        json!({"conversation": "hello"}),
    )
    .await;

    ViewerStore::new(pool_manager, Tables::default())
}

/// `<endpoint>?instanceId=..&remoteJid=..<extra>` for the seeded conversation.
pub fn conversation(endpoint: &str, extra: &str) -> String {
    format!(
        "{}?instanceId={}&remoteJid={}{}",
        endpoint,
        INSTANCE,
        JID.replace('@', "%40"),
        extra
    )
}
