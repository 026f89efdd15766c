//! Shared fixtures: an in-memory store with the Instance/Chat/Message tables.

#![allow(dead_code)]

use serde_json::{json, Value};
use storage::{SqlitePoolManager, Tables, ViewerStore};

pub const INSTANCE: &str = "inst-x";
pub const JID: &str = "5511999990000@s.whatsapp.net";

/// Base timestamp for fixtures: 2024-01-01 00:00:00 UTC.
pub const T0: i64 = 1_704_067_200;

pub async fn empty_store() -> ViewerStore {
    let pool_manager = SqlitePoolManager::new("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");

    for ddl in [
        r#"CREATE TABLE "Instance" (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            number TEXT,
            "connectionStatus" TEXT,
            "updatedAt" TEXT
        )"#,
        r#"CREATE TABLE "Chat" (
            id TEXT PRIMARY KEY,
            "instanceId" TEXT NOT NULL,
            "remoteJid" TEXT NOT NULL,
            name TEXT,
            "updatedAt" TEXT
        )"#,
        r#"CREATE TABLE "Message" (
            id TEXT PRIMARY KEY,
            "instanceId" TEXT NOT NULL,
            "key" TEXT NOT NULL,
            "message" TEXT,
            "messageType" TEXT NOT NULL,
            status TEXT,
            "messageTimestamp" INTEGER NOT NULL
        )"#,
    ] {
        sqlx::query(ddl)
            .execute(pool_manager.pool())
            .await
            .expect("Failed to create table");
    }

    ViewerStore::new(pool_manager, Tables::default())
}

pub async fn insert_instance(store: &ViewerStore, id: &str, name: &str, number: Option<&str>) {
    sqlx::query(
        r#"INSERT INTO "Instance" (id, name, number, "connectionStatus", "updatedAt")
           VALUES (?1, ?2, ?3, 'open', '2024-01-01 00:00:00')"#,
    )
    .bind(id)
    .bind(name)
    .bind(number)
    .execute(store.pool_manager().pool())
    .await
    .expect("Failed to insert instance");
}

pub async fn insert_chat(
    store: &ViewerStore,
    id: &str,
    instance_id: &str,
    remote_jid: &str,
    name: Option<&str>,
    updated_at: Option<&str>,
) {
    sqlx::query(
        r#"INSERT INTO "Chat" (id, "instanceId", "remoteJid", name, "updatedAt")
           VALUES (?1, ?2, ?3, ?4, ?5)"#,
    )
    .bind(id)
    .bind(instance_id)
    .bind(remote_jid)
    .bind(name)
    .bind(updated_at)
    .execute(store.pool_manager().pool())
    .await
    .expect("Failed to insert chat");
}

/// A message row to seed; `payload` is stored as the JSON `message` column.
pub struct Fixture {
    pub id: String,
    pub instance_id: String,
    pub remote_jid: String,
    pub from_me: bool,
    pub message_type: String,
    pub status: Option<String>,
    pub timestamp: i64,
    pub payload: Value,
}

impl Fixture {
    pub fn text(id: &str, timestamp: i64, from_me: bool, text: &str) -> Self {
        Self {
            id: id.to_string(),
            instance_id: INSTANCE.to_string(),
            remote_jid: JID.to_string(),
            from_me,
            message_type: "conversation".to_string(),
            status: Some("DELIVERY_ACK".to_string()),
            timestamp,
            payload: json!({ "conversation": text }),
        }
    }

    pub fn with_payload(mut self, message_type: &str, payload: Value) -> Self {
        self.message_type = message_type.to_string();
        self.payload = payload;
        self
    }

    pub fn in_chat(mut self, instance_id: &str, remote_jid: &str) -> Self {
        self.instance_id = instance_id.to_string();
        self.remote_jid = remote_jid.to_string();
        self
    }
}

pub async fn insert_message(store: &ViewerStore, fixture: &Fixture) {
    let key = json!({
        "remoteJid": fixture.remote_jid,
        "fromMe": fixture.from_me,
        "id": fixture.id,
    });
    sqlx::query(
        r#"INSERT INTO "Message" (id, "instanceId", "key", "message", "messageType", status, "messageTimestamp")
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
    )
    .bind(&fixture.id)
    .bind(&fixture.instance_id)
    .bind(key.to_string())
    .bind(fixture.payload.to_string())
    .bind(&fixture.message_type)
    .bind(&fixture.status)
    .bind(fixture.timestamp)
    .execute(store.pool_manager().pool())
    .await
    .expect("Failed to insert message");
}

/// Five messages for [`INSTANCE`]/[`JID`], one minute apart, `m0` oldest:
/// two outgoing ones mention "hello", plus one incoming "hello" and noise in another chat.
pub async fn seeded_store() -> ViewerStore {
    let store = empty_store().await;
    let fixtures = [
        Fixture::text("m0", T0, true, "Hello there"),
        Fixture::text("m1", T0 + 60, false, "hello back"),
        Fixture::text("m2", T0 + 120, true, "unrelated"),
        Fixture::text("m3", T0 + 180, true, "x").with_payload(
            "imageMessage",
            json!({"imageMessage": {"caption": "say HELLO", "mimetype": "image/jpeg", "jpegThumbnail": "/9j/4AAQ"}}),
        ),
        Fixture::text("m4", T0 + 240, false, "bye"),
        Fixture::text("other-chat", T0 + 300, true, "hello").in_chat(INSTANCE, "5511888880000@s.whatsapp.net"),
        Fixture::text("other-instance", T0 + 360, true, "hello").in_chat("inst-y", JID),
    ];
    for fixture in &fixtures {
        insert_message(&store, fixture).await;
    }
    store
}

/// Inserts a message in [`INSTANCE`]/[`JID`] whose `message` column is stored verbatim,
/// for payloads that are not valid JSON.
pub async fn insert_raw_message(store: &ViewerStore, id: &str, timestamp: i64, raw_payload: &str) {
    let key = json!({ "remoteJid": JID, "fromMe": false, "id": id });
    sqlx::query(
        r#"INSERT INTO "Message" (id, "instanceId", "key", "message", "messageType", status, "messageTimestamp")
           VALUES (?1, ?2, ?3, ?4, 'conversation', 'READ', ?5)"#,
    )
    .bind(id)
    .bind(INSTANCE)
    .bind(key.to_string())
    .bind(raw_payload)
    .bind(timestamp)
    .execute(store.pool_manager().pool())
    .await
    .expect("Failed to insert raw message");
}
