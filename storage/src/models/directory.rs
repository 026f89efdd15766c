//! Instance and chat rows returned by the directory lookups.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InstanceRecord {
    pub id: String,
    pub name: Option<String>,
    pub number: Option<String>,
    pub connection_status: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatRecord {
    pub id: String,
    pub remote_jid: String,
    pub name: Option<String>,
    pub updated_at: Option<String>,
}
