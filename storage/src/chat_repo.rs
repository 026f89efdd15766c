//! Directory lookups: instances and the chats of one instance.

use tracing::info;

use crate::error::StorageError;
use crate::filter::{bind_all, compile_chats};
use crate::models::{ChatFilter, ChatRecord, InstanceRecord};
use crate::sqlite_pool::SqlitePoolManager;
use crate::tables::Tables;

#[derive(Clone)]
pub struct ChatRepository {
    pool_manager: SqlitePoolManager,
    tables: Tables,
}

impl ChatRepository {
    pub fn new(pool_manager: SqlitePoolManager, tables: Tables) -> Self {
        Self {
            pool_manager,
            tables,
        }
    }

    /// All instances, ordered by name.
    pub async fn list_instances(&self) -> Result<Vec<InstanceRecord>, StorageError> {
        let sql = format!(
            r#"SELECT CAST(id AS TEXT) AS id,
                name,
                CAST(number AS TEXT) AS number,
                "connectionStatus" AS connection_status,
                CAST("updatedAt" AS TEXT) AS updated_at
            FROM {} ORDER BY name ASC"#,
            self.tables.instance
        );
        let instances = sqlx::query_as::<_, InstanceRecord>(&sql)
            .fetch_all(self.pool_manager.pool())
            .await?;

        info!("Retrieved {} instances", instances.len());
        Ok(instances)
    }

    /// One page of an instance's chats, most recently updated first.
    pub async fn list_chats(&self, filter: &ChatFilter) -> Result<Vec<ChatRecord>, StorageError> {
        let compiled = compile_chats(filter)?;
        let (paging_sql, params) = compiled.paged(filter.page.limit, filter.page.offset());
        let sql = format!(
            r#"SELECT CAST(id AS TEXT) AS id,
                "remoteJid" AS remote_jid,
                name,
                CAST("updatedAt" AS TEXT) AS updated_at
            FROM {} {}
            ORDER BY "updatedAt" DESC NULLS LAST {}"#,
            self.tables.chat,
            compiled.where_clause(),
            paging_sql
        );

        let chats = bind_all(sqlx::query_as::<_, ChatRecord>(&sql), &params)
            .fetch_all(self.pool_manager.pool())
            .await?;

        info!(
            "Retrieved {} chats for instance {}",
            chats.len(),
            filter.instance_id
        );
        Ok(chats)
    }

    /// Round-trips `SELECT 1`; true when the store answered as expected.
    pub async fn ping(&self) -> Result<bool, StorageError> {
        let (one,): (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(one == 1)
    }
}
