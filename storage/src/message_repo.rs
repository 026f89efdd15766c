//! Message repository: the query engine behind message listing, export and lookup.
//!
//! Uses SqlitePoolManager, the filter compiler and the record projection.
//! External: SQLite via sqlx, over the externally-owned `Message` table.

use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::export::MessagePage;
use crate::filter::{bind_all, compile_messages};
use crate::models::{MessageFilter, MessageRecord, MessageRow, StoredMessage, StoredMessageRow};
use crate::sqlite_pool::SqlitePoolManager;
use crate::tables::Tables;

const LIST_COLUMNS: &str = r#"CAST(id AS TEXT) AS id,
    json_extract("key", '$.remoteJid') AS remote_jid,
    json_extract("key", '$.fromMe') AS from_me,
    "messageType" AS message_type,
    status,
    CAST("messageTimestamp" AS INTEGER) AS message_timestamp,
    "message""#;

const RAW_COLUMNS: &str = r#"CAST(id AS TEXT) AS id,
    "key",
    "message",
    "messageType" AS message_type,
    status,
    CAST("messageTimestamp" AS INTEGER) AS message_timestamp"#;

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
    tables: Tables,
}

impl MessageRepository {
    pub fn new(pool_manager: SqlitePoolManager, tables: Tables) -> Self {
        Self {
            pool_manager,
            tables,
        }
    }

    /// Returns the total matching `filter` and the requested page, newest first.
    ///
    /// The count and the page run concurrently over the same compiled filter; if either
    /// fails the whole listing fails.
    #[instrument(skip(self, filter), fields(instance_id = %filter.instance_id, remote_jid = %filter.remote_jid))]
    pub async fn list_messages(&self, filter: &MessageFilter) -> Result<MessagePage, StorageError> {
        let compiled = compile_messages(filter)?;
        let where_sql = compiled.where_clause();
        let (paging_sql, page_params) = compiled.paged(filter.page.limit, filter.page.offset());

        let count_sql = format!("SELECT COUNT(*) FROM {} {}", self.tables.message, where_sql);
        let page_sql = format!(
            "SELECT {} FROM {} {} ORDER BY \"messageTimestamp\" DESC {}",
            LIST_COLUMNS, self.tables.message, where_sql, paging_sql
        );
        debug!(sql = %page_sql, params = page_params.len(), "Listing messages");

        let pool = self.pool_manager.pool();
        let count = bind_all(sqlx::query_as::<_, (i64,)>(&count_sql), &compiled.params)
            .fetch_one(pool);
        let page = bind_all(sqlx::query_as::<_, MessageRow>(&page_sql), &page_params)
            .fetch_all(pool);
        let ((total,), rows) = tokio::try_join!(count, page)?;

        let rows: Vec<MessageRecord> = rows.into_iter().map(MessageRecord::from).collect();
        info!(
            total = total,
            returned = rows.len(),
            page = filter.page.index,
            "Retrieved messages"
        );

        Ok(MessagePage { total, rows })
    }

    /// Fetches one message as stored, without text or media extraction.
    pub async fn get_message(&self, message_id: &str) -> Result<Option<StoredMessage>, StorageError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?1",
            RAW_COLUMNS, self.tables.message
        );
        let row = sqlx::query_as::<_, StoredMessageRow>(&sql)
            .bind(message_id)
            .fetch_optional(self.pool_manager.pool())
            .await?;

        Ok(row.map(StoredMessage::from))
    }
}
