//! Read-only repository seam used by the HTTP layer, and its SQLite implementation.

use async_trait::async_trait;

use crate::chat_repo::ChatRepository;
use crate::error::StorageError;
use crate::export::MessagePage;
use crate::message_repo::MessageRepository;
use crate::models::{ChatFilter, ChatRecord, InstanceRecord, MessageFilter, StoredMessage};
use crate::sqlite_pool::SqlitePoolManager;
use crate::tables::Tables;

#[async_trait]
pub trait Repository: Send + Sync {
    async fn ping(&self) -> Result<bool, StorageError>;
    async fn list_instances(&self) -> Result<Vec<InstanceRecord>, StorageError>;
    async fn list_chats(&self, filter: &ChatFilter) -> Result<Vec<ChatRecord>, StorageError>;
    async fn list_messages(&self, filter: &MessageFilter) -> Result<MessagePage, StorageError>;
    async fn get_message(&self, id: &str) -> Result<Option<StoredMessage>, StorageError>;
}

/// Repository over one SQLite pool.
#[derive(Clone)]
pub struct ViewerStore {
    pool_manager: SqlitePoolManager,
    chats: ChatRepository,
    messages: MessageRepository,
}

impl ViewerStore {
    pub fn new(pool_manager: SqlitePoolManager, tables: Tables) -> Self {
        Self {
            chats: ChatRepository::new(pool_manager.clone(), tables.clone()),
            messages: MessageRepository::new(pool_manager.clone(), tables),
            pool_manager,
        }
    }

    /// Opens the pool and qualifies the tables with `schema`.
    pub async fn connect(
        database_url: &str,
        schema: &str,
        max_connections: u32,
    ) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url, max_connections).await?;
        Ok(Self::new(pool_manager, Tables::in_schema(schema)))
    }

    pub fn pool_manager(&self) -> &SqlitePoolManager {
        &self.pool_manager
    }
}

#[async_trait]
impl Repository for ViewerStore {
    async fn ping(&self) -> Result<bool, StorageError> {
        self.chats.ping().await
    }

    async fn list_instances(&self) -> Result<Vec<InstanceRecord>, StorageError> {
        self.chats.list_instances().await
    }

    async fn list_chats(&self, filter: &ChatFilter) -> Result<Vec<ChatRecord>, StorageError> {
        self.chats.list_chats(filter).await
    }

    async fn list_messages(&self, filter: &MessageFilter) -> Result<MessagePage, StorageError> {
        self.messages.list_messages(filter).await
    }

    async fn get_message(&self, id: &str) -> Result<Option<StoredMessage>, StorageError> {
        self.messages.get_message(id).await
    }
}
