//! Storage crate: read-only query and projection engine over the chat-message store.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – filter requests, MessageRecord, directory rows
//! - [`filter`] – filter compiler (WHERE fragment + ordered bind parameters)
//! - [`payload`], [`text`], [`media`] – payload decoding, text resolution, media classification
//! - [`message_repo`] – MessageRepository (count + page listing, lookup by id)
//! - [`chat_repo`] – ChatRepository (instances, chats, ping)
//! - [`export`] – MessagePage JSON shape and CSV rendering
//! - [`repository`] – Repository trait and ViewerStore
//! - [`sqlite_pool`] – SqlitePoolManager

mod chat_repo;
mod error;
mod export;
mod filter;
mod media;
mod message_repo;
mod models;
mod payload;
mod repository;
mod sqlite_pool;
mod tables;
mod text;

pub use chat_repo::ChatRepository;
pub use error::StorageError;
pub use export::{to_csv, MessagePage, CSV_HEADER};
pub use filter::{compile_chats, compile_messages, BindValue, CompiledFilter, FilterBuilder};
pub use media::{classify_media, MediaDescriptor, MediaKind};
pub use message_repo::MessageRepository;
pub use models::{
    format_timestamp, parse_bound, ChatFilter, ChatQuery, ChatRecord, Direction, InstanceRecord,
    MessageFilter, MessageQuery, MessageRecord, Page, StoredMessage, DEFAULT_PAGE_SIZE,
    MAX_CHAT_PAGE, MAX_MESSAGE_PAGE,
};
pub use payload::MessagePayload;
pub use repository::{Repository, ViewerStore};
pub use sqlite_pool::SqlitePoolManager;
pub use tables::Tables;
pub use text::resolve_text;
