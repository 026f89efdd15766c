mod directory;
pub(crate) mod message_filter;
pub(crate) mod message_query;
mod message_record;

pub use directory::{ChatRecord, InstanceRecord};
pub use message_filter::{
    ChatFilter, Direction, MessageFilter, Page, DEFAULT_PAGE_SIZE, MAX_CHAT_PAGE,
    MAX_MESSAGE_PAGE,
};
pub use message_query::{format_timestamp, parse_bound, ChatQuery, MessageQuery};
pub use message_record::{MessageRecord, MessageRow, StoredMessage, StoredMessageRow};
