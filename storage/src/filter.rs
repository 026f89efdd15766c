//! Filter compiler: turns a typed filter into a WHERE fragment plus its bind parameters.
//!
//! Each predicate is pushed together with the value it binds, and placeholders are numbered
//! only once, when the fragment is rendered. A predicate template marks its value with
//! [`PARAM`]; it may reference it several times (all occurrences bind the same position).
//! Templates only ever contain fixed column names and JSON paths, never request input.

use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;

use crate::error::StorageError;
use crate::media::MediaKind;
use crate::models::{ChatFilter, MessageFilter};

/// Marker replaced by `?N` when a predicate is rendered.
pub const PARAM: &str = "{param}";

/// A value bound to one placeholder position.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

/// Ordered `(predicate template, value)` pairs, conjoined on render.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    predicates: Vec<(String, BindValue)>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, template: impl Into<String>, value: BindValue) -> &mut Self {
        self.predicates.push((template.into(), value));
        self
    }

    /// Renders the fragment; the i-th pushed value becomes placeholder `?{i+1}`.
    pub fn build(self) -> CompiledFilter {
        let mut clauses = Vec::with_capacity(self.predicates.len());
        let mut params = Vec::with_capacity(self.predicates.len());
        for (index, (template, value)) in self.predicates.into_iter().enumerate() {
            clauses.push(template.replace(PARAM, &placeholder(index + 1)));
            params.push(value);
        }
        CompiledFilter {
            predicate: clauses.join(" AND "),
            params,
        }
    }
}

/// A rendered predicate and the parameters its placeholders refer to, in position order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    pub predicate: String,
    pub params: Vec<BindValue>,
}

impl CompiledFilter {
    /// `WHERE <predicate>`, or empty when nothing constrains the query.
    pub fn where_clause(&self) -> String {
        if self.predicate.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.predicate)
        }
    }

    /// `LIMIT`/`OFFSET` bound as the two positions after the filter's own parameters,
    /// with the extended parameter list.
    pub fn paged(&self, limit: i64, offset: i64) -> (String, Vec<BindValue>) {
        let next = self.params.len() + 1;
        let sql = format!("LIMIT {} OFFSET {}", placeholder(next), placeholder(next + 1));
        let mut params = self.params.clone();
        params.push(BindValue::Int(limit));
        params.push(BindValue::Int(offset));
        (sql, params)
    }
}

/// Binds `params` in order onto a query whose placeholders were numbered by [`FilterBuilder`].
pub fn bind_all<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    params: &'q [BindValue],
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            BindValue::Text(s) => query.bind(s.as_str()),
            BindValue::Int(n) => query.bind(*n),
            BindValue::Bool(b) => query.bind(*b),
        };
    }
    query
}

/// Compiles a message filter. Instance and remote JID always come first, in that order.
pub fn compile_messages(filter: &MessageFilter) -> Result<CompiledFilter, StorageError> {
    filter.validate()?;

    let mut builder = FilterBuilder::new();
    builder
        .push(
            format!("\"instanceId\" = {}", PARAM),
            BindValue::Text(filter.instance_id.clone()),
        )
        .push(
            format!("json_extract(\"key\", '$.remoteJid') = {}", PARAM),
            BindValue::Text(filter.remote_jid.clone()),
        );

    if let Some(text) = filter.text.as_deref().filter(|t| !t.is_empty()) {
        let matches: Vec<String> = text_paths()
            .iter()
            .map(|path| {
                format!(
                    "CASE WHEN json_valid(\"message\") THEN json_extract(\"message\", '{}') END LIKE {} ESCAPE '\\'",
                    path, PARAM
                )
            })
            .collect();
        builder.push(
            format!("({})", matches.join(" OR ")),
            BindValue::Text(like_pattern(text)),
        );
    }

    if let Some(direction) = filter.direction {
        builder.push(
            format!("json_extract(\"key\", '$.fromMe') = {}", PARAM),
            BindValue::Bool(direction.is_from_me()),
        );
    }

    if let Some(start) = filter.start {
        builder.push(
            format!("\"messageTimestamp\" >= {}", PARAM),
            BindValue::Int(start),
        );
    }
    if let Some(end) = filter.end {
        builder.push(
            format!("\"messageTimestamp\" <= {}", PARAM),
            BindValue::Int(end),
        );
    }

    Ok(builder.build())
}

/// Compiles a chat filter: instance equality plus an optional JID/name substring.
pub fn compile_chats(filter: &ChatFilter) -> Result<CompiledFilter, StorageError> {
    filter.validate()?;

    let mut builder = FilterBuilder::new();
    builder.push(
        format!("\"instanceId\" = {}", PARAM),
        BindValue::Text(filter.instance_id.clone()),
    );
    if let Some(query) = filter.query.as_deref().filter(|q| !q.is_empty()) {
        builder.push(
            format!(
                "(\"remoteJid\" LIKE {p} ESCAPE '\\' OR COALESCE(name, '') LIKE {p} ESCAPE '\\')",
                p = PARAM
            ),
            BindValue::Text(like_pattern(query)),
        );
    }
    Ok(builder.build())
}

/// JSON paths of every text-bearing payload field searched by the free-text filter.
fn text_paths() -> Vec<String> {
    let mut paths = vec![
        "$.conversation".to_string(),
        "$.extendedTextMessage.text".to_string(),
    ];
    paths.extend(
        MediaKind::ALL
            .iter()
            .map(|kind| format!("$.{}.caption", kind.payload_key())),
    );
    paths
}

/// `%text%` with LIKE wildcards in `text` escaped, so it matches as a literal substring.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn placeholder(position: usize) -> String {
    format!("?{}", position)
}
