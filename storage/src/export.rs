//! Projections of a fetched message page: JSON (`{total, rows}`) and flat CSV.

use serde::Serialize;

use crate::models::MessageRecord;

pub const CSV_HEADER: &str = "id,when,direction,jid,type,text,status";

/// One page of a message listing plus the total matching the same filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagePage {
    pub total: i64,
    pub rows: Vec<MessageRecord>,
}

/// Renders records as CSV: a fixed header, then one line per record, every field quoted.
///
/// Media is not exported. Each line break (`\n`, `\r\n` or `\r`) inside a field becomes a
/// single space and quotes are doubled. Every line, including the last, ends with `\n`.
pub fn to_csv(records: &[MessageRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + records.len() * 96);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for record in records {
        let fields = [
            record.id.as_str(),
            record.when.as_str(),
            record.direction.as_str(),
            record.jid.as_str(),
            record.message_type.as_str(),
            record.text.as_str(),
            record.status.as_str(),
        ];
        let line: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    let one_line = value.replace("\r\n", " ").replace(['\r', '\n'], " ");
    format!("\"{}\"", one_line.replace('"', "\"\""))
}
