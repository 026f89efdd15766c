//! Qualified names of the externally-owned tables.

/// Table identifiers interpolated into SQL. Built from configuration only.
#[derive(Debug, Clone)]
pub struct Tables {
    pub instance: String,
    pub chat: String,
    pub message: String,
}

impl Tables {
    /// Qualifies the `Instance`, `Chat` and `Message` tables with `schema`.
    pub fn in_schema(schema: &str) -> Self {
        let schema = quote_ident(schema);
        Self {
            instance: format!("{}.\"Instance\"", schema),
            chat: format!("{}.\"Chat\"", schema),
            message: format!("{}.\"Message\"", schema),
        }
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::in_schema("main")
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_schema_quotes_names() {
        let tables = Tables::in_schema("evolution");
        assert_eq!(tables.instance, "\"evolution\".\"Instance\"");
        assert_eq!(tables.chat, "\"evolution\".\"Chat\"");
        assert_eq!(tables.message, "\"evolution\".\"Message\"");
    }

    #[test]
    fn test_in_schema_escapes_embedded_quotes() {
        let tables = Tables::in_schema("a\"b");
        assert_eq!(tables.message, "\"a\"\"b\".\"Message\"");
    }
}
