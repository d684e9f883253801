//! CQL fragment formatting shared by the blueprint and the builder.

/// Double-quote an identifier, doubling any embedded quotes.
pub fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Comma-join a list of identifiers, each double-quoted.
pub fn quote_join<S: AsRef<str>>(idents: &[S]) -> String {
    idents
        .iter()
        .map(|i| quote(i.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Single-quote a string literal, doubling embedded quotes.
pub fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Parameterized existence check against the cluster schema tables.
pub fn compile_table_exists() -> &'static str {
    "select table_name from system_schema.tables where keyspace_name = ? and table_name = ?"
}
