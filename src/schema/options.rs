use crate::schema::grammar;

/// Sort direction for `clustering order by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_cql(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// Free-form accumulation of `with ...` clause fragments for a table.
///
/// The blueprint does not interpret the clauses; anything CQL accepts in a
/// table's `WITH` section can be declared here.
#[derive(Debug, Default, Clone)]
pub struct TableOptions {
    clauses: Vec<String>,
}

impl TableOptions {
    /// Append a raw option clause, e.g. `bloom_filter_fp_chance = 0.01`.
    pub fn option(&mut self, clause: impl Into<String>) -> &mut Self {
        self.clauses.push(clause.into());
        self
    }

    /// Set the table comment.
    pub fn comment(&mut self, text: &str) -> &mut Self {
        let literal = grammar::string_literal(text);
        self.option(format!("comment = {}", literal))
    }

    /// Set the default time-to-live, in seconds.
    pub fn default_ttl(&mut self, seconds: u32) -> &mut Self {
        self.option(format!("default_time_to_live = {}", seconds))
    }

    /// Set the tombstone grace period, in seconds.
    pub fn gc_grace_seconds(&mut self, seconds: u32) -> &mut Self {
        self.option(format!("gc_grace_seconds = {}", seconds))
    }

    /// Select the compaction strategy class.
    pub fn compaction(&mut self, class: &str) -> &mut Self {
        self.option(format!(
            "compaction = {{'class': {}}}",
            grammar::string_literal(class)
        ))
    }

    /// Order rows within a partition by the given clustering column.
    pub fn clustering_order_by(&mut self, column: &str, order: Order) -> &mut Self {
        self.option(format!(
            "clustering order by ({} {})",
            grammar::quote(column),
            order.as_cql()
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Render the `with` clause; empty string when nothing was configured.
    pub fn compile(&self) -> String {
        if self.clauses.is_empty() {
            return String::new();
        }

        format!("with {}", self.clauses.join(" and "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_empty() {
        assert_eq!(TableOptions::default().compile(), "");
    }

    #[test]
    fn test_compile_single_clause() {
        let mut options = TableOptions::default();
        options.default_ttl(86400);
        assert_eq!(options.compile(), "with default_time_to_live = 86400");
    }

    #[test]
    fn test_compile_joins_with_and() {
        let mut options = TableOptions::default();
        options
            .compaction("SizeTieredCompactionStrategy")
            .gc_grace_seconds(3600);
        assert_eq!(
            options.compile(),
            "with compaction = {'class': 'SizeTieredCompactionStrategy'} and gc_grace_seconds = 3600"
        );
    }

    #[test]
    fn test_comment_escapes_quotes() {
        let mut options = TableOptions::default();
        options.comment("table's comment");
        assert_eq!(options.compile(), "with comment = 'table''s comment'");
    }

    #[test]
    fn test_clustering_order() {
        let mut options = TableOptions::default();
        options.clustering_order_by("created_at", Order::Desc);
        assert_eq!(
            options.compile(),
            "with clustering order by (\"created_at\" desc)"
        );
    }
}
