use crate::errors::MigrateError;
use crate::schema::grammar;
use crate::schema::options::TableOptions;

/// Cassandra column type tags, including parameterized collection types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Ascii,
    BigInt,
    Blob,
    Boolean,
    Counter,
    Date,
    Decimal,
    Double,
    Float,
    Frozen,
    Inet,
    Int,
    SmallInt,
    Text,
    Time,
    Timestamp,
    TimeUuid,
    TinyInt,
    Uuid,
    Varchar,
    VarInt,
    List(String),
    Set(String),
    Map(String, String),
    Tuple(Vec<String>),
}

impl ColumnType {
    /// Render the CQL type name.
    pub fn as_cql(&self) -> String {
        match self {
            ColumnType::Ascii => "ascii".to_string(),
            ColumnType::BigInt => "bigint".to_string(),
            ColumnType::Blob => "blob".to_string(),
            ColumnType::Boolean => "boolean".to_string(),
            ColumnType::Counter => "counter".to_string(),
            ColumnType::Date => "date".to_string(),
            ColumnType::Decimal => "decimal".to_string(),
            ColumnType::Double => "double".to_string(),
            ColumnType::Float => "float".to_string(),
            ColumnType::Frozen => "frozen".to_string(),
            ColumnType::Inet => "inet".to_string(),
            ColumnType::Int => "int".to_string(),
            ColumnType::SmallInt => "smallint".to_string(),
            ColumnType::Text => "text".to_string(),
            ColumnType::Time => "time".to_string(),
            ColumnType::Timestamp => "timestamp".to_string(),
            ColumnType::TimeUuid => "timeuuid".to_string(),
            ColumnType::TinyInt => "tinyint".to_string(),
            ColumnType::Uuid => "uuid".to_string(),
            ColumnType::Varchar => "varchar".to_string(),
            ColumnType::VarInt => "varint".to_string(),
            ColumnType::List(element) => format!("list<{}>", element),
            ColumnType::Set(element) => format!("set<{}>", element),
            ColumnType::Map(key, value) => format!("map<{}, {}>", key, value),
            ColumnType::Tuple(elements) => format!("tuple<{}>", elements.join(", ")),
        }
    }
}

/// One declared column, returned by the blueprint for fluent modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    name: String,
    column_type: ColumnType,
    nullable: bool,
    is_static: bool,
}

impl ColumnDefinition {
    fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            nullable: true,
            is_static: false,
        }
    }

    /// CQL has no not-null constraint; the flag is kept for fluent parity
    /// with relational blueprints and is not rendered.
    pub fn nullable(&mut self, nullable: bool) -> &mut Self {
        self.nullable = nullable;
        self
    }

    /// Mark the column static (one value shared across a partition).
    pub fn static_column(&mut self) -> &mut Self {
        self.is_static = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    fn to_cql(&self) -> String {
        let mut cql = format!("{} {}", grammar::quote(&self.name), self.column_type.as_cql());
        if self.is_static {
            cql.push_str(" static");
        }
        cql
    }
}

/// Primary-key declaration shapes accepted by [`TableBlueprint::primary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySpec {
    /// Bare column name: single-column partition key.
    Single(String),
    /// Flat list: the first column is the partition key, the rest cluster.
    Columns(Vec<String>),
    /// Explicit partition-key group followed by clustering columns.
    Grouped {
        partition: Vec<String>,
        clustering: Vec<String>,
    },
}

impl From<&str> for KeySpec {
    fn from(column: &str) -> Self {
        KeySpec::Single(column.to_string())
    }
}

impl From<String> for KeySpec {
    fn from(column: String) -> Self {
        KeySpec::Single(column)
    }
}

impl From<Vec<&str>> for KeySpec {
    fn from(columns: Vec<&str>) -> Self {
        KeySpec::Columns(columns.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for KeySpec {
    fn from(columns: Vec<String>) -> Self {
        KeySpec::Columns(columns)
    }
}

impl From<&[&str]> for KeySpec {
    fn from(columns: &[&str]) -> Self {
        KeySpec::Columns(columns.iter().map(|c| c.to_string()).collect())
    }
}

impl From<(Vec<&str>, Vec<&str>)> for KeySpec {
    fn from((partition, clustering): (Vec<&str>, Vec<&str>)) -> Self {
        KeySpec::Grouped {
            partition: partition.into_iter().map(str::to_string).collect(),
            clustering: clustering.into_iter().map(str::to_string).collect(),
        }
    }
}

impl From<(Vec<String>, Vec<String>)> for KeySpec {
    fn from((partition, clustering): (Vec<String>, Vec<String>)) -> Self {
        KeySpec::Grouped {
            partition,
            clustering,
        }
    }
}

/// Transient, in-memory description of one table's intended structure.
///
/// Built up by fluent column and key declarations during a migration step,
/// compiled to table-creation CQL, then discarded.
#[derive(Debug, Default, Clone)]
pub struct TableBlueprint {
    table: String,
    index_prefix: String,
    columns: Vec<ColumnDefinition>,
    partition_keys: Vec<String>,
    clustering_keys: Vec<String>,
    options: Option<TableOptions>,
}

impl TableBlueprint {
    pub fn new(table: &str, index_prefix: &str) -> Self {
        Self {
            table: table.to_string(),
            index_prefix: index_prefix.to_string(),
            ..Self::default()
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Prefix applied to generated index names, when index prefixing is on.
    pub fn index_prefix(&self) -> &str {
        &self.index_prefix
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    fn add_column(&mut self, column_type: ColumnType, name: &str) -> &mut ColumnDefinition {
        self.columns.push(ColumnDefinition::new(name, column_type));
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    pub fn ascii(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Ascii, column)
    }

    pub fn bigint(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::BigInt, column)
    }

    pub fn blob(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Blob, column)
    }

    pub fn boolean(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Boolean, column)
    }

    pub fn counter(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Counter, column)
    }

    pub fn date(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Date, column)
    }

    pub fn decimal(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Decimal, column)
    }

    pub fn double(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Double, column)
    }

    pub fn float(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Float, column)
    }

    pub fn frozen(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Frozen, column)
    }

    pub fn inet(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Inet, column)
    }

    pub fn int(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Int, column)
    }

    /// Declare an integer column.
    ///
    /// Cassandra has no autoincrement, so `auto_increment` columns become
    /// generated-uuid columns instead. `unsigned` is accepted for fluent
    /// parity and ignored.
    pub fn integer(
        &mut self,
        column: &str,
        auto_increment: bool,
        unsigned: bool,
    ) -> &mut ColumnDefinition {
        let _ = unsigned;
        if auto_increment {
            return self.uuid(column);
        }

        self.add_column(ColumnType::Int, column)
    }

    pub fn smallint(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::SmallInt, column)
    }

    pub fn text(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Text, column)
    }

    pub fn time(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Time, column)
    }

    /// Declare a timestamp column. CQL timestamps carry millisecond
    /// precision; the argument is accepted for fluent parity and not
    /// rendered.
    pub fn timestamp(&mut self, column: &str, precision: Option<u32>) -> &mut ColumnDefinition {
        let _ = precision;
        self.add_column(ColumnType::Timestamp, column)
    }

    pub fn timeuuid(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::TimeUuid, column)
    }

    pub fn tinyint(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::TinyInt, column)
    }

    pub fn uuid(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Uuid, column)
    }

    pub fn varchar(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Varchar, column)
    }

    pub fn varint(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::VarInt, column)
    }

    pub fn list_collection(&mut self, column: &str, element: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::List(element.to_string()), column)
    }

    pub fn set_collection(&mut self, column: &str, element: &str) -> &mut ColumnDefinition {
        self.add_column(ColumnType::Set(element.to_string()), column)
    }

    pub fn map_collection(
        &mut self,
        column: &str,
        key: &str,
        value: &str,
    ) -> &mut ColumnDefinition {
        self.add_column(
            ColumnType::Map(key.to_string(), value.to_string()),
            column,
        )
    }

    pub fn tuple(&mut self, column: &str, elements: &[&str]) -> &mut ColumnDefinition {
        self.add_column(
            ColumnType::Tuple(elements.iter().map(|e| e.to_string()).collect()),
            column,
        )
    }

    /// Specify the primary key(s) for the table.
    ///
    /// Accepts a bare column name, a flat list (first column is the
    /// partition key, the rest cluster), or an explicit partition-key group
    /// followed by clustering columns.
    pub fn primary(&mut self, keys: impl Into<KeySpec>) {
        match keys.into() {
            KeySpec::Single(column) => {
                self.partition_keys = vec![column];
                self.clustering_keys.clear();
            }
            KeySpec::Columns(mut columns) => {
                if columns.is_empty() {
                    self.partition_keys.clear();
                    self.clustering_keys.clear();
                    return;
                }
                let clustering = columns.split_off(1);
                self.partition_keys = columns;
                self.clustering_keys = clustering;
            }
            KeySpec::Grouped {
                partition,
                clustering,
            } => {
                self.partition_keys = partition;
                self.clustering_keys = clustering;
            }
        }
    }

    /// Configure table options against a fresh [`TableOptions`].
    pub fn with_options<F>(&mut self, configure: F)
    where
        F: FnOnce(&mut TableOptions),
    {
        let mut options = TableOptions::default();
        configure(&mut options);
        self.options = Some(options);
    }

    /// Compile the primary-key clause.
    ///
    /// Fails when no partition-key column was ever declared. With zero
    /// clustering columns the clause is `primary key (("a"))`; otherwise
    /// `primary key (("a", "b"), "c", "d")`.
    pub fn compile_primary(&self) -> Result<String, MigrateError> {
        if self.partition_keys.is_empty() {
            return Err(MigrateError::NoPrimaryKey);
        }

        let partition = grammar::quote_join(&self.partition_keys);

        if self.clustering_keys.is_empty() {
            Ok(format!("primary key (({}))", partition))
        } else {
            Ok(format!(
                "primary key (({}), {})",
                partition,
                grammar::quote_join(&self.clustering_keys)
            ))
        }
    }

    /// Compile the `with` clause; empty string when no options were set.
    pub fn compile_with_options(&self) -> String {
        match &self.options {
            Some(options) => options.compile(),
            None => String::new(),
        }
    }

    /// Full `create table` DDL for this blueprint.
    pub fn to_cql(&self) -> Result<String, MigrateError> {
        let columns: Vec<String> = self.columns.iter().map(|c| c.to_cql()).collect();
        let primary = self.compile_primary()?;

        let mut cql = format!(
            "create table {} ({}, {})",
            grammar::quote(&self.table),
            columns.join(", "),
            primary
        );

        let options = self.compile_with_options();
        if !options.is_empty() {
            cql.push(' ');
            cql.push_str(&options);
        }

        Ok(cql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::options::Order;

    #[test]
    fn test_primary_single_column() {
        let mut table = TableBlueprint::new("users", "");
        table.primary("id");
        assert_eq!(table.compile_primary().unwrap(), "primary key ((\"id\"))");
    }

    #[test]
    fn test_primary_flat_list() {
        let mut table = TableBlueprint::new("users", "");
        table.primary(vec!["a", "b"]);
        assert_eq!(
            table.compile_primary().unwrap(),
            "primary key ((\"a\"), \"b\")"
        );
    }

    #[test]
    fn test_primary_grouped() {
        let mut table = TableBlueprint::new("users", "");
        table.primary((vec!["a", "b"], vec!["c", "d"]));
        assert_eq!(
            table.compile_primary().unwrap(),
            "primary key ((\"a\", \"b\"), \"c\", \"d\")"
        );
    }

    #[test]
    fn test_compile_primary_without_declaration() {
        let table = TableBlueprint::new("users", "");
        assert!(matches!(
            table.compile_primary(),
            Err(MigrateError::NoPrimaryKey)
        ));
    }

    #[test]
    fn test_primary_redeclaration_replaces_keys() {
        let mut table = TableBlueprint::new("users", "");
        table.primary(vec!["a", "b"]);
        table.primary("id");
        assert_eq!(table.compile_primary().unwrap(), "primary key ((\"id\"))");
    }

    #[test]
    fn test_integer_auto_increment_is_uuid() {
        let mut with_auto = TableBlueprint::new("users", "");
        with_auto.integer("id", true, false);

        let mut with_uuid = TableBlueprint::new("users", "");
        with_uuid.uuid("id");

        assert_eq!(with_auto.columns(), with_uuid.columns());
    }

    #[test]
    fn test_integer_without_auto_increment() {
        let mut table = TableBlueprint::new("users", "");
        table.integer("count", false, false);
        assert_eq!(table.columns()[0].column_type(), &ColumnType::Int);
    }

    #[test]
    fn test_compile_with_options_defaults_empty() {
        let table = TableBlueprint::new("users", "");
        assert_eq!(table.compile_with_options(), "");
    }

    #[test]
    fn test_with_options() {
        let mut table = TableBlueprint::new("events", "");
        table.with_options(|options| {
            options
                .clustering_order_by("created_at", Order::Desc)
                .default_ttl(3600);
        });
        assert_eq!(
            table.compile_with_options(),
            "with clustering order by (\"created_at\" desc) and default_time_to_live = 3600"
        );
    }

    #[test]
    fn test_collection_types() {
        let mut table = TableBlueprint::new("users", "");
        table.list_collection("tags", "text");
        table.set_collection("roles", "text");
        table.map_collection("attributes", "text", "int");
        table.tuple("location", &["float", "float", "text"]);

        let rendered: Vec<String> = table
            .columns()
            .iter()
            .map(|c| c.column_type().as_cql())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "list<text>",
                "set<text>",
                "map<text, int>",
                "tuple<float, float, text>"
            ]
        );
    }

    #[test]
    fn test_static_column() {
        let mut table = TableBlueprint::new("users", "");
        table.text("org_name").static_column();
        table.primary("id");
        let ddl = table.to_cql().unwrap();
        assert!(ddl.contains("\"org_name\" text static"));
    }

    #[test]
    fn test_to_cql_migrations_table() {
        let mut table = TableBlueprint::new("migrations", "");
        table.uuid("id");
        table.text("migration");
        table.int("batch");
        table.primary("id");

        assert_eq!(
            table.to_cql().unwrap(),
            "create table \"migrations\" (\"id\" uuid, \"migration\" text, \"batch\" int, primary key ((\"id\")))"
        );
    }

    #[test]
    fn test_to_cql_with_options() {
        let mut table = TableBlueprint::new("events", "");
        table.timeuuid("id");
        table.timestamp("seen_at", None);
        table.primary("id");
        table.with_options(|options| {
            options.comment("event stream");
        });

        assert_eq!(
            table.to_cql().unwrap(),
            "create table \"events\" (\"id\" timeuuid, \"seen_at\" timestamp, primary key ((\"id\"))) with comment = 'event stream'"
        );
    }
}
