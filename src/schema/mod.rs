pub mod blueprint;
pub mod builder;
pub mod grammar;
pub mod options;

pub use blueprint::{ColumnDefinition, ColumnType, KeySpec, TableBlueprint};
pub use builder::{BlueprintResolver, SchemaBuilder};
pub use options::{Order, TableOptions};
