use serde::{Deserialize, Serialize};

use super::{BuildContext, FieldReader};
use crate::bag::MetadataBag;
use crate::record::{BaseMetadata, DocumentMetadata};

pub const FIELDS: &[&str] = &[
    "database:table_name",
    "database:row_count",
    "database:column_count",
    "dbf:codepage",
    "dbf:version",
];

/// SQLite, DBF and Access files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub table_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

pub fn build(bag: &MetadataBag, ctx: &BuildContext<'_>) -> DocumentMetadata {
    let r = FieldReader::new(bag, FIELDS, ctx.strip_control_chars);
    DocumentMetadata::Database(DatabaseMetadata {
        base: r.base(ctx),
        table_names: r.texts("database:table_name"),
        row_count: r.number("database:row_count"),
        column_count: r.number("database:column_count"),
        codepage: r.text("dbf:codepage"),
        version: r.text("dbf:version"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::test_support::ctx;

    #[test]
    fn every_table_name_is_kept() {
        let bag = MetadataBag::new()
            .with("database:table_name", "users")
            .with("database:table_name", " ")
            .with("database:table_name", "orders")
            .with("database:row_count", "-1");

        let DocumentMetadata::Database(db) = build(&bag, &ctx()) else {
            panic!("expected database variant");
        };
        assert_eq!(db.table_names, ["users", "orders"]);
        assert_eq!(db.row_count, None);
    }
}
