//! NetCDF / HDF / GRIB global attributes following the CF conventions.
use serde::{Deserialize, Serialize};

use super::{BuildContext, FieldReader};
use crate::bag::MetadataBag;
use crate::record::{BaseMetadata, DocumentMetadata};

pub const FIELDS: &[&str] = &[
    "Conventions",
    "institution",
    "source",
    "history",
    "references",
    "comment",
    "experiment_id",
    "model_name_english",
    "realization",
    "project_id",
    "table_id",
    "contact",
    "File-Type-Description",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateForecastMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    /// e.g. `CF-1.6`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conventions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type_description: Option<String>,
}

pub fn build(bag: &MetadataBag, ctx: &BuildContext<'_>) -> DocumentMetadata {
    let r = FieldReader::new(bag, FIELDS, ctx.strip_control_chars);
    DocumentMetadata::ClimateForecast(ClimateForecastMetadata {
        base: r.base(ctx),
        conventions: r.text("Conventions"),
        institution: r.text("institution"),
        source: r.text("source"),
        history: r.text("history"),
        references: r.text("references"),
        comment: r.text("comment"),
        experiment_id: r.text("experiment_id"),
        model_name: r.text("model_name_english"),
        realization: r.text("realization"),
        project_id: r.text("project_id"),
        table_id: r.text("table_id"),
        contact: r.text("contact"),
        file_type_description: r.text("File-Type-Description"),
    })
}
