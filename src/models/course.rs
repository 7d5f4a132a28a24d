use serde::Serialize;

/// Static course reference data (seeded by the schema migration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub total_classes: Option<i64>,
}
