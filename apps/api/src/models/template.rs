use serde::Serialize;

/// A read-only template descriptor from the built-in catalog.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub preview: String,
    pub is_premium: bool,
}
