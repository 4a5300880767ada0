use serde::{Deserialize, Deserializer, Serialize};

/// A community meetup as served by `GET /api/`.
///
/// Every field falls back to an empty string when it is absent or `null`,
/// so a partial record still renders as a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(deserialize_with = "nullable_string")]
    pub community: String,
    /// Display date, already formatted by the source.
    #[serde(deserialize_with = "nullable_string")]
    pub date: String,
    /// Registration link.
    #[serde(deserialize_with = "nullable_string")]
    pub url: String,
    /// UTC instant the server orders by, `YYYY-MM-DD HH:MM:SS UTC`.
    #[serde(
        deserialize_with = "nullable_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub sort_date: String,
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
