use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the upstream course catalogue.
///
/// Only the fields the record builder reads are modelled; everything else in
/// the catalogue JSON is ignored. Missing or `null` fields become `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub program_name_th: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub university_name_th: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub faculty_name_th: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub campus_name_th: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cost: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A program offering with a successfully parsed per-semester fee.
///
/// Column order matches the persisted dataset table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub university: String,
    pub faculty: String,
    pub program: String,
    pub campus: String,
    pub tuition_fee_text: String,
    pub tuition_fee_numeric: u64,
    pub more_info_url: String,
}
