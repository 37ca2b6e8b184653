use anyhow::Context;
use pis_db::updates::parse_payload;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a surrogate integer key given on the command line.
pub fn parse_id(raw: &str, what: &str) -> anyhow::Result<i64> {
    raw.trim()
        .parse::<i64>()
        .with_context(|| format!("invalid {what} id '{raw}': expected an integer"))
}

/// Parse a `--json` payload, keeping the storage layer's validation message.
pub fn parse_json<T>(raw: &str, what: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    parse_payload(raw).with_context(|| format!("invalid {what} payload"))
}
