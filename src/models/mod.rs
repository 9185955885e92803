//! View models rebuilt from each API response. Nothing here is authoritative.

pub mod achievement;
pub mod finance;
pub mod group;
pub mod user;

pub use achievement::Achievement;
pub use finance::{Dashboard, Goal, MemberStats, NewGoal, Transaction, TransactionKind};
pub use group::{Group, Member};
pub use user::{AdminStats, User};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Backend ids arrive as numbers on some routes and strings on others.
pub(crate) fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

pub(crate) fn opt_id_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}
