use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

use super::pagination::Pagination;

/// Record identifier. GraphQL `ID`s arrive as strings, but some backends hand out
/// plain numbers, so both are accepted and normalised to text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Id(text),
            RawId::Number(number) => Id(number.to_string()),
        })
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Id(id.to_string())
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Id(id)
    }
}

impl From<i64> for Id {
    fn from(id: i64) -> Self {
        Id(id.to_string())
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `{ id, attributes }` wrapper every record comes in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entity<A> {
    pub id: Id,
    pub attributes: A,
}

/// Single-record envelope, `data` is null when nothing matched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntityResponse<A> {
    pub data: Option<Entity<A>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntityResponseCollection<A> {
    pub data: Vec<Entity<A>>,
    pub meta: Option<ResponseCollectionMeta>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ResponseCollectionMeta {
    pub pagination: Pagination,
}
