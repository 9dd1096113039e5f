use serde::{Deserialize, Serialize};

use super::entity::{EntityResponse, Id};

/// Author attributes as the CMS returns them inside an entity envelope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserAttributes {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<Id>,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(username: &str, email: &str) -> User {
        User {
            id: None,
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    /// Flatten the author relation of a post, `None` when the relation is empty.
    pub fn from_relation(relation: EntityResponse<UserAttributes>) -> Option<User> {
        relation.data.map(|entity| User {
            id: Some(entity.id),
            username: entity.attributes.username.unwrap_or_default(),
            email: entity.attributes.email.unwrap_or_default(),
        })
    }
}
