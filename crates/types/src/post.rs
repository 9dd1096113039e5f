use serde::{Deserialize, Serialize};

use super::{
    entity::{Entity, EntityResponse, EntityResponseCollection, Id},
    pagination::Pagination,
    user::{User, UserAttributes},
};

/// Post attributes inside the entity envelope. `user` is only present when the
/// query asked for the relation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostAttributes {
    pub title: Option<String>,
    pub content: Option<String>,
    pub user: Option<EntityResponse<UserAttributes>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Id,
    pub title: String,
    pub content: String,
    pub author: Option<User>,
}

impl Post {
    pub fn has_author(&self) -> bool {
        self.author.is_some()
    }

    pub fn clean_content(&self) -> String {
        crate::utils::plain_text(&self.content)
    }
}

impl From<Entity<PostAttributes>> for Post {
    fn from(entity: Entity<PostAttributes>) -> Self {
        let attributes = entity.attributes;
        Post {
            id: entity.id,
            title: attributes.title.unwrap_or_default(),
            content: attributes.content.unwrap_or_default(),
            author: attributes.user.and_then(User::from_relation),
        }
    }
}

/// One page of posts together with the metadata it was served with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub pagination: Pagination,
}

impl PostPage {
    /// Build a page from a collection envelope. A backend that omits the
    /// metadata is treated as serving everything on a single page.
    pub fn from_collection(
        collection: EntityResponseCollection<PostAttributes>,
        page: u32,
        page_size: u32,
    ) -> PostPage {
        let posts: Vec<Post> = collection.data.into_iter().map(Post::from).collect();
        let pagination = match collection.meta {
            Some(meta) => meta.pagination,
            None => Pagination::new(page, page_size, posts.len() as u32),
        };
        PostPage { posts, pagination }
    }
}

/// Payload of a create mutation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}

impl PostInput {
    pub fn new(title: &str, content: &str) -> PostInput {
        PostInput {
            title: title.to_string(),
            content: content.to_string(),
        }
    }
}

/// Payload of an update mutation, unset fields are left untouched by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PostPatch {
    pub fn title(title: &str) -> PostPatch {
        PostPatch {
            title: Some(title.to_string()),
            content: None,
        }
    }
}
