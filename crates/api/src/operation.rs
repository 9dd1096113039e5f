use std::fmt::{Display, Formatter};

use blog_types::{
    entity::Id,
    post::{PostInput, PostPatch},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Every GraphQL operation the front-end knows how to send.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Operation {
    Posts,
    PostsPage { page: u32, page_size: u32 },
    PostByTitle(String),
    PostById(Id),
    CreatePost(PostInput),
    UpdatePost(Id, PostPatch),
    DeletePost(Id),
}

const GET_ALL_POSTS: &str = r#"query GetAllPosts {
  posts {
    data {
      id
      attributes {
        title
        content
      }
    }
  }
}"#;

const GET_POSTS: &str = r#"query GetPosts($page: Int, $pageSize: Int) {
  posts(pagination: { page: $page, pageSize: $pageSize }) {
    data {
      id
      attributes {
        title
        content
        user {
          data {
            id
            attributes {
              username
              email
            }
          }
        }
      }
    }
    meta {
      pagination {
        page
        pageSize
        pageCount
        total
      }
    }
  }
}"#;

const GET_POST_BY_TITLE: &str = r#"query GetPostByTitle($title: String!) {
  posts(filters: { title: { eq: $title } }) {
    data {
      id
      attributes {
        title
        content
      }
    }
  }
}"#;

// single lookups use the singular entity name
const GET_POST_BY_ID: &str = r#"query GetPostById($id: ID!) {
  post(id: $id) {
    data {
      id
      attributes {
        title
        content
      }
    }
  }
}"#;

const CREATE_POST: &str = r#"mutation CreatePost($title: String!, $content: String!) {
  createPost(data: { title: $title, content: $content }) {
    data {
      id
      attributes {
        title
        content
      }
    }
  }
}"#;

const UPDATE_POST: &str = r#"mutation UpdatePost($id: ID!, $data: PostInput!) {
  updatePost(id: $id, data: $data) {
    data {
      id
      attributes {
        title
        content
      }
    }
  }
}"#;

const DELETE_POST: &str = r#"mutation DeletePost($id: ID!) {
  deletePost(id: $id) {
    data {
      id
      attributes {
        title
        content
      }
    }
  }
}"#;

/// JSON body of a GraphQL-over-HTTP POST.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: &'static str,
    pub variables: Value,
    pub operation_name: &'static str,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Posts => "GetAllPosts",
            Self::PostsPage { .. } => "GetPosts",
            Self::PostByTitle(_) => "GetPostByTitle",
            Self::PostById(_) => "GetPostById",
            Self::CreatePost(_) => "CreatePost",
            Self::UpdatePost(_, _) => "UpdatePost",
            Self::DeletePost(_) => "DeletePost",
        }
    }

    pub fn document(&self) -> &'static str {
        match self {
            Self::Posts => GET_ALL_POSTS,
            Self::PostsPage { .. } => GET_POSTS,
            Self::PostByTitle(_) => GET_POST_BY_TITLE,
            Self::PostById(_) => GET_POST_BY_ID,
            Self::CreatePost(_) => CREATE_POST,
            Self::UpdatePost(_, _) => UPDATE_POST,
            Self::DeletePost(_) => DELETE_POST,
        }
    }

    pub fn variables(&self) -> Value {
        match self {
            Self::Posts => json!({}),
            Self::PostsPage { page, page_size } => json!({ "page": page, "pageSize": page_size }),
            Self::PostByTitle(title) => json!({ "title": title }),
            Self::PostById(id) | Self::DeletePost(id) => json!({ "id": id }),
            Self::CreatePost(input) => json!({ "title": input.title, "content": input.content }),
            Self::UpdatePost(id, patch) => json!({ "id": id, "data": patch }),
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::CreatePost(_) | Self::UpdatePost(_, _) | Self::DeletePost(_)
        )
    }

    pub fn request(&self) -> GraphqlRequest {
        GraphqlRequest {
            query: self.document(),
            variables: self.variables(),
            operation_name: self.name(),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PostsPage { page, page_size } => {
                write!(f, "{}(page: {}, pageSize: {})", self.name(), page, page_size)
            }
            Self::PostByTitle(title) => write!(f, "{}(title: {:?})", self.name(), title),
            Self::PostById(id) | Self::UpdatePost(id, _) | Self::DeletePost(id) => {
                write!(f, "{}(id: {})", self.name(), id)
            }
            _ => write!(f, "{}", self.name()),
        }
    }
}
