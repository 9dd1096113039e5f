use std::sync::Arc;

use blog_types::{
    entity::{EntityResponse, EntityResponseCollection},
    post::{Post, PostAttributes, PostPage},
};
use serde::{de::DeserializeOwned, Deserialize};

use super::{error::Error, operation::Operation};

/// Error entry of a GraphQL response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

impl GraphqlError {
    pub fn join(errors: &[GraphqlError]) -> String {
        errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct PostsData {
    posts: EntityResponseCollection<PostAttributes>,
}

#[derive(Deserialize)]
struct PostData {
    post: EntityResponse<PostAttributes>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostData {
    create_post: EntityResponse<PostAttributes>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePostData {
    update_post: EntityResponse<PostAttributes>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletePostData {
    delete_post: EntityResponse<PostAttributes>,
}

#[derive(Debug, Clone)]
pub enum ClientResponse {
    Posts(Arc<Vec<Post>>),
    Page(Arc<PostPage>),
    Post(Option<Arc<Post>>),
    Created(Arc<Post>),
    Updated(Arc<Post>),
    Deleted(Arc<Post>),
}

impl ClientResponse {
    pub async fn parse(operation: &Operation, resp: reqwest::Response) -> Result<Self, Error> {
        let bytes = resp.bytes().await?;
        Self::from_slice(operation, &bytes)
    }

    /// Decode a response body for `operation`. Any GraphQL error fails the whole
    /// response, partial data is discarded.
    pub fn from_slice(operation: &Operation, bytes: &[u8]) -> Result<Self, Error> {
        match operation {
            Operation::Posts | Operation::PostByTitle(_) => {
                let data: PostsData = decode(bytes)?;
                Ok(ClientResponse::Posts(Arc::new(
                    data.posts.data.into_iter().map(Post::from).collect(),
                )))
            }
            Operation::PostsPage { page, page_size } => {
                let data: PostsData = decode(bytes)?;
                Ok(ClientResponse::Page(Arc::new(PostPage::from_collection(
                    data.posts, *page, *page_size,
                ))))
            }
            Operation::PostById(_) => {
                let data: PostData = decode(bytes)?;
                Ok(ClientResponse::Post(
                    data.post.data.map(|entity| Arc::new(Post::from(entity))),
                ))
            }
            Operation::CreatePost(_) => {
                let data: CreatePostData = decode(bytes)?;
                written(data.create_post, "createPost").map(ClientResponse::Created)
            }
            Operation::UpdatePost(_, _) => {
                let data: UpdatePostData = decode(bytes)?;
                written(data.update_post, "updatePost").map(ClientResponse::Updated)
            }
            Operation::DeletePost(_) => {
                let data: DeletePostData = decode(bytes)?;
                written(data.delete_post, "deletePost").map(ClientResponse::Deleted)
            }
        }
    }

    pub fn into_posts(self) -> Result<Arc<Vec<Post>>, Error> {
        match self {
            ClientResponse::Posts(posts) => Ok(posts),
            _ => Err(Error::InvalidResponse),
        }
    }

    pub fn into_page(self) -> Result<Arc<PostPage>, Error> {
        match self {
            ClientResponse::Page(page) => Ok(page),
            _ => Err(Error::InvalidResponse),
        }
    }

    pub fn into_post(self) -> Result<Option<Arc<Post>>, Error> {
        match self {
            ClientResponse::Post(post) => Ok(post),
            _ => Err(Error::InvalidResponse),
        }
    }

    /// The record a mutation created, updated or deleted.
    pub fn into_written(self) -> Result<Arc<Post>, Error> {
        match self {
            ClientResponse::Created(post)
            | ClientResponse::Updated(post)
            | ClientResponse::Deleted(post) => Ok(post),
            _ => Err(Error::InvalidResponse),
        }
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    let response: GraphqlResponse<T> = serde_json::from_slice(bytes)?;
    if !response.errors.is_empty() {
        return Err(Error::Graphql(response.errors));
    }
    response.data.ok_or(Error::MissingData("data"))
}

fn written(
    envelope: EntityResponse<PostAttributes>,
    field: &'static str,
) -> Result<Arc<Post>, Error> {
    envelope
        .data
        .map(|entity| Arc::new(Post::from(entity)))
        .ok_or(Error::MissingData(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_types::{entity::Id, post::PostInput};

    #[test]
    fn test_parse_page() {
        let body = serde_json::json!({
            "data": {"posts": {
                "data": [
                    {"id": "1", "attributes": {"title": "one", "content": "first",
                        "user": {"data": {"id": "3", "attributes": {"username": "ann", "email": "ann@example.com"}}}}},
                    {"id": "2", "attributes": {"title": "two", "content": "second", "user": {"data": null}}}
                ],
                "meta": {"pagination": {"page": 1, "pageSize": 10, "pageCount": 3, "total": 22}}
            }}
        });
        let op = Operation::PostsPage {
            page: 1,
            page_size: 10,
        };
        let page = ClientResponse::from_slice(&op, body.to_string().as_bytes())
            .unwrap()
            .into_page()
            .unwrap();
        assert_eq!(page.posts.len(), 2);
        assert_eq!(page.pagination.page_count, 3);
        assert_eq!(page.pagination.total, Some(22));
        assert!(page.posts[0].has_author());
        assert!(!page.posts[1].has_author());
    }

    #[test]
    fn test_parse_missing_post() {
        let body = br#"{"data": {"post": {"data": null}}}"#;
        let post = ClientResponse::from_slice(&Operation::PostById(Id::from(17)), body)
            .unwrap()
            .into_post()
            .unwrap();
        assert!(post.is_none());
    }

    #[test]
    fn test_graphql_errors_fail_response() {
        let body = br#"{"data": null, "errors": [{"message": "Forbidden access", "path": ["posts"]}]}"#;
        let err = ClientResponse::from_slice(&Operation::Posts, body).unwrap_err();
        match err {
            Error::Graphql(errors) => assert_eq!(errors[0].message, "Forbidden access"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_partial_data_is_discarded() {
        let body = br#"{"data": {"posts": {"data": []}}, "errors": [{"message": "boom"}]}"#;
        assert!(matches!(
            ClientResponse::from_slice(&Operation::Posts, body),
            Err(Error::Graphql(_))
        ));
    }

    #[test]
    fn test_parse_created() {
        let body = br#"{"data": {"createPost": {"data": {"id": 21, "attributes": {"title": "dasdas", "content": "dsadsa"}}}}}"#;
        let op = Operation::CreatePost(PostInput::new("dasdas", "dsadsa"));
        let post = ClientResponse::from_slice(&op, body)
            .unwrap()
            .into_written()
            .unwrap();
        assert_eq!(post.id, Id::from(21));
        assert_eq!(post.title, "dasdas");
    }

    #[test]
    fn test_wrong_variant() {
        let resp = ClientResponse::Posts(Arc::new(vec![]));
        assert!(matches!(resp.into_page(), Err(Error::InvalidResponse)));
    }
}
