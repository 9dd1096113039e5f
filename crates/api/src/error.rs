use super::response::GraphqlError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Status code: {0}")]
    StatusCode(u16),

    #[error("GraphQL errors: {}", GraphqlError::join(.0))]
    Graphql(Vec<GraphqlError>),

    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing data: {0}")]
    MissingData(&'static str),

    #[error("Invalid response")]
    InvalidResponse,
}
