#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Blog API error: {0}")]
    BlogApi(#[from] blog_api::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
