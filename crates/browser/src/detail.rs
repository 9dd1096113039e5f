use std::sync::Arc;

use blog_api::{client::Client, operation::Operation, response::ClientResponse};
use blog_types::{entity::Id, post::Post};
use tracing::{error, info};

use super::{render, state::ViewState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(Id),
    Title(String),
}

/// Posts found by a single lookup. An id matches at most one post, a title may
/// match several; no match is an empty list, not an error.
pub struct PostDetail {
    http: Arc<Client>,
    lookup: Lookup,
    state: ViewState<Vec<Post>>,
}

impl PostDetail {
    pub fn by_id(http: Arc<Client>, id: Id) -> Self {
        Self::new(http, Lookup::Id(id))
    }

    pub fn by_title(http: Arc<Client>, title: &str) -> Self {
        Self::new(http, Lookup::Title(title.to_string()))
    }

    fn new(http: Arc<Client>, lookup: Lookup) -> Self {
        PostDetail {
            http,
            lookup,
            state: ViewState::Idle,
        }
    }

    pub fn lookup(&self) -> &Lookup {
        &self.lookup
    }

    pub fn state(&self) -> &ViewState<Vec<Post>> {
        &self.state
    }

    pub async fn mount(&mut self) {
        let operation = match &self.lookup {
            Lookup::Id(id) => Operation::PostById(id.clone()),
            Lookup::Title(title) => Operation::PostByTitle(title.clone()),
        };
        info!("Mounting post detail for {}", operation);
        self.state.begin_loading();
        let result = self.http.query(&operation).await.and_then(|resp| match resp {
            ClientResponse::Post(post) => Ok(Arc::new(
                post.map(|post| vec![(*post).clone()]).unwrap_or_default(),
            )),
            other => other.into_posts(),
        });
        if let Err(e) = &result {
            error!("{} failed: {}", operation, e);
        }
        self.state.settle(result);
    }

    pub fn render(&self) -> String {
        render::view(&self.state, |posts| render::post_list(posts))
    }
}
