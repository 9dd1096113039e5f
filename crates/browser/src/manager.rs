use std::sync::Arc;

use blog_api::{client::Client, operation::Operation, response::ClientResponse};
use blog_types::{
    entity::Id,
    post::{Post, PostInput, PostPatch},
};
use tracing::{error, info};

use super::{error::Error, render, state::ViewState};

/// Full post list with write access. Every write is awaited and followed by a
/// network refetch of the list; a failed write puts the view in the error state.
pub struct PostManager {
    http: Arc<Client>,
    state: ViewState<Vec<Post>>,
}

impl PostManager {
    pub fn new(http: Arc<Client>) -> Self {
        PostManager {
            http,
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<Post>> {
        &self.state
    }

    pub fn posts(&self) -> &[Post] {
        self.state
            .data()
            .map(|posts| posts.as_slice())
            .unwrap_or(&[])
    }

    pub async fn mount(&mut self) {
        info!("Mounting post manager");
        self.state.begin_loading();
        let result = self
            .http
            .query(&Operation::Posts)
            .await
            .and_then(ClientResponse::into_posts);
        self.settle(result);
    }

    pub async fn refetch(&mut self) {
        self.state.begin_loading();
        let result = self
            .http
            .refetch(&Operation::Posts)
            .await
            .and_then(ClientResponse::into_posts);
        self.settle(result);
    }

    pub async fn add_post(&mut self, input: PostInput) -> Result<Arc<Post>, Error> {
        self.write(Operation::CreatePost(input)).await
    }

    pub async fn edit_post(&mut self, id: Id, patch: PostPatch) -> Result<Arc<Post>, Error> {
        self.write(Operation::UpdatePost(id, patch)).await
    }

    pub async fn remove_post(&mut self, id: Id) -> Result<Arc<Post>, Error> {
        self.write(Operation::DeletePost(id)).await
    }

    async fn write(&mut self, operation: Operation) -> Result<Arc<Post>, Error> {
        let result = self
            .http
            .execute(&operation)
            .await
            .and_then(ClientResponse::into_written);
        match result {
            Ok(post) => {
                info!("{} done, post {}", operation, post.id);
                self.refetch().await;
                Ok(post)
            }
            Err(e) => {
                error!("{} failed: {}", operation, e);
                self.state = ViewState::Error(e.to_string());
                Err(e.into())
            }
        }
    }

    fn settle(&mut self, result: Result<Arc<Vec<Post>>, blog_api::error::Error>) {
        if let Err(e) = &result {
            error!("Loading posts failed: {}", e);
        }
        self.state.settle(result);
    }

    pub fn render(&self) -> String {
        render::view(&self.state, |posts| render::post_list(posts))
    }
}
