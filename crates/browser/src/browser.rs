use std::sync::Arc;

use blog_api::{
    client::{Client, FetchPolicy},
    error::Error,
    operation::Operation,
    response::ClientResponse,
};
use blog_types::{pagination::Pagination, post::PostPage};
use tracing::{debug, error, info};

use super::{render, state::ViewState};

/// Outcome of pressing a navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved(u32),
    Ignored,
}

/// Paginated post list with the author of every post.
///
/// The current page stays within `[1, page_count]` once the page count is known;
/// if the backend shrinks under a page, the view falls back to the new last page.
/// Navigation is only live while the view is ready; after a failed request
/// nothing is sent again until the view is remounted.
pub struct PostBrowser {
    http: Arc<Client>,
    page: u32,
    page_size: u32,
    page_count: Option<u32>,
    state: ViewState<PostPage>,
}

impl PostBrowser {
    pub const PAGE_SIZE: u32 = Pagination::DEFAULT_PAGE_SIZE;

    pub fn new(http: Arc<Client>) -> Self {
        PostBrowser {
            http,
            page: 1,
            page_size: Self::PAGE_SIZE,
            page_count: None,
            state: ViewState::Idle,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    pub fn state(&self) -> &ViewState<PostPage> {
        &self.state
    }

    fn pagination(&self) -> Option<Pagination> {
        self.page_count.map(|page_count| Pagination {
            page: self.page,
            page_size: self.page_size,
            page_count,
            total: None,
        })
    }

    /// Reset to the first page and load it.
    pub async fn mount(&mut self) {
        info!("Mounting post browser");
        self.page = 1;
        self.page_count = None;
        self.state = ViewState::Idle;
        self.load().await;
    }

    pub async fn next(&mut self) -> Navigation {
        let nav = self.go_next();
        if nav != Navigation::Ignored {
            self.load().await;
        }
        nav
    }

    pub async fn previous(&mut self) -> Navigation {
        let nav = self.go_previous();
        if nav != Navigation::Ignored {
            self.load().await;
        }
        nav
    }

    /// Advance the page without fetching it; the view shows the old page as
    /// stale data until `load` completes.
    pub fn go_next(&mut self) -> Navigation {
        match self.pagination() {
            Some(pagination) if self.state.is_ready() && pagination.has_next() => {
                self.move_to(self.page + 1)
            }
            _ => {
                debug!("Next ignored at page {}", self.page);
                Navigation::Ignored
            }
        }
    }

    pub fn go_previous(&mut self) -> Navigation {
        match self.pagination() {
            Some(pagination) if self.state.is_ready() && pagination.has_previous() => {
                self.move_to(self.page - 1)
            }
            _ => {
                debug!("Previous ignored at page {}", self.page);
                Navigation::Ignored
            }
        }
    }

    fn move_to(&mut self, page: u32) -> Navigation {
        info!("Moving from page {} to page {}", self.page, page);
        self.page = page;
        self.state.begin_loading();
        Navigation::Moved(page)
    }

    /// Fetch the current page with the client's fetch policy.
    pub async fn load(&mut self) {
        self.fetch(self.http.fetch_policy()).await;
    }

    /// Fetch the current page from the network, bypassing the query cache.
    /// Unlike `mount` this keeps the current page.
    pub async fn reload(&mut self) {
        info!("Reloading page {}", self.page);
        self.fetch(FetchPolicy::NetworkOnly).await;
    }

    async fn fetch(&mut self, policy: FetchPolicy) {
        self.state.begin_loading();
        let mut result = self.fetch_page(policy).await;
        while let Ok(page) = &result {
            let pagination = page.pagination;
            if self.page <= pagination.last_page() {
                break;
            }
            let clamped = pagination.clamp(self.page);
            info!(
                "Page {} is past the last page, moving to page {}",
                self.page, clamped
            );
            self.page = clamped;
            result = self.fetch_page(FetchPolicy::NetworkOnly).await;
        }
        match &result {
            Ok(page) => {
                debug!(
                    "Page {} loaded: {} posts, {} pages",
                    self.page,
                    page.posts.len(),
                    page.pagination.page_count
                );
                self.page_count = Some(page.pagination.page_count);
            }
            Err(e) => error!("Loading page {} failed: {}", self.page, e),
        }
        self.state.settle(result);
    }

    async fn fetch_page(&self, policy: FetchPolicy) -> Result<Arc<PostPage>, Error> {
        let operation = Operation::PostsPage {
            page: self.page,
            page_size: self.page_size,
        };
        self.http
            .query_with_policy(&operation, policy)
            .await
            .and_then(ClientResponse::into_page)
    }

    pub fn render(&self) -> String {
        let pagination = self.pagination().unwrap_or(Pagination {
            page: self.page,
            page_size: self.page_size,
            page_count: 0,
            total: None,
        });
        render::view(&self.state, |data| {
            let list = render::post_list(&data.posts);
            let controls = render::controls(&pagination);
            if list.is_empty() {
                controls
            } else {
                format!("{}\n\n{}", list, controls)
            }
        })
    }
}
