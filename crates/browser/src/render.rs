use blog_types::{pagination::Pagination, post::Post};

use super::state::ViewState;

pub const LOADING: &str = "Loading...";
pub const ERROR: &str = "An error occurred.";

/// One post card: title and content, then the author's username and email
/// when the post has an author.
pub fn post_card(post: &Post) -> String {
    let mut lines = vec![post.title.clone(), post.clean_content()];
    if let Some(author) = &post.author {
        lines.push(author.username.clone());
        lines.push(author.email.clone());
    }
    lines.join("\n")
}

pub fn post_list(posts: &[Post]) -> String {
    posts
        .iter()
        .map(post_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Pagination controls, a control is left out where it would be a no-op.
pub fn controls(pagination: &Pagination) -> String {
    let mut parts = vec![];
    if pagination.has_previous() {
        parts.push("[Previous]".to_string());
    }
    parts.push(format!(
        "Page {} of {}",
        pagination.page,
        pagination.last_page()
    ));
    if pagination.has_next() {
        parts.push("[Next]".to_string());
    }
    parts.join(" ")
}

pub fn view<T, F>(state: &ViewState<T>, body: F) -> String
where
    F: Fn(&T) -> String,
{
    match state {
        ViewState::Idle => String::new(),
        ViewState::Loading { stale: None } => LOADING.to_string(),
        ViewState::Loading { stale: Some(data) } => format!("{}\n\n{}", LOADING, body(data)),
        ViewState::Error(_) => ERROR.to_string(),
        ViewState::Ready(data) => body(data),
    }
}
