use std::{fmt::Display, sync::Arc};

/// Render state of a data-backed view. Exactly one variant holds at any time,
/// so every render has to handle all of them.
#[derive(Debug)]
pub enum ViewState<T> {
    /// Not mounted yet.
    Idle,
    /// A request is in flight; `stale` is whatever the view showed before it.
    Loading { stale: Option<Arc<T>> },
    /// The last request failed. The reason is for logs only.
    Error(String),
    Ready(Arc<T>),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ViewState::Error(_))
    }

    /// Fresh data when ready, stale data while loading.
    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            ViewState::Ready(data) => Some(data),
            ViewState::Loading { stale } => stale.as_ref(),
            _ => None,
        }
    }

    /// Enter `Loading`, keeping the data currently on screen as stale.
    pub fn begin_loading(&mut self) {
        let stale = match std::mem::replace(self, ViewState::Idle) {
            ViewState::Ready(data) => Some(data),
            ViewState::Loading { stale } => stale,
            ViewState::Idle | ViewState::Error(_) => None,
        };
        *self = ViewState::Loading { stale };
    }

    pub fn settle<E: Display>(&mut self, result: Result<Arc<T>, E>) {
        *self = match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}
