//! Page lifecycle and per-route data loading.
//!
//! Every route owns its data for exactly one render. Loading a page runs its
//! fetch sequence against the API in order; the first failure ends the
//! sequence and the page shows its static error message. Data fetched before
//! the failure is dropped with it, so there is never a half-populated page.

pub mod dataset;
pub mod overview;
pub mod predictions;
pub mod settings;
pub mod visualizations;

use anyhow::Result;

/// Lifecycle of a page's fetched data.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PageState<T> {
    /// Fetches have not completed yet.
    #[default]
    Loading,
    /// A fetch failed; holds the page's user-facing message.
    Error(String),
    /// Every fetch succeeded.
    Ready(T),
}

impl<T> PageState<T> {
    /// Run `fetch` and settle into `Ready` or `Error`.
    ///
    /// The underlying error is logged, never shown: the caller's `message`
    /// is what the page displays.
    pub fn mount(page: &str, message: impl Into<String>, fetch: impl FnOnce() -> Result<T>) -> Self {
        match fetch() {
            Ok(data) => {
                tracing::debug!(page, "page data loaded");
                Self::Ready(data)
            }
            Err(e) => {
                tracing::error!(page, error = %format!("{e:#}"), "error fetching page data");
                Self::Error(message.into())
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_loading() {
        let state: PageState<u32> = PageState::default();
        assert_eq!(state, PageState::Loading);
        assert!(state.ready().is_none());
    }

    #[test]
    fn mount_success_is_ready() {
        let state = PageState::mount("test", "failed", || Ok(7));
        assert_eq!(state.ready(), Some(&7));
        assert!(state.error().is_none());
    }

    #[test]
    fn mount_failure_surfaces_static_message() {
        let state: PageState<u32> =
            PageState::mount("test", "Failed to load.", || anyhow::bail!("connection refused"));
        assert_eq!(state.error(), Some("Failed to load."));
        assert!(state.ready().is_none());
    }
}
