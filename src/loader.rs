//! Page list loading.
//!
//! The viewer needs its page references before it mounts. Hosts get them
//! from wherever they live (a server-rendered global, a JSON endpoint, a
//! test fixture) by implementing [`PageSource`].

use log::warn;

use crate::PageList;

/// Error type for page list loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not provide its page references
    #[error("page source failed: {0}")]
    Source(String),
    /// A page manifest could not be parsed
    #[cfg(feature = "json")]
    #[error("invalid page manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Trait for async page reference providers.
///
/// No `Send` bounds, so it works in both native and WASM (single-threaded)
/// contexts.
pub trait PageSource {
    /// Fetch the ordered page references.
    fn page_refs(&self) -> impl std::future::Future<Output = Result<Vec<String>, LoadError>>;
}

/// Build a page list from raw references, trimming each one and skipping
/// blank entries.
pub fn page_list_from_refs<I, S>(refs: I) -> PageList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    refs.into_iter()
        .enumerate()
        .filter_map(|(position, raw)| {
            let trimmed = raw.as_ref().trim();
            if trimmed.is_empty() {
                warn!("loader: skipping blank page reference at position {position}");
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

/// Load the page list from a source.
pub async fn load_page_list<S: PageSource>(source: &S) -> Result<PageList, LoadError> {
    let refs = source.page_refs().await?;
    Ok(page_list_from_refs(refs))
}

/// JSON payload of the form `{"pages": ["...", "..."]}`.
#[cfg(feature = "json")]
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct PageManifest {
    #[serde(default)]
    pub pages: Vec<String>,
}

#[cfg(feature = "json")]
impl PageList {
    /// Parse a `{"pages": [...]}` manifest.
    ///
    /// ```rust
    /// use flipbook_core_view::PageList;
    ///
    /// let pages = PageList::from_manifest_json(r#"{"pages": ["/a.png", "/b.png"]}"#).unwrap();
    /// assert_eq!(pages.len(), 2);
    /// ```
    pub fn from_manifest_json(s: &str) -> Result<Self, LoadError> {
        let manifest: PageManifest = serde_json::from_str(s)?;
        Ok(page_list_from_refs(manifest.pages))
    }
}

/// Read page references from a global array on `window` (e.g. `PAGES`).
///
/// A missing or non-array global reads as an empty list; non-string
/// entries are skipped.
#[cfg(feature = "web")]
pub fn window_pages(global_name: &str) -> PageList {
    let Some(window) = web_sys::window() else {
        return PageList::empty();
    };
    let Ok(value) = js_sys::Reflect::get(&window, &global_name.into()) else {
        return PageList::empty();
    };
    if !js_sys::Array::is_array(&value) {
        return PageList::empty();
    }
    let array = js_sys::Array::from(&value);
    page_list_from_refs(array.iter().filter_map(|entry| entry.as_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    struct FixedSource(Result<Vec<String>, String>);

    impl PageSource for FixedSource {
        async fn page_refs(&self) -> Result<Vec<String>, LoadError> {
            self.0.clone().map_err(LoadError::Source)
        }
    }

    // The fixture futures never pend, so one poll is enough.
    fn poll_once<F: Future>(fut: F) -> F::Output {
        let mut cx = Context::from_waker(Waker::noop());
        match pin!(fut).poll(&mut cx) {
            Poll::Ready(output) => output,
            Poll::Pending => panic!("fixture future should be ready"),
        }
    }

    #[test]
    fn test_blank_refs_are_skipped() {
        let pages = page_list_from_refs(["/a.png", "  ", " /b.png ", ""]);
        let refs: Vec<&str> = pages.iter().map(|p| p.as_str()).collect();
        assert_eq!(refs, vec!["/a.png", "/b.png"]);
    }

    #[test]
    fn test_load_page_list() {
        let source = FixedSource(Ok(vec!["/1.png".into(), "/2.png".into()]));
        let pages = poll_once(load_page_list(&source)).unwrap();
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn test_load_page_list_error() {
        let source = FixedSource(Err("offline".into()));
        let err = poll_once(load_page_list(&source)).unwrap_err();
        assert!(matches!(err, LoadError::Source(ref msg) if msg == "offline"));
        assert_eq!(err.to_string(), "page source failed: offline");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_manifest_json() {
        let pages = PageList::from_manifest_json(r#"{"pages": ["/x.png", ""]}"#).unwrap();
        assert_eq!(pages.len(), 1);

        let empty = PageList::from_manifest_json("{}").unwrap();
        assert!(empty.is_empty());

        assert!(matches!(
            PageList::from_manifest_json("not json"),
            Err(LoadError::Manifest(_))
        ));
    }
}
