//! Core data structures for page lists.

/// Reference to a single page image.
///
/// Usually a URL, but any opaque handle the host understands works; the
/// viewer only passes it through to the rendering surface.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PageRef(String);

impl PageRef {
    /// Create a new page reference.
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    /// Get the reference as a string slice (e.g. for an `img.src`).
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageRef {
    fn from(src: &str) -> Self {
        Self::new(src)
    }
}

impl From<String> for PageRef {
    fn from(src: String) -> Self {
        Self(src)
    }
}

/// Ordered, immutable list of page references for one viewing session.
///
/// The page count `N` is the length of the list and may be zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PageList {
    pages: Vec<PageRef>,
}

impl PageList {
    /// Create a page list from anything yielding page references.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use flipbook_core_view::PageList;
    ///
    /// let pages = PageList::new(["/static/uploads/1/001_a.png", "/static/uploads/1/002_b.png"]);
    /// assert_eq!(pages.len(), 2);
    /// assert_eq!(pages.get(1).map(|p| p.as_str()), Some("/static/uploads/1/002_b.png"));
    /// ```
    pub fn new<I, P>(pages: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PageRef>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty page list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of pages.
    #[inline]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the list has no pages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get the page at the given index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&PageRef> {
        self.pages.get(index)
    }

    /// Iterate over the pages in order.
    pub fn iter(&self) -> impl Iterator<Item = &PageRef> {
        self.pages.iter()
    }
}

impl<P: Into<PageRef>> FromIterator<P> for PageList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_list_accessors() {
        let pages: PageList = ["a.png", "b.png", "c.png"].into_iter().collect();

        assert_eq!(pages.len(), 3);
        assert!(!pages.is_empty());
        assert_eq!(pages.get(0), Some(&PageRef::new("a.png")));
        assert_eq!(pages.get(3), None);

        let names: Vec<&str> = pages.iter().map(PageRef::as_str).collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_empty_page_list() {
        let pages = PageList::empty();
        assert_eq!(pages.len(), 0);
        assert!(pages.is_empty());
        assert_eq!(pages.get(0), None);
    }
}
