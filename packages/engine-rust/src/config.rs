/// Smallest page size a request can resolve to.
pub const MIN_PAGE_SIZE: u32 = 1;
/// Largest page size a request can resolve to.
pub const MAX_PAGE_SIZE: u32 = 50;
/// Page size used when a request carries no usable one.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Page-size bounds for the paging engine.
///
/// Injected through [`PagerDeps`](crate::PagerDeps) so separate list views can
/// run with separate bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerConfig {
    /// Lower clamp bound for the page size.
    pub min_page_size: u32,
    /// Upper clamp bound for the page size.
    pub max_page_size: u32,
    /// Page size for absent or invalid requests.
    pub default_page_size: u32,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            min_page_size: MIN_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PagerConfig {
    /// Bounds with inverted or zero values repaired: the minimum is at least
    /// 1, the maximum at least the minimum, the default inside the range.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let min_page_size = self.min_page_size.max(1);
        let max_page_size = self.max_page_size.max(min_page_size);
        Self {
            min_page_size,
            max_page_size,
            default_page_size: self.default_page_size.clamp(min_page_size, max_page_size),
        }
    }
}
