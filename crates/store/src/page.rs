/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// A request for one page of records, ordered by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: usize,

    /// Maximum number of records on the page. Always at least 1.
    pub size: usize,
}

impl PageRequest {
    /// Creates a page request. A size of 0 falls back to the default size.
    pub fn new(page: usize, size: usize) -> Self {
        let size = if size == 0 { DEFAULT_PAGE_SIZE } else { size };
        Self { page, size }
    }

    /// Creates a request for the first page.
    pub fn first(size: usize) -> Self {
        Self::new(0, size)
    }

    /// Number of records to skip before this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of records plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records on this page.
    pub content: Vec<T>,

    /// Zero-based page index.
    pub number: usize,

    /// Requested page size.
    pub size: usize,

    /// Number of records across all pages.
    pub total_elements: usize,
}

impl<T> Page<T> {
    /// Creates a page for the given request.
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: usize) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    /// Number of pages needed to show every record.
    pub fn total_pages(&self) -> usize {
        self.total_elements.div_ceil(self.size)
    }

    /// Returns true if no page follows this one.
    pub fn is_last(&self) -> bool {
        self.number + 1 >= self.total_pages()
    }

    /// Maps the records on this page, keeping the paging totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
