/// Configuration for paginated requests
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    pub items_per_page: u32,
    pub max_pages: Option<usize>,
}

impl PaginationConfig {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            items_per_page: items_per_page.max(1),
            max_pages: None,
        }
    }

    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = Some(max);
        self
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(500)
    }
}
