use super::config::PaginationConfig;

/// Tracks the page cursor of a Hydra collection walk
pub struct PageIterator {
    current_page: usize,
    fetched: usize,
    config: PaginationConfig,
}

impl PageIterator {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            current_page: 1,
            fetched: 0,
            config,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> u32 {
        self.config.items_per_page
    }

    pub fn has_reached_max(&self) -> bool {
        self.config.max_pages.is_some_and(|max| self.current_page > max)
    }

    /// Record a received page; `true` when another page should be requested.
    ///
    /// An empty page always stops. Without a total, a short page is the last.
    pub fn record_page(&mut self, received: usize, total: Option<u64>) -> bool {
        self.fetched += received;
        if received == 0 {
            return false;
        }

        let per_page = self.config.items_per_page as u64;
        let more = match total {
            Some(total) => (self.current_page as u64) * per_page < total,
            None => received as u64 >= per_page,
        };

        if more {
            self.current_page += 1;
        }
        more
    }

    pub fn fetched(&self) -> usize {
        self.fetched
    }
}
