/// Pages accounted for so far against the total counted before processing began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchProgress {
    pub completed_pages: usize,
    pub total_pages: usize,
}

impl BatchProgress {
    pub fn new(total_pages: usize) -> Self {
        Self {
            completed_pages: 0,
            total_pages,
        }
    }

    /// Never moves past the total, so the fraction stays within [0, 1].
    pub fn advance(&mut self, pages: usize) {
        self.completed_pages = (self.completed_pages + pages).min(self.total_pages);
    }

    pub fn fraction(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        self.completed_pages as f64 / self.total_pages as f64
    }

    pub fn is_complete(&self) -> bool {
        self.completed_pages == self.total_pages
    }
}
