//! Fixed-size pagination over a derived view.

use crate::model::Record;

/// Rows per page in the dashboard and the `list` command.
pub const PAGE_SIZE: usize = 15;

/// A zero-based window into a view.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    /// Clamped page index
    pub index: usize,
    /// Total page count, never zero
    pub count: usize,
    /// Number of rows in the whole view
    pub total_rows: usize,
    pub rows: &'a [&'a Record],
}

impl Page<'_> {
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.index + 1 >= self.count
    }

    /// One-based "page X of Y" label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.index + 1, self.count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Paginator {
    /// Create a paginator; a zero size is treated as one.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self {
            size: if size == 0 { 1 } else { size },
        }
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// `max(1, ceil(len / size))`
    #[must_use]
    pub const fn page_count(&self, len: usize) -> usize {
        let pages = len.div_ceil(self.size);
        if pages == 0 { 1 } else { pages }
    }

    /// Clamp a requested index into `[0, page_count - 1]`.
    #[must_use]
    pub const fn clamp(&self, page: usize, len: usize) -> usize {
        let last = self.page_count(len) - 1;
        if page > last { last } else { page }
    }

    /// Slice out a page, clamping the index first.
    #[must_use]
    pub fn page<'a>(&self, view: &'a [&'a Record], page: usize) -> Page<'a> {
        let index = self.clamp(page, view.len());
        let start = (index * self.size).min(view.len());
        let end = (start + self.size).min(view.len());
        Page {
            index,
            count: self.page_count(view.len()),
            total_rows: view.len(),
            rows: &view[start..end],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<Record> {
        (0..n as i64).map(Record::new).collect()
    }

    #[test]
    fn test_thirty_seven_records() {
        let data = records(37);
        let view: Vec<&Record> = data.iter().collect();
        let paginator = Paginator::default();

        assert_eq!(paginator.page_count(view.len()), 3);
        let last = paginator.page(&view, 2);
        assert_eq!(last.rows.len(), 7);
        assert_eq!(last.rows[0].id.0, 30);

        let clamped = paginator.page(&view, 5);
        assert_eq!(clamped.index, 2);
        assert_eq!(clamped.rows.len(), 7);
        assert!(clamped.is_last());
    }

    #[test]
    fn test_empty_view_has_one_page() {
        let view: Vec<&Record> = Vec::new();
        let paginator = Paginator::default();
        assert_eq!(paginator.page_count(0), 1);
        let page = paginator.page(&view, 3);
        assert_eq!(page.index, 0);
        assert!(page.rows.is_empty());
        assert_eq!(page.label(), "Page 1 of 1");
    }

    #[test]
    fn test_exact_multiple() {
        let paginator = Paginator::default();
        assert_eq!(paginator.page_count(30), 2);
        assert_eq!(paginator.page_count(31), 3);
        assert_eq!(paginator.clamp(1, 15), 0);
    }

    #[test]
    fn test_zero_size_treated_as_one() {
        assert_eq!(Paginator::new(0).page_count(4), 4);
    }
}
