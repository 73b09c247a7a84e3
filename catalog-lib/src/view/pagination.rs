//! Pagination footer: page-number strip and "showing X to Y of Z".

use crate::api::PagePlan;

/// One entry of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    /// A run of skipped page numbers.
    Ellipsis,
}

/// The page-number strip for the pagination footer.
///
/// Shows every page when there are at most `width` of them. Otherwise it
/// always shows the first and last page, a window around the current page,
/// and an ellipsis wherever pages are skipped.
///
/// # Example
///
/// ```
/// use catalog_lib::view::{PageItem, PageWindow};
///
/// let window = PageWindow::compute(5, 10, 5);
/// assert_eq!(
///     window.items(),
///     &[
///         PageItem::Page(1),
///         PageItem::Ellipsis,
///         PageItem::Page(4),
///         PageItem::Page(5),
///         PageItem::Page(6),
///         PageItem::Ellipsis,
///         PageItem::Page(10),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    items: Vec<PageItem>,
}

impl PageWindow {
    /// Computes the strip for `current` of `total` pages.
    pub fn compute(current: usize, total: usize, width: usize) -> Self {
        let width = width.max(3);
        if total <= width {
            return Self {
                items: (1..=total).map(PageItem::Page).collect(),
            };
        }

        // Pages between first and last that may be shown.
        let inner = width - 2;
        let radius = inner / 2;
        let current = current.clamp(1, total);

        let mut start = current.saturating_sub(radius).max(2);
        let mut end = (current + radius).min(total - 1);
        if current <= inner {
            end = inner + 1;
        }
        if current + inner > total {
            start = total - inner;
        }
        let start = start.max(2);
        let end = end.min(total - 1);

        let mut items = vec![PageItem::Page(1)];
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
        items.extend((start..=end).map(PageItem::Page));
        if end < total - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));

        Self { items }
    }

    /// Returns the entries in display order.
    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    /// Returns `true` if there are no pages at all.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The "showing X to Y of Z results" numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultRange {
    /// 1-based position of the first shown record; 0 when nothing is shown.
    pub start: usize,
    /// 1-based position of the last shown record; 0 when nothing is shown.
    pub end: usize,
    pub total: usize,
}

impl ResultRange {
    /// Computes the range for a page of `shown` records fetched per `plan`.
    ///
    /// Positions are derived from the first upstream page actually requested,
    /// so they stay exact when the page size is not a multiple of the
    /// upstream page size.
    pub fn compute(plan: &PagePlan, shown: usize, total: usize) -> Self {
        if shown == 0 || total == 0 {
            return Self {
                start: 0,
                end: 0,
                total,
            };
        }
        let offset = plan.start_page.saturating_sub(1).saturating_mul(plan.upstream_size);
        Self {
            start: offset.saturating_add(1).min(total),
            end: offset.saturating_add(shown).min(total),
            total,
        }
    }
}
