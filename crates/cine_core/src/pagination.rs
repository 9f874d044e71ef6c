/// Page buttons shown around the current page.
pub const DEFAULT_VISIBLE_PAGES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    /// Elided run of pages ("...").
    Gap,
}

/// Computes the pager window: first and last page always present, up to
/// `max_visible` pages centered on `current`, gaps where pages are skipped.
/// Returns nothing when there is at most one page.
pub fn visible_pages(current: u32, total: u32, max_visible: u32) -> Vec<PageSlot> {
    if total <= 1 {
        return Vec::new();
    }
    let max_visible = max_visible.max(1);
    let current = current.clamp(1, total);
    let half = max_visible / 2;

    let mut start = current.saturating_sub(half).max(1);
    let mut end = (current + half).min(total);
    if current <= half {
        end = max_visible.min(total);
    } else if current + half >= total {
        start = (total + 1).saturating_sub(max_visible).max(1);
    }

    let mut slots = Vec::new();
    if start > 1 {
        slots.push(PageSlot::Page(1));
        if start > 2 {
            slots.push(PageSlot::Gap);
        }
    }
    slots.extend((start..=end).map(PageSlot::Page));
    if end < total {
        if end + 1 < total {
            slots.push(PageSlot::Gap);
        }
        slots.push(PageSlot::Page(total));
    }
    slots
}
