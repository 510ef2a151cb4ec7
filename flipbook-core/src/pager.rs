//! Compact page-number window for the pager control.

use std::fmt;

/// One element of the pager row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagerItem {
    /// 1-based page number
    Page(usize),
    /// Gap between page 1 and the window around the current page
    LeadingEllipsis,
    /// Gap between the window and the last page
    TrailingEllipsis,
}

impl PagerItem {
    /// Stable identifier, unique within a single window
    pub fn key(&self) -> String {
        match self {
            Self::Page(n) => format!("page-{n}"),
            Self::LeadingEllipsis => "ellipsis-leading".to_string(),
            Self::TrailingEllipsis => "ellipsis-trailing".to_string(),
        }
    }

    pub fn page_number(&self) -> Option<usize> {
        match self {
            Self::Page(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for PagerItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::LeadingEllipsis | Self::TrailingEllipsis => f.write_str("..."),
        }
    }
}

/// Page numbers to show for `total_pages` with the 0-based `current_index` active.
///
/// Page 1 and the last page are always pinned. Between them a window runs from
/// one page before the current page to two pages after it, with an ellipsis on
/// either side when the window does not touch the pinned page.
pub fn visible_window(total_pages: usize, current_index: usize) -> Vec<PagerItem> {
    if total_pages == 0 {
        return Vec::new();
    }

    let mut items = vec![PagerItem::Page(1)];
    if total_pages == 1 {
        return items;
    }

    let display_page = current_index.saturating_add(1);
    let range_start = display_page.saturating_sub(1).max(2);
    let range_end = display_page.saturating_add(2).min(total_pages);

    if range_start > 2 {
        items.push(PagerItem::LeadingEllipsis);
    }

    items.extend(
        (range_start..=range_end)
            .filter(|&n| n != 1 && n != total_pages)
            .map(PagerItem::Page),
    );

    if range_end < total_pages - 1 {
        items.push(PagerItem::TrailingEllipsis);
    }

    items.push(PagerItem::Page(total_pages));
    items
}
