//! Page navigation driven by a flip surface.

use crate::flip::FlipSurface;
use crate::pager::{visible_window, PagerItem};

/// Current position within the active document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    current_index: usize,
    total_pages: usize,
}

/// Navigator translates navigation intents into flip requests and tracks the
/// page the flip surface reports as active.
///
/// The navigator never moves its own index on `next`/`prev`/`go_to`; only a
/// completed flip reported through [`Navigator::on_external_flip`] does.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: NavigationState,
}

impl Navigator {
    pub fn new(total_pages: usize) -> Self {
        Self {
            state: NavigationState {
                current_index: 0,
                total_pages,
            },
        }
    }

    /// Start over for a newly loaded document
    pub fn reset(&mut self, total_pages: usize) {
        tracing::debug!(total_pages, "navigator reset");
        self.state = NavigationState {
            current_index: 0,
            total_pages,
        };
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages
    }

    pub fn can_next(&self) -> bool {
        self.state.current_index + 1 < self.state.total_pages
    }

    pub fn can_prev(&self) -> bool {
        self.state.current_index > 0
    }

    /// Ask the surface to turn forward. No-op on the last page.
    pub fn next<S: FlipSurface + ?Sized>(&self, surface: &mut S) -> bool {
        if !self.can_next() {
            return false;
        }
        surface.flip_next();
        true
    }

    /// Ask the surface to turn back. No-op on the first page.
    pub fn prev<S: FlipSurface + ?Sized>(&self, surface: &mut S) -> bool {
        if !self.can_prev() {
            return false;
        }
        surface.flip_prev();
        true
    }

    /// Ask the surface to jump to a 1-based page number.
    ///
    /// Bounds are the surface's business; page 0 has no index and is dropped here.
    pub fn go_to<S: FlipSurface + ?Sized>(&self, page_number: usize, surface: &mut S) -> bool {
        let Some(index) = page_number.checked_sub(1) else {
            return false;
        };
        let accepted = surface.flip_to(index);
        if !accepted {
            tracing::debug!(page_number, "flip request rejected by surface");
        }
        accepted
    }

    /// Record a flip the surface has completed
    pub fn on_external_flip(&mut self, index: usize) -> bool {
        if index >= self.state.total_pages {
            tracing::warn!(
                index,
                total_pages = self.state.total_pages,
                "ignoring flip outside document"
            );
            return false;
        }
        self.state.current_index = index;
        true
    }

    pub fn is_current(&self, page_number: usize) -> bool {
        page_number == self.state.current_index + 1 && self.state.total_pages > 0
    }

    pub fn window(&self) -> Vec<PagerItem> {
        visible_window(self.state.total_pages, self.state.current_index)
    }

    /// Status line under the book; the first leaf is the cover
    pub fn caption(&self) -> String {
        if self.state.current_index == 0 {
            "Cover Page".to_string()
        } else {
            format!(
                "Page {} of {}",
                self.state.current_index, self.state.total_pages
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that completes every valid request immediately
    struct InstantSurface {
        pages: usize,
        active: usize,
        requests: usize,
    }

    impl InstantSurface {
        fn new(pages: usize) -> Self {
            Self {
                pages,
                active: 0,
                requests: 0,
            }
        }
    }

    impl FlipSurface for InstantSurface {
        fn page_count(&self) -> usize {
            self.pages
        }

        fn flip_next(&mut self) {
            self.requests += 1;
            if self.active + 1 < self.pages {
                self.active += 1;
            }
        }

        fn flip_prev(&mut self) {
            self.requests += 1;
            self.active = self.active.saturating_sub(1);
        }

        fn flip_to(&mut self, index: usize) -> bool {
            self.requests += 1;
            if index < self.pages {
                self.active = index;
                true
            } else {
                false
            }
        }
    }

    #[test]
    fn next_is_disabled_on_last_page() {
        let mut nav = Navigator::new(3);
        let mut surface = InstantSurface::new(3);

        for _ in 0..10 {
            nav.next(&mut surface);
            nav.on_external_flip(surface.active);
        }
        assert_eq!(nav.current_index(), 2);
        assert!(!nav.can_next());
        assert_eq!(surface.requests, 2);
    }

    #[test]
    fn prev_is_disabled_on_first_page() {
        let nav = Navigator::new(3);
        let mut surface = InstantSurface::new(3);
        assert!(!nav.prev(&mut surface));
        assert_eq!(surface.requests, 0);
    }

    #[test]
    fn requests_do_not_move_index_until_flip_completes() {
        let nav = Navigator::new(5);
        let mut surface = InstantSurface::new(5);
        assert!(nav.next(&mut surface));
        assert_eq!(nav.current_index(), 0);
        assert_eq!(surface.active, 1);
    }

    #[test]
    fn go_to_converts_page_number_to_index() {
        let mut nav = Navigator::new(10);
        let mut surface = InstantSurface::new(10);
        assert!(nav.go_to(7, &mut surface));
        nav.on_external_flip(surface.active);
        assert_eq!(nav.current_index(), 6);
        assert!(nav.is_current(7));
    }

    #[test]
    fn go_to_out_of_range_is_silently_rejected() {
        let nav = Navigator::new(4);
        let mut surface = InstantSurface::new(4);
        assert!(!nav.go_to(9, &mut surface));
        assert!(!nav.go_to(0, &mut surface));
        assert_eq!(surface.requests, 1);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn external_flip_outside_document_is_ignored() {
        let mut nav = Navigator::new(4);
        assert!(nav.on_external_flip(3));
        assert!(!nav.on_external_flip(4));
        assert_eq!(nav.current_index(), 3);
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut nav = Navigator::new(20);
        nav.on_external_flip(15);
        nav.reset(3);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.total_pages(), 3);
    }

    #[test]
    fn empty_document_disables_everything() {
        let mut nav = Navigator::new(0);
        let mut surface = InstantSurface::new(0);
        assert!(!nav.next(&mut surface));
        assert!(!nav.prev(&mut surface));
        assert!(!nav.on_external_flip(0));
        assert!(nav.window().is_empty());
        assert!(!nav.is_current(1));
    }

    #[test]
    fn caption_counts_from_cover() {
        let mut nav = Navigator::new(8);
        assert_eq!(nav.caption(), "Cover Page");
        nav.on_external_flip(3);
        assert_eq!(nav.caption(), "Page 3 of 8");
    }
}
