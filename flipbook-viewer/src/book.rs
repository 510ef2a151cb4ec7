use flipbook_core::{Document, DocumentId, FlipSurface, Page, PageId};
use iced::widget::image::Handle;
use std::collections::HashMap;

/// The page-turn surface for one loaded document.
///
/// Holds the decoded page images and the active leaf. A flip request is queued
/// by the [`FlipSurface`] methods, picked up by the shell with
/// [`Book::take_request`], and lands when the animation timer calls
/// [`Book::complete`]. Requests arriving mid-flip are dropped.
#[derive(Debug)]
pub struct Book {
    document_id: DocumentId,
    pages: Vec<Page>,
    images: HashMap<PageId, Handle>,
    active: usize,
    requested: Option<usize>,
    in_flight: Option<usize>,
}

impl Book {
    pub fn new(document: &Document) -> Self {
        Self {
            document_id: document.id,
            pages: document
                .pages
                .iter()
                .take(document.page_bound())
                .cloned()
                .collect(),
            images: HashMap::new(),
            active: 0,
            requested: None,
            in_flight: None,
        }
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.pages.get(self.active)
    }

    pub fn is_flipping(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start animating the queued request, if any
    pub fn take_request(&mut self) -> Option<usize> {
        if self.in_flight.is_some() {
            return None;
        }
        let target = self.requested.take()?;
        self.in_flight = Some(target);
        Some(target)
    }

    /// Finish the running flip. Returns the new active index.
    pub fn complete(&mut self, target: usize) -> Option<usize> {
        if self.in_flight != Some(target) {
            return None;
        }
        self.in_flight = None;
        self.active = target;
        Some(target)
    }

    pub fn insert_image(&mut self, page_id: PageId, bytes: Vec<u8>) {
        if self.pages.iter().any(|p| p.id == page_id) {
            self.images.insert(page_id, Handle::from_bytes(bytes));
        }
    }

    pub fn active_image(&self) -> Option<&Handle> {
        self.active_page().and_then(|p| self.images.get(&p.id))
    }

    pub fn loaded_images(&self) -> usize {
        self.images.len()
    }

    fn request(&mut self, target: usize) -> bool {
        if self.in_flight.is_some() || target >= self.pages.len() || target == self.active {
            return false;
        }
        self.requested = Some(target);
        true
    }
}

impl FlipSurface for Book {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn flip_next(&mut self) {
        self.request(self.active + 1);
    }

    fn flip_prev(&mut self) {
        if let Some(target) = self.active.checked_sub(1) {
            self.request(target);
        }
    }

    fn flip_to(&mut self, index: usize) -> bool {
        self.request(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipbook_core::FileType;

    fn active_index(book: &Book) -> usize {
        book.active_page().map(|p| p.page_number - 1).unwrap()
    }

    fn document(pages: usize) -> Document {
        Document {
            id: 4,
            title: "manual.pdf".into(),
            file_type: FileType::Pdf,
            total_pages: pages,
            pages: (1..=pages)
                .map(|n| Page {
                    id: 40 + n as u64,
                    page_number: n,
                    image: format!("/media/pages/doc_4_page_{n}.jpg"),
                })
                .collect(),
        }
    }

    #[test]
    fn flip_lands_only_after_completion() {
        let mut book = Book::new(&document(3));
        book.flip_next();
        assert_eq!(active_index(&book), 0);

        let target = book.take_request();
        assert_eq!(target, Some(1));
        assert!(book.is_flipping());

        assert_eq!(book.complete(1), Some(1));
        assert_eq!(active_index(&book), 1);
        assert!(!book.is_flipping());
    }

    #[test]
    fn requests_during_flip_are_dropped() {
        let mut book = Book::new(&document(5));
        assert!(book.flip_to(3));
        book.take_request();
        assert!(!book.flip_to(4));
        assert_eq!(book.take_request(), None);
    }

    #[test]
    fn out_of_range_and_boundary_requests_are_rejected() {
        let mut book = Book::new(&document(2));
        book.flip_prev();
        assert_eq!(book.take_request(), None);
        assert!(!book.flip_to(2));
        assert!(!book.flip_to(0));
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut book = Book::new(&document(4));
        book.flip_to(2);
        book.take_request();
        assert_eq!(book.complete(3), None);
        assert_eq!(active_index(&book), 0);
    }

    #[test]
    fn leaves_beyond_reported_total_are_not_reachable() {
        let mut doc = document(4);
        doc.total_pages = 2;
        let mut book = Book::new(&doc);
        assert_eq!(book.page_count(), 2);
        assert!(!book.flip_to(3));
        assert!(book.flip_to(1));
    }

    #[test]
    fn images_for_foreign_pages_are_not_cached() {
        let mut book = Book::new(&document(2));
        book.insert_image(41, vec![0xFF, 0xD8]);
        book.insert_image(999, vec![0xFF, 0xD8]);
        assert_eq!(book.loaded_images(), 1);
        assert!(book.active_image().is_some());
    }
}
