/// An animated page-turn surface.
///
/// Flip requests are fire-and-forget: the surface decides whether a request is
/// valid and, once its animation completes, reports the new active index back
/// to the [`crate::Navigator`] through `on_external_flip`. Implementations must
/// ignore requests outside `0..page_count()`.
pub trait FlipSurface {
    /// Number of leaves the surface currently holds
    fn page_count(&self) -> usize;

    fn flip_next(&mut self);

    fn flip_prev(&mut self);

    /// Request a flip to the 0-based `index`. Returns `false` when rejected.
    fn flip_to(&mut self, index: usize) -> bool;
}
