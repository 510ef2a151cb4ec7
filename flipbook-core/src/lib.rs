//! Core of the flipbook document viewer.
//!
//! Holds everything that does not depend on a UI toolkit: the document model,
//! page navigation and its pager window, the flip-surface seam, the document
//! store client and ordering of concurrent document loads.

pub mod config;
pub mod error;
pub mod flip;
pub mod loader;
pub mod model;
pub mod navigator;
pub mod pager;
pub mod store;

pub use config::ViewerConfig;
pub use error::{ConfigError, Result, StoreError};
pub use flip::FlipSurface;
pub use loader::{LoadSequencer, LoadTicket};
pub use model::{Document, DocumentId, DocumentSummary, FileType, Page, PageId};
pub use navigator::{NavigationState, Navigator};
pub use pager::{visible_window, PagerItem};
pub use store::DocumentStore;
