//! View-state layer - windowing, scrolling, and glyph derivation
//!
//! Pure state with no terminal access. The presentation layer in
//! [`crate::view`] drives a [`ViewModel`] and paints the [`RenderedView`]s it
//! produces.
//!
//! # Module Structure
//!
//! - `format`: byte to hex/text glyph rules
//! - `legend`: row offset labels
//! - `scroll`: ScrollState - clamped row position and control enablement
//! - `highlight`: HighlightState - the single emphasized byte
//! - `hit_test`: HitTestResult - mapping screen cells to byte indices
//! - `rendered`: RenderedView - derived sequences for one render pass
//! - `view_model`: ViewModel - event handling and fetch discipline

pub mod format;
pub mod highlight;
pub mod legend;
pub mod rendered;
pub mod scroll;
pub mod view_model;

pub use highlight::{HighlightState, HighlightTransition};
pub use hit_test::{GridLayout, HitTestResult, Pane};
pub use rendered::RenderedView;
pub use scroll::{ScrollButtons, ScrollState};
pub use view_model::{FetchReason, Phase, Ticket, ViewModel, ViewUpdate};
