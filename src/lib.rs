//! hexview
//!
//! Windowed hex/text viewer for arbitrarily large files.
//!
//! Only the bytes needed for the visible window are ever read. The
//! [`view_state::ViewModel`] turns selection, scroll and resize events into
//! byte-range fetches served by [`source::ByteSource`], and resolved fetches
//! into glyph sequences that the terminal front end in [`view`] paints.

pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod source;
pub mod view;
pub mod view_state;
