//! Display models for CLI output
//!
//! Converts API response types into the shapes shown by each output format.

pub mod display;

pub use display::{CharacterDetail, CharacterDisplay, ComicDisplay, EventDisplay, SeriesDisplay};
