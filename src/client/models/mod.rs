//! Marvel API data models
//!
//! Typed projections of upstream JSON. Every response is validated into these
//! structures at the client boundary.

mod character;
mod envelope;
mod related;

pub use character::{Character, DEFAULT_IMAGE_SIZE, Image, Link, ResourceList, ResourceSummary};
pub use envelope::{ApiResponse, DataContainer, ErrorBody};
pub use related::{Comic, Event, Series};
