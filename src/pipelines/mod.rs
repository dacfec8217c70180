//! The two remote steps chained together.
//!
//! `text` runs the analysis step on ingredient text; `image` extracts the
//! text from a label photo first and hands it to the same analysis step.

pub mod image;
pub mod text;
