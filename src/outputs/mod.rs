//! Output generation for the sorted offer catalog.
//!
//! # Submodules
//!
//! - [`json`]: serializes offers to the three-key JSON array (stdout and
//!   optional file)
//! - [`html`]: renders the standalone two-column HTML table
//!
//! Both writers take the offers in final sort order and never reorder them.

pub mod html;
pub mod json;
