//! Software renderers for the visible set.
//!
//! The treemap itself is defined entirely by [`crate::ui::navigation::visible_set`];
//! these turn that list into pixels or characters for the command-line front end.

pub mod ascii;
pub mod colors;
pub mod raster;
