// Public library interface for dirmap.
// The binaries drive these modules; everything here is synchronous and single-threaded.

pub mod app;
pub mod config;
pub mod layout;
pub mod render;
pub mod scanner;
pub mod tree;
pub mod ui;
