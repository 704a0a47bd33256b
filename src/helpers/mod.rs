//! Small helpers shared by the content and page layers

mod date;

pub use date::*;
