//! Browser glue: DOM reads, window listeners, frames and timers.

pub mod dom;
pub mod driver;

pub use driver::ScrollEngine;
