//! 中间件

pub mod correlation;

pub use correlation::*;
