//! Handlers 模块

pub mod analysis;
pub mod asset_status;
pub mod group_status;
pub mod metrics;
pub mod trends;

pub use analysis::*;
pub use asset_status::*;
pub use group_status::*;
pub use metrics::*;
pub use trends::*;
