//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。
//!
//! 包含以下实现：
//! - AssetStore: InMemoryAssetStore
//! - UserPreferenceStore: InMemoryUserPreferenceStore
//! - LocalePhraseStore: InMemoryLocalePhraseStore
//! - AnalysisStore: InMemoryAnalysisStore
//! - HistoricalStore: InMemoryHistoricalStore
//! - DataHistorySqlStore: InMemoryDataHistorySqlStore
//! - TimeSeriesStore: InMemoryTimeSeriesStore
//! - GroupStatusStore: InMemoryGroupStatusStore

pub mod analysis;
pub mod asset;
pub mod group_status;
pub mod history;
pub mod phrase;
pub mod preference;
pub mod time_series;

pub use analysis::*;
pub use asset::*;
pub use group_status::*;
pub use history::*;
pub use phrase::*;
pub use preference::*;
pub use time_series::*;
