//! # Prodmon Storage 模块
//!
//! 本模块提供服务层使用的数据源抽象，以及用于测试和演示的内存实现。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：定义所有数据源的异步 Trait 接口
//! 2. **数据模型层** (`models.rs`)：定义存储记录结构
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **验证辅助层** (`validation.rs`)：correlation id 与时间区间校验
//! 5. **实现层** (`in_memory/`)：内存存储实现
//!
//! ## 核心特性
//!
//! - **请求关联**：所有存储接口都显式接收 `CallContext`，日志与错误可按 correlation id 追踪
//! - **客户隔离**：资产查询同时按资产 GUID 与客户 GUID 过滤
//! - **新老井分流**：老井历史走 `DataHistorySqlStore`，新井走 `TimeSeriesStore`
//! - **批量查询**：分组表格按来源类型批量取值，避免逐井查询
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use prodmon_storage::{AssetStore, InMemoryAssetStore};
//! use domain::CallContext;
//!
//! let store = InMemoryAssetStore::new();
//! let ctx = CallContext::new("corr-1", None);
//! let asset = store.find_asset(&ctx, asset_id, customer_id).await?;
//! ```
//!
//! ## 设计约束
//!
//! - **禁止在服务层拼装查询**：服务只通过 trait 访问数据
//! - **显式上下文**：所有数据访问方法必须显式接收 `CallContext`
//! - **只读接口**：服务层只读取数据，写入由采集侧负责；内存实现提供 `insert_*` 用于装载数据

pub mod error;
pub mod in_memory;
pub mod models;
pub mod traits;
pub mod validation;

pub use error::*;
pub use models::*;
pub use traits::*;
pub use validation::*;

pub use in_memory::{
    InMemoryAnalysisStore, InMemoryAssetStore, InMemoryDataHistorySqlStore,
    InMemoryGroupStatusStore, InMemoryHistoricalStore, InMemoryLocalePhraseStore,
    InMemoryTimeSeriesStore, InMemoryUserPreferenceStore,
};
