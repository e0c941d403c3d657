//! 多语言短语查找、用户偏好解析与展示格式化。

pub mod format;
pub mod phrases;
pub mod preferences;
pub mod resolver;

pub use phrases::PhraseKey;
pub use preferences::PreferenceResolver;
pub use resolver::{DEFAULT_LOCALE, PhraseResolver, Phrases};
