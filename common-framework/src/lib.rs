//! Common Framework
//!
//! 提供 scanner-framework 和 value-framework 之间的共同组件。

pub mod config;
pub mod position;
pub mod source;

pub use config::{ConfigError, ScanConfig};
pub use position::{Pos, Span};
pub use source::Source;
