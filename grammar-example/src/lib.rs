//! 基于扫描器的示例语法
//!
//! Grammars built on the scanner and value frameworks: toolbar commands,
//! variable declarations, the resource under a cursor, and JSON.

pub mod cli;
pub mod json;
pub mod resource;
pub mod toolbar;
pub mod vars;

pub use json::{parse_json, JsonValue};
pub use resource::{parse_resource, ResourceRef};
pub use toolbar::{parse_toolbar, Arg, Part, ToolbarData};
pub use vars::{parse_var_decl, VarDecl, VarMap};

/// Escape unit shared by the toolbar, variable and resource grammars.
pub const ESCAPE: char = '\\';
