//! CLI command modules

pub mod apply;
pub mod catalog;
pub mod info;
pub mod list;
