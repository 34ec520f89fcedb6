//! 应用层

pub mod catalog;
