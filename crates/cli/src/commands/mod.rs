//! CLI command handlers

pub mod balance;
pub mod demo;
pub mod identifiers;
