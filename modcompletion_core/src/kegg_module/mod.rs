//! This module provides the core structures for representing KEGG modules, expanding them into
//! gene combinations, and scoring those combinations.

pub mod combination;
pub mod completion;
pub mod expression;
pub mod module;
