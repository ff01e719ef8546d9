//! Core rust implementation of modcompletion, a crate for estimating how complete the KEGG
//! modules of an organism are from the KO terms found in its annotation.
//!
//! A module definition is parsed into every combination of genes which would satisfy it
//! ([`kegg_module::combination`]), and each combination is scored against the observed genes
//! ([`kegg_module::completion`]). Whole databases are scored in parallel by [`analysis`].

pub mod analysis;
pub mod configuration;
pub mod io;
pub mod kegg_module;
