//! pdfsift core pipeline
//!
//! Turns decoded PDF page content (raw tables, free text) into a single
//! tabular dataset and a statistical summary of it. Pure and synchronous;
//! all I/O lives in the service crate.

pub mod cell;
pub mod dataset;
pub mod document;
pub mod export;
pub mod insights;
pub mod keyvalue;
pub mod table;

pub use cell::*;
pub use dataset::*;
pub use document::*;
pub use export::*;
pub use insights::*;
pub use keyvalue::*;
pub use table::*;
