//! Lab sticker sheets: a fixed A4 layout engine for up to ten stickers and a
//! time-partitioned store for the resulting PDF documents.
//!
//! # Modules
//!
//! - `layout`: grid geometry, text fitting and the page display list
//! - `pdf`: deterministic single-page PDF serialization
//! - `store`: `{year}/{month}/{uuid}.pdf` document storage
//! - `canvas`: preview/publish/download/discard workflow over a repository seam
//! - `refno`: lab reference number sequence
//! - `config`, `logging`, `output`, `cli`: the `stickers` binary's plumbing
#![forbid(unsafe_code)]

pub mod canvas;
pub mod cli;
pub mod config;
pub mod error;
pub mod image_ops;
pub mod layout;
pub mod logging;
pub mod output;
pub mod pdf;
pub mod record;
pub mod refno;
pub mod store;
pub mod theme;
