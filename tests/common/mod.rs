//! Common test utilities for the sticker renderer.
//!
//! - `fixtures`: sample records, generated logos and input files
//! - `pdf`: a small inspector for the generated PDF bytes
#![allow(dead_code)]

pub mod fixtures;
pub mod pdf;

use tracing_subscriber::EnvFilter;

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
