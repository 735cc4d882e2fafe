#![doc = include_str!("../README.md")]
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    clippy::branches_sharing_code,
    clippy::map_unwrap_or,
    clippy::match_wildcard_for_single_variants,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::needless_for_each,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::unreadable_literal,
    clippy::unwrap_used,
    clippy::expect_used,
    deprecated_in_future,
    ellipsis_inclusive_range_patterns,
    future_incompatible,
    missing_copy_implementations,
    missing_debug_implementations,
    // missing_docs,
    nonstandard_style,
    rust_2018_compatibility,
    rust_2018_idioms,
    rust_2021_compatibility,
    rustdoc::bare_urls,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::private_intra_doc_links,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused,
    variant_size_differences
)]

use std::io;

pub mod color;
pub mod config;
#[macro_use]
pub mod logger;
pub mod trace;

/// Results that can be returned from this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can be returned from this crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid hex color {input:?}: {reason}")]
    InvalidHex { input: String, reason: &'static str },
    #[error("global logger has already been initialized")]
    AlreadyInitialized,
    #[error("failed to write log record: {0}")]
    Io(#[from] io::Error),
}

pub mod prelude {
    //! Most commonly used exports.

    pub use crate::{
        color::{
            hex_to_hsl, hex_to_rgba, hsl_to_hex, hsl_to_rgba, rgba_to_hex, rgba_to_hsl, Hex, Hsl,
            Rgba,
        },
        config::Config,
        logger::{Level, Logger},
    };

    // Macros
    pub use crate::{err, inf, suc, wrn};
}
