//! Core library for the aestrak-tools command line application.
//!
//! The library turns the purchase-order and quantity-survey spreadsheet
//! exports into a SQL seed file. IO adapters live under
//! [`aestrak::tools::io`], row and table representations inside
//! [`aestrak::tools::model`], the budget calculations in
//! [`aestrak::tools::aggregate`] and [`aestrak::tools::transform`], and the
//! end-to-end orchestration under [`aestrak::tools::seed`].

pub mod aestrak;

pub use aestrak::tools::{
    Result, ToolError, aggregate, error, ids, io, logging, model, normalize, seed, transform,
    validate,
};
