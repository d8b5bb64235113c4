//! Loads India's 2011 Census district table from `india.csv` and builds a
//! read-only preview plus a few summaries of it.
//!
//! The loader and the display are separate: [`data::load_csv`] turns a path
//! into a validated [`data::Dataset`], [`preview::Preview`] and
//! [`summary::Summary`] are pure functions of that dataset, and the egui
//! front-end in the `census-preview` binary only renders them.

pub mod config;
pub mod data;
pub mod preview;
pub mod summary;
