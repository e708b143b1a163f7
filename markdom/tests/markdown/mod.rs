//! Markdown format tests
//!
//! Tests for CommonMark import through comrak and Markdown export through the
//! Markdown handler.

mod export;
mod import;
