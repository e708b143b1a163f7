//! Contains logic shared by several formats.

pub mod object;
