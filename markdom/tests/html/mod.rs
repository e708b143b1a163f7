//! HTML and XHTML format tests

mod export;
