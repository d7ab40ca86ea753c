#![allow(missing_docs)]

mod config;
mod error_reporting;
mod real_bytes;
mod scenarios;
