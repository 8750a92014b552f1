pub mod action;
pub mod bazel;
pub mod classifier;
pub mod config;
pub mod database;
pub mod error;
pub mod io;
pub mod link;
pub mod paths;
pub mod query;
pub mod runner;

pub use error::{CompdbError, Result};
