pub mod cli;
pub mod demo;
pub mod frontend;
pub mod interpreter;
pub mod runtime;

// Re-exported so callers only need one dependency.
pub use simple_vector;
