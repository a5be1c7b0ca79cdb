//! Configuration module

mod writer;

pub use writer::WriterConfig;
