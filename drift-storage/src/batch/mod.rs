//! Batched write path: command enum + row types, dedicated writer thread.

pub mod commands;
pub mod writer;

pub use commands::BatchCommand;
pub use writer::BatchWriter;
