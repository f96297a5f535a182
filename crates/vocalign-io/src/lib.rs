//! File I/O, validation, and serialization for the vocalign pipeline.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::ExperimentName;
pub use error::IoError;
pub use reader::SequenceReader;
pub use writer::ResultWriter;
