pub mod api;
pub mod cli;
pub mod enhancement;
pub mod error;
pub mod geometry;
pub mod io;
pub mod paint;
pub mod types;

pub use api::{MammogramPreprocessor, PreprocessOutput, PreprocessSummary};
pub use cli::report::TextReport;
pub use error::{MammoprepError, Result};
pub use io::load_chain_code;
pub use types::*;
