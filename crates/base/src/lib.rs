pub mod logging;
pub use logging::{
    FileLogger, StdoutLogger, init_file_logger, init_stdout_logger, init_stdout_logger_with_level,
};

mod rect;
pub use rect::*;

mod size;
pub use size::*;

// re-export log crate so downstream crates can use base::log::*
pub use log;
