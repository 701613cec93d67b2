use std::{io, path::PathBuf};
use thiserror::Error;

/// Storage failures raised while generating metadata. None are retried; the
/// first one aborts the scan.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("failed to list directory {}", .dir.display())]
    List {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write metadata {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read template {}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
