use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerrainError {
    /// Generators are never built from an implicit seed; every world must name one.
    #[error("terrain generator requires a world seed")]
    MissingSeed,
    #[error("failed to parse worldgen config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to read worldgen config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
