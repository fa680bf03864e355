//!
//! nestmap: insertion-ordered nested maps addressed by dot-paths.
//!
//! ## Core Concepts
//!
//! * **Maps (`map::OrderedMap`)**: An insertion-ordered container from keys to values. Values may be maps themselves, so a single map can hold an arbitrarily deep tree.
//! * **Keys (`map::Key`)**: Either a non-negative integer index or a name. Text spelling a canonical integer (`"3"`, not `"03"`) always becomes an index.
//! * **Values (`map::Value`)**: Null, booleans, integers, floats, text, or a nested map. Sequences are maps keyed `0..len`.
//! * **Paths (`map::Path`)**: Dot-separated keys such as `a.b.0`. `get`, `set`, `exists` and `unset` walk nested maps one segment at a time (empty segments are ordinary keys), and `set` creates the maps it needs along the way.
//! * **Flattening**: `deflate` turns a tree into a single-level map keyed by full paths, and `inflate` rebuilds the tree.
//! * **Collection operations**: Mapping, filtering, sorting, chunking, random sampling and the rest of the usual sequence algorithms, all order-preserving.
//!
//! ```
//! use nestmap::{KeyMode, OrderedMap};
//!
//! let mut config = OrderedMap::new();
//! config.set("server.host", "localhost");
//! config.set("server.port", 8080);
//!
//! assert_eq!(config.get_as::<i64>("server.port"), Some(8080));
//! assert_eq!(config.deflate(KeyMode::Paths).len(), 2);
//! ```

pub mod map;

pub use map::{
    ChunkKeys, CollectionError, Key, KeyCase, KeyMode, OrderedMap, Path, PathBuf, PathError,
    Value,
};

/// Result type used throughout the nestmap library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the nestmap library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured errors from the map module
    #[error(transparent)]
    Collection(map::CollectionError),
}

impl From<PathError> for Error {
    fn from(err: PathError) -> Self {
        Error::Collection(err.into())
    }
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Collection(_) => "map",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error came from a map operation.
    pub fn is_collection_error(&self) -> bool {
        matches!(self, Error::Collection(_))
    }

    /// Check if this error came from building a path.
    pub fn is_path_error(&self) -> bool {
        match self {
            Error::Collection(err) => err.is_path_error(),
            _ => false,
        }
    }

    /// Check if this error is an argument outside an operation's domain.
    pub fn is_argument_error(&self) -> bool {
        match self {
            Error::Collection(err) => err.is_argument_error(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Collection(err) => err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is a serialization or conversion failure.
    pub fn is_serialization_error(&self) -> bool {
        match self {
            Error::Serialize(_) => true,
            Error::Collection(err) => err.is_conversion_error(),
        }
    }
}
