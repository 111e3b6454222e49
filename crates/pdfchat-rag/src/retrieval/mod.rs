//! Vector indexing and nearest-neighbor retrieval

pub mod index;
pub mod search;

pub use index::{IndexBuilder, InMemoryIndex, SearchResult, VectorIndex};
pub use search::Retriever;
