// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod registry;
pub mod storage;

pub use http::CardcastClient;
pub use registry::FileDeckRegistry;
pub use storage::LocalCacheStorage;
