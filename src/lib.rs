pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod store;
pub mod template;
pub mod usage;

// Curated re-exports
pub use config::GeneratorConfig;
pub use error::GeneratorError;
pub use generator::{
    EntryDecision, GenerationReport, MetadataGenerator, PlannedDocument, WrittenDocument,
};
pub use store::{AssetStore, DiskStore, MemoryStore};
pub use template::MetadataTemplate;
pub use usage::TextureUsage;
