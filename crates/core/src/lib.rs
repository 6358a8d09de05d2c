pub mod composer;
pub mod config;
pub mod error;
pub mod extraction;
pub mod lazy;
pub mod models;
pub mod orchestrator;
pub mod remote;
pub mod repository;
pub mod resources;

pub use composer::{RequestComposer, FALLBACK_TEMPERATURE};
pub use config::{AssistantConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT};
pub use error::AssistantError;
pub use extraction::extract_entities;
pub use lazy::OnceCache;
pub use models::{
    AskRequest, ChatMessage, DocumentationFormat, ExtractionResult, PropertyDefinition,
    ResponseFormat, Role, RouteDefinition, SchemaCatalog, SchemaDefinition,
};
pub use orchestrator::AnswerCoordinator;
pub use remote::{CompletionEndpoint, RemoteModelClient};
pub use repository::DocumentRepository;
