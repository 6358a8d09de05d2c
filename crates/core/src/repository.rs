use crate::error::AssistantError;
use crate::lazy::OnceCache;
use crate::models::{DocumentationFormat, RouteDefinition, SchemaCatalog};
use crate::resources;
use std::collections::HashSet;

/// Typed access to the bundled route and schema corpora. Each corpus is
/// parsed on first use and cached for the life of the process.
#[derive(Default)]
pub struct DocumentRepository {
    routes: OnceCache<Vec<RouteDefinition>>,
    schemas: OnceCache<SchemaCatalog>,
}

impl DocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route_catalog(&self) -> Result<&[RouteDefinition], AssistantError> {
        self.routes
            .get_or_try_init(|| {
                let json = resources::load(resources::ROUTES)?;
                serde_json::from_str(json)
                    .map_err(|source| AssistantError::DocumentParse {
                        corpus: "routes",
                        source,
                    })
            })
            .map(Vec::as_slice)
    }

    pub fn schema_catalog(&self) -> Result<&SchemaCatalog, AssistantError> {
        self.schemas.get_or_try_init(|| {
            let json = resources::load(resources::SCHEMAS)?;
            serde_json::from_str(json).map_err(|source| AssistantError::DocumentParse {
                corpus: "schemas",
                source,
            })
        })
    }

    /// Rendered snippets for the schemas whose class name is in `names`,
    /// in corpus order. Reads only the published catalog: before a
    /// successful `schema_catalog` call, or when nothing matches, the
    /// result is empty rather than an error.
    pub fn find_schema_snippets(&self, names: &HashSet<String>) -> Vec<String> {
        let Some(catalog) = self.schemas.get() else {
            return Vec::new();
        };

        catalog
            .data
            .iter()
            .filter(|schema| names.contains(&schema.class_name))
            .map(|schema| schema.to_string())
            .collect()
    }

    /// One of the two bundled full-reference documents.
    pub fn documentation(&self, format: DocumentationFormat) -> Result<&'static str, AssistantError> {
        match format {
            DocumentationFormat::Json => resources::load(resources::DOC_JSON),
            DocumentationFormat::Xml => resources::load(resources::DOC_XML),
        }
    }
}
