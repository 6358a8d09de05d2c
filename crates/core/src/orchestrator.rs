use crate::composer::RequestComposer;
use crate::config::AssistantConfig;
use crate::error::AssistantError;
use crate::extraction::extract_entities;
use crate::lazy::OnceCache;
use crate::models::{AskRequest, ChatMessage, ResponseFormat};
use crate::remote::{CompletionEndpoint, RemoteModelClient};
use crate::repository::DocumentRepository;
use crate::resources;
use std::collections::HashSet;
use tracing::debug;

/// Drives the two-phase RAG pipeline: entity extraction, then grounded
/// generation. One instance serves many concurrent callers; the only shared
/// mutable state is the lazily-built static prompt set.
pub struct AnswerCoordinator<C>
where
    C: CompletionEndpoint,
{
    composer: RequestComposer,
    repository: DocumentRepository,
    endpoint: C,
    prompts: OnceCache<StaticPrompts>,
}

struct StaticPrompts {
    extraction: String,
    answer_instructions: &'static str,
    cheat_sheet: &'static str,
    tabular_pattern: &'static str,
}

impl AnswerCoordinator<RemoteModelClient> {
    /// Wire the coordinator against the real chat-completion endpoint.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let endpoint = RemoteModelClient::new(config)?;
        Ok(Self::new(
            RequestComposer::from_config(config),
            DocumentRepository::new(),
            endpoint,
        ))
    }
}

impl<C> AnswerCoordinator<C>
where
    C: CompletionEndpoint,
{
    pub fn new(composer: RequestComposer, repository: DocumentRepository, endpoint: C) -> Self {
        Self {
            composer,
            repository,
            endpoint,
            prompts: OnceCache::new(),
        }
    }

    pub async fn ask(&self, request: &AskRequest) -> Result<String, AssistantError> {
        if request.question.trim().is_empty() {
            return Err(AssistantError::InvalidRequest(
                "question cannot be empty".to_string(),
            ));
        }

        let prompts = self.static_prompts()?;

        let mut route_names = HashSet::new();
        let mut schema_names = HashSet::new();
        if request.include_grounding {
            let extraction_request = self.composer.compose(
                &[
                    ChatMessage::system(prompts.extraction.clone()),
                    ChatMessage::user(request.question.clone()),
                ],
                None,
                None,
            )?;

            let raw = self.endpoint.send(&extraction_request).await?;
            let entities = extract_entities(&raw);
            debug!(
                routes = entities.routes.len(),
                schemas = entities.schemas.len(),
                "entity extraction complete"
            );

            route_names = entities.routes.into_iter().collect();
            schema_names = entities.schemas.into_iter().collect();
        }

        let generation_request =
            self.build_generation_request(request, prompts, &schema_names, &route_names)?;

        self.endpoint.send(&generation_request).await
    }

    /// Phase-0 initialization: loads every static prompt resource and
    /// validates both corpora, so request-time lookups behave uniformly.
    /// Concurrent first callers block on a single load.
    fn static_prompts(&self) -> Result<&StaticPrompts, AssistantError> {
        self.prompts.get_or_try_init(|| {
            let route_catalog = self.repository.route_catalog()?;
            let schema_catalog = self.repository.schema_catalog()?;

            let mut extraction = resources::load(resources::EXTRACTION_INSTRUCTIONS)?.to_string();
            extraction.push_str("\nKnown API route names:\n");
            for route in route_catalog {
                extraction.push_str(" * ");
                extraction.push_str(&route.class_name);
                extraction.push('\n');
            }
            extraction.push_str("\nKnown schema names:\n");
            for schema in &schema_catalog.data {
                extraction.push_str(" * ");
                extraction.push_str(&schema.class_name);
                extraction.push('\n');
            }

            debug!(
                routes = route_catalog.len(),
                schemas = schema_catalog.data.len(),
                "static prompt resources loaded"
            );

            Ok(StaticPrompts {
                extraction,
                answer_instructions: resources::load(resources::ANSWER_INSTRUCTIONS)?,
                cheat_sheet: resources::load(resources::CHEAT_SHEET)?,
                tabular_pattern: resources::load(resources::TABULAR_PATTERN)?,
            })
        })
    }

    fn build_generation_request(
        &self,
        request: &AskRequest,
        prompts: &StaticPrompts,
        schema_names: &HashSet<String>,
        route_names: &HashSet<String>,
    ) -> Result<String, AssistantError> {
        let documentation = self
            .repository
            .documentation(request.format.documentation_format())?;

        let mut system_prompts = vec![
            prompts.answer_instructions.to_string(),
            format!("RQL Quick Reference Cheat Sheet:\n{}", prompts.cheat_sheet),
            format!("RQL Full Documentation:\n{documentation}"),
        ];

        match request.format {
            ResponseFormat::JsonOnly => system_prompts.push(
                "**Respond ONLY with the RQL statement enclosed in triple back-ticks formatted \
                 as 'JSON'. Do not add explanations.**"
                    .to_string(),
            ),
            ResponseFormat::XmlOnly => system_prompts.push(
                "**Respond ONLY with the RQL statement enclosed in triple back-ticks formatted \
                 as 'XML'. Use ASCII characters only; do not add comments or explanations.**"
                    .to_string(),
            ),
            ResponseFormat::Conversational => system_prompts.push(
                "**Respond conversationally to the user prompt using markdown syntax. When \
                 responding with RQL statements, ensure they are in 'XML' format and wrapped in \
                 triple backticks.**"
                    .to_string(),
            ),
            ResponseFormat::TabularQuery => {
                system_prompts.push(prompts.tabular_pattern.to_string());
                system_prompts.push(
                    "**Respond conversationally to the user prompt using markdown syntax**. When \
                     responding with RQL statements, strictly enforce the use of the **Tabular \
                     Output Pattern** and use RQL in 'XML' format **wrapped in triple backticks.**"
                        .to_string(),
                );
            }
        }

        for snippet in self.repository.find_schema_snippets(schema_names) {
            system_prompts.push(format!("# Entity Schema:\n{snippet}"));
        }

        if !route_names.is_empty() {
            for route in self.repository.route_catalog()? {
                if route_names.contains(&route.class_name) {
                    system_prompts.push(route.to_string());
                }
            }
        }

        let mut messages: Vec<ChatMessage> =
            system_prompts.into_iter().map(ChatMessage::system).collect();
        messages.extend(request.history.iter().cloned());
        messages.push(ChatMessage::user(request.question.clone()));

        self.composer.compose(&messages, None, None)
    }
}
