use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use rql_assistant_core::{
    AnswerCoordinator, AskRequest, AssistantConfig, DocumentRepository, ResponseFormat,
};
use std::collections::HashSet;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "rql-assistant", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API key for the chat-completion endpoint.
    #[arg(long, env = "RQL_ASSISTANT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Chat-completion endpoint URL.
    #[arg(long, env = "RQL_ASSISTANT_ENDPOINT")]
    endpoint: Option<String>,

    /// Model identifier.
    #[arg(long, env = "RQL_ASSISTANT_MODEL")]
    model: Option<String>,

    /// Sampling temperature.
    #[arg(long, env = "RQL_ASSISTANT_TEMPERATURE")]
    temperature: Option<String>,

    /// HTTP client timeout in seconds.
    #[arg(long, env = "RQL_ASSISTANT_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a payroll reporting question and receive a grounded RQL answer.
    Ask {
        /// The natural-language question.
        #[arg(long)]
        question: String,
        /// Response format.
        #[arg(long, value_enum, default_value = "conversational")]
        format: FormatArg,
        /// Skip the entity-extraction phase and answer without grounding.
        #[arg(long, default_value_t = false)]
        no_grounding: bool,
    },
    /// List the bundled API route catalog.
    Routes,
    /// Print schema snippets for the given class names.
    Schemas {
        /// Comma-separated schema class names.
        #[arg(long, value_delimiter = ',')]
        names: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Conversational,
    Json,
    Xml,
    Tabular,
}

impl From<FormatArg> for ResponseFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Conversational => ResponseFormat::Conversational,
            FormatArg::Json => ResponseFormat::JsonOnly,
            FormatArg::Xml => ResponseFormat::XmlOnly,
            FormatArg::Tabular => ResponseFormat::TabularQuery,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "rql-assistant boot"
    );

    match cli.command {
        Command::Ask {
            question,
            format,
            no_grounding,
        } => {
            let api_key = cli
                .api_key
                .context("an API key is required: pass --api-key or set RQL_ASSISTANT_API_KEY")?;

            let mut config = AssistantConfig::new(api_key);
            if let Some(endpoint) = cli.endpoint {
                config.endpoint = endpoint;
            }
            if let Some(model) = cli.model {
                config.model = model;
            }
            if cli.temperature.is_some() {
                config.temperature = cli.temperature;
            }
            if let Some(seconds) = cli.timeout_secs {
                config.timeout = Duration::from_secs(seconds);
            }

            let coordinator = AnswerCoordinator::from_config(&config)
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            let request = AskRequest {
                include_grounding: !no_grounding,
                format: format.into(),
                ..AskRequest::new(question)
            };

            let answer = coordinator
                .ask(&request)
                .await
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            println!("{answer}");
        }
        Command::Routes => {
            let repository = DocumentRepository::new();
            let catalog = repository
                .route_catalog()
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            for route in catalog {
                println!(
                    "{} {} -> {} ({})",
                    route.verb, route.route, route.response_type, route.class_name
                );
            }
        }
        Command::Schemas { names } => {
            let repository = DocumentRepository::new();
            repository
                .schema_catalog()
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            let wanted: HashSet<String> = names.into_iter().collect();
            let snippets = repository.find_schema_snippets(&wanted);
            if snippets.is_empty() {
                println!("no schemas matched");
            }
            for snippet in snippets {
                println!("{snippet}");
            }
        }
    }

    Ok(())
}
