use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use openai_factory::utils::LoggingConfig;
use openai_factory::{EnvConfig, Factory, Payload};

#[derive(Parser)]
#[command(name = "openai-factory", version, about = "Assemble and inspect OpenAI API clients", author)]
struct Cli {
    #[command(flatten)]
    options: ClientOptions,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ClientOptions {
    /// API key, or `${VAR}` to read it from another variable
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    organization: Option<String>,
    #[arg(long)]
    base_url: Option<String>,
    /// Extra header as NAME=VALUE, repeatable
    #[arg(short = 'H', long = "header", value_parser = parse_pair)]
    headers: Vec<(String, String)>,
    /// Extra query parameter as NAME=VALUE, repeatable
    #[arg(short = 'q', long = "query", value_parser = parse_pair)]
    query: Vec<(String, String)>,
    /// Ignore OPENAI_API_KEY / OPENAI_ORGANIZATION / OPENAI_BASE_URL
    #[arg(long)]
    no_env: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the resolved transport configuration
    Inspect {
        #[arg(long)]
        show_secrets: bool,
        #[arg(long)]
        compact: bool,
    },
    /// GET a resource relative to the base URI and print the JSON response
    Get { resource: String },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))
}

fn build_factory(options: ClientOptions) -> anyhow::Result<Factory> {
    let mut factory = if options.no_env {
        Factory::new()
    } else {
        Factory::from_env()
    };

    if let Some(api_key) = options.api_key {
        let api_key = EnvConfig::resolve(&api_key, EnvConfig::API_KEY)?;
        factory = factory.with_api_key(api_key);
    }
    if let Some(organization) = options.organization {
        factory = factory.with_organization(organization);
    }
    if let Some(base_url) = options.base_url {
        factory = factory.with_base_url(base_url);
    }
    for (name, value) in options.headers {
        factory = factory.with_http_header(name, value);
    }
    for (name, value) in options.query {
        factory = factory.with_query_param(name, value);
    }
    Ok(factory)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    LoggingConfig::init();

    let cli = Cli::parse();
    let client = build_factory(cli.options)?
        .make()
        .context("failed to assemble OpenAI client")?;

    match cli.command {
        Command::Inspect {
            show_secrets,
            compact,
        } => {
            let summary = client.config().describe(!show_secrets);
            let content = if compact {
                serde_json::to_string(&summary)?
            } else {
                serde_json::to_string_pretty(&summary)?
            };
            println!("{content}");
        }
        Command::Get { resource } => {
            let response = client
                .transporter()
                .request_object(Payload::list(resource))
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}
