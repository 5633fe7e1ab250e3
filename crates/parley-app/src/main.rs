mod cli;
mod credentials;
mod repl;
mod setup;

use std::process::ExitCode;

use parley_common::ParleyError;
use tokio::io::BufReader;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::credentials::Credentials;
use crate::repl::Repl;

const DEFAULT_LOG_DIRECTIVE: &str = "parley=warn";

fn init_logging(directive: &str) {
    let directive = directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse::<Directive>());
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: cli::Args) -> parley_common::Result<()> {
    let mut config = parley_config::load_config(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    init_logging(&config.logging.level);

    tracing::info!("Parley v{} starting...", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        provider = %config.provider.kind,
        memory = config.conversation.memory,
        "Config loaded"
    );

    let credentials = Credentials::from_env(config.provider.kind)?;
    let service =
        setup::build_service(&config, credentials).map_err(|e| ParleyError::Ai(e.to_string()))?;
    let session_config = setup::session_config(&config, &setup::today());

    let assistant = &config.assistant;
    let banner = format!(
        "Welcome to {}, your {} assistant for {}!",
        assistant.name, assistant.personality, assistant.expertise
    );

    let mut repl = Repl::new(
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        session_config,
        service,
        config.conversation.memory,
        config.conversation.save_path.clone().into(),
    );
    if let Some(ref path) = args.load {
        repl.load(path)?;
    }
    repl.run(&banner).await?;

    tracing::info!(
        session = %repl.session().id().short(),
        turns = repl.session().turn_count(),
        "Shutdown complete"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file before anything reads credentials
    credentials::load_dotenv();

    let args = cli::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
