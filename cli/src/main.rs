//! CLI entrypoint for DuaonAI
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use duaonai_application::{
    GenerateDuaInput, GenerateDuaUseCase, GenerationParams, GenerationProgressNotifier,
    LlmGateway, NoGenerationProgress,
};
use duaonai_domain::DuaQuery;
use duaonai_infrastructure::{
    ConfigLoader, FileConfig, FileLoggingConfig, GeminiLlmGateway, JsonlConversationLogger,
};
use duaonai_presentation::{
    AppState, Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, RateLimit,
    SimpleProgress, create_router, serve,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the key may come from the environment or config
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;

    // Serving is long-running: show startup info even without -v
    let verbosity = match cli.command {
        Some(Command::Serve { .. }) => cli.verbose.max(1),
        _ => cli.verbose,
    };
    let _log_guard = init_tracing(verbosity, &config.logging)?;

    info!("Starting DuaonAI");

    let params = config.to_generation_params()?;
    let use_case = build_use_case(&config);

    match cli.command {
        Some(Command::Serve { host, port }) => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            run_server(use_case, params, &config, &format!("{}:{}", host, port)).await
        }
        Some(Command::Ask { query, output }) => {
            let progress: Box<dyn GenerationProgressNotifier> = if cli.quiet {
                Box::new(NoGenerationProgress)
            } else if cli.verbose > 0 {
                Box::new(SimpleProgress)
            } else {
                Box::new(ProgressReporter::new())
            };
            run_ask(&use_case, params, query, output, progress.as_ref()).await
        }
        None => bail!("No command given. Use `duaonai serve` or `duaonai ask <QUERY>`."),
    }
}

/// Initialize logging based on verbosity level, plus the optional rolling file
fn init_tracing(verbosity: u8, logging: &FileLoggingConfig) -> Result<Option<WorkerGuard>> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "duaonai.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(guard)
}

// === Dependency Injection ===
fn build_use_case(config: &FileConfig) -> GenerateDuaUseCase {
    let gateway = Arc::new(GeminiLlmGateway::with_base_url(
        config.gemini.resolve_api_key(),
        config.gemini.base_url.as_str(),
    ));
    if gateway.ensure_configured().is_err() {
        warn!(
            "Gemini API key is not set ({}); dua requests will fail",
            config.gemini.api_key_env
        );
    }

    let mut use_case = GenerateDuaUseCase::new(gateway);

    if let Some(path) = &config.logging.conversation_log
        && let Some(logger) = JsonlConversationLogger::open(path)
    {
        info!("Conversation log: {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger));
    }

    use_case
}

async fn run_server(
    use_case: GenerateDuaUseCase,
    params: GenerationParams,
    config: &FileConfig,
    addr: &str,
) -> Result<()> {
    let rate_limit = &config.server.rate_limit;
    let rate_limit = rate_limit.enabled.then_some(RateLimit {
        per_seconds: rate_limit.per_seconds,
        burst: rate_limit.burst,
    });
    if rate_limit.is_none() {
        warn!("Rate limiting is disabled");
    }

    let router = create_router(AppState::new(use_case, params), rate_limit)?;
    serve(router, addr).await?;
    Ok(())
}

async fn run_ask(
    use_case: &GenerateDuaUseCase,
    params: GenerationParams,
    query: String,
    output: OutputFormat,
    progress: &dyn GenerationProgressNotifier,
) -> Result<()> {
    let query = DuaQuery::try_new(query)?;

    // Ctrl-C aborts the in-flight model call
    let token = CancellationToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    let input = GenerateDuaInput::new(query, params).with_cancellation(token);
    let record = match use_case.execute_with_progress(input, progress).await {
        Ok(record) => record,
        Err(e) => {
            if let Some(raw) = e.raw_text() {
                eprintln!("Raw model response:\n{}", raw);
            }
            return Err(e.into());
        }
    };

    let rendered = match output {
        OutputFormat::Text => ConsoleFormatter::format(&record),
        OutputFormat::Json => ConsoleFormatter::format_json(&record),
    };
    println!("{}", rendered);

    Ok(())
}
