//! Slide Study API Server
//!
//! Loads configuration, wires adapters into the application state and
//! serves the HTTP API.

use std::process::ExitCode;
use std::sync::Arc;

use secrecy::ExposeSecret;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use slide_study::adapters::ai::{OpenAIConfig, OpenAIProvider};
use slide_study::adapters::download::HttpDownloader;
use slide_study::adapters::http::{app_router, AppState, Repositories, Services};
use slide_study::adapters::pdf::PdftoppmRasterizer;
use slide_study::adapters::postgres::{
    self, PostgresAccessCodeRepository, PostgresFlashcardRepository,
    PostgresQuizQuestionRepository, PostgresSlideImageRepository, PostgresSlideRepository,
    PostgresSpaceRepository, PostgresUserRepository,
};
use slide_study::adapters::speech::{
    DeepgramSpeech, DeepgramSpeechConfig, OpenAISpeech, OpenAISpeechConfig,
};
use slide_study::adapters::storage::{S3ObjectStorage, S3StorageConfig};
use slide_study::config::{AppConfig, LogFormat, SpeechProvider};
use slide_study::ports::SpeechSynthesizer;

#[derive(Debug, Error)]
enum StartupError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] slide_study::config::ValidationError),

    #[error("missing setting: {0}")]
    Missing(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to initialize {service}: {message}")]
    Service {
        service: &'static str,
        message: String,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

impl StartupError {
    fn service(service: &'static str, err: impl std::fmt::Display) -> Self {
        StartupError::Service {
            service,
            message: err.to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info", LogFormat::Pretty);
            error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.server.log_level, config.server.log_format);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed to start");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    config.validate()?;
    let addr = config.server.socket_addr()?;

    let repositories = repositories(&config).await?;
    let services = services(&config)?;
    let state = AppState::new(repositories, services, config.generation.settings());

    let app = app_router(state, &config.server);

    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        environment = ?config.server.environment,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn repositories(config: &AppConfig) -> Result<Repositories, StartupError> {
    let Some(url) = config.database.url() else {
        warn!("No database URL configured; using in-memory repositories");
        return Ok(Repositories::in_memory());
    };

    let pool = postgres::connect(url, &config.database).await?;
    info!("Connected to database");

    Ok(Repositories {
        spaces: Arc::new(PostgresSpaceRepository::new(pool.clone())),
        slides: Arc::new(PostgresSlideRepository::new(pool.clone())),
        images: Arc::new(PostgresSlideImageRepository::new(pool.clone())),
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        access_codes: Arc::new(PostgresAccessCodeRepository::new(pool.clone())),
        quiz_questions: Arc::new(PostgresQuizQuestionRepository::new(pool.clone())),
        flashcards: Arc::new(PostgresFlashcardRepository::new(pool)),
    })
}

fn services(config: &AppConfig) -> Result<Services, StartupError> {
    let openai_key = config
        .ai
        .openai_api_key
        .as_ref()
        .map(|key| key.expose_secret().clone())
        .ok_or(StartupError::Missing("SLIDE_STUDY__AI__OPENAI_API_KEY"))?;

    // Completions
    let ai = OpenAIProvider::new(
        OpenAIConfig::new(openai_key.clone())
            .with_model(&config.ai.chat_model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    )
    .map_err(|e| StartupError::service("completion provider", e))?;

    // Speech
    let speech: Arc<dyn SpeechSynthesizer> = match config.speech.provider {
        SpeechProvider::OpenAI => {
            let mut speech_config = OpenAISpeechConfig::new(openai_key)
                .with_model(&config.speech.openai_model)
                .with_voice(&config.speech.openai_voice);
            speech_config.speed = config.speech.speed;
            Arc::new(
                OpenAISpeech::new(speech_config)
                    .map_err(|e| StartupError::service("OpenAI speech", e))?,
            )
        }
        SpeechProvider::Deepgram => {
            let key = config
                .speech
                .deepgram_api_key
                .as_ref()
                .map(|key| key.expose_secret().clone())
                .ok_or(StartupError::Missing("SLIDE_STUDY__SPEECH__DEEPGRAM_API_KEY"))?;
            Arc::new(
                DeepgramSpeech::new(
                    DeepgramSpeechConfig::new(key).with_voice(&config.speech.deepgram_model),
                )
                .map_err(|e| StartupError::service("Deepgram speech", e))?,
            )
        }
    };
    info!(provider = speech.provider_name(), "Speech synthesizer configured");

    // Object storage
    let bucket = config
        .storage
        .bucket
        .as_deref()
        .ok_or(StartupError::Missing("SLIDE_STUDY__STORAGE__BUCKET"))?;
    let mut storage_config = S3StorageConfig::new(bucket, &config.storage.region);
    if let Some(endpoint) = &config.storage.endpoint {
        storage_config = storage_config.with_endpoint(endpoint);
    }
    if let (Some(id), Some(secret)) = (
        &config.storage.access_key_id,
        &config.storage.secret_access_key,
    ) {
        storage_config = storage_config.with_credentials(id, secret.expose_secret().clone());
    }
    if let Some(base) = &config.storage.public_base_url {
        storage_config = storage_config.with_public_base_url(base);
    }
    let storage = S3ObjectStorage::new(storage_config)
        .map_err(|e| StartupError::service("object storage", e))?;

    // PDF pipeline
    let rasterizer = PdftoppmRasterizer::new(&config.pdf.pdftoppm_path, config.pdf.dpi);
    let downloader = HttpDownloader::new(std::time::Duration::from_secs(
        config.pdf.download_timeout_secs,
    ))
    .map_err(|e| StartupError::service("downloader", e))?;

    Ok(Services {
        ai: Arc::new(ai),
        speech,
        storage: Arc::new(storage),
        rasterizer: Arc::new(rasterizer),
        downloader: Arc::new(downloader),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
