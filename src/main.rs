use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use cranescope::application::services::{
    BatchWorker, CancellationRegistry, PagePipeline, PipelineOptions, RetryPolicy,
};
use cranescope::infrastructure::llm::LlmClientFactory;
use cranescope::infrastructure::observability::{TracingConfig, init_tracing};
use cranescope::infrastructure::persistence::InMemoryBatchRepository;
use cranescope::infrastructure::text_processing::{CompositeDocumentReader, PdfDocumentReader};
use cranescope::presentation::{AppState, Environment, Settings, create_router};

const BATCH_QUEUE_CAPACITY: usize = 16;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::from_settings(&settings.logging, environment));
    tracing::info!(environment = %environment, "Application starting");

    let llm_client = LlmClientFactory::create(&settings.llm)?;
    let document_reader = Arc::new(CompositeDocumentReader::standard(PdfDocumentReader::new(
        Duration::from_secs(settings.extraction.timeout_secs),
    )));

    let pipeline_settings = &settings.pipeline;
    let pipeline = Arc::new(PagePipeline::new(
        llm_client,
        document_reader,
        settings.prompts.templates(),
        RetryPolicy::new(
            pipeline_settings.max_attempts,
            Duration::from_secs(pipeline_settings.backoff_secs),
        ),
        PipelineOptions {
            classification_mode: pipeline_settings.classification_mode,
            project_line_filter: pipeline_settings.project_line_filter,
            skip_blank_pages: pipeline_settings.skip_blank_pages,
        },
    ));

    let batch_repository = Arc::new(InMemoryBatchRepository::new());
    let cancellations = CancellationRegistry::new();
    let (batch_sender, batch_receiver) = mpsc::channel(BATCH_QUEUE_CAPACITY);

    let worker = BatchWorker::new(
        batch_receiver,
        pipeline,
        batch_repository.clone(),
        cancellations.clone(),
    );
    tokio::spawn(worker.run());

    let state = AppState::new(
        batch_repository,
        batch_sender,
        cancellations,
        settings.extraction.max_file_size_mb,
    );
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
