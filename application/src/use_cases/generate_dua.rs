//! Generate Dua use case.
//!
//! Runs one dua request through the [`GenerationMachine`]:
//! 1. Fail fast if the provider has no usable credential
//! 2. Send the initial instruction and validate the reply
//! 3. On a validation failure, send exactly one corrective retry in the
//!    same conversation
//! 4. Return the record, annotated with a `note` if the retry still failed
//!
//! Each model call is bounded by [`GenerationParams::call_timeout`] and
//! aborted as soon as the request's [`CancellationToken`] fires.

use crate::config::GenerationParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway};
use crate::ports::progress::{GenerationProgressNotifier, NoGenerationProgress};
use duaonai_domain::{
    Attempt, BraceSpanExtractor, DuaPromptTemplate, DuaQuery, DuaRecord, ExtractionError,
    GenerationError, GenerationMachine, GenerationOutcome, GenerationStep, ResponseExtractor,
    truncate,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Errors surfaced to the caller of [`GenerateDuaUseCase`].
#[derive(Error, Debug)]
pub enum GenerateDuaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation failed: {0}")]
    Provider(String),

    #[error("Failed to parse AI response ({attempt} attempt): {reason}")]
    Parse {
        attempt: Attempt,
        raw_text: String,
        reason: ExtractionError,
    },

    #[error("Model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Generation state error: {0}")]
    State(#[from] GenerationError),
}

impl GenerateDuaError {
    /// Raw model output attached to the error, if any
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            GenerateDuaError::Parse { raw_text, .. } => Some(raw_text),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, GenerateDuaError::Cancelled)
    }

    fn from_gateway(error: GatewayError) -> Self {
        match error {
            GatewayError::NotConfigured(msg) => GenerateDuaError::Config(msg),
            other => GenerateDuaError::Provider(other.to_string()),
        }
    }
}

/// Input for the [`GenerateDuaUseCase`].
#[derive(Debug, Clone)]
pub struct GenerateDuaInput {
    pub query: DuaQuery,
    pub params: GenerationParams,
    /// Request-scoped cancellation (e.g. the HTTP client disconnected).
    pub cancellation_token: Option<CancellationToken>,
}

impl GenerateDuaInput {
    pub fn new(query: DuaQuery, params: GenerationParams) -> Self {
        Self {
            query,
            params,
            cancellation_token: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }
}

/// Use case for generating a validated dua from a free-text query.
#[derive(Clone)]
pub struct GenerateDuaUseCase {
    gateway: Arc<dyn LlmGateway>,
    extractor: Arc<dyn ResponseExtractor>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl GenerateDuaUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            extractor: Arc::new(BraceSpanExtractor),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Replace the default brace-span extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn ResponseExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute without progress reporting.
    pub async fn execute(&self, input: GenerateDuaInput) -> Result<DuaRecord, GenerateDuaError> {
        self.execute_with_progress(input, &NoGenerationProgress)
            .await
    }

    /// Execute with progress callbacks.
    pub async fn execute_with_progress(
        &self,
        input: GenerateDuaInput,
        progress: &dyn GenerationProgressNotifier,
    ) -> Result<DuaRecord, GenerateDuaError> {
        let result = self.run(input, progress).await;
        progress.on_finished(result.is_ok());
        result
    }

    async fn run(
        &self,
        input: GenerateDuaInput,
        progress: &dyn GenerationProgressNotifier,
    ) -> Result<DuaRecord, GenerateDuaError> {
        info!(
            "Processing dua query: \"{}\"",
            truncate(input.query.content(), 100)
        );

        self.gateway
            .ensure_configured()
            .map_err(GenerateDuaError::from_gateway)?;

        let params = &input.params;
        let token = input.cancellation_token.as_ref();
        debug!("Using model: {}", params.model);

        let mut machine = GenerationMachine::new(input.query.clone());
        let mut prompt = machine.start()?;
        let mut attempt = Attempt::First;

        loop {
            let request = ChatRequest::new(
                params.model.clone(),
                DuaPromptTemplate::system(),
                machine.history().to_vec(),
                prompt,
            );

            self.conversation_logger.log(ConversationEvent::new(
                "dua_prompt",
                serde_json::json!({
                    "query": input.query.content(),
                    "attempt": attempt.to_string(),
                    "model": params.model.to_string(),
                    "text": request.message,
                }),
            ));

            progress.on_model_call_start(&params.model, attempt);
            let raw = self.call_model(&request, params.call_timeout, token).await?;
            progress.on_model_call_end(attempt);

            self.conversation_logger.log(ConversationEvent::new(
                "dua_response",
                serde_json::json!({
                    "attempt": attempt.to_string(),
                    "bytes": raw.len(),
                    "text": raw,
                }),
            ));

            match machine.on_response(&raw, self.extractor.as_ref())? {
                GenerationStep::Retry {
                    prompt: retry_prompt,
                    failure,
                } => {
                    warn!("Invalid dua data: {}", failure);
                    info!("Retrying with more specific prompt...");
                    progress.on_validation_failed(&failure);
                    self.conversation_logger.log(ConversationEvent::new(
                        "dua_validation_failed",
                        serde_json::json!({
                            "attempt": attempt.to_string(),
                            "reason": failure.to_string(),
                        }),
                    ));
                    prompt = retry_prompt;
                    attempt = Attempt::Retry;
                }
                GenerationStep::Done(outcome) => return self.finish(&input.query, outcome),
            }
        }
    }

    /// Send one request, bounded by the per-call timeout and the request's
    /// cancellation token. The in-flight call is dropped when either fires.
    async fn call_model(
        &self,
        request: &ChatRequest,
        call_timeout: Option<Duration>,
        token: Option<&CancellationToken>,
    ) -> Result<String, GenerateDuaError> {
        let Some(token) = token else {
            return self.send_bounded(request, call_timeout).await;
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                info!("Dua generation cancelled by caller");
                Err(GenerateDuaError::Cancelled)
            }
            result = self.send_bounded(request, call_timeout) => result,
        }
    }

    async fn send_bounded(
        &self,
        request: &ChatRequest,
        call_timeout: Option<Duration>,
    ) -> Result<String, GenerateDuaError> {
        let reply = match call_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.gateway.send(request)).await {
                Ok(reply) => reply,
                Err(_) => {
                    warn!("Model call exceeded {:?}", limit);
                    return Err(GenerateDuaError::Timeout(limit));
                }
            },
            None => self.gateway.send(request).await,
        };

        reply.map_err(|e| {
            error!("Error generating dua: {}", e);
            GenerateDuaError::from_gateway(e)
        })
    }

    fn finish(
        &self,
        query: &DuaQuery,
        outcome: GenerationOutcome,
    ) -> Result<DuaRecord, GenerateDuaError> {
        match outcome {
            GenerationOutcome::Accepted { record, attempt } => {
                info!(
                    "Dua generated for query: {} ({} attempt)",
                    truncate(query.content(), 100),
                    attempt
                );
                self.log_result(&record);
                Ok(record)
            }
            GenerationOutcome::Annotated { record, failure } => {
                warn!("Still invalid after retry: {}", failure);
                self.log_result(&record);
                Ok(record)
            }
            GenerationOutcome::Unparseable {
                attempt,
                raw,
                error,
            } => {
                error!(
                    "Error parsing model response ({} attempt): {} | raw: {}",
                    attempt,
                    error,
                    truncate(&raw, 200)
                );
                Err(GenerateDuaError::Parse {
                    attempt,
                    raw_text: raw,
                    reason: error,
                })
            }
        }
    }

    fn log_result(&self, record: &DuaRecord) {
        self.conversation_logger.log(ConversationEvent::new(
            "dua_result",
            serde_json::json!({
                "title": record.title,
                "reference": record.reference,
                "note": record.note,
            }),
        ));
    }
}
