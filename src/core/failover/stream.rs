//! Streaming failover
//!
//! Retries happen per call, not per chunk. A stream that breaks before its
//! terminal delta counts as a failed attempt and the next attempt starts
//! over from the first chunk, tagged with its own attempt number.

use super::engine::{AttemptState, FailoverEngine, LocalFallback};
use crate::core::cancel::CancellationToken;
use crate::core::providers::{DeltaStream, ProviderError, StreamDelta};
use crate::core::router::Selection;
use crate::core::types::{ChunkStream, CompletionRequest, CompletionResponse, StreamingChunk};
use crate::utils::error::Result;
use futures::StreamExt;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// Where the chunks of the current attempt come from
enum Opened {
    Remote {
        stream: DeltaStream,
        selection: Selection,
        started: Instant,
        attempt: u32,
    },
    Fallback {
        response: CompletionResponse,
        attempt: u32,
    },
}

impl FailoverEngine {
    /// Streaming counterpart of [`FailoverEngine::execute`]
    ///
    /// Failures that happen before any stream could be opened are returned
    /// directly. Later failures end the stream with an error item.
    pub async fn execute_stream(
        self: Arc<Self>,
        request: CompletionRequest,
        fallback: Option<LocalFallback>,
        cancel: CancellationToken,
    ) -> Result<ChunkStream> {
        let mut state = self.start(fallback.as_ref());
        let first = self
            .open_next(&mut state, &request, fallback.as_ref(), &cancel)
            .await?;
        let correlation_id = Uuid::new_v4();
        let prompt_tokens = u64::from(request.estimated_prompt_tokens());

        Ok(Box::pin(async_stream::stream! {
            let mut opened = first;
            loop {
                match opened {
                    Opened::Fallback { response, attempt } => {
                        let provider = response.provider;
                        yield Ok(StreamingChunk::content(response.content, provider, correlation_id, attempt));
                        yield Ok(StreamingChunk::terminal(provider, correlation_id, attempt));
                        break;
                    }
                    Opened::Remote { mut stream, selection, started, attempt } => {
                        let client = Arc::clone(selection.client());
                        let provider = client.provider();
                        let mut completion_chars = 0usize;
                        let mut outcome: Option<std::result::Result<(), ProviderError>> = None;

                        while let Some(item) = stream.next().await {
                            match item {
                                Ok(StreamDelta::Content(text)) => {
                                    completion_chars += text.len();
                                    yield Ok(StreamingChunk::content(text, provider, correlation_id, attempt));
                                }
                                Ok(StreamDelta::Done) => {
                                    outcome = Some(Ok(()));
                                    break;
                                }
                                Err(e) => {
                                    outcome = Some(Err(e));
                                    break;
                                }
                            }
                        }
                        drop(stream);

                        let error = match outcome {
                            Some(Ok(())) => {
                                let tokens = prompt_tokens + completion_chars.div_ceil(4) as u64;
                                self.record(&client, started.elapsed(), true, tokens);
                                drop(selection);
                                yield Ok(StreamingChunk::terminal(provider, correlation_id, attempt));
                                break;
                            }
                            Some(Err(e)) => e,
                            None => ProviderError::streaming(
                                provider.as_str(),
                                "stream ended before completion",
                            ),
                        };

                        debug!(endpoint = %client.id(), attempt, "Stream broke, restarting");
                        if let Err(e) = self
                            .handle_failure(&mut state, attempt, selection, started.elapsed(), error, &cancel)
                            .await
                        {
                            yield Err(e);
                            break;
                        }

                        match self.open_next(&mut state, &request, fallback.as_ref(), &cancel).await {
                            Ok(next) => opened = next,
                            Err(e) => {
                                yield Err(e);
                                break;
                            }
                        }
                    }
                }
            }
        }))
    }

    /// Open a stream on the next eligible endpoint, or fall back
    async fn open_next(
        &self,
        state: &mut AttemptState,
        request: &CompletionRequest,
        fallback: Option<&LocalFallback>,
        cancel: &CancellationToken,
    ) -> Result<Opened> {
        loop {
            if cancel.is_cancelled() {
                return Err(crate::utils::error::GatewayError::Cancelled);
            }
            let Some((attempt, selection)) = self.begin_remote(state, request) else {
                break;
            };

            let client = Arc::clone(selection.client());
            let started = Instant::now();
            match client.stream(request, cancel).await {
                Ok(stream) => {
                    return Ok(Opened::Remote {
                        stream,
                        selection,
                        started,
                        attempt,
                    });
                }
                Err(e) => {
                    self.handle_failure(state, attempt, selection, started.elapsed(), e, cancel)
                        .await?
                }
            }
        }

        let attempt = state.next_attempt;
        let response = self.finish(state, request, fallback, cancel).await?;
        Ok(Opened::Fallback { response, attempt })
    }
}
