//! Stage 1: turn the free-text prompt into a structured proposal.

use super::error::PipelineError;
use super::prompt::render_instruction;
use super::state::{Constraints, PipelineState, RouteOutline};
use super::Stage;
use crate::provider::CompletionProvider;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// JSON document the completion service is asked to produce.
#[derive(Debug, Deserialize)]
struct Proposal {
    start_location: StartLocation,
    constraints: Constraints,
    suggested_routes: Vec<RouteOutline>,
}

#[derive(Debug, Deserialize)]
struct StartLocation {
    name: String,
}

/// Calls the completion service once and parses its answer strictly as JSON.
pub struct RequestInterpreter {
    completion: Arc<dyn CompletionProvider>,
    log_content: bool,
}

impl RequestInterpreter {
    pub fn new(completion: Arc<dyn CompletionProvider>) -> Self {
        Self {
            completion,
            log_content: false,
        }
    }

    /// Log prompt and completion text at debug level.
    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.log_content = enabled;
        self
    }

    async fn interpret(&self, state: &PipelineState) -> Result<Proposal, PipelineError> {
        let instruction = render_instruction(&state.prompt, &state.start_location_hint);
        if self.log_content {
            tracing::debug!(prompt = %state.prompt, "Sending instruction to completion service");
        }

        let text = self
            .completion
            .complete(&instruction)
            .await
            .map_err(PipelineError::Completion)?;

        if self.log_content {
            tracing::debug!(completion = %text, "Completion service answered");
        }

        serde_json::from_str(&text).map_err(|e| PipelineError::Parse(e.to_string()))
    }
}

#[async_trait]
impl Stage for RequestInterpreter {
    fn name(&self) -> &'static str {
        "interpreter"
    }

    async fn run(&self, state: PipelineState) -> PipelineState {
        match self.interpret(&state).await {
            Ok(proposal) => {
                tracing::debug!(
                    start = %proposal.start_location.name,
                    radius_km = proposal.constraints.radius_km,
                    route_count = proposal.constraints.route_count,
                    outlines = proposal.suggested_routes.len(),
                    "Prompt interpreted"
                );
                PipelineState {
                    start_location_name: proposal.start_location.name,
                    constraints: proposal.constraints,
                    suggested_routes: proposal.suggested_routes,
                    ..state
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to interpret prompt");
                state.with_error(e)
            }
        }
    }
}
