//! Plan command: run the pipeline once and print the result

use crate::api::{RouteRequest, RouteResponse};
use crate::cli::serve::{build_pipeline, init_tracing};
use crate::cli::{load_config, PlanArgs};

/// Serialize a response for the terminal.
pub fn render_response(
    response: &RouteResponse,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    }
}

/// Handle `route-planner plan` command
///
/// Prints the `RouteResponse` JSON to stdout. An empty result is printed too,
/// then reported as an error so the exit status is non-zero.
pub async fn run_plan(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&args.config)?;
    config.validate()?;
    init_tracing(&config.logging)?;

    let pipeline = build_pipeline(&config)?;

    let request = RouteRequest {
        prompt: args.prompt,
        start_location_name: args.start,
    };
    let start_hint = request.start_hint(&config.pipeline.default_start_location);

    let response = pipeline.plan(&request.prompt, start_hint).await;
    println!("{}", render_response(&response, args.pretty)?);

    if response.is_empty() {
        return Err("No routes could be planned; see the log output for the cause".into());
    }
    Ok(())
}
