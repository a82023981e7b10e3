//! AWS Lambda handler exposing the calculators as a JSON API
//!
//! Accepts a tagged `CalculationRequest` as the request body and returns
//! the calculation output as JSON. ETF batches with many tickers fan out
//! across threads while keeping input order.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use rayon::prelude::*;
use serde::Serialize;

use investment_calc::etf;
use investment_calc::request::{self, CalculationOutput, CalculationRequest, TickerOutcome};
use investment_calc::EngineError;

/// Envelope around the calculation output
#[derive(Debug, Serialize)]
struct ApiResponse {
    #[serde(flatten)]
    output: CalculationOutput,
    execution_time_ms: u64,
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(format!(
            r#"{{"error":{}}}"#,
            serde_json::to_string(message).unwrap_or_else(|_| "\"error\"".into())
        )))
        .unwrap()
}

fn json_response(body: &ApiResponse) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Run the request, fanning ETF batches out with rayon
///
/// Everything else dispatches through the library; results are
/// identical, only the ETF path is parallel here.
fn run_request(request: &CalculationRequest) -> Result<CalculationOutput, EngineError> {
    match request {
        CalculationRequest::Etf { series, params } => {
            let outcomes: Vec<TickerOutcome> = series
                .par_iter()
                .map(|s| match etf::simulate(s, params) {
                    Ok(result) => TickerOutcome {
                        ticker: s.ticker.clone(),
                        result: Some(result),
                        error: None,
                    },
                    Err(err) => TickerOutcome {
                        ticker: s.ticker.clone(),
                        result: None,
                        error: Some(err.to_string()),
                    },
                })
                .collect();
            Ok(CalculationOutput::Etf { outcomes })
        }
        other => request::run(other),
    }
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // Parse request body
    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: CalculationRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let output = match run_request(&request) {
        Ok(output) => output,
        Err(e) => {
            return Ok(error_response(422, &e.to_string()));
        }
    };

    let response = ApiResponse {
        output,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
