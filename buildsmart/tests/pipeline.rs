use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use buildsmart::prelude::*;
use serde_json::json;

const VALID: &str = r#"{"Built-up area (sq. ft.)": 607.94, "Windows count": 5, "Doors count": 3}"#;

struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, String>>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    fn new(responses: Vec<Result<&str, &str>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionModel for ScriptedModel {
    async fn generate(&self, _image: &FloorPlanImage, _prompt: &str) -> Result<String, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::new(8, 8);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn analyzer(model: &Arc<ScriptedModel>, config: AppConfig) -> Analyzer {
    Analyzer::with_model(model.clone(), config).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_analysis_produces_breakdown() {
    let model = ScriptedModel::new(vec![Ok(VALID)]);

    let analysis = analyzer(&model, AppConfig::new())
        .analyze(Some(png_bytes()))
        .await
        .unwrap();

    assert_eq!(model.calls(), 1);
    assert!((analysis.quantities.built_up_area_sq_ft() - 607.94).abs() < 1e-9);
    assert_eq!(analysis.quantities.door_count(), 3);
    assert_eq!(analysis.quantities.window_count(), 5);
    assert_eq!(analysis.breakdown.construction_stage.materials.cement_needed, 163);
    assert_eq!(analysis.metrics.total_attempts, 1);
    assert_eq!(analysis.metrics.image_bytes_sent, png_bytes().len());
    assert!(analysis.metrics.estimated_input_tokens > 0);
}

#[tokio::test(start_paused = true)]
async fn test_success_response_body() {
    let model = ScriptedModel::new(vec![Ok(VALID)]);

    let response = analyzer(&model, AppConfig::new())
        .respond(Some(png_bytes()))
        .await;

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert_eq!(
        response.body["construction_stage"]["materials"]["cement_needed"],
        json!(163)
    );
    assert!(response.body.get("total_cost_estimation").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_missing_upload_is_bad_request() {
    let model = ScriptedModel::new(vec![Ok(VALID)]);

    let response = analyzer(&model, AppConfig::new()).respond(None).await;

    assert_eq!(response.status, 400);
    assert_eq!(
        response.body,
        json!({"error": "Invalid image: No image file provided"})
    );
    assert_eq!(model.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_undecodable_upload_is_bad_request() {
    let model = ScriptedModel::new(vec![Ok(VALID)]);

    let response = analyzer(&model, AppConfig::new())
        .respond(Some(b"definitely not an image".to_vec()))
        .await;

    assert_eq!(response.status, 400);
    assert_eq!(model.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_missing_fields_are_server_error() {
    let model = ScriptedModel::new(vec![Ok(r#"{"Windows count": 5}"#)]);

    let response = analyzer(&model, AppConfig::new())
        .respond(Some(png_bytes()))
        .await;

    assert_eq!(response.status, 500);
    let message = response.body["error"].as_str().unwrap();
    assert!(message.starts_with("Missing expected keys in model response"));
    assert_eq!(model.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_are_server_error() {
    let model = ScriptedModel::new(vec![Ok("not json"), Ok("still not json"), Ok("nope")]);

    let response = analyzer(&model, AppConfig::new())
        .respond(Some(png_bytes()))
        .await;

    assert_eq!(response.status, 500);
    assert_eq!(
        response.body,
        json!({"error": "Failed to get a valid response from the model after 3 attempts (max: 3)"})
    );
    assert_eq!(model.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_is_bad_gateway() {
    let model = ScriptedModel::new(vec![Err("connection reset")]);

    let err = analyzer(&model, AppConfig::new())
        .analyze(Some(png_bytes()))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 502);
    assert!(err.to_string().contains("connection reset"));
    assert_eq!(model.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_injected_schedule_prices_the_estimate() {
    let mut schedule = CostSchedule::default();
    schedule.construction_stage.total = 2000.0;
    schedule.total_estimated_expenditure.min = 1000.0;
    schedule.total_estimated_expenditure.max = 1100.0;
    let config = AppConfig {
        schedule,
        ..AppConfig::new()
    };
    let model = ScriptedModel::new(vec![Ok(
        r#"{"Built-up area (sq. ft.)": 100, "Windows count": 0, "Doors count": 0}"#,
    )]);

    let analysis = analyzer(&model, config)
        .analyze(Some(png_bytes()))
        .await
        .unwrap();

    assert!((analysis.breakdown.construction_stage.cost.total - 200_000.0).abs() < 1e-6);
    assert!((analysis.breakdown.total_cost_estimation.min - 100_000.0).abs() < 1e-6);
    assert!((analysis.breakdown.total_cost_estimation.max - 110_000.0).abs() < 1e-6);
}

#[test]
fn test_invalid_schedule_is_rejected_at_startup() {
    let mut schedule = CostSchedule::default();
    schedule.total_estimated_expenditure.min = 2000.0;
    let config = AppConfig {
        schedule,
        ..AppConfig::new()
    };
    let model = ScriptedModel::new(vec![]);

    let err = Analyzer::with_model(model, config).unwrap_err();

    assert!(matches!(err, Error::Schedule(_)));
}

#[test]
fn test_direct_estimate_skips_the_model() {
    let model = ScriptedModel::new(vec![]);
    let analyzer = analyzer(&model, AppConfig::new());
    let quantities = QuantityRecord::new(607.94, 3, 5).unwrap();

    let breakdown = analyzer.estimate(&quantities);

    assert_eq!(breakdown.construction_stage.materials.sand_needed, 249);
    assert_eq!(model.calls(), 0);
}
