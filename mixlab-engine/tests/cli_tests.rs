//! End-to-end tests for the CLI commands over JSON documents on disk

use mixlab_common::config::{MixlabConfig, ScoringConfig};
use mixlab_common::Error;
use mixlab_engine::cli::{run, run_automate, run_match, AutomateWindow, Command};
use mixlab_engine::{AutomationEvaluator, TemplateMatcher};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

const HOUSE_ID: &str = "5f0c7b8e-2a43-4d1e-9c3a-0d6f1e2b3c4d";
const AMBIENT_ID: &str = "a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d";
const MISSING_ID: &str = "00000000-0000-4000-8000-000000000000";

fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn catalog() -> Value {
    json!([
        {
            "id": AMBIENT_ID,
            "name": "Slow wash",
            "category": "ambient",
            "difficulty": "beginner",
            "duration": 32.0,
            "templateData": {
                "bpmMin": 60.0,
                "bpmMax": 80.0,
                "energyMin": 0.0,
                "energyMax": 0.3,
                "transitions": []
            }
        },
        {
            "id": HOUSE_ID,
            "name": "Classic house blend",
            "category": "house",
            "difficulty": "intermediate",
            "duration": 8.0,
            "templateData": {
                "bpmMin": 120.0,
                "bpmMax": 140.0,
                "compatibleKeys": ["A minor"],
                "energyMin": 0.5,
                "energyMax": 0.9,
                "genreTags": { "deep house": 0.8 },
                "transitions": [
                    {
                        "type": "crossfade",
                        "startTime": 0.0,
                        "duration": 8.0,
                        "parameters": {
                            "volumeAutomation": [
                                { "time": 0.0, "trackAVolume": 100.0, "trackBVolume": 0.0 },
                                { "time": 8.0, "trackAVolume": 0.0, "trackBVolume": 100.0 }
                            ],
                            "curve": "linear"
                        }
                    },
                    {
                        "type": "filter",
                        "startTime": 4.0,
                        "duration": 4.0,
                        "parameters": {
                            "filterType": "highpass",
                            "cutoffFreq": 420.0,
                            "resonance": 2.0
                        }
                    }
                ]
            }
        }
    ])
}

fn tracks(dir: &TempDir) -> (PathBuf, PathBuf) {
    let a = write_json(
        dir,
        "track_a.json",
        &json!({ "bpm": 128.0, "key": "A minor", "genre": "house", "energy": 0.7, "confidence": 0.9 }),
    );
    let b = write_json(
        dir,
        "track_b.json",
        &json!({ "bpm": 130.0, "key": "C", "genre": "house", "energy": 0.75, "danceability": 0.8 }),
    );
    (a, b)
}

#[test]
fn test_match_ranks_whole_catalog() {
    let dir = TempDir::new().unwrap();
    let (a, b) = tracks(&dir);
    let catalog = write_json(&dir, "catalog.json", &catalog());

    let output = run_match(&TemplateMatcher::default(), &a, &b, &catalog, None, None).unwrap();
    let scores = output.as_array().unwrap();

    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0]["templateId"], HOUSE_ID);
    assert_eq!(scores[0]["overallScore"], 98);
    // (0.9 + default 0.7) / 2
    assert_eq!(scores[0]["confidence"], 0.8);
    assert_eq!(scores[1]["templateId"], AMBIENT_ID);
}

#[test]
fn test_match_top_limits_output() {
    let dir = TempDir::new().unwrap();
    let (a, b) = tracks(&dir);
    let catalog = write_json(&dir, "catalog.json", &catalog());

    let output = run_match(&TemplateMatcher::default(), &a, &b, &catalog, Some(1), None).unwrap();
    let scores = output.as_array().unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0]["templateId"], HOUSE_ID);
}

#[test]
fn test_match_min_score_auto_picks() {
    let dir = TempDir::new().unwrap();
    let (a, b) = tracks(&dir);
    let catalog = write_json(&dir, "catalog.json", &catalog());
    let matcher = TemplateMatcher::default();

    let picked = run_match(&matcher, &a, &b, &catalog, None, Some(90)).unwrap();
    assert_eq!(picked["templateId"], HOUSE_ID);

    let none = run_match(&matcher, &a, &b, &catalog, None, Some(99)).unwrap();
    assert!(none.is_null());
}

#[test]
fn test_match_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let (a, b) = tracks(&dir);
    let catalog = write_json(&dir, "catalog.json", &json!([]));

    let output = run_match(&TemplateMatcher::default(), &a, &b, &catalog, None, None).unwrap();
    assert_eq!(output, json!([]));
}

#[test]
fn test_match_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let (a, _) = tracks(&dir);
    let catalog = write_json(&dir, "catalog.json", &catalog());
    let missing = dir.path().join("nope.json");

    let result = run_match(&TemplateMatcher::default(), &a, &missing, &catalog, None, None);
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_match_malformed_catalog_is_json_error() {
    let dir = TempDir::new().unwrap();
    let (a, b) = tracks(&dir);
    let catalog = dir.path().join("catalog.json");
    std::fs::write(&catalog, "[{ not json").unwrap();

    let result = run_match(&TemplateMatcher::default(), &a, &b, &catalog, None, None);
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_automate_single_instant() {
    let dir = TempDir::new().unwrap();
    let catalog = write_json(&dir, "catalog.json", &catalog());
    let placements = write_json(
        &dir,
        "placements.json",
        &json!([
            { "id": "11111111-1111-4111-8111-111111111111", "templateId": MISSING_ID, "startTime": 0.0 },
            {
                "id": "22222222-2222-4222-8222-222222222222",
                "templateId": HOUSE_ID,
                "startTime": 10.0,
                "trackARegion": { "start": 30.0, "end": 38.0 },
                "parameterOverrides": { "trackBVolume": 0.5, "eqLow": -3.0 }
            }
        ]),
    );

    let evaluator = AutomationEvaluator::default();
    let output = run_automate(&evaluator, &placements, &catalog, AutomateWindow::At(16.0)).unwrap();

    // 6s into the crossfade, halfway through the highpass sweep
    assert_eq!(output["trackAGain"], 0.25);
    assert_eq!(output["trackBGain"], 0.375);
    assert_eq!(output["filterType"], "highpass");
    assert_eq!(output["filterCutoff"], 220.0);
    assert_eq!(output["filterResonance"], 2.0);
}

#[test]
fn test_automate_range_produces_frames() {
    let dir = TempDir::new().unwrap();
    let catalog = write_json(&dir, "catalog.json", &catalog());
    let placements = write_json(
        &dir,
        "placements.json",
        &json!([
            { "id": "22222222-2222-4222-8222-222222222222", "templateId": HOUSE_ID, "startTime": 0.0 }
        ]),
    );

    let evaluator = AutomationEvaluator::default();
    let window = AutomateWindow::Range {
        from: 0.0,
        to: 10.0,
        step: 2.0,
    };
    let output = run_automate(&evaluator, &placements, &catalog, window).unwrap();
    let frames = output.as_array().unwrap();

    assert_eq!(frames.len(), 6);
    assert_eq!(frames[0]["time"], 0.0);
    assert_eq!(frames[0]["parameters"]["trackAGain"], 1.0);
    assert_eq!(frames[2]["parameters"]["trackBGain"], 0.5);
    // Past the template end everything is neutral again
    assert_eq!(frames[5]["parameters"]["trackBGain"], 1.0);
    assert_eq!(frames[5]["parameters"]["filterCutoff"], 22_050.0);
}

#[test]
fn test_run_uses_configured_weights_and_sample_rate() {
    let dir = TempDir::new().unwrap();
    let (a, b) = tracks(&dir);
    let catalog = write_json(&dir, "catalog.json", &catalog());
    let placements = write_json(&dir, "placements.json", &json!([]));

    let mut config = MixlabConfig::default();
    config.scoring = ScoringConfig {
        bpm_weight: 0.0,
        key_weight: 0.0,
        genre_weight: 1.0,
        energy_weight: 0.0,
        ..ScoringConfig::default()
    };
    config.automation.sample_rate = 48_000;

    let scores = run(
        &Command::Match {
            track_a: a,
            track_b: b,
            catalog,
            top: None,
            min_score: None,
        },
        &config,
    )
    .unwrap();
    assert_eq!(scores[0]["overallScore"], 100);

    let params = run(
        &Command::Automate {
            placements,
            catalog: dir.path().join("catalog.json"),
            at: Some(1.0),
            from: None,
            to: None,
            step: 0.1,
        },
        &config,
    )
    .unwrap();
    assert_eq!(params["filterCutoff"], 24_000.0);
}

#[test]
fn test_run_rejects_invalid_weights() {
    let dir = TempDir::new().unwrap();
    let (a, b) = tracks(&dir);
    let catalog = write_json(&dir, "catalog.json", &catalog());

    let mut config = MixlabConfig::default();
    config.scoring.bpm_weight = 0.9;

    let result = run(
        &Command::Match {
            track_a: a,
            track_b: b,
            catalog,
            top: None,
            min_score: None,
        },
        &config,
    );
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_automate_rejects_runaway_range() {
    let dir = TempDir::new().unwrap();
    let catalog = write_json(&dir, "catalog.json", &catalog());
    let placements = write_json(&dir, "placements.json", &json!([]));

    let window = AutomateWindow::Range {
        from: 0.0,
        to: 1e9,
        step: 1e-6,
    };
    let result = run_automate(&AutomationEvaluator::default(), &placements, &catalog, window);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}
