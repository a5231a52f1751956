//! Shared fixtures for mixlab-engine integration tests

#![allow(dead_code)]

use mixlab_common::models::{
    AudioAnalysisSummary, Difficulty, FilterType, MixTemplate, ParameterOverrides,
    TemplateCategory, TemplateData, TemplatePlacement, Transition, TransitionParameters,
    TransitionType, VolumePoint,
};
use std::collections::HashMap;
use uuid::Uuid;

pub const EPSILON: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {}, got {}",
        expected,
        actual
    );
}

pub fn track(bpm: f64, key: &str, genre: &str, energy: f64) -> AudioAnalysisSummary {
    AudioAnalysisSummary {
        bpm: Some(bpm),
        key: Some(key.to_string()),
        genre: Some(genre.to_string()),
        energy: Some(energy),
        ..Default::default()
    }
}

pub fn template(category: TemplateCategory, data: TemplateData) -> MixTemplate {
    MixTemplate {
        id: Uuid::new_v4(),
        name: None,
        category,
        difficulty: Difficulty::Intermediate,
        duration: 16.0,
        template_data: data,
    }
}

/// House template: 120-140 BPM, A minor, energy 0.5-0.9
pub fn house_template() -> MixTemplate {
    template(
        TemplateCategory::House,
        TemplateData {
            bpm_min: Some(120.0),
            bpm_max: Some(140.0),
            compatible_keys: vec!["A minor".to_string()],
            energy_min: Some(0.5),
            energy_max: Some(0.9),
            ..Default::default()
        },
    )
}

pub fn point(time: f64, a: f64, b: f64) -> VolumePoint {
    VolumePoint {
        time,
        track_a_volume: a,
        track_b_volume: b,
    }
}

pub fn volume_transition(
    kind: TransitionType,
    start_time: f64,
    duration: f64,
    points: Vec<VolumePoint>,
) -> Transition {
    Transition {
        kind,
        start_time,
        duration,
        parameters: TransitionParameters {
            volume_automation: points,
            ..Default::default()
        },
    }
}

pub fn filter_transition(
    filter_type: FilterType,
    start_time: f64,
    duration: f64,
    cutoff: f64,
    resonance: f64,
) -> Transition {
    Transition {
        kind: TransitionType::Filter,
        start_time,
        duration,
        parameters: TransitionParameters {
            filter_type: Some(filter_type),
            cutoff_freq: Some(cutoff),
            resonance: Some(resonance),
            ..Default::default()
        },
    }
}

pub fn automation_template(duration: f64, transitions: Vec<Transition>) -> MixTemplate {
    MixTemplate {
        duration,
        template_data: TemplateData {
            transitions,
            ..Default::default()
        },
        ..template(TemplateCategory::Electronic, TemplateData::default())
    }
}

/// 8-second linear crossfade from track A to track B
pub fn crossfade_template() -> MixTemplate {
    automation_template(
        8.0,
        vec![volume_transition(
            TransitionType::Crossfade,
            0.0,
            8.0,
            vec![point(0.0, 100.0, 0.0), point(8.0, 0.0, 100.0)],
        )],
    )
}

pub fn placement(template_id: Uuid, start_time: f64) -> TemplatePlacement {
    TemplatePlacement {
        id: Uuid::new_v4(),
        template_id,
        start_time,
        track_a_region: None,
        track_b_region: None,
        parameter_overrides: ParameterOverrides::default(),
    }
}

pub fn templates_by_id(templates: &[MixTemplate]) -> HashMap<Uuid, MixTemplate> {
    mixlab_engine::index_templates(templates)
}
