//! Template compatibility scoring
//!
//! Ranks a template catalog against a track pair over four dimensions:
//! - **Tempo**: combined pair BPM vs template range (half/double-time aware)
//! - **Key**: each track vs template keys on the Camelot wheel, averaged
//! - **Genre**: each track vs template category and tags, averaged
//! - **Energy**: combined pair energy vs template window
//!
//! Scoring never fails. Missing or unusable inputs degrade the affected
//! dimension to a neutral 50.

pub mod bpm;
pub mod camelot;
pub mod energy;
pub mod genre;
pub mod reasoning;

use mixlab_common::config::ScoringConfig;
use mixlab_common::models::{AudioAnalysisSummary, MixTemplate, TemplateMatchScore};
use mixlab_common::Result;
use tracing::debug;

/// Score for a dimension with unknown or unusable inputs
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Stateless template matcher
///
/// Holds only immutable scoring configuration, so a single instance can be
/// shared freely or scoring can run in parallel for different pairs.
#[derive(Debug, Clone, Default)]
pub struct TemplateMatcher {
    config: ScoringConfig,
}

impl TemplateMatcher {
    /// Create a matcher, rejecting configurations that cannot score
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score every catalog template and rank them best first
    ///
    /// Ties keep catalog order (stable sort).
    pub fn match_templates(
        &self,
        track_a: &AudioAnalysisSummary,
        track_b: &AudioAnalysisSummary,
        catalog: &[MixTemplate],
    ) -> Vec<TemplateMatchScore> {
        let mut scores: Vec<TemplateMatchScore> = catalog
            .iter()
            .map(|template| self.score_template(track_a, track_b, template))
            .collect();

        scores.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));

        debug!(
            "Ranked {} templates, best overall score {:?}",
            scores.len(),
            scores.first().map(|s| s.overall_score)
        );
        scores
    }

    /// Score a single template against the pair
    pub fn score_template(
        &self,
        track_a: &AudioAnalysisSummary,
        track_b: &AudioAnalysisSummary,
        template: &MixTemplate,
    ) -> TemplateMatchScore {
        let data = &template.template_data;

        // Tempo and energy describe the pair; key and genre each track
        let bpm_score = bpm::score_bpm(
            bpm::combined_bpm(track_a, track_b),
            data,
            self.config.default_bpm_flexibility,
        );

        let key_score = (camelot::score_key(track_a.key.as_deref(), &data.compatible_keys)
            + camelot::score_key(track_b.key.as_deref(), &data.compatible_keys))
            / 2.0;

        let genre_score = (genre::score_genre(
            track_a.usable_genre(),
            &template.category,
            &data.genre_tags,
        ) + genre::score_genre(track_b.usable_genre(), &template.category, &data.genre_tags))
            / 2.0;

        let energy_score = energy::score_energy(
            energy::combined_energy(track_a, track_b),
            data,
            self.config.energy_buffer,
        );

        let weighted = bpm_score * self.config.bpm_weight
            + key_score * self.config.key_weight
            + genre_score * self.config.genre_weight
            + energy_score * self.config.energy_weight;
        let overall_score = weighted.round().clamp(0.0, 100.0) as u8;

        let confidence = self.pair_confidence(track_a, track_b);

        debug!(
            "Template {} ({}): bpm={:.1} key={:.1} genre={:.1} energy={:.1} overall={}",
            template.id, template.category, bpm_score, key_score, genre_score, energy_score,
            overall_score
        );

        TemplateMatchScore {
            template_id: template.id,
            overall_score,
            bpm_score,
            key_score,
            genre_score,
            energy_score,
            confidence,
            reasoning: reasoning::build_reasoning(bpm_score, key_score, genre_score, energy_score),
        }
    }

    /// Best match only if it reaches `min_score`
    pub fn auto_pick(
        &self,
        track_a: &AudioAnalysisSummary,
        track_b: &AudioAnalysisSummary,
        catalog: &[MixTemplate],
        min_score: u8,
    ) -> Option<TemplateMatchScore> {
        let scores = self.match_templates(track_a, track_b, catalog);
        let best = best_match(&scores)?;
        if best.overall_score >= min_score {
            Some(best.clone())
        } else {
            debug!(
                "Best template scores {} below auto-pick threshold {}",
                best.overall_score, min_score
            );
            None
        }
    }

    /// Mean of both track confidences, rounded to two decimals
    fn pair_confidence(&self, track_a: &AudioAnalysisSummary, track_b: &AudioAnalysisSummary) -> f64 {
        let default = self.config.default_track_confidence;
        let usable = |c: Option<f64>| {
            c.filter(|v| v.is_finite())
                .map(|v| v.clamp(0.0, 1.0))
                .unwrap_or(default)
        };
        let mean = (usable(track_a.confidence) + usable(track_b.confidence)) / 2.0;
        (mean * 100.0).round() / 100.0
    }
}

/// First (highest ranked) score, if any
pub fn best_match(scores: &[TemplateMatchScore]) -> Option<&TemplateMatchScore> {
    scores.first()
}

/// Leading `count` scores, clamped to what is available
pub fn top_matches(scores: &[TemplateMatchScore], count: usize) -> &[TemplateMatchScore] {
    &scores[..count.min(scores.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixlab_common::models::{Difficulty, TemplateCategory, TemplateData};
    use uuid::Uuid;

    fn template(category: TemplateCategory, data: TemplateData) -> MixTemplate {
        MixTemplate {
            id: Uuid::new_v4(),
            name: None,
            category,
            difficulty: Difficulty::Intermediate,
            duration: 16.0,
            template_data: data,
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ScoringConfig {
            bpm_weight: 0.9,
            ..ScoringConfig::default()
        };
        assert!(TemplateMatcher::new(config).is_err());
    }

    #[test]
    fn test_confidence_defaults_and_rounding() {
        let matcher = TemplateMatcher::default();
        let a = AudioAnalysisSummary {
            confidence: Some(0.913),
            ..Default::default()
        };
        let b = AudioAnalysisSummary::default();
        // (0.913 + 0.7) / 2 = 0.8065 → 0.81
        assert_eq!(matcher.pair_confidence(&a, &b), 0.81);
        assert_eq!(
            matcher.pair_confidence(&AudioAnalysisSummary::default(), &AudioAnalysisSummary::default()),
            0.7
        );
    }

    #[test]
    fn test_empty_everything_is_fifty() {
        let matcher = TemplateMatcher::default();
        let empty = AudioAnalysisSummary::default();
        let score = matcher.score_template(
            &empty,
            &empty,
            &template(TemplateCategory::House, TemplateData::default()),
        );
        assert_eq!(score.overall_score, 50);
        assert_eq!(score.bpm_score, NEUTRAL_SCORE);
        assert_eq!(score.key_score, NEUTRAL_SCORE);
        assert_eq!(score.genre_score, NEUTRAL_SCORE);
        assert_eq!(score.energy_score, NEUTRAL_SCORE);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let matcher = TemplateMatcher::default();
        let empty = AudioAnalysisSummary::default();
        let catalog: Vec<MixTemplate> = (0..5)
            .map(|_| template(TemplateCategory::Techno, TemplateData::default()))
            .collect();

        let scores = matcher.match_templates(&empty, &empty, &catalog);
        let ranked: Vec<Uuid> = scores.iter().map(|s| s.template_id).collect();
        let original: Vec<Uuid> = catalog.iter().map(|t| t.id).collect();
        assert_eq!(ranked, original);
    }

    #[test]
    fn test_best_and_top_on_empty() {
        assert!(best_match(&[]).is_none());
        assert!(top_matches(&[], 3).is_empty());
    }

    #[test]
    fn test_auto_pick_threshold() {
        let matcher = TemplateMatcher::default();
        let empty = AudioAnalysisSummary::default();
        let catalog = vec![template(TemplateCategory::Pop, TemplateData::default())];

        assert!(matcher.auto_pick(&empty, &empty, &catalog, 50).is_some());
        assert!(matcher.auto_pick(&empty, &empty, &catalog, 51).is_none());
        assert!(matcher.auto_pick(&empty, &empty, &[], 0).is_none());
    }
}
