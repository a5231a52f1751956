//! Human-readable reasoning attached to each match score

use mixlab_common::models::MatchReasoning;

/// Four-step quality ladder used by every reasoning string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Excellent,
    Good,
    Moderate,
    Weak,
}

impl Tier {
    /// Component thresholds: ≥90, ≥70, ≥50
    fn for_component(score: f64) -> Self {
        Self::with_cutoffs(score, 90.0)
    }

    /// Overall recommendation thresholds: ≥85, ≥70, ≥50
    fn for_overall(mean: f64) -> Self {
        Self::with_cutoffs(mean, 85.0)
    }

    fn with_cutoffs(score: f64, top: f64) -> Self {
        if score >= top {
            Tier::Excellent
        } else if score >= 70.0 {
            Tier::Good
        } else if score >= 50.0 {
            Tier::Moderate
        } else {
            Tier::Weak
        }
    }
}

fn bpm_text(tier: Tier) -> &'static str {
    match tier {
        Tier::Excellent => "Perfect tempo match for this template",
        Tier::Good => "Good tempo compatibility",
        Tier::Moderate => "Moderate tempo fit, some time-stretching may be needed",
        Tier::Weak => "Limited tempo compatibility",
    }
}

fn key_text(tier: Tier) -> &'static str {
    match tier {
        Tier::Excellent => "Excellent harmonic compatibility",
        Tier::Good => "Good harmonic compatibility",
        Tier::Moderate => "Moderate harmonic compatibility",
        Tier::Weak => "Weak harmonic match, keys may clash",
    }
}

fn genre_text(tier: Tier) -> &'static str {
    match tier {
        Tier::Excellent => "Perfect genre match",
        Tier::Good => "Strong genre affinity",
        Tier::Moderate => "Moderate cross-genre fit",
        Tier::Weak => "Limited genre compatibility",
    }
}

fn energy_text(tier: Tier) -> &'static str {
    match tier {
        Tier::Excellent => "Energy levels are ideal for this template",
        Tier::Good => "Good energy alignment",
        Tier::Moderate => "Moderate energy fit",
        Tier::Weak => "Energy levels differ from the template profile",
    }
}

fn overall_text(tier: Tier) -> &'static str {
    match tier {
        Tier::Excellent => "Highly recommended: this template suits both tracks",
        Tier::Good => "Recommended: a solid choice for this track pair",
        Tier::Moderate => "Usable with some manual adjustment",
        Tier::Weak => "Not recommended for this track pair",
    }
}

/// Build the reasoning record for one template
///
/// The overall sentence follows the unweighted mean of the four
/// components, not the weighted overall score.
pub fn build_reasoning(bpm: f64, key: f64, genre: f64, energy: f64) -> MatchReasoning {
    let mean = (bpm + key + genre + energy) / 4.0;
    MatchReasoning {
        bpm: bpm_text(Tier::for_component(bpm)).to_string(),
        key: key_text(Tier::for_component(key)).to_string(),
        genre: genre_text(Tier::for_component(genre)).to_string(),
        energy: energy_text(Tier::for_component(energy)).to_string(),
        overall: overall_text(Tier::for_overall(mean)).to_string(),
    }
}
