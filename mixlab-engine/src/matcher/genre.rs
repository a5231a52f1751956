//! Genre affinity between a track and a template category

use super::NEUTRAL_SCORE;
use mixlab_common::models::TemplateCategory;
use std::collections::HashMap;

const EXACT_GENRE_SCORE: f64 = 100.0;
const TAGGED_GENRE_BASE: f64 = 80.0;
const TAGGED_GENRE_WEIGHT_SCALE: f64 = 20.0;
const RELATED_GENRE_SCORE: f64 = 60.0;
const UNRELATED_GENRE_SCORE: f64 = 20.0;

/// Cross-genre compatibility table (normalized labels)
///
/// Checked in both directions, so each pair only needs to appear once.
const RELATED_GENRES: &[(&str, &[&str])] = &[
    ("house", &["electronic", "techno", "progressive", "deep house", "tech house", "disco"]),
    ("techno", &["electronic", "minimal", "tech house", "industrial"]),
    ("trance", &["electronic", "progressive", "edm", "psytrance"]),
    ("electronic", &["edm", "dubstep", "drum and bass", "ambient", "electro", "dance"]),
    ("drum and bass", &["jungle", "dubstep", "breakbeat", "liquid"]),
    ("dubstep", &["trap", "bass", "riddim"]),
    ("hip hop", &["rap", "trap", "r&b", "rnb"]),
    ("pop", &["dance", "edm", "r&b", "indie pop"]),
    ("rock", &["alternative", "indie", "metal", "punk"]),
    ("ambient", &["chillout", "downtempo", "lofi"]),
    ("disco", &["funk", "soul", "nu disco"]),
];

/// Lowercase, trim, treat `_`/`-` as spaces, collapse runs of whitespace
pub fn normalize_genre(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether two normalized genres are listed as compatible
pub fn are_related(a: &str, b: &str) -> bool {
    RELATED_GENRES.iter().any(|(genre, related)| {
        (*genre == a && related.contains(&b)) || (*genre == b && related.contains(&a))
    })
}

/// Score one track genre against the template category and tags
///
/// Exact category match → 100. A weighted tag match →
/// `min(100, 80 + weight × 20)`. A related genre → 60. Otherwise 20.
/// Missing track genre → neutral 50. A template without a category is
/// judged by its tags alone and is neutral when none match.
pub fn score_genre(
    track_genre: Option<&str>,
    category: &TemplateCategory,
    genre_tags: &HashMap<String, f64>,
) -> f64 {
    let Some(track_genre) = track_genre else {
        return NEUTRAL_SCORE;
    };
    let genre = normalize_genre(track_genre);
    if genre.is_empty() {
        return NEUTRAL_SCORE;
    }

    let category_label = normalize_genre(category.label());
    if !category_label.is_empty() && genre == category_label {
        return EXACT_GENRE_SCORE;
    }

    if let Some(weight) = tag_weight(&genre, genre_tags) {
        return (TAGGED_GENRE_BASE + weight * TAGGED_GENRE_WEIGHT_SCALE)
            .clamp(0.0, EXACT_GENRE_SCORE);
    }

    if category_label.is_empty() {
        return NEUTRAL_SCORE;
    }

    if are_related(&genre, &category_label) {
        return RELATED_GENRE_SCORE;
    }

    UNRELATED_GENRE_SCORE
}

/// Weight of the tag matching a normalized genre
///
/// Tags that normalize to the same label resolve to their highest weight,
/// independent of map iteration order. Non-finite weights count as 0.
fn tag_weight(genre: &str, genre_tags: &HashMap<String, f64>) -> Option<f64> {
    genre_tags
        .iter()
        .filter(|(tag, _)| normalize_genre(tag) == genre)
        .map(|(_, weight)| if weight.is_finite() { *weight } else { 0.0 })
        .reduce(f64::max)
}
