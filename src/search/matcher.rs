/// Weighted multi-field fuzzy matching.
///
/// Scores are distances: 0 is an exact match, larger is worse. A field
/// matches when its raw score stays within `MATCH_THRESHOLD`; substring
/// containment always does, approximate matches are token-level edit
/// distance. Title carries more weight than description, so a title match
/// ranks ahead of an equally good description match.

use unicode_normalization::UnicodeNormalization;

use super::{SearchDoc, SearchHit, SearchRequest};

/// Queries shorter than this return nothing; very short queries match
/// everything and produce noise.
const MIN_QUERY_CHARS: usize = 3;

/// Raw per-field score ceiling for an approximate match.
const MATCH_THRESHOLD: f64 = 0.3;

const TITLE_WEIGHT: f64 = 0.7;
const DESCRIPTION_WEIGHT: f64 = 0.2;

/// Rank the request's documents against its query, best (lowest score)
/// first. The sort is stable: equal scores keep document order.
pub fn rank(request: &SearchRequest) -> Vec<SearchHit> {
    let query = normalize(request.query.trim());
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = request
        .data
        .iter()
        .filter_map(|doc| {
            score_doc(&query, doc).map(|score| SearchHit {
                id: doc.id.clone(),
                score,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.score.total_cmp(&b.score));
    hits
}

/// Best weighted field score for one document, or None when no field
/// matches.
fn score_doc(query: &str, doc: &SearchDoc) -> Option<f64> {
    let title = doc
        .title
        .as_deref()
        .and_then(|field| field_score(query, field))
        .map(|raw| raw * (1.0 - TITLE_WEIGHT));
    let description = doc
        .description
        .as_deref()
        .and_then(|field| field_score(query, field))
        .map(|raw| raw * (1.0 - DESCRIPTION_WEIGHT));

    match (title, description) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Raw match score of `query` against one field, location-insensitive.
fn field_score(query: &str, field: &str) -> Option<f64> {
    let field = normalize(field);
    if field.is_empty() {
        return None;
    }
    if field == query {
        return Some(0.0);
    }
    if field.contains(query) {
        // containment is always a match; score by how much of the field the
        // query covers, so tighter fields rank first
        let coverage = query.chars().count() as f64 / field.chars().count() as f64;
        return Some((1.0 - coverage) * MATCH_THRESHOLD);
    }

    // approximate: each query token against its closest field token
    let field_tokens: Vec<&str> = field.split_whitespace().collect();
    if field_tokens.is_empty() {
        return None;
    }
    let mut total = 0.0;
    let mut count = 0usize;
    for query_token in query.split_whitespace() {
        let best = field_tokens
            .iter()
            .map(|token| token_similarity(query_token, token))
            .fold(0.0f64, f64::max);
        total += best;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let score = 1.0 - total / count as f64;
    (score <= MATCH_THRESHOLD).then_some(score)
}

/// Similarity in [0, 1] from edit distance, 1 meaning identical.
fn token_similarity(a: &str, b: &str) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let longest = a_len.max(b_len);
    if longest == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / longest as f64
}

/// Plain Levenshtein distance over chars, two-row DP.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Unicode-aware normalization: lowercases, NFD-decomposes, and strips
/// combining marks, so "Résumé" matches "resume".
fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect()
}
