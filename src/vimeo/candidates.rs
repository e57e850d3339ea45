use tracing::debug;

/// Fixed transforms from a video id to plausible text-track ids, in probe
/// order. The offsets and the ratio come from comparing known video/track
/// id pairs; Vimeo has never documented the mapping, so every candidate is
/// a guess worth probing, never a known-correct answer.
const ID_OFFSETS: [i64; 3] = [-859_435_365, -860_000_000, -850_000_000];
const ID_RATIO: f64 = 0.226;

/// Minimum digits for a candidate to be worth a network round trip.
const MIN_CANDIDATE_LEN: usize = 6;

/// Derive candidate text-track ids from a video id.
///
/// Returns a deduplicated list in generation order: the three fixed offsets,
/// the id itself, then the ratio-scaled id. Candidates shorter than six
/// digits (or non-positive) are dropped. A video id that does not parse as a
/// number yields no candidates.
pub fn candidate_track_ids(video_id: &str) -> Vec<String> {
    let id_num: i64 = match video_id.parse() {
        Ok(n) => n,
        Err(_) => {
            debug!("Video id {} is not numeric, no candidates generated", video_id);
            return Vec::new();
        }
    };

    let mut raw = Vec::new();
    for offset in ID_OFFSETS {
        raw.push(id_num + offset);
    }
    raw.push(id_num);
    raw.push((id_num as f64 * ID_RATIO).floor() as i64);

    let mut candidates: Vec<String> = Vec::new();
    for value in raw {
        if value <= 0 {
            continue;
        }
        let rendered = value.to_string();
        if rendered.len() < MIN_CANDIDATE_LEN {
            continue;
        }
        if !candidates.contains(&rendered) {
            candidates.push(rendered);
        }
    }

    debug!("Generated {} track id candidates for video {}", candidates.len(), video_id);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_mapping_offset() {
        // 1109387993 is a video whose track id 249952628 was observed live.
        let candidates = candidate_track_ids("1109387993");
        assert!(candidates.contains(&"249952628".to_string()));
    }

    #[test]
    fn test_candidates_in_generation_order() {
        let candidates = candidate_track_ids("1109387993");
        assert_eq!(
            candidates,
            vec![
                "249952628",  // -859435365
                "249387993",  // -860000000
                "259387993",  // -850000000
                "1109387993", // identity
                "250721686",  // floor(* 0.226)
            ]
        );
    }

    #[test]
    fn test_short_candidates_filtered() {
        // 860001000 - 860000000 = 1000, well under six digits.
        let candidates = candidate_track_ids("860001000");
        assert!(candidates.iter().all(|c| c.len() >= 6));
        assert!(!candidates.contains(&"1000".to_string()));
    }

    #[test]
    fn test_negative_candidates_filtered() {
        // Small ids go negative under every offset; identity survives only
        // if long enough.
        let candidates = candidate_track_ids("123456");
        assert_eq!(candidates, vec!["123456".to_string()]);
    }

    #[test]
    fn test_non_numeric_id_yields_nothing() {
        assert!(candidate_track_ids("notanumber").is_empty());
    }

    #[test]
    fn test_deduplication_preserves_first_occurrence() {
        let candidates = candidate_track_ids("1109387993");
        let mut seen = std::collections::HashSet::new();
        assert!(candidates.iter().all(|c| seen.insert(c.clone())));
    }
}
