//! Ordered matching of control-code sequences.
//!
//! Two modes cover the two call sites in the engine: contiguous matching
//! where exact course replication is expected, and subsequence matching
//! where a runner may visit noise controls between the required ones.
//! Matching is generic over any comparable element so callers can pass
//! borrowed codes without cloning.

/// How a pattern must occur within a code sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The pattern must appear as one gap-free window.
    Contiguous,
    /// The pattern must appear in order, gaps tolerated.
    Subsequence,
}

/// The inclusive index range of a match.
///
/// `start` and `end` are the indices of the first and last matched
/// elements. In subsequence mode the range may contain unmatched elements
/// between the anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

/// Finds the leftmost occurrence of `pattern` in `codes`.
///
/// Returns `None` for an empty pattern, for a pattern longer than the code
/// sequence, and when no occurrence exists. A missing match is the expected
/// outcome for runners who did not run a course, never an error.
pub fn find_match<T: PartialEq>(codes: &[T], pattern: &[T], mode: MatchMode) -> Option<MatchSpan> {
    find_masked(codes, pattern, mode, &vec![false; codes.len()])
}

/// Extracts every non-overlapping occurrence of `pattern`, leftmost first.
///
/// Each match consumes its whole index range, so no position contributes to
/// more than one occurrence; the scan repeats until no further match fits
/// between the consumed ranges. Consumed state is held in a local mask
/// rather than written through the caller's data.
pub fn find_all<T: PartialEq>(codes: &[T], pattern: &[T], mode: MatchMode) -> Vec<MatchSpan> {
    let mut consumed = vec![false; codes.len()];
    let mut spans = Vec::new();
    while let Some(span) = find_masked(codes, pattern, mode, &consumed) {
        for slot in &mut consumed[span.start..=span.end] {
            *slot = true;
        }
        spans.push(span);
    }
    spans
}

/// Leftmost match with consumed positions excluded.
///
/// A consumed position can never equal a pattern element: contiguous
/// windows containing one fail, and subsequence alignment skips over it.
fn find_masked<T: PartialEq>(
    codes: &[T],
    pattern: &[T],
    mode: MatchMode,
    consumed: &[bool],
) -> Option<MatchSpan> {
    if pattern.is_empty() || pattern.len() > codes.len() {
        return None;
    }

    match mode {
        MatchMode::Contiguous => {
            'window: for start in 0..=codes.len() - pattern.len() {
                for (offset, want) in pattern.iter().enumerate() {
                    let index = start + offset;
                    if consumed[index] || codes[index] != *want {
                        continue 'window;
                    }
                }
                return Some(MatchSpan {
                    start,
                    end: start + pattern.len() - 1,
                });
            }
            None
        }
        MatchMode::Subsequence => {
            let mut remaining = pattern.iter();
            let mut want = remaining.next()?;
            let mut first = None;
            for (index, code) in codes.iter().enumerate() {
                if consumed[index] || code != want {
                    continue;
                }
                if first.is_none() {
                    first = Some(index);
                }
                match remaining.next() {
                    Some(next) => want = next,
                    None => {
                        return Some(MatchSpan {
                            start: first?,
                            end: index,
                        });
                    }
                }
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_finds_lowest_start_index() {
        let codes = ["101", "102", "101", "102"];
        let span = find_match(&codes, &["101", "102"], MatchMode::Contiguous).unwrap();
        assert_eq!(span, MatchSpan { start: 0, end: 1 });
    }

    #[test]
    fn contiguous_rejects_gaps() {
        let codes = ["101", "199", "102"];
        assert!(find_match(&codes, &["101", "102"], MatchMode::Contiguous).is_none());
    }

    #[test]
    fn contiguous_none_when_pattern_longer_than_codes() {
        let codes = ["101"];
        assert!(find_match(&codes, &["101", "102"], MatchMode::Contiguous).is_none());
    }

    #[test]
    fn empty_pattern_never_matches() {
        let codes = ["101", "102"];
        let empty: [&str; 0] = [];
        assert!(find_match(&codes, &empty, MatchMode::Contiguous).is_none());
        assert!(find_match(&codes, &empty, MatchMode::Subsequence).is_none());
    }

    #[test]
    fn subsequence_tolerates_noise_between_controls() {
        let codes = ["101", "199", "102", "198", "103"];
        let span = find_match(&codes, &["101", "102", "103"], MatchMode::Subsequence).unwrap();
        assert_eq!(span, MatchSpan { start: 0, end: 4 });
    }

    #[test]
    fn subsequence_requires_order() {
        let codes = ["102", "101"];
        assert!(find_match(&codes, &["101", "102"], MatchMode::Subsequence).is_none());
    }

    #[test]
    fn subsequence_anchors_are_first_and_last_aligned_indices() {
        let codes = ["199", "101", "102", "199"];
        let span = find_match(&codes, &["101", "102"], MatchMode::Subsequence).unwrap();
        assert_eq!(span, MatchSpan { start: 1, end: 2 });
    }

    #[test]
    fn find_all_extracts_non_overlapping_occurrences() {
        let codes = ["101", "102", "101", "102", "101", "102"];
        let spans = find_all(&codes, &["101", "102"], MatchMode::Contiguous);
        assert_eq!(
            spans,
            vec![
                MatchSpan { start: 0, end: 1 },
                MatchSpan { start: 2, end: 3 },
                MatchSpan { start: 4, end: 5 },
            ]
        );
    }

    #[test]
    fn find_all_never_counts_a_position_twice() {
        // Overlapping candidate windows at 0..=1 and 1..=2; only one extracted.
        let codes = ["101", "101", "101"];
        let spans = find_all(&codes, &["101", "101"], MatchMode::Contiguous);
        assert_eq!(spans, vec![MatchSpan { start: 0, end: 1 }]);
    }

    #[test]
    fn find_all_terminates_on_no_match() {
        let codes = ["101", "102"];
        assert!(find_all(&codes, &["103"], MatchMode::Contiguous).is_empty());
    }

    #[test]
    fn find_all_subsequence_consumes_whole_span() {
        // The first extraction spans indices 0..=2 including the noise
        // control, so the second "101"/"102" pair starts at index 3.
        let codes = ["101", "199", "102", "101", "102"];
        let spans = find_all(&codes, &["101", "102"], MatchMode::Subsequence);
        assert_eq!(
            spans,
            vec![
                MatchSpan { start: 0, end: 2 },
                MatchSpan { start: 3, end: 4 },
            ]
        );
    }
}
