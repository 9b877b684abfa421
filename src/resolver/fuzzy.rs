//! Case-insensitive suffix matching for track file names.
//!
//! Renamed tracks usually keep their old name as a suffix
//! (`track1.mp3` → `Track_01_track1.mp3`), so "ends with, ignoring case" is
//! the only fuzziness applied.

/// Candidates whose lowercased name ends with the lowercased `target`,
/// in candidate order.
pub fn match_by_suffix<'a>(target: &str, candidates: &'a [String]) -> Vec<&'a str> {
    let target = target.to_lowercase();
    candidates
        .iter()
        .filter(|candidate| candidate.to_lowercase().ends_with(&target))
        .map(String::as_str)
        .collect()
}
