//! Domain Services
//!
//! Pure scoring rules. Nothing here touches storage.

/// Decide whether a submitted response is correct
///
/// Exact, case-sensitive comparison with no trimming. A question that has
/// no canonical answer (unknown to the session) is always wrong.
pub fn grade_response(canonical: Option<&str>, response: &str) -> bool {
    canonical.is_some_and(|answer| answer == response)
}

/// Questions left unanswered
///
/// Plain subtraction. The result goes negative when a submission carries
/// more answers than the session has questions, including duplicates.
pub fn skipped_count(total_questions: i64, correct: i64, wrong: i64) -> i64 {
    total_questions - correct - wrong
}

/// Score string in the `"<correct>/<total>"` form
pub fn format_score(correct: i64, total_questions: i64) -> String {
    format!("{}/{}", correct, total_questions)
}
