//! Rating instruction rendering and parsing.

/// Parses a rater reply as a score.
///
/// Surrounding whitespace is ignored. Returns `None` for anything that is
/// not a finite number.
///
/// ```
/// use u_promptevo::fitness::parse_rating;
///
/// assert_eq!(parse_rating(" 7\n"), Some(7.0));
/// assert_eq!(parse_rating("7/10"), None);
/// ```
pub fn parse_rating(reply: &str) -> Option<f64> {
    reply
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|score| score.is_finite())
}

/// Renders the instruction asking the rater to score `subject` on
/// `1..=notation` against `rules`.
pub(crate) fn render_rating_instruction(
    rules: &[String],
    subject_kind: &str,
    subject: &str,
    notation: u32,
) -> String {
    let rules = rules
        .iter()
        .map(|rule| format!("\t- {rule}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Rate the quality of the generated {subject_kind} on a scale from 1 to {notation}, \
         1 being the worst and {notation} being the best.\n\
         The {subject_kind} should respect the following rules:\n{rules}\n\n\
         The {subject_kind} is:\n`{subject}`\n\n\
         Reply with the number only.\n\
         Your rating / {notation}:\n"
    )
}
