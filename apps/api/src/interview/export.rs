//! Plain-text exports of the interview log and the resume summary.

use crate::interview::session::Turn;
use crate::resume::sections::SectionOutcome;

pub const NOTHING_TO_EXPORT: &str = "Nothing to download yet.";

/// One `"<Speaker>: <text>"` line per turn.
pub fn format_transcript(log: &[Turn]) -> String {
    log.iter()
        .map(|turn| format!("{}: {}", turn.speaker.as_str(), turn.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `"<Section>:\n<body>"` block per section, blank-line separated. Empty for the sentinel.
pub fn format_section_summary(outcome: &SectionOutcome) -> String {
    let Some(map) = outcome.sections() else {
        return String::new();
    };
    map.iter()
        .map(|(kind, body)| format!("{}:\n{}", kind.as_str(), body))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn format_full_report(log: &[Turn], outcome: &SectionOutcome) -> String {
    format!(
        "{}\n\nResume Summary:\n{}",
        format_transcript(log),
        format_section_summary(outcome)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::session::InterviewSession;
    use crate::resume::sections::extract_sections;

    fn finished_log() -> Vec<Turn> {
        let mut session = InterviewSession::new();
        session.start("Engineer", vec!["Q1".into(), "Q2".into()]);
        session.submit_answer("A1").unwrap();
        session.submit_answer("A2").unwrap();
        session.log().to_vec()
    }

    #[test]
    fn test_transcript_lines() {
        assert_eq!(
            format_transcript(&finished_log()),
            "Interviewer: Q1\nCandidate: A1\nInterviewer: Q2\nCandidate: A2"
        );
    }

    #[test]
    fn test_section_summary_blocks() {
        let outcome = extract_sections("Skills\nPython\nGo\nExperience\n2 years at X");
        assert_eq!(
            format_section_summary(&outcome),
            "Skills:\nPython\nGo\n\nExperience:\n2 years at X"
        );
    }

    #[test]
    fn test_section_summary_uses_canonical_order() {
        let outcome = extract_sections("Experience\n2 years at X\nSkills\nPython");
        assert_eq!(
            format_section_summary(&outcome),
            "Skills:\nPython\n\nExperience:\n2 years at X"
        );
        let report = format_full_report(&finished_log(), &outcome);
        assert!(report.ends_with("Resume Summary:\nSkills:\nPython\n\nExperience:\n2 years at X"));
    }

    #[test]
    fn test_section_summary_empty_for_sentinel() {
        assert_eq!(format_section_summary(&SectionOutcome::NoStructuredData), "");
    }

    #[test]
    fn test_full_report_layout() {
        let outcome = extract_sections("Skills\nRust");
        let report = format_full_report(&finished_log(), &outcome);
        assert!(report.starts_with("Interviewer: Q1\n"));
        assert!(report.ends_with("Candidate: A2\n\nResume Summary:\nSkills:\nRust"));
    }
}
