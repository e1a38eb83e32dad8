//! Section extraction: turns free-form resume text into labeled sections.
//!
//! Lines are scanned in order with a "current section" cursor. A line that starts with
//! a recognized header phrase (case-insensitive) moves the cursor and is not kept;
//! any other line is appended to the section under the cursor. Text before the first
//! header is dropped.

use serde::{Serialize, Serializer};

/// Message shown to the user when no section header was recognized.
pub const NO_STRUCTURED_DATA: &str = "No structured info found.";

/// Canonical resume sections. Declaration order is the header matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SectionKind {
    Skills,
    Achievements,
    Experience,
    Projects,
    Education,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Skills,
        SectionKind::Achievements,
        SectionKind::Experience,
        SectionKind::Projects,
        SectionKind::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Skills => "Skills",
            SectionKind::Achievements => "Achievements",
            SectionKind::Experience => "Experience",
            SectionKind::Projects => "Projects",
            SectionKind::Education => "Education",
        }
    }

    /// Header phrases that open this section.
    pub fn header_phrases(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Skills => &["Skills", "Technical Skills", "Core Competencies"],
            SectionKind::Achievements => &["Achievements", "Accomplishments"],
            SectionKind::Experience => &["Experience", "Work Experience"],
            SectionKind::Projects => &["Projects", "Academic Projects"],
            SectionKind::Education => &["Education"],
        }
    }

    /// Returns the section whose header phrase prefixes `line`, if any.
    /// `line` must already be trimmed.
    pub fn match_header(line: &str) -> Option<SectionKind> {
        let lower = line.to_lowercase();
        Self::ALL.into_iter().find(|kind| {
            kind.header_phrases()
                .iter()
                .any(|phrase| lower.starts_with(&phrase.to_lowercase()))
        })
    }
}

/// Sections found in a resume, in `SectionKind::ALL` order. Only non-empty sections are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    sections: Vec<(SectionKind, String)>,
}

impl SectionMap {
    #[cfg(test)]
    pub fn get(&self, kind: SectionKind) -> Option<&str> {
        self.sections
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, body)| body.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &str)> {
        self.sections.iter().map(|(k, body)| (*k, body.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (kind, body) in &self.sections {
            map.serialize_entry(kind.as_str(), body)?;
        }
        map.end()
    }
}

/// Result of extraction: either labeled sections or the explicit "nothing found" sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionOutcome {
    Structured(SectionMap),
    NoStructuredData,
}

impl SectionOutcome {
    pub fn sections(&self) -> Option<&SectionMap> {
        match self {
            SectionOutcome::Structured(map) => Some(map),
            SectionOutcome::NoStructuredData => None,
        }
    }

    /// Single string fed to the role matcher: section bodies joined with newlines.
    /// The sentinel flattens to its message.
    pub fn flatten(&self) -> String {
        match self {
            SectionOutcome::Structured(map) => map
                .iter()
                .map(|(_, body)| body)
                .collect::<Vec<_>>()
                .join("\n"),
            SectionOutcome::NoStructuredData => NO_STRUCTURED_DATA.to_string(),
        }
    }
}

impl Serialize for SectionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SectionOutcome::Structured(map) => map.serialize(serializer),
            SectionOutcome::NoStructuredData => serializer.serialize_str(NO_STRUCTURED_DATA),
        }
    }
}

/// Extracts labeled sections from resume text. Total over any input.
pub fn extract_sections(text: &str) -> SectionOutcome {
    let mut bodies: Vec<(SectionKind, Vec<&str>)> = Vec::new();
    let mut current: Option<SectionKind> = None;

    for raw in text.lines() {
        let line = raw.trim();

        if let Some(kind) = SectionKind::match_header(line) {
            current = Some(kind);
            continue;
        }

        let Some(kind) = current else { continue };
        match bodies.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, lines)) => lines.push(line),
            None => bodies.push((kind, vec![line])),
        }
    }

    let sections: Vec<(SectionKind, String)> = SectionKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let (_, lines) = bodies.iter().find(|(k, _)| *k == kind)?;
            lines
                .iter()
                .any(|l| !l.is_empty())
                .then(|| (kind, lines.join("\n")))
        })
        .collect();

    if sections.is_empty() {
        SectionOutcome::NoStructuredData
    } else {
        SectionOutcome::Structured(SectionMap { sections })
    }
}
