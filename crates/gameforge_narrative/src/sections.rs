//! Labeled-section extraction from free-form text.
//!
//! Text services answer "TITRE: ... DESCRIPTION: ..." style prompts with
//! whatever decoration they like: bold markers, headings, odd casing,
//! sections on one line or across many. Extraction keys on the label
//! vocabulary only.

use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// One canonical field and the labels that introduce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionField {
    name: String,
    labels: Vec<String>,
}

impl SectionField {
    /// Field `name` introduced by any of `labels`.
    pub fn new(name: impl Into<String>, labels: &[&str]) -> Self {
        Self {
            name: name.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Canonical field name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Label vocabulary of a response format.
///
/// # Examples
///
/// ```
/// use gameforge_narrative::SectionSchema;
///
/// let schema = SectionSchema::narrative();
/// let sections = schema.extract("**Titre :** Neon Rebellion\n**HISTOIRE**: Une IA se rebelle.");
///
/// assert_eq!(sections.get("title"), "Neon Rebellion");
/// assert_eq!(sections.get("main_story"), "Une IA se rebelle.");
/// assert_eq!(sections.get("description"), "");
/// ```
#[derive(Debug, Clone)]
pub struct SectionSchema {
    fields: Vec<SectionField>,
    label_to_field: HashMap<String, usize>,
    pattern: Option<Regex>,
}

impl SectionSchema {
    /// Build a schema from its fields.
    ///
    /// Labels are matched case-insensitively as whole words followed by a
    /// colon. Decoration such as `**`, `__` or `#` may surround them.
    pub fn new(fields: Vec<SectionField>) -> Self {
        let mut label_to_field = HashMap::new();
        let mut labels: Vec<&str> = Vec::new();
        for (index, field) in fields.iter().enumerate() {
            for label in &field.labels {
                label_to_field.insert(label.to_lowercase(), index);
                labels.push(label);
            }
        }
        // Longest first so UNIVERSE is not cut to UNIVERS.
        labels.sort_by_key(|label| std::cmp::Reverse(label.chars().count()));

        let alternation = labels
            .iter()
            .map(|label| regex::escape(label))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = if alternation.is_empty() {
            None
        } else {
            let source = format!(r"(?i)({alternation})[ \t*_]*:+");
            match Regex::new(&source) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::error!(error = %e, "Invalid section label pattern");
                    None
                }
            }
        };

        Self {
            fields,
            label_to_field,
            pattern,
        }
    }

    /// Vocabulary of the game narrative format.
    pub fn narrative() -> Self {
        Self::new(vec![
            SectionField::new("title", &["TITRE", "TITLE"]),
            SectionField::new("description", &["DESCRIPTION"]),
            SectionField::new("universe_description", &["UNIVERS", "UNIVERSE"]),
            SectionField::new("main_story", &["HISTOIRE", "STORY"]),
            SectionField::new(
                "gameplay_mechanics",
                &["MECANIQUES", "MÉCANIQUES", "MECHANICS"],
            ),
        ])
    }

    /// Fields of this schema, in declaration order.
    pub fn fields(&self) -> &[SectionField] {
        &self.fields
    }

    /// Split `text` into sections.
    ///
    /// Each section runs from just after its label's colon to the next
    /// recognised label or the end of text. Labels absent from the text map
    /// to empty strings. A label seen twice keeps its last content.
    pub fn extract(&self, text: &str) -> SectionMap {
        let mut values = HashMap::new();
        let mut recognised = 0;

        let Some(pattern) = &self.pattern else {
            return SectionMap { values, recognised };
        };

        // A label must not continue a word; it may follow another label's colon.
        let matches: Vec<_> = pattern
            .captures_iter(text)
            .filter_map(|caps| Some((caps.get(0)?, caps.get(1)?)))
            .filter(|(_, label)| {
                text[..label.start()]
                    .chars()
                    .next_back()
                    .is_none_or(|c| !c.is_alphanumeric())
            })
            .collect();
        for (i, (whole, label)) in matches.iter().enumerate() {
            let end = matches
                .get(i + 1)
                .map_or(text.len(), |(_, next)| next.start());

            let Some(&field) = self.label_to_field.get(&label.as_str().to_lowercase()) else {
                continue;
            };
            let content = clean(&text[whole.end()..end]);
            recognised += 1;
            values.insert(self.fields[field].name.clone(), content.to_string());
        }

        debug!(
            labels_found = recognised,
            fields_found = values.len(),
            "Extracted labeled sections"
        );
        SectionMap { values, recognised }
    }
}

fn clean(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '_' | '#' | ':'))
}

/// Result of section extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    values: HashMap<String, String>,
    recognised: usize,
}

impl SectionMap {
    /// Content of a field, or `""` when its label never appeared.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    /// Whether the field's label appeared at least once.
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Number of label occurrences found, duplicates included.
    pub fn recognised(&self) -> usize {
        self.recognised
    }

    /// True when no label was found at all.
    pub fn is_empty(&self) -> bool {
        self.recognised == 0
    }
}
