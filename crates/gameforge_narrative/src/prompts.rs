//! Prompt templates sent to the text generation service.
//!
//! Templates use `{name}` placeholders; literal braces are doubled.

use derive_getters::Getters;

const NARRATIVE: &str = "Tu es un expert en game design. Crée un concept complet de jeu vidéo.

Genre: {genre}
Ambiance: {ambiance}
Mots-clés: {keywords}
{cultural_ref}

Réponds uniquement avec les sections suivantes, chacune sur sa propre ligne:

TITRE:
DESCRIPTION:
UNIVERS:
HISTOIRE:
MECANIQUES:
";

const CHARACTERS: &str = "Crée {count} personnages pour le jeu \"{title}\".
Genre: {genre}
Ambiance: {ambiance}

Format JSON strict:
[
  {{
    \"name\": \"Nom\",
    \"role\": \"PROTAGONIST ou ALLY ou ANTAGONIST ou MENTOR\",
    \"character_class\": \"Classe\",
    \"background\": \"Background en 2 phrases\",
    \"abilities\": \"Capacités\",
    \"motivations\": \"Motivations\",
    \"appearance\": \"Apparence\"
  }}
]
";

const LOCATIONS: &str = "Crée {count} lieux pour le jeu \"{title}\".
Genre: {genre}
Ambiance: {ambiance}

Format JSON strict:
[
  {{
    \"name\": \"Nom du lieu\",
    \"description\": \"Description en 2-3 phrases\",
    \"atmosphere\": \"Atmosphère en 2 phrases\",
    \"gameplay_significance\": \"Importance gameplay\"
  }}
]
";

const ART_PROMPTS: &str = "Crée deux prompts textuels courts pour générer du concept art IA pour le jeu \"{title}\" ({genre}, {ambiance}):
1. Un personnage principal
2. Un environnement clé

Retourne un JSON strict :
[{{\"type\": \"CHARACTER\", \"prompt\": \"...\"}}, {{\"type\": \"ENVIRONMENT\", \"prompt\": \"...\"}}]
";

/// The four prompt templates, one per artifact kind.
///
/// # Examples
///
/// ```
/// use gameforge_narrative::PromptSet;
///
/// let prompts = PromptSet::default().with_narrative("TITLE: {genre}");
/// assert_eq!(prompts.narrative(), "TITLE: {genre}");
/// assert!(prompts.characters().contains("{title}"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PromptSet {
    narrative: String,
    characters: String,
    locations: String,
    art_prompts: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            narrative: NARRATIVE.to_string(),
            characters: CHARACTERS.to_string(),
            locations: LOCATIONS.to_string(),
            art_prompts: ART_PROMPTS.to_string(),
        }
    }
}

impl PromptSet {
    /// Replace the narrative template.
    pub fn with_narrative(mut self, template: impl Into<String>) -> Self {
        self.narrative = template.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameforge_interface::{PromptVariables, render_prompt};

    fn vars() -> PromptVariables {
        [
            ("genre", "RPG"),
            ("ambiance", "Fantasy"),
            ("keywords", "dragons"),
            ("cultural_ref", ""),
            ("title", "Valmor"),
            ("count", "3"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_default_templates_render() {
        let prompts = PromptSet::default();
        for template in [
            prompts.narrative(),
            prompts.characters(),
            prompts.locations(),
            prompts.art_prompts(),
        ] {
            let rendered = render_prompt(template, &vars()).unwrap();
            assert!(!rendered.contains("{title}"));
            assert!(!rendered.contains("{{"));
        }
    }

    #[test]
    fn test_list_templates_show_json_braces() {
        let rendered = render_prompt(PromptSet::default().characters(), &vars()).unwrap();
        assert!(rendered.contains("\"name\": \"Nom\""));
        assert!(rendered.contains("[\n  {\n"));
        assert!(rendered.contains("Crée 3 personnages pour le jeu \"Valmor\""));
    }
}
