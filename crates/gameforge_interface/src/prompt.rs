//! Prompt template rendering.

use gameforge_error::{GameforgeResult, GenerationError, GenerationErrorKind};
use regex::Regex;
use std::collections::BTreeMap;

/// Named values substituted into a prompt template.
pub type PromptVariables = BTreeMap<String, String>;

/// Fill `{name}` placeholders from `variables`.
///
/// `{{` and `}}` produce literal braces. Any other brace is copied as is.
///
/// # Errors
///
/// Returns a `PromptTemplate` generation error when a placeholder names a
/// variable that is not supplied.
///
/// # Examples
///
/// ```
/// use gameforge_interface::{PromptVariables, render_prompt};
///
/// let mut vars = PromptVariables::new();
/// vars.insert("title".into(), "Neon Rebellion".into());
///
/// let prompt = render_prompt("Jeu \"{title}\" au format {{JSON}}", &vars).unwrap();
/// assert_eq!(prompt, "Jeu \"Neon Rebellion\" au format {JSON}");
/// ```
pub fn render_prompt(template: &str, variables: &PromptVariables) -> GameforgeResult<String> {
    let re = Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
        GenerationError::new(GenerationErrorKind::PromptTemplate(format!(
            "Invalid placeholder regex: {}",
            e
        )))
    })?;

    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for caps in re.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        rendered.push_str(&template[last..whole.start()]);
        match caps.get(1) {
            Some(name) => {
                let value = variables.get(name.as_str()).ok_or_else(|| {
                    GenerationError::new(GenerationErrorKind::PromptTemplate(format!(
                        "no value for placeholder {{{}}}",
                        name.as_str()
                    )))
                })?;
                rendered.push_str(value);
            }
            None => rendered.push_str(&whole.as_str()[..1]),
        }
        last = whole.end();
    }

    rendered.push_str(&template[last..]);
    Ok(rendered)
}
