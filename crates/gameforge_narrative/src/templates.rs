//! Static tables behind template synthesis.
//!
//! Tables are loaded once and never mutated. The bundled tables compile into
//! the crate; user files layer on top with the `config` crate:
//! 1. Bundled defaults (include_str! from gameforge_templates.toml)
//! 2. ~/.config/gameforge/gameforge_templates.toml
//! 3. ./gameforge_templates.toml

use crate::MAX_LIST_ITEMS;
use derive_getters::Getters;
use gameforge_core::{Ambiance, CharacterRole, Genre};
use gameforge_error::{ConfigError, GameforgeError, GameforgeResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Key of the fallback entry in tables keyed by genre or ambiance.
pub const DEFAULT_KEY: &str = "DEFAULT";

/// Text pools keyed by a genre or ambiance code, with a `DEFAULT` entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextTable(HashMap<String, Vec<String>>);

impl TextTable {
    /// Pool for `code`, or the default pool when `code` has none.
    pub fn lookup(&self, code: &str) -> &[String] {
        lookup_keyed(&self.0, code)
    }
}

fn lookup_keyed<'a, T>(table: &'a HashMap<String, Vec<T>>, code: &str) -> &'a [T] {
    table
        .get(code)
        .filter(|entries| !entries.is_empty())
        .or_else(|| table.get(DEFAULT_KEY))
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Title fragments combined as `"{prefix} {suffix}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TitlePools {
    prefixes: Vec<String>,
    suffixes: Vec<String>,
}

/// Keyword filler and the pool used for random requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct KeywordPools {
    fallback: String,
    random_pool: Vec<String>,
}

/// Narrative texts. Descriptions, stories and mechanics are keyed by genre;
/// universes by ambiance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct NarrativeTables {
    descriptions: TextTable,
    universes: TextTable,
    stories: TextTable,
    mechanics: TextTable,
}

/// One slot of a genre's cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CharacterSeed {
    role: CharacterRole,
    class: String,
    archetype: String,
}

/// Name and text pools shared by seeds of the same archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Archetype {
    names: Vec<String>,
    backgrounds: Vec<String>,
    abilities: Vec<String>,
    motivations: Vec<String>,
    appearances: Vec<String>,
}

/// Character seeds keyed by genre, and the archetypes they reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CharacterTables {
    seeds: HashMap<String, Vec<CharacterSeed>>,
    archetypes: HashMap<String, Archetype>,
}

impl CharacterTables {
    /// Seeds for a genre, or the default seeds.
    pub fn seeds_for(&self, genre: Genre) -> &[CharacterSeed] {
        lookup_keyed(&self.seeds, genre.code())
    }

    /// Archetype by name, case-insensitively.
    pub fn archetype(&self, name: &str) -> Option<&Archetype> {
        self.archetypes.get(&name.to_lowercase())
    }
}

/// One place of an ambiance's world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LocationSeed {
    names: Vec<String>,
    descriptions: Vec<String>,
    atmospheres: Vec<String>,
    significances: Vec<String>,
}

/// Location seeds keyed by ambiance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LocationTables {
    seeds: HashMap<String, Vec<LocationSeed>>,
}

impl LocationTables {
    /// Seeds for an ambiance, or the default seeds.
    pub fn seeds_for(&self, ambiance: Ambiance) -> &[LocationSeed] {
        lookup_keyed(&self.seeds, ambiance.code())
    }
}

/// Every table the template synthesizer draws from.
///
/// # Examples
///
/// ```
/// use gameforge_core::{Ambiance, Genre};
/// use gameforge_narrative::TemplateTables;
///
/// let tables = TemplateTables::bundled().unwrap();
/// assert!(!tables.titles().prefixes().is_empty());
/// assert_eq!(tables.characters().seeds_for(Genre::Rpg).len(), 1);
/// assert_eq!(tables.locations().seeds_for(Ambiance::Cyberpunk).len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TemplateTables {
    titles: TitlePools,
    keywords: KeywordPools,
    narrative: NarrativeTables,
    characters: CharacterTables,
    locations: LocationTables,
}

impl TemplateTables {
    /// Tables compiled into the crate.
    pub const BUNDLED: &'static str = include_str!("../gameforge_templates.toml");

    /// Parse and validate the bundled tables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the bundled file is invalid.
    pub fn bundled() -> GameforgeResult<Self> {
        Self::from_toml_str(Self::BUNDLED)
    }

    /// Parse and validate tables from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a configuration error on parse or validation failure.
    pub fn from_toml_str(text: &str) -> GameforgeResult<Self> {
        let tables: Self = toml::from_str(text).map_err(|e| {
            GameforgeError::from(ConfigError::new(format!(
                "Failed to parse template tables: {}",
                e
            )))
        })?;
        tables.normalized().validated()
    }

    /// Bundled tables overridden by a specific file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read, parsed or
    /// validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> GameforgeResult<Self> {
        debug!("Loading template tables from file");
        let builder = config::Config::builder()
            .add_source(config::File::from_str(Self::BUNDLED, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_ref()));
        Self::finish(builder, &path.as_ref().display().to_string())
    }

    /// Bundled tables overridden by optional user files.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a present file is malformed or the
    /// merged tables fail validation.
    #[instrument]
    pub fn load() -> GameforgeResult<Self> {
        debug!("Loading template tables with precedence: current dir > home dir > bundled");

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(Self::BUNDLED, config::FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_tables = home.join(".config/gameforge/gameforge_templates.toml");
            builder = builder.add_source(config::File::from(home_tables).required(false));
        }

        builder =
            builder.add_source(config::File::with_name("gameforge_templates").required(false));

        Self::finish(builder, "layered sources")
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        origin: &str,
    ) -> GameforgeResult<Self> {
        let tables: Self = builder
            .build()
            .map_err(|e| {
                GameforgeError::from(ConfigError::new(format!(
                    "Failed to read template tables from {}: {}",
                    origin, e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                GameforgeError::from(ConfigError::new(format!(
                    "Failed to parse template tables from {}: {}",
                    origin, e
                )))
            })?;
        tables.normalized().validated()
    }

    /// Codes uppercase, archetype names lowercase, whatever the source spelled.
    fn normalized(mut self) -> Self {
        fn upper_keys<T>(table: HashMap<String, T>) -> HashMap<String, T> {
            table
                .into_iter()
                .map(|(k, v)| (k.to_uppercase(), v))
                .collect()
        }

        let narrative = &mut self.narrative;
        for table in [
            &mut narrative.descriptions,
            &mut narrative.universes,
            &mut narrative.stories,
            &mut narrative.mechanics,
        ] {
            table.0 = upper_keys(std::mem::take(&mut table.0));
        }

        self.characters.seeds = upper_keys(std::mem::take(&mut self.characters.seeds));
        for seeds in self.characters.seeds.values_mut() {
            for seed in seeds {
                seed.archetype = seed.archetype.to_lowercase();
            }
        }
        self.characters.archetypes = std::mem::take(&mut self.characters.archetypes)
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();

        self.locations.seeds = upper_keys(std::mem::take(&mut self.locations.seeds));
        self
    }

    /// Check that synthesis can never come up empty.
    fn validated(self) -> GameforgeResult<Self> {
        let mut problems = Vec::new();

        require_texts(&mut problems, "titles.prefixes", &self.titles.prefixes);
        require_texts(&mut problems, "titles.suffixes", &self.titles.suffixes);
        if self.keywords.fallback.trim().is_empty() {
            problems.push("keywords.fallback is empty".to_string());
        }
        require_texts(&mut problems, "keywords.random_pool", &self.keywords.random_pool);

        let narrative = &self.narrative;
        check_genre_table(&mut problems, "narrative.descriptions", &narrative.descriptions.0);
        check_ambiance_table(&mut problems, "narrative.universes", &narrative.universes.0);
        check_genre_table(&mut problems, "narrative.stories", &narrative.stories.0);
        check_genre_table(&mut problems, "narrative.mechanics", &narrative.mechanics.0);
        for (key, pool) in narrative
            .descriptions
            .0
            .iter()
            .chain(&narrative.universes.0)
            .chain(&narrative.stories.0)
            .chain(&narrative.mechanics.0)
        {
            require_texts(&mut problems, &format!("narrative.*.{}", key), pool);
        }

        check_genre_table(&mut problems, "characters.seeds", &self.characters.seeds);
        for (key, seeds) in &self.characters.seeds {
            check_seed_count(&mut problems, "characters.seeds", key, seeds.len());
            for seed in seeds {
                if seed.class.trim().is_empty() {
                    problems.push(format!("characters.seeds.{} has an empty class", key));
                }
                if !self.characters.archetypes.contains_key(&seed.archetype) {
                    problems.push(format!(
                        "characters.seeds.{} references unknown archetype '{}'",
                        key, seed.archetype
                    ));
                }
            }
        }
        for (name, archetype) in &self.characters.archetypes {
            let prefix = format!("characters.archetypes.{}", name);
            require_texts(&mut problems, &format!("{}.names", prefix), &archetype.names);
            require_texts(&mut problems, &format!("{}.backgrounds", prefix), &archetype.backgrounds);
            require_texts(&mut problems, &format!("{}.abilities", prefix), &archetype.abilities);
            require_texts(&mut problems, &format!("{}.motivations", prefix), &archetype.motivations);
            require_texts(&mut problems, &format!("{}.appearances", prefix), &archetype.appearances);
        }

        check_ambiance_table(&mut problems, "locations.seeds", &self.locations.seeds);
        for (key, seeds) in &self.locations.seeds {
            check_seed_count(&mut problems, "locations.seeds", key, seeds.len());
            for (index, seed) in seeds.iter().enumerate() {
                let prefix = format!("locations.seeds.{}[{}]", key, index);
                require_texts(&mut problems, &format!("{}.names", prefix), &seed.names);
                require_texts(&mut problems, &format!("{}.descriptions", prefix), &seed.descriptions);
                require_texts(&mut problems, &format!("{}.atmospheres", prefix), &seed.atmospheres);
                require_texts(&mut problems, &format!("{}.significances", prefix), &seed.significances);
            }
        }

        if problems.is_empty() {
            debug!(
                character_genres = self.characters.seeds.len(),
                archetypes = self.characters.archetypes.len(),
                location_ambiances = self.locations.seeds.len(),
                "Template tables validated"
            );
            Ok(self)
        } else {
            problems.sort();
            Err(ConfigError::new(format!(
                "Invalid template tables: {}",
                problems.join("; ")
            ))
            .into())
        }
    }
}

fn require_texts(problems: &mut Vec<String>, path: &str, pool: &[String]) {
    if pool.is_empty() {
        problems.push(format!("{} is empty", path));
    } else if pool.iter().any(|text| text.trim().is_empty()) {
        problems.push(format!("{} contains a blank entry", path));
    }
}

fn check_seed_count(problems: &mut Vec<String>, path: &str, key: &str, count: usize) {
    if count == 0 && key == DEFAULT_KEY {
        problems.push(format!("{}.{} is empty", path, key));
    }
    if count > MAX_LIST_ITEMS {
        problems.push(format!(
            "{}.{} has {} entries, at most {} allowed",
            path, key, count, MAX_LIST_ITEMS
        ));
    }
}

fn check_genre_table<T>(problems: &mut Vec<String>, path: &str, table: &HashMap<String, T>) {
    check_keys(problems, path, table, |key| key.parse::<Genre>().is_ok());
}

fn check_ambiance_table<T>(problems: &mut Vec<String>, path: &str, table: &HashMap<String, T>) {
    check_keys(problems, path, table, |key| key.parse::<Ambiance>().is_ok());
}

fn check_keys<T>(
    problems: &mut Vec<String>,
    path: &str,
    table: &HashMap<String, T>,
    is_code: impl Fn(&str) -> bool,
) {
    if !table.contains_key(DEFAULT_KEY) {
        problems.push(format!("{} has no {} entry", path, DEFAULT_KEY));
    }
    for key in table.keys() {
        if key != DEFAULT_KEY && !is_code(key) {
            problems.push(format!("{} has unknown key '{}'", path, key));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use strum::IntoEnumIterator;

    #[test]
    fn test_bundled_tables_are_valid() {
        TemplateTables::bundled().unwrap();
    }

    #[test]
    fn test_every_code_resolves_to_something() {
        let tables = TemplateTables::bundled().unwrap();
        for genre in Genre::iter() {
            assert!(!tables.narrative().descriptions().lookup(genre.code()).is_empty());
            assert!(!tables.narrative().mechanics().lookup(genre.code()).is_empty());
            assert!(!tables.characters().seeds_for(genre).is_empty());
        }
        for ambiance in Ambiance::iter() {
            assert!(!tables.narrative().universes().lookup(ambiance.code()).is_empty());
            assert!(!tables.locations().seeds_for(ambiance).is_empty());
        }
    }

    #[test]
    fn test_default_fallback_entries() {
        let tables = TemplateTables::bundled().unwrap();
        let seeds = tables.characters().seeds_for(Genre::Rpg);
        assert_eq!(seeds.len(), 1);
        assert_eq!(*seeds[0].role(), CharacterRole::Protagonist);

        let hero = tables.characters().archetype("HERO").unwrap();
        assert_eq!(hero.names(), &vec!["Aiden".to_string()]);

        let places = tables.locations().seeds_for(Ambiance::Fantasy);
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].names(), &vec!["La Forêt Enchantée".to_string()]);
    }

    #[test]
    fn test_unknown_archetype_rejected() {
        let broken = TemplateTables::BUNDLED.replace("archetype = \"soldier\"", "archetype = \"ghost\"");
        let err = TemplateTables::from_toml_str(&broken).unwrap_err();
        assert!(err.to_string().contains("unknown archetype 'ghost'"));
    }

    #[test]
    fn test_unknown_code_rejected() {
        let broken = TemplateTables::BUNDLED.replace("[narrative.mechanics]\nDEFAULT", "[narrative.mechanics]\nMOBA");
        let err = TemplateTables::from_toml_str(&broken).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown key 'MOBA'"));
        assert!(message.contains("narrative.mechanics has no DEFAULT entry"));
    }

    #[test]
    fn test_blank_title_rejected() {
        let broken = TemplateTables::BUNDLED.replace("\"Valmor\"", "\"  \"");
        let err = TemplateTables::from_toml_str(&broken).unwrap_err();
        assert!(err.to_string().contains("titles.suffixes contains a blank entry"));
    }

    #[test]
    fn test_file_overrides_bundled_pools() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[titles]\nprefixes = [\"Projet\"]\nsuffixes = [\"Omega\"]"
        )
        .unwrap();

        let tables = TemplateTables::from_file(file.path()).unwrap();
        assert_eq!(tables.titles().prefixes()[0], "Projet");
        assert_eq!(tables.titles().suffixes()[0], "Omega");
        assert!(!tables.keywords().random_pool().is_empty());
    }
}
