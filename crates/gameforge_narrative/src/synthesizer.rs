//! Deterministic template synthesis.
//!
//! Produces the same record shapes as the AI tier from static tables,
//! keyword substitution and a caller-supplied random source. Synthesis
//! cannot fail: every lookup has a fallback.

use crate::{MAX_LIST_ITEMS, TemplateTables};
use gameforge_core::{
    Ambiance, ArtPrompts, CharacterRecord, GenerationRequest, Genre, LocationRecord,
    NarrativeRecord,
};
use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// Values substituted into template texts.
struct Fill<'a> {
    genre: &'static str,
    ambiance: &'static str,
    keywords: String,
    keyword: String,
    title: &'a str,
}

impl Fill<'_> {
    fn apply(&self, text: &str) -> String {
        text.replace("{genre}", self.genre)
            .replace("{ambiance}", self.ambiance)
            .replace("{keywords}", &self.keywords)
            .replace("{keyword}", &self.keyword)
            .replace("{title}", self.title)
    }

    fn apply_pick<R>(&self, pool: &[String], rng: &mut R, fallback: &str) -> String
    where
        R: Rng + ?Sized,
    {
        self.apply(pick(pool, rng).unwrap_or(fallback))
    }
}

fn pick<'a, R>(pool: &'a [String], rng: &mut R) -> Option<&'a str>
where
    R: Rng + ?Sized,
{
    pool.choose(rng).map(String::as_str)
}

/// Pick an entry not yet in `used` when the pool allows it.
fn pick_unused<'a, R>(pool: &'a [String], used: &[String], rng: &mut R) -> Option<&'a str>
where
    R: Rng + ?Sized,
{
    let fresh: Vec<&String> = pool.iter().filter(|name| !used.contains(name)).collect();
    match fresh.choose(rng).copied() {
        Some(name) => Some(name.as_str()),
        None => pick(pool, rng),
    }
}

/// Fallback generator built on [`TemplateTables`].
///
/// # Examples
///
/// ```
/// use gameforge_core::{Ambiance, CharacterRole, GenerationRequest, Genre};
/// use gameforge_narrative::{TemplateSynthesizer, TemplateTables};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let synthesizer = TemplateSynthesizer::new(TemplateTables::bundled().unwrap());
/// let request = GenerationRequest::new(Genre::Rpg, Ambiance::Fantasy, "dragons, prophecy");
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let narrative = synthesizer.narrative(&request, &mut rng);
/// let cast = synthesizer.characters(&request, &narrative.title, &mut rng);
///
/// assert!(!narrative.title.is_empty());
/// assert_eq!(cast[0].name, "Aiden");
/// assert_eq!(cast[0].role, CharacterRole::Protagonist);
/// ```
#[derive(Debug, Clone)]
pub struct TemplateSynthesizer {
    tables: Arc<TemplateTables>,
}

impl TemplateSynthesizer {
    /// Synthesizer over the given tables.
    pub fn new(tables: TemplateTables) -> Self {
        Self {
            tables: Arc::new(tables),
        }
    }

    /// Synthesizer sharing already loaded tables.
    pub fn from_shared(tables: Arc<TemplateTables>) -> Self {
        Self { tables }
    }

    /// Tables in use.
    pub fn tables(&self) -> &TemplateTables {
        &self.tables
    }

    fn fill<'a, R>(&self, request: &GenerationRequest, title: &'a str, rng: &mut R) -> Fill<'a>
    where
        R: Rng + ?Sized,
    {
        let fallback = self.tables.keywords().fallback();
        let tokens = request.keyword_tokens();

        Fill {
            genre: request.genre().label(),
            ambiance: request.ambiance().label(),
            keywords: if tokens.is_empty() {
                fallback.clone()
            } else {
                tokens.join(", ")
            },
            keyword: tokens
                .choose(rng)
                .map_or_else(|| fallback.clone(), |token| token.to_string()),
            title,
        }
    }

    /// `"{prefix} {suffix}"` from the title pools.
    pub fn title<R>(&self, genre: Genre, rng: &mut R) -> String
    where
        R: Rng + ?Sized,
    {
        let titles = self.tables.titles();
        match (pick(titles.prefixes(), rng), pick(titles.suffixes(), rng)) {
            (Some(prefix), Some(suffix)) => format!("{} {}", prefix, suffix),
            _ => format!("Jeu {}", genre.code()),
        }
    }

    /// Title and narrative texts. Title and description are never empty.
    pub fn narrative<R>(&self, request: &GenerationRequest, rng: &mut R) -> NarrativeRecord
    where
        R: Rng + ?Sized,
    {
        let genre = *request.genre();
        let ambiance = *request.ambiance();
        let title = self.title(genre, rng);
        let fill = self.fill(request, &title, rng);
        let texts = self.tables.narrative();

        let generic = format!("Un jeu {} {}.", genre.label(), ambiance.label());
        let description = fill.apply_pick(texts.descriptions().lookup(genre.code()), rng, &generic);
        let universe_description =
            fill.apply_pick(texts.universes().lookup(ambiance.code()), rng, &generic);
        let main_story = fill.apply_pick(texts.stories().lookup(genre.code()), rng, &generic);
        let gameplay_mechanics =
            fill.apply_pick(texts.mechanics().lookup(genre.code()), rng, &generic);

        NarrativeRecord {
            description: if description.trim().is_empty() {
                generic
            } else {
                description
            },
            universe_description,
            main_story,
            gameplay_mechanics,
            title,
        }
    }

    /// Cast for the request's genre, at most [`MAX_LIST_ITEMS`] members.
    pub fn characters<R>(
        &self,
        request: &GenerationRequest,
        title: &str,
        rng: &mut R,
    ) -> Vec<CharacterRecord>
    where
        R: Rng + ?Sized,
    {
        let tables = self.tables.characters();
        let fill = self.fill(request, title, rng);
        let mut used: Vec<String> = Vec::new();

        tables
            .seeds_for(*request.genre())
            .iter()
            .take(MAX_LIST_ITEMS)
            .map(|seed| {
                let record = match tables.archetype(seed.archetype()) {
                    Some(archetype) => CharacterRecord {
                        name: pick_unused(archetype.names(), &used, rng)
                            .unwrap_or("Aiden")
                            .to_string(),
                        role: *seed.role(),
                        character_class: seed.class().clone(),
                        background: fill.apply_pick(archetype.backgrounds(), rng, ""),
                        abilities: fill.apply_pick(archetype.abilities(), rng, ""),
                        motivations: fill.apply_pick(archetype.motivations(), rng, ""),
                        appearance: fill.apply_pick(archetype.appearances(), rng, ""),
                    },
                    None => CharacterRecord {
                        name: "Aiden".to_string(),
                        role: *seed.role(),
                        character_class: seed.class().clone(),
                        ..CharacterRecord::default()
                    },
                };
                used.push(record.name.clone());
                record
            })
            .collect()
    }

    /// Places for the request's ambiance, at most [`MAX_LIST_ITEMS`].
    pub fn locations<R>(
        &self,
        request: &GenerationRequest,
        title: &str,
        rng: &mut R,
    ) -> Vec<LocationRecord>
    where
        R: Rng + ?Sized,
    {
        let fill = self.fill(request, title, rng);
        let mut used: Vec<String> = Vec::new();

        self.tables
            .locations()
            .seeds_for(*request.ambiance())
            .iter()
            .take(MAX_LIST_ITEMS)
            .map(|seed| {
                let record = LocationRecord {
                    name: pick_unused(seed.names(), &used, rng)
                        .unwrap_or("La Forêt Enchantée")
                        .to_string(),
                    description: fill.apply_pick(seed.descriptions(), rng, ""),
                    atmosphere: fill.apply_pick(seed.atmospheres(), rng, ""),
                    gameplay_significance: fill.apply_pick(seed.significances(), rng, ""),
                };
                used.push(record.name.clone());
                record
            })
            .collect()
    }

    /// Fixed character and environment prompts built from the request codes.
    pub fn art_prompts(&self, request: &GenerationRequest) -> ArtPrompts {
        let genre = request.genre().code();
        let ambiance = request.ambiance().code().to_lowercase();
        ArtPrompts {
            character: format!("Illustration d'un héros {} en {}", genre, ambiance),
            environment: format!("Paysage {} pour un jeu {}", ambiance, genre),
        }
    }

    /// A request with random genre, ambiance and two or three keywords.
    pub fn random_request<R>(&self, rng: &mut R) -> GenerationRequest
    where
        R: Rng + ?Sized,
    {
        let genres: Vec<Genre> = Genre::iter().collect();
        let ambiances: Vec<Ambiance> = Ambiance::iter().collect();
        let genre = genres.choose(rng).copied().unwrap_or(Genre::Rpg);
        let ambiance = ambiances.choose(rng).copied().unwrap_or(Ambiance::Fantasy);

        let count = rng.gen_range(2..=3);
        let keywords: Vec<&str> = self
            .tables
            .keywords()
            .random_pool()
            .choose_multiple(rng, count)
            .map(String::as_str)
            .collect();

        GenerationRequest::new(genre, ambiance, keywords.join(", "))
    }
}
