//! Tests for the game repositories.

use gameforge_core::{
    Ambiance, ArtPrompts, ArtSlot, CharacterRecord, CharacterRole, ConceptArtResult, GameConcept,
    GameId, GenerationRequest, GenerationTier, Genre, LocationRecord, NarrativeRecord, Principal,
    Provenance, StoredImage,
};
use gameforge_error::{GameforgeErrorKind, StorageErrorKind};
use gameforge_interface::GameRepository;
use gameforge_storage::{
    FileSystemGameRepository, GameRecord, InMemoryGameRepository, RECORD_FILE,
};
use tempfile::TempDir;

const PNG: [u8; 9] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 7];

fn concept(with_character_image: bool) -> GameConcept {
    let mut concept_art = ConceptArtResult::default();
    if with_character_image {
        concept_art.insert(StoredImage::new(ArtSlot::Character, PNG.to_vec()));
    }
    concept_art.insert(StoredImage::new(ArtSlot::Environment, b"GIF89a-landscape".to_vec()));

    GameConcept {
        request: GenerationRequest::new(Genre::Rpg, Ambiance::Fantasy, "dragons, prophecy"),
        narrative: NarrativeRecord {
            title: "Les Chroniques de Valmor".to_string(),
            description: "Un RPG de dragons.".to_string(),
            ..Default::default()
        },
        characters: vec![CharacterRecord {
            name: "Aiden".to_string(),
            role: CharacterRole::Protagonist,
            character_class: "Guerrier".to_string(),
            ..Default::default()
        }],
        locations: vec![LocationRecord {
            name: "La Forêt Enchantée".to_string(),
            ..Default::default()
        }],
        art_prompts: ArtPrompts {
            character: "Illustration d'un héros RPG en fantasy".to_string(),
            environment: "Paysage fantasy pour un jeu RPG".to_string(),
        },
        concept_art,
        provenance: Provenance {
            narrative: GenerationTier::Template,
            characters: GenerationTier::Template,
            locations: GenerationTier::Template,
            art_prompts: GenerationTier::Template,
        },
    }
}

#[tokio::test]
async fn test_in_memory_save_and_get() {
    let repository = InMemoryGameRepository::new();
    let alice = Principal::new("alice");
    let bob = Principal::new("bob");

    let first = repository.save_game(&alice, &concept(true)).await.unwrap();
    let second = repository.save_game(&alice, &concept(false)).await.unwrap();
    repository.save_game(&bob, &concept(true)).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(repository.len().await, 3);
    assert_eq!(repository.owned_by(&alice).await.len(), 2);

    let (owner, stored) = repository.get(&second).await.unwrap();
    assert_eq!(owner, alice);
    assert!(stored.concept_art.character_image.is_none());

    repository.clear().await;
    assert!(repository.is_empty().await);
}

fn read_record(repository: &FileSystemGameRepository, id: &GameId) -> GameRecord {
    let data = std::fs::read(repository.game_dir(id).join(RECORD_FILE)).unwrap();
    serde_json::from_slice(&data).unwrap()
}

#[tokio::test]
async fn test_filesystem_layout() {
    let temp_dir = TempDir::new().unwrap();
    let repository = FileSystemGameRepository::new(temp_dir.path()).unwrap();

    let id = repository
        .save_game(&Principal::new("alice"), &concept(true))
        .await
        .unwrap();

    let dir = repository.game_dir(&id);
    assert!(dir.join(RECORD_FILE).is_file());
    assert_eq!(
        std::fs::read(dir.join("concept_art/characters/character.png")).unwrap(),
        PNG.to_vec()
    );
    assert!(dir.join("concept_art/environments/environment.png").is_file());
}

#[tokio::test]
async fn test_filesystem_record_contents() {
    let temp_dir = TempDir::new().unwrap();
    let repository = FileSystemGameRepository::new(temp_dir.path()).unwrap();
    let stored = concept(true);

    let id = repository
        .save_game(&Principal::new("alice"), &stored)
        .await
        .unwrap();
    let record = read_record(&repository, &id);

    assert_eq!(*record.id(), id);
    assert_eq!(record.owner().as_str(), "alice");
    assert_eq!(record.narrative(), &stored.narrative);
    assert_eq!(record.characters(), &stored.characters);
    assert_eq!(record.provenance(), &stored.provenance);

    let environment = record.image(ArtSlot::Environment).unwrap();
    assert_eq!(environment.mime_type(), "image/gif");
    assert_eq!(*environment.size_bytes(), 16);
    assert_eq!(environment.path(), "concept_art/environments/environment.png");
}

#[tokio::test]
async fn test_filesystem_absent_slot_not_written() {
    let temp_dir = TempDir::new().unwrap();
    let repository = FileSystemGameRepository::new(temp_dir.path()).unwrap();

    let id = repository
        .save_game(&Principal::new("alice"), &concept(false))
        .await
        .unwrap();

    assert!(!repository.game_dir(&id).join("concept_art/characters").exists());
    let record = read_record(&repository, &id);
    assert!(record.image(ArtSlot::Character).is_none());
    assert_eq!(record.images().len(), 1);
}

#[test]
fn test_base_path_must_be_a_directory() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let err = FileSystemGameRepository::new(file.path()).unwrap_err();

    match err.kind() {
        GameforgeErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::DirectoryCreation(_)))
        }
        other => panic!("unexpected error: {other}"),
    }
}
