//! Integration tests for the registry operations: create, get, list, delete, add points.

use player_registry::{NicknameError, PlayerRegistry, RegistryConfig, RegistryError};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashSet;
use tempfile::TempDir;

const NICKNAME: &str = "Natalya";

fn registry() -> (TempDir, PlayerRegistry) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new().expect("tempdir");
    let registry = PlayerRegistry::open(&RegistryConfig::new(dir.path().join("data.json")));
    (dir, registry)
}

/// `n` distinct random nicknames of 1..=15 characters.
fn random_nicknames(n: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    let mut seen = HashSet::new();
    while seen.len() < n {
        let len = rng.gen_range(1..=15);
        let nick: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();
        seen.insert(nick);
    }
    seen.into_iter().collect()
}

#[test]
fn new_player_starts_online_with_zero_points() {
    let (_dir, mut reg) = registry();
    assert!(reg.get_players().is_empty());

    let id = reg.create_player(NICKNAME).unwrap();
    let p = reg.get_player_by_id(id).unwrap();
    assert_eq!(p.id, id);
    assert_eq!(p.nickname, NICKNAME);
    assert_eq!(p.points, 0);
    assert!(p.online);
    assert_eq!(reg.get_players(), vec![p]);
}

#[test]
fn random_valid_nicknames_are_all_accepted() {
    let (_dir, mut reg) = registry();
    for nick in random_nicknames(20) {
        let id = reg.create_player(&nick).unwrap();
        let p = reg.get_player_by_id(id).unwrap();
        assert_eq!(p.nickname, nick);
        assert_eq!(p.points, 0);
        assert!(p.online);
    }
    assert_eq!(reg.len(), 20);
}

#[test]
fn fifteen_character_nickname_is_accepted() {
    let (_dir, mut reg) = registry();
    let id = reg.create_player("Natalya_Guzeeva").unwrap();
    assert_eq!(reg.get_player_by_id(id).unwrap().nickname, "Natalya_Guzeeva");
}

#[test]
fn invalid_nicknames_are_rejected_without_mutation() {
    let (dir, mut reg) = registry();
    for nick in ["", "Natalya_Guzeeva_", "Natalya_Guzeeva1", "Natalya__Guzeeva"] {
        assert!(matches!(
            reg.create_player(nick),
            Err(RegistryError::InvalidArgument(_))
        ));
    }
    assert!(reg.is_empty());
    // Nothing was persisted either
    assert!(!dir.path().join("data.json").exists());
    // Failed creates do not burn ids
    assert_eq!(reg.create_player(NICKNAME).unwrap(), 1);
}

#[test]
fn duplicate_nickname_is_rejected() {
    let (_dir, mut reg) = registry();
    reg.create_player(NICKNAME).unwrap();
    match reg.create_player(NICKNAME) {
        Err(RegistryError::InvalidArgument(NicknameError::Taken(n))) => assert_eq!(n, NICKNAME),
        other => panic!("expected Taken, got {other:?}"),
    }
    // Case-sensitive: a differently cased nickname is a different player
    reg.create_player("NATALYA").unwrap();
    assert_eq!(reg.len(), 2);
}

#[test]
fn deleted_nickname_can_be_reused() {
    let (_dir, mut reg) = registry();
    let first = reg.create_player(NICKNAME).unwrap();
    reg.delete_player(first).unwrap();
    let second = reg.create_player(NICKNAME).unwrap();
    assert_ne!(first, second);
}

#[test]
fn delete_returns_record_and_removes_player() {
    let (_dir, mut reg) = registry();
    let id = reg.create_player(NICKNAME).unwrap();
    reg.add_points(id, 7).unwrap();

    let removed = reg.delete_player(id).unwrap();
    assert_eq!(removed.nickname, NICKNAME);
    assert_eq!(removed.points, 7);
    assert!(reg.get_players().is_empty());
    assert!(matches!(
        reg.get_player_by_id(id),
        Err(RegistryError::NotFound { id: missing }) if missing == id
    ));
}

#[test]
fn unknown_ids_are_not_found() {
    let (_dir, mut reg) = registry();
    for nick in random_nicknames(5) {
        reg.create_player(&nick).unwrap();
    }
    assert!(matches!(reg.delete_player(10), Err(RegistryError::NotFound { id: 10 })));
    assert!(matches!(reg.get_player_by_id(100), Err(RegistryError::NotFound { id: 100 })));
    assert!(matches!(reg.add_points(10, 50), Err(RegistryError::NotFound { id: 10 })));
    assert_eq!(reg.len(), 5);
}

#[test]
fn ids_are_never_reused() {
    let (_dir, mut reg) = registry();
    for i in 1..=5 {
        assert_eq!(reg.create_player(&format!("Player_{i}")).unwrap(), i);
    }
    reg.delete_player(3).unwrap();
    assert_eq!(reg.create_player(NICKNAME).unwrap(), 6);

    reg.delete_player(6).unwrap();
    assert_eq!(reg.create_player("Another").unwrap(), 7);
}

#[test]
fn add_points_applies_delta_from_zero() {
    for (delta, expected) in [(10, 10), (100, 100), (0, 0), (1234, 1234), (-50, 0), (-5_000_000, 0)] {
        let (_dir, mut reg) = registry();
        let id = reg.create_player(NICKNAME).unwrap();
        let updated = reg.add_points(id, delta).unwrap();
        assert_eq!(updated.points, expected, "delta {delta}");
        assert_eq!(reg.get_player_by_id(id).unwrap().points, expected);
    }
}

#[test]
fn add_points_accumulates() {
    for (first, second, expected) in [(90, 100, 190), (33, 90, 123), (50, -20, 30), (50, -80, 0)] {
        let (_dir, mut reg) = registry();
        let id = reg.create_player(NICKNAME).unwrap();
        reg.add_points(id, first).unwrap();
        reg.add_points(id, second).unwrap();
        assert_eq!(reg.get_player_by_id(id).unwrap().points, expected);
    }
}

#[test]
fn add_points_saturates_at_integer_bounds() {
    let (_dir, mut reg) = registry();
    let id = reg.create_player(NICKNAME).unwrap();
    reg.add_points(id, i32::MAX).unwrap();
    assert_eq!(reg.add_points(id, 1).unwrap().points, i32::MAX);
    assert_eq!(reg.add_points(id, i32::MIN).unwrap().points, 0);
}

#[test]
fn get_players_is_stable_and_ordered_by_id() {
    let (_dir, mut reg) = registry();
    for nick in ["c", "a", "b"] {
        reg.create_player(nick).unwrap();
    }
    let first = reg.get_players();
    assert_eq!(first, reg.get_players());
    let ids: Vec<_> = first.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}
