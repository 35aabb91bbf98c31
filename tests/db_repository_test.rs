//! Tests for database repository operations.

use chrono::{NaiveDate, Utc};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use tempfile::NamedTempFile;

use strictly_jokenpo::{ArenaRepository, Match, Move, Outcome, Player};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive), its path and a ready
/// repository.
fn setup_test_db() -> (NamedTempFile, String, ArenaRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = ArenaRepository::open(&db_path).expect("Failed to open repository");
    (db_file, db_path, repo)
}

fn sample_match(player_id: i32, player_move: Move, opponent_move: Move) -> Match {
    Match::new(
        player_id,
        format!("player{player_id}"),
        player_move,
        opponent_move,
        Utc::now().naive_utc(),
    )
}

#[test]
fn test_fresh_database_is_empty() {
    let (_db, _path, mut repo) = setup_test_db();
    assert!(repo.load_players().expect("Load failed").is_empty());
    assert!(repo.load_matches().expect("Load failed").is_empty());
}

#[test]
fn test_insert_player_round_trip() {
    let (_db, path, mut repo) = setup_test_db();
    let created_at = NaiveDate::from_ymd_opt(2025, 3, 14)
        .and_then(|d| d.and_hms_micro_opt(15, 9, 26, 535_897))
        .expect("Invalid timestamp");
    let player = Player::new(1, "Ana".to_string(), created_at);

    let stored = repo.insert_player(&player).expect("Insert failed");
    assert_eq!(stored, player);

    drop(repo);
    let mut reopened = ArenaRepository::open(&path).expect("Reopen failed");
    assert_eq!(reopened.load_players().expect("Load failed"), vec![player]);
}

#[test]
fn test_duplicate_player_id_fails() {
    let (_db, _path, mut repo) = setup_test_db();
    let now = Utc::now().naive_utc();
    repo.insert_player(&Player::new(1, "Ana".to_string(), now))
        .expect("First insert failed");
    let result = repo.insert_player(&Player::new(1, "Bia".to_string(), now));
    assert!(result.is_err(), "Duplicate id should fail");
}

#[test]
fn test_players_load_in_id_order() {
    let (_db, _path, mut repo) = setup_test_db();
    let now = Utc::now().naive_utc();
    for (id, name) in [(1, "Alpha"), (2, "Beta"), (3, "Gamma")] {
        repo.insert_player(&Player::new(id, name.to_string(), now))
            .expect("Insert failed");
    }
    let names: Vec<String> = repo
        .load_players()
        .expect("Load failed")
        .into_iter()
        .map(|p| p.name().clone())
        .collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
}

#[test]
fn test_delete_player_keeps_matches() {
    let (_db, _path, mut repo) = setup_test_db();
    let now = Utc::now().naive_utc();
    repo.insert_player(&Player::new(1, "Ana".to_string(), now))
        .expect("Insert failed");
    repo.insert_match(&sample_match(1, Move::Rock, Move::Paper))
        .expect("Insert failed");

    assert_eq!(repo.delete_player(1).expect("Delete failed"), 1);
    assert_eq!(repo.delete_player(1).expect("Delete failed"), 0);
    assert!(repo.load_players().expect("Load failed").is_empty());
    assert_eq!(repo.load_matches().expect("Load failed").len(), 1);
}

#[test]
fn test_matches_round_trip_in_order() {
    let (_db, path, mut repo) = setup_test_db();
    let records = vec![
        sample_match(1, Move::Rock, Move::Scissors),
        sample_match(2, Move::Paper, Move::Scissors),
        sample_match(1, Move::Scissors, Move::Scissors),
    ];
    for record in &records {
        let stored = repo.insert_match(record).expect("Insert failed");
        assert_eq!(&stored, record);
    }

    drop(repo);
    let mut reopened = ArenaRepository::open(&path).expect("Reopen failed");
    let loaded = reopened.load_matches().expect("Load failed");
    assert_eq!(loaded, records);

    let outcomes: Vec<Outcome> = loaded.iter().map(|m| m.outcome()).collect();
    assert_eq!(outcomes, vec![Outcome::Win, Outcome::Lose, Outcome::Draw]);
}

#[test]
fn test_corrupt_move_fails_to_load() {
    let (_db, path, mut repo) = setup_test_db();
    repo.insert_match(&sample_match(1, Move::Rock, Move::Paper))
        .expect("Insert failed");

    let mut conn = SqliteConnection::establish(&path).expect("Failed to connect");
    diesel::sql_query("UPDATE matches SET opponent_move = 'LIZARD'")
        .execute(&mut conn)
        .expect("Update failed");

    let result = repo.load_matches();
    assert!(result.is_err());
    assert!(result.unwrap_err().message.contains("LIZARD"));
}

#[test]
fn test_memory_database_persists_across_calls() {
    let mut repo = ArenaRepository::open(":memory:").expect("Open failed");
    repo.insert_player(&Player::new(1, "Ana".to_string(), Utc::now().naive_utc()))
        .expect("Insert failed");
    assert_eq!(repo.load_players().expect("Load failed").len(), 1);
    assert_eq!(repo.db_path(), ":memory:");
}

#[test]
fn test_open_reports_migration_failure() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let path = db_file.path().to_str().expect("Invalid path").to_string();

    // A `players` table that diesel did not create makes the first migration fail.
    let mut conn = SqliteConnection::establish(&path).expect("Failed to connect");
    diesel::sql_query("CREATE TABLE players (legacy TEXT)")
        .execute(&mut conn)
        .expect("Create failed");

    let err = ArenaRepository::open(&path).unwrap_err();
    assert!(err.message.starts_with("Migration error: "), "{}", err.message);
}
