//! Player registry.

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::db::{ArenaRepository, Player};
use crate::error::{ArenaError, ArenaErrorKind};

/// Owns the registered players and assigns their identifiers.
///
/// Identifiers are never reused: the next id is one past the highest id
/// seen in the player collection, the ledger, or assigned by this registry.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    high_water: i32,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads stored players.
    ///
    /// `ledger_floor` is the highest player id referenced by the ledger, so
    /// ids of removed players that still own matches are not handed out again.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError`] if the stored players cannot be read.
    #[instrument(skip(repository))]
    pub fn load(
        repository: &mut ArenaRepository,
        ledger_floor: Option<i32>,
    ) -> Result<Self, ArenaError> {
        let players = repository.load_players()?;
        let high_water = players
            .iter()
            .map(|p| *p.id())
            .chain(ledger_floor)
            .max()
            .unwrap_or(0);

        info!(count = players.len(), high_water, "Player registry loaded");
        Ok(Self {
            players,
            high_water,
        })
    }

    /// Identifier the next registration will receive.
    #[instrument(skip(self))]
    pub fn next_id(&self) -> i32 {
        self.high_water + 1
    }

    /// Registers a player under `name`, trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the trimmed name is empty, or a storage
    /// error if the player cannot be stored. Neither consumes an identifier.
    #[instrument(skip(self, repository))]
    pub fn register(
        &mut self,
        repository: &mut ArenaRepository,
        name: &str,
    ) -> Result<Player, ArenaError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            warn!("Rejected blank player name");
            return Err(ArenaError::new(ArenaErrorKind::Validation {
                message: "Player name must not be empty".to_string(),
            }));
        }

        let candidate = Player::new(
            self.next_id(),
            trimmed.to_string(),
            Utc::now().naive_utc(),
        );
        let player = repository.insert_player(&candidate)?;
        self.high_water = self.high_water.max(*player.id());
        self.players.push(player.clone());

        info!(player_id = player.id(), name = %player.name(), "Player registered");
        Ok(player)
    }

    /// Looks up a player by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no such player is registered.
    #[instrument(skip(self))]
    pub fn get(&self, player_id: i32) -> Result<&Player, ArenaError> {
        self.players
            .iter()
            .find(|p| *p.id() == player_id)
            .ok_or_else(|| {
                debug!(player_id, "Player not found");
                ArenaError::new(ArenaErrorKind::NotFound { player_id })
            })
    }

    /// Returns `true` if `player_id` is registered.
    #[instrument(skip(self))]
    pub fn contains(&self, player_id: i32) -> bool {
        self.players.iter().any(|p| *p.id() == player_id)
    }

    /// All registered players, in registration order.
    #[instrument(skip(self))]
    pub fn list(&self) -> &[Player] {
        &self.players
    }

    /// Removes a player and returns its name. Ledger entries are kept.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no such player is registered, or a
    /// storage error if the stored record cannot be deleted.
    #[instrument(skip(self, repository))]
    pub fn remove(
        &mut self,
        repository: &mut ArenaRepository,
        player_id: i32,
    ) -> Result<String, ArenaError> {
        let index = self
            .players
            .iter()
            .position(|p| *p.id() == player_id)
            .ok_or_else(|| {
                warn!(player_id, "Cannot remove unknown player");
                ArenaError::new(ArenaErrorKind::NotFound { player_id })
            })?;

        repository.delete_player(player_id)?;
        let removed = self.players.remove(index);

        info!(player_id, name = %removed.name(), "Player removed");
        Ok(removed.name().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> (ArenaRepository, PlayerRegistry) {
        let mut repo = ArenaRepository::open(":memory:").expect("open failed");
        let registry = PlayerRegistry::load(&mut repo, None).expect("load failed");
        (repo, registry)
    }

    #[test]
    fn test_first_id_is_one() {
        let (mut repo, mut registry) = open();
        let player = registry.register(&mut repo, "Ana").unwrap();
        assert_eq!(*player.id(), 1);
    }

    #[test]
    fn test_names_are_trimmed() {
        let (mut repo, mut registry) = open();
        let a = registry.register(&mut repo, "Ana").unwrap();
        let b = registry.register(&mut repo, " Ana ").unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.name(), "Ana");
        assert_eq!(b.name(), "Ana");
    }

    #[test]
    fn test_blank_name_rejected_without_consuming_id() {
        let (mut repo, mut registry) = open();
        for name in ["", "   ", "\t\n"] {
            let err = registry.register(&mut repo, name).unwrap_err();
            assert!(err.is_validation());
        }
        assert!(registry.list().is_empty());
        assert_eq!(registry.next_id(), 1);
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let (mut repo, mut registry) = open();
        for name in ["a", "b", "c"] {
            registry.register(&mut repo, name).unwrap();
        }
        assert_eq!(registry.remove(&mut repo, 2).unwrap(), "b");
        let d = registry.register(&mut repo, "d").unwrap();
        assert_eq!(*d.id(), 4);

        registry.remove(&mut repo, 4).unwrap();
        let e = registry.register(&mut repo, "e").unwrap();
        assert_eq!(*e.id(), 5);
    }

    #[test]
    fn test_ledger_floor_raises_next_id() {
        let mut repo = ArenaRepository::open(":memory:").unwrap();
        let registry = PlayerRegistry::load(&mut repo, Some(7)).unwrap();
        assert_eq!(registry.next_id(), 8);
    }

    #[test]
    fn test_get_and_remove_unknown_player() {
        let (mut repo, mut registry) = open();
        assert!(registry.get(9).unwrap_err().is_not_found());
        assert!(registry.remove(&mut repo, 9).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let (mut repo, mut registry) = open();
        for name in ["Alpha", "Beta", "Gamma"] {
            registry.register(&mut repo, name).unwrap();
        }
        let names: Vec<&str> = registry.list().iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }
}
