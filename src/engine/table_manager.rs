// src/engine/table_manager.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use log::info;
use thiserror::Error;

use crate::domain::table::TableConfig;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::Game;
use crate::engine::RandomSource;
use crate::infra::rng::SystemRng;

/// Ошибки уровня реестра столов (над движком одного стола).
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Комната {0} не найдена")]
    RoomNotFound(String),

    #[error("Комната {0} уже существует")]
    RoomExists(String),

    #[error("Стол комнаты {0} недоступен: мьютекс отравлен")]
    Poisoned(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Общая ссылка на стол. Один стол = один мьютекс, столы друг от друга независимы.
pub type SharedGame<R = SystemRng> = Arc<Mutex<Game<R>>>;

/// Реестр столов: room id -> независимый экземпляр `Game`.
///
/// Сам реестр под `RwLock`, каждый стол – под своим `Mutex`,
/// так что действия за разными столами не блокируют друг друга.
pub struct TableRegistry<R: RandomSource = SystemRng> {
    tables: RwLock<HashMap<String, SharedGame<R>>>,
}

impl<R: RandomSource> Default for TableRegistry<R> {
    fn default() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }
}

impl<R: RandomSource> TableRegistry<R> {
    /// Создать пустой реестр.
    pub fn new() -> Self {
        Self::default()
    }

    /// Открыть стол под `room_id` с отдельным RNG.
    pub fn create_table_with_rng(
        &self,
        room_id: impl Into<String>,
        config: TableConfig,
        rng: R,
    ) -> Result<SharedGame<R>, RegistryError> {
        let room_id = room_id.into();
        let game = Game::with_rng(config, rng)?;

        let mut tables = self
            .tables
            .write()
            .map_err(|_| RegistryError::Poisoned(room_id.clone()))?;
        if tables.contains_key(&room_id) {
            return Err(RegistryError::RoomExists(room_id));
        }

        let shared = Arc::new(Mutex::new(game));
        tables.insert(room_id.clone(), Arc::clone(&shared));
        info!("room {} opened", room_id);
        Ok(shared)
    }

    /// Получить стол по id.
    pub fn get(&self, room_id: &str) -> Result<SharedGame<R>, RegistryError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RegistryError::Poisoned(room_id.to_string()))?;
        tables
            .get(room_id)
            .cloned()
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.to_string()))
    }

    /// Закрыть стол. Уже выданные ссылки продолжают жить.
    pub fn remove(&self, room_id: &str) -> Result<SharedGame<R>, RegistryError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| RegistryError::Poisoned(room_id.to_string()))?;
        let removed = tables
            .remove(room_id)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.to_string()))?;
        info!("room {} closed", room_id);
        Ok(removed)
    }

    pub fn has_table(&self, room_id: &str) -> bool {
        self.tables
            .read()
            .map(|t| t.contains_key(room_id))
            .unwrap_or(false)
    }

    /// Список комнат (отсортирован).
    pub fn room_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .tables
            .read()
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.tables.read().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Выполнить `f` под замком стола `room_id`.
    pub fn with_table<T>(
        &self,
        room_id: &str,
        f: impl FnOnce(&mut Game<R>) -> Result<T, EngineError>,
    ) -> Result<T, RegistryError> {
        let shared = self.get(room_id)?;
        let mut guard = lock(&shared, room_id)?;
        Ok(f(&mut *guard)?)
    }
}

impl TableRegistry<SystemRng> {
    /// Открыть стол с системным RNG.
    pub fn create_table(
        &self,
        room_id: impl Into<String>,
        config: TableConfig,
    ) -> Result<SharedGame, RegistryError> {
        self.create_table_with_rng(room_id, config, SystemRng)
    }
}

fn lock<'a, R: RandomSource>(
    shared: &'a SharedGame<R>,
    room_id: &str,
) -> Result<MutexGuard<'a, Game<R>>, RegistryError> {
    shared
        .lock()
        .map_err(|_| RegistryError::Poisoned(room_id.to_string()))
}
