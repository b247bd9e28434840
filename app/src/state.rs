//! Application state management
//!
//! Holds the loaded configuration and the repository every command works
//! through. Built once at startup.

use crate::config::AppConfig;
use crate::file_store::FileStore;
use swasth_kadam_shared::{KeyValueStore, LocalRepository, Tracker};

/// Host state, generic over the backing store so tests can run in memory
pub struct AppState<S = FileStore> {
    config: AppConfig,
    repo: LocalRepository<S>,
}

impl AppState<FileStore> {
    /// Open the file store named by the configuration
    pub fn open(config: AppConfig) -> Self {
        let store = FileStore::new(config.store_path());
        Self::with_store(config, store)
    }
}

impl<S: KeyValueStore> AppState<S> {
    pub fn with_store(config: AppConfig, store: S) -> Self {
        Self {
            config,
            repo: LocalRepository::new(store),
        }
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn repo(&self) -> &LocalRepository<S> {
        &self.repo
    }

    #[inline]
    pub fn repo_mut(&mut self) -> &mut LocalRepository<S> {
        &mut self.repo
    }

    /// Tracker borrowing this state's repository
    pub fn tracker(&mut self) -> Tracker<&mut LocalRepository<S>> {
        Tracker::new(&mut self.repo)
    }
}
