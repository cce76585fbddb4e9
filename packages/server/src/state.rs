use std::sync::Arc;
use std::time::{Instant, SystemTime};

use parking_lot::{Mutex, MutexGuard};

use times_algo::{KeyValueStore, Trainer, TrainerOptions};

use crate::config::{Config, UiTimings};
use crate::storage::FileStore;

pub type BoxedStore = Box<dyn KeyValueStore + Send>;

/// The single learner session. Every handler locks it for the duration of one
/// synchronous transition, so requests never interleave on the fact store.
pub type SharedTrainer = Arc<Mutex<Trainer<BoxedStore>>>;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    trainer: SharedTrainer,
    ui: UiTimings,
}

impl AppState {
    /// Load the session from `storage` and draw the first question.
    pub fn new(storage: BoxedStore, options: TrainerOptions, ui: UiTimings) -> Self {
        let mut trainer = Trainer::load(storage, options);
        trainer.next_question();

        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            trainer: Arc::new(Mutex::new(trainer)),
            ui,
        }
    }

    pub fn from_config(config: &Config) -> std::io::Result<Self> {
        let store = FileStore::open(&config.data_dir)?;
        Ok(Self::new(
            Box::new(store),
            TrainerOptions { seed: config.seed },
            config.ui,
        ))
    }

    pub fn trainer(&self) -> MutexGuard<'_, Trainer<BoxedStore>> {
        self.trainer.lock()
    }

    pub fn ui(&self) -> UiTimings {
        self.ui
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }
}
