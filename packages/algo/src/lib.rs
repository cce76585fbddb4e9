//! # times-algo - times-table practice engine
//!
//! Pure Rust engine behind the times-table trainer:
//!
//! - **Fact Store** - per-fact correct/wrong counters keyed by canonical pair
//! - **Mastery Classifier** - sampling weight and display bucket per fact
//! - **Question Selector** - weighted random draw biased toward weak facts
//! - **Trainer** - owned session state tying the pieces to a persistence backend
//!
//! ## Module layout
//!
//! - [`types`] - shared types and constants
//! - [`store`] - the fact store and its JSON form
//! - [`mastery`] - `weight`, `cell_state`, `is_mastered`
//! - [`filter`] - factor filter set
//! - [`selector`] - candidate pool and cumulative-walk sampling
//! - [`stats`] - summary and matrix views
//! - [`persistence`] - key-value storage boundary
//! - [`trainer`] - session state and transitions
//! - [`sanitize`] - input validation helpers
//!
//! ## Example
//!
//! ```rust
//! use times_algo::{MemoryStore, Trainer, TrainerOptions};
//!
//! let mut trainer = Trainer::load(MemoryStore::new(), TrainerOptions { seed: Some(7) });
//! let question = trainer.next_question().expect("the full pool is never empty");
//! assert_eq!(trainer.reveal_answer(), Some(question.product()));
//! trainer.record_answer(true).unwrap();
//! assert_eq!(trainer.summary().total_correct, 1);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod filter;
pub mod mastery;
pub mod persistence;
pub mod sanitize;
pub mod selector;
pub mod stats;
pub mod store;
pub mod trainer;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::*;

pub use filter::{FilterSet, FilterTag, ParseFilterError};
pub use mastery::{cell_state, is_mastered, weight};
pub use persistence::{KeyValueStore, MemoryStore, PersistenceError, PersistenceResult};
pub use selector::{candidate_pool, select_question, weighted_index};
pub use stats::{mastery_matrix, summarize};
pub use store::FactStore;
pub use trainer::{Trainer, TrainerError, TrainerOptions, TrainerResult};
