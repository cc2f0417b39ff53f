//! Data representation.
//!
//! This module holds the dataset metadata reported by the inspector, the
//! single-slot session cache, its workspace persistence, and the display
//! nodes the outline is built from.

mod dataset;
mod node;
mod session;
mod state;

pub use dataset::{Dataset, Dimension, ValueMap, Variable};
pub use node::{DisplayNode, Expansion, NodeKind};
pub use session::{display_name, CachedSession, SessionCache};
pub use state::{WorkspaceState, LAST_DATASET_KEY};

/// Number of sample values ever displayed per variable.
pub const MAX_SAMPLES: usize = 10;
