//! Application state module

mod app_state;
mod donation;
mod forms;
mod orchestrator;
mod session;
mod storage;
#[cfg(test)]
pub(crate) mod strategies;
mod validation;
mod wizard;

pub use app_state::*;
pub use donation::*;
pub use forms::*;
pub use orchestrator::*;
pub use session::*;
pub use storage::{DraftStorage, FileStorage};
pub use validation::*;
pub use wizard::*;

#[cfg(test)]
pub(crate) use storage::{temp_dir, MemoryStorage};
