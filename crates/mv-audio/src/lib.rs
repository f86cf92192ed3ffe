//! Audio output for modviz.

mod cpal_backend;
mod traits;
mod transport;

pub use cpal_backend::CpalOutput;
pub use traits::{AudioConfig, AudioError, AudioOutput};
pub use transport::{fill_output, SharedReplayer, Transport};
