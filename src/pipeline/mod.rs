pub mod events;
pub mod pacing;
pub mod phase;
pub mod simulator;
pub mod state;

pub use events::PipelineEvent;
pub use pacing::{InstantPacing, Pacing, RandomPacing};
pub use simulator::{PipelineSimulator, RunOutcome};
pub use state::PipelineState;
