mod animation;
mod stepper;
mod types;

pub use animation::AnimationScheduler;
pub use stepper::{StepperState, TraceStepper};
pub use types::Trace;
