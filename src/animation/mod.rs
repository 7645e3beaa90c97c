pub mod driver;
pub mod scale;
pub mod spinner;
pub mod state;

pub use driver::{AnimationDriver, FrameScheduler, Headless};
pub use scale::StepProfile;
pub use state::{ScaleState, StepStatus};
