//! Process supervision: spawning, readiness detection, cancellation,
//! and bounded polling.

pub mod cancel;
pub mod retry;
pub mod supervisor;

pub use cancel::CancelToken;
pub use retry::{PollOutcome, Poller};
pub use supervisor::{Completion, ProcessResult, Supervisor, SupervisorOptions};
