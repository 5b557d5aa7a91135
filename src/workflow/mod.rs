pub mod health_probe;
pub mod session;
pub mod submission_flow;

pub use health_probe::HealthProber;
pub use session::{SessionState, SessionView, SharedSession};
pub use submission_flow::SubmissionFlow;
