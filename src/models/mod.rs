pub mod analysis;
pub mod candidate;
pub mod status;

pub use analysis::{AnalysisResult, DocumentInfo, ErrorBody, ExtractionMethod, HealthReport};
pub use candidate::CandidateFile;
pub use status::{Severity, StatusMessage, WorkflowStatus};
