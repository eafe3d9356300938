pub mod request;
pub mod scoring;
pub mod driver;
pub mod report;

pub use driver::run_evaluation;
pub use report::{EvalReport, GameFailure, GameRecord, RoleStats};
pub use request::{EvalRequest, RequestError, ValidatedRequest};
