pub mod reply;
pub mod review;
pub mod status;

pub use reply::{Reply, ReplyInsertOutcome};
pub use review::{AppealFiling, OperatorDecision, Review, ReviewTransition};
pub use status::{ReviewAction, ReviewStatus};
