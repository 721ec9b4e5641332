pub mod analytics;
pub mod executor;
pub mod keywords;
pub mod session;

pub use analytics::AnalyticsRecorder;
pub use executor::{FederatedSearch, SearchResultBundle};
pub use keywords::{KeywordSet, translate};
pub use session::{FetchOutcome, QuestionSession, SessionState};
