//! Conversational core for ABA Travel.
//!
//! Resolves traveller utterances to canned answers from a static knowledge
//! base about Georgia, keeps the ordered conversation history, and delivers
//! assistant turns after a short "thinking" delay, one request at a time.

pub mod classifier;
pub mod error;
pub mod export;
pub mod guide;
pub mod knowledge;
pub mod orchestrator;
pub mod response;
pub mod session;
pub mod store;

pub use classifier::{ClassificationResult, IntentClassifier, KeywordGroup, KEYWORD_GROUPS};
pub use error::ChatError;
pub use knowledge::{DetailStyle, Topic, TopicId};
pub use orchestrator::{SendOutcome, TravelAssistant};
pub use response::ResponseComposer;
pub use session::{EmergencyDispatch, Session};
pub use store::{ConversationStore, SessionSummary};
