pub mod interface;
pub mod prompts;
pub mod requester;

pub use interface::{TargetLanguage, TranslationOutcome};
pub use requester::TranslationRequester;
