//! AI-assisted suggestion services: customer-category ideas and keyword
//! filter terms.

mod category;
mod keywords;
pub mod prompts;

pub use category::CategorySuggester;
pub use keywords::KeywordSuggester;
