pub mod documents;
pub mod email;
pub mod health;
pub mod leads;
pub mod llm;
