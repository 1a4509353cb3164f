//! Ready Intake — conversational intake backend for a preparedness site.
//!
//! A visitor chats with a scripted/LLM-backed assistant, the assistant fills
//! a five-field profile from free text, and once complete the visitor leaves
//! an email address to receive a generated PDF guide.

pub mod config;
pub mod delivery;
pub mod error;
pub mod guide;
pub mod intake;
pub mod llm;
pub mod server;
