//! Conversation session management.
//!
//! A `ChatSession` holds the ordered turn log and the generation
//! parameters for one conversation. It is owned by a single caller;
//! mutation goes through `&mut self`, so concurrent access has to be
//! arranged by the owner.

mod chat;
mod manager;

pub use manager::ChatSession;
