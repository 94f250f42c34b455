//! Owner-scoped persistence. Every function borrows the caller's request-scoped
//! connection; nothing here acquires or holds a connection of its own.

pub mod tasks;
pub mod users;
