//! TCP listener and the accept loop.

pub mod listener;
