//! Cipher service adapters
//!
//! - **InMemoryCipher**: process-local stand-in used by tests and the
//!   development server

pub mod in_memory;

pub use in_memory::InMemoryCipher;
