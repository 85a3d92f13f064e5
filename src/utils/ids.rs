//! Identifier generation.
//!
//! Identifiers combine the creation time with a per-generator random salt and
//! a monotonic sequence number, so two items created within the same
//! millisecond still get distinct identifiers.

use chrono::Utc;

/// Produces identifiers of the form `<prefix>_<unix millis>_<salt>_<seq>`.
///
#[derive(Debug)]
pub struct IdGenerator {
    salt: u16,
    sequence: u64,
}

impl IdGenerator {
    /// Returns a generator with a random salt.
    ///
    pub fn new() -> IdGenerator {
        IdGenerator::with_salt(rand::random())
    }

    pub fn with_salt(salt: u16) -> IdGenerator {
        IdGenerator { salt, sequence: 0 }
    }

    /// Returns the next identifier for the given prefix.
    ///
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.sequence += 1;
        format!(
            "{}_{}_{:04x}_{}",
            prefix,
            Utc::now().timestamp_millis(),
            self.salt,
            self.sequence
        )
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        IdGenerator::new()
    }
}

/// Returns `<prefix>_<unix millis>`, for identifiers that only need to tell
/// documents apart in time.
///
pub fn timestamp_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Utc::now().timestamp_millis())
}
