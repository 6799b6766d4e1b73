use thiserror::Error;

use super::ParticleId;

#[derive(Error, Debug)]
pub enum GenealogyError {
    /// Error while reading an event listing
    #[error("Parse error at line {line}: {message}\nSnippet: \"{snippet}\"")]
    Parse {
        /// A human-readable message explaining the error
        message: String,
        /// The line number (1-based)
        line: usize,
        /// The offending line
        snippet: String,
    },

    /// A mother reference that points outside of the event
    #[error("Particle {particle} refers to missing mother {mother}")]
    Link {
        particle: ParticleId,
        mother: ParticleId,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
