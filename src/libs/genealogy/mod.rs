pub mod error;
pub mod event;
pub mod parser;
pub mod particle;
pub mod status;

pub use error::GenealogyError;
pub use event::Event;
pub use parser::{read_events, EventReader};
pub use particle::{Kinematics, Particle, ParticleId};
pub use status::Stage;

/// PDG code of the beam particles (protons, or antiprotons with the sign flipped)
pub const BEAM_PDG_ID: i32 = 2212;

/// PDG code of the gluon
pub const GLUON_PDG_ID: i32 = 21;
