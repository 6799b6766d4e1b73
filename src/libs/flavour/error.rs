use thiserror::Error;

use crate::libs::genealogy::ParticleId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// A particle claimed by two chains. The input genealogy contradicts
    /// itself, the event cannot be classified.
    #[error(
        "Double counting when constructing chains: particle {particle} (pdgId {pdg_id}) \
         claimed by chain {chain} is already part of another chain"
    )]
    DoubleCounting {
        particle: usize,
        pdg_id: i32,
        chain: usize,
    },
}

impl ChainError {
    pub fn particle(&self) -> ParticleId {
        match self {
            ChainError::DoubleCounting { particle, .. } => *particle,
        }
    }
}
