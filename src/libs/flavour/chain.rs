use indexmap::IndexSet;
use std::collections::BTreeSet;
use std::fmt;

use crate::libs::genealogy::{Event, Kinematics, ParticleId, Stage};

/// Where the flavour of a chain comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlavourSource {
    /// Nothing of the below
    #[default]
    Undefined,
    /// Shower partons only, not attached to the beams
    Fsr,
    /// The last hard-process parton hands the flavour over to the shower
    Me,
    /// Hard-process partons only: the chain enters the hard process
    Pdf,
    /// Shower partons that are daughters of a beam particle
    Ue,
    /// Shower partons that are granddaughters of a beam particle
    Isr,
}

impl FlavourSource {
    /// Integer code of the source, as written by `hfc chains --codes`
    pub fn code(&self) -> i32 {
        match self {
            FlavourSource::Undefined => 0,
            FlavourSource::Fsr => 1,
            FlavourSource::Me => 2,
            FlavourSource::Pdf => 3,
            FlavourSource::Ue => 4,
            FlavourSource::Isr => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FlavourSource::Undefined => "undefined",
            FlavourSource::Fsr => "FSR",
            FlavourSource::Me => "ME",
            FlavourSource::Pdf => "PDF",
            FlavourSource::Ue => "UE",
            FlavourSource::Isr => "ISR",
        }
    }
}

impl fmt::Display for FlavourSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Genealogically connected consecutive partons of the same flavour.
#[derive(Debug, Clone, Default)]
pub struct FlavourChain {
    /// Signed PDG id shared by every member
    pub pdg_id: i32,

    /// Members, from the oldest ancestor to the youngest descendant
    pub content: Vec<ParticleId>,

    /// Number of status 2 members
    pub length2: usize,

    /// Number of hard-process members
    pub length3: usize,

    /// Mothers of the first member
    pub parents: IndexSet<ParticleId>,

    /// PDG ids of `parents`, same order
    pub parents_pdg_id: Vec<i32>,

    /// Indices of chains sharing a parent with this one
    pub sister_chains: BTreeSet<usize>,

    pub source: FlavourSource,

    /// Generator jet matched to the chain, if any
    pub jet: Option<Kinematics>,
}

impl FlavourChain {
    /// Wrap the finished content of a chain and fill the members' counters and
    /// the parents of the first member. The source is left undefined.
    pub fn new(event: &Event, pdg_id: i32, content: Vec<ParticleId>) -> Self {
        let length2 = content
            .iter()
            .filter(|&&id| event[id].stage() == Stage::Shower)
            .count();
        let length3 = content
            .iter()
            .filter(|&&id| event[id].stage() == Stage::HardProcess)
            .count();

        let mut parents = IndexSet::new();
        if let Some(&first) = content.first() {
            parents.extend(event[first].mothers.iter().copied());
        }
        let parents_pdg_id = parents.iter().map(|&p| event[p].pdg_id).collect();

        Self {
            pdg_id,
            content,
            length2,
            length3,
            parents,
            parents_pdg_id,
            ..Self::default()
        }
    }

    pub fn flavour(&self) -> i32 {
        self.pdg_id.abs()
    }

    pub fn is_quark(&self) -> bool {
        self.pdg_id > 0
    }

    pub fn first(&self) -> Option<ParticleId> {
        self.content.first().copied()
    }

    pub fn last(&self) -> Option<ParticleId> {
        self.content.last().copied()
    }

    /// Kinematics of the earliest member
    pub fn kinematics(&self, event: &Event) -> Option<Kinematics> {
        self.first().and_then(|id| event[id].kinematics)
    }
}
