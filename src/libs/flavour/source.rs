use super::chain::{FlavourChain, FlavourSource};
use crate::libs::genealogy::{Event, ParticleId, Stage};

/// Beam particles among the parents and grandparents of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ancestry {
    pub beam_parent: bool,
    pub beam_grandparent: bool,
}

impl Ancestry {
    /// Ancestry of the chain's first member
    pub fn of(event: &Event, chain: &FlavourChain) -> Self {
        let mut ancestry = Ancestry::default();

        for &parent in &chain.parents {
            if event.is_beam(parent) {
                ancestry.beam_parent = true;
            }
            if event[parent].mothers.iter().any(|&g| event.is_beam(g)) {
                ancestry.beam_grandparent = true;
            }
        }

        ancestry
    }
}

/// Whether the flavour passes straight from the hard process to the shower:
/// the last hard-process member has no hard-process daughter and the first
/// status 2 member comes right after it.
pub fn stage_adjacent(event: &Event, content: &[ParticleId]) -> bool {
    let last_hard = content
        .iter()
        .rposition(|&id| event[id].stage() == Stage::HardProcess);
    let first_shower = content
        .iter()
        .position(|&id| event[id].stage() == Stage::Shower);

    // Without a hard-process member there is nothing to compare
    let (Some(last_hard), Some(first_shower)) = (last_hard, first_shower) else {
        return false;
    };

    !event.has_hard_daughter(content[last_hard]) && first_shower == last_hard + 1
}

/// Decision table of the flavour source. First match wins.
///
/// ```
/// use hfc::libs::flavour::source::{classify_source, Ancestry};
/// use hfc::libs::flavour::FlavourSource;
///
/// let none = Ancestry::default();
/// assert_eq!(classify_source(1, 1, none, true), FlavourSource::Me);
/// assert_eq!(classify_source(1, 1, none, false), FlavourSource::Undefined);
/// assert_eq!(classify_source(3, 0, none, false), FlavourSource::Fsr);
/// ```
pub fn classify_source(
    length2: usize,
    length3: usize,
    ancestry: Ancestry,
    adjacent: bool,
) -> FlavourSource {
    match (length3, length2) {
        (0, l2) if l2 > 0 && !ancestry.beam_parent && !ancestry.beam_grandparent => {
            FlavourSource::Fsr
        }
        (0, l2) if l2 > 0 && ancestry.beam_parent => FlavourSource::Ue,
        (0, l2) if l2 > 0 && ancestry.beam_grandparent => FlavourSource::Isr,
        (l3, 0) if l3 > 0 => FlavourSource::Pdf,
        (l3, l2) if l3 > 0 && l2 > 0 && adjacent => FlavourSource::Me,
        _ => FlavourSource::Undefined,
    }
}

/// Set the flavour source of one chain
pub fn assign_source(event: &Event, chain: &mut FlavourChain) {
    let ancestry = Ancestry::of(event, chain);
    let adjacent = chain.length3 > 0 && stage_adjacent(event, &chain.content);
    chain.source = classify_source(chain.length2, chain.length3, ancestry, adjacent);
}

/// Set the flavour source of every chain
pub fn assign_sources(event: &Event, chains: &mut [FlavourChain]) {
    for chain in chains.iter_mut() {
        assign_source(event, chain);
    }
}
