use fixedbitset::FixedBitSet;

use super::chain::FlavourChain;
use super::error::ChainError;
use super::{BOTTOM, CHARM};
use crate::libs::genealogy::{Event, ParticleId};

/// Splits the heavy quarks of an event into flavour chains.
///
/// Particles are visited in record order. The first particle not yet part of
/// a chain seeds a new one: its same-flavour ancestors are collected first,
/// then its same-flavour descendants. When a particle has several relatives
/// with the same PDG id, the first one (in generator order) that is still free
/// is taken. The resulting chains partition all particles of the requested
/// flavours.
#[derive(Debug, Clone)]
pub struct ChainBuilder<'a> {
    event: &'a Event,
    flavours: Vec<i32>,
}

impl<'a> ChainBuilder<'a> {
    /// Builder for b and c chains
    pub fn new(event: &'a Event) -> Self {
        Self {
            event,
            flavours: vec![CHARM, BOTTOM],
        }
    }

    /// Restrict the chains to the given |PDG id|s
    pub fn flavours(mut self, flavours: &[i32]) -> Self {
        self.flavours = flavours.iter().map(|f| f.abs()).collect();
        self
    }

    pub fn build(&self) -> Result<Vec<FlavourChain>, ChainError> {
        let event = self.event;

        // Particles not yet assigned to any chain
        let mut present = FixedBitSet::with_capacity(event.len());
        for particle in event.particles() {
            if self.flavours.contains(&particle.abs_pdg_id()) {
                present.insert(particle.id);
            }
        }

        let mut chains: Vec<FlavourChain> = Vec::new();
        for seed in 0..event.len() {
            if !present.contains(seed) {
                continue;
            }

            let content = self.walk(seed, &present);
            claim(event, &mut present, &content, chains.len())?;

            let chain = FlavourChain::new(event, event[seed].pdg_id, content);
            tracing::debug!(
                event = event.number,
                chain = chains.len(),
                pdg_id = chain.pdg_id,
                content = ?chain.content,
                "chain built"
            );
            chains.push(chain);
        }

        Ok(chains)
    }

    /// Content of the chain seeded by `seed`, oldest member first
    fn walk(&self, seed: ParticleId, present: &FixedBitSet) -> Vec<ParticleId> {
        let event = self.event;
        let pdg_id = event[seed].pdg_id;

        let mut claimed = FixedBitSet::with_capacity(event.len());
        claimed.insert(seed);

        // Partons entering the hard process are never the ancestors of what
        // leaves it: the incoming and outgoing quarks form separate chains
        let mut ancestors = Vec::new();
        let mut current = seed;
        while let Some(mother) =
            first_free(event, &event[current].mothers, pdg_id, present, &claimed, true)
        {
            claimed.insert(mother);
            ancestors.push(mother);
            current = mother;
        }

        let mut content: Vec<ParticleId> = ancestors.into_iter().rev().collect();
        content.push(seed);

        // A pure initial-state parton has no descendants in its chain
        if event.enters_hard_process(seed) {
            return content;
        }

        let mut current = seed;
        while let Some(daughter) =
            first_free(event, &event[current].daughters, pdg_id, present, &claimed, false)
        {
            claimed.insert(daughter);
            content.push(daughter);
            current = daughter;
        }

        content
    }
}

/// First relative with the given PDG id that is still free.
fn first_free(
    event: &Event,
    relatives: &[ParticleId],
    pdg_id: i32,
    present: &FixedBitSet,
    claimed: &FixedBitSet,
    skip_entering: bool,
) -> Option<ParticleId> {
    relatives.iter().copied().find(|&id| {
        event[id].pdg_id == pdg_id
            && present.contains(id)
            && !claimed.contains(id)
            && !(skip_entering && event.enters_hard_process(id))
    })
}

/// Remove the content of chain `index` from the working set.
///
/// Every member must still be free, otherwise two chains share a particle.
pub fn claim(
    event: &Event,
    present: &mut FixedBitSet,
    content: &[ParticleId],
    index: usize,
) -> Result<(), ChainError> {
    for &id in content {
        if !present.contains(id) {
            return Err(ChainError::DoubleCounting {
                particle: id,
                pdg_id: event[id].pdg_id,
                chain: index,
            });
        }
        present.set(id, false);
    }

    Ok(())
}

/// Chains of a single flavour (4 for c, 5 for b)
pub fn build_chains(event: &Event, flavour: i32) -> Result<Vec<FlavourChain>, ChainError> {
    ChainBuilder::new(event).flavours(&[flavour]).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn event_of(listing: &str) -> Event {
        crate::libs::genealogy::read_events(BufReader::new(listing.as_bytes()))
            .unwrap()
            .remove(0)
    }

    fn contents(chains: &[FlavourChain]) -> Vec<Vec<ParticleId>> {
        chains.iter().map(|c| c.content.clone()).collect()
    }

    #[test]
    fn test_pair_chains() {
        let event = event_of(
            "\
event 1 pdf 21 21
0 2212 3 -
1 2212 3 -
2 21 3 0
3 21 3 1
4 5 3 2,3
5 -5 3 2,3
6 5 2 4
7 -5 2 5
8 5 1 6
",
        );

        let chains = ChainBuilder::new(&event).build().unwrap();
        assert_eq!(contents(&chains), vec![vec![4, 6, 8], vec![5, 7]]);
        assert_eq!(chains[0].pdg_id, 5);
        assert_eq!(chains[1].pdg_id, -5);
        assert_eq!(chains[0].length3, 1);
        assert_eq!(chains[0].length2, 1);
    }

    #[test]
    fn test_ancestors_listed_later() {
        // The seed comes first in the record, its mother later
        let event = event_of(
            "\
event 1
0 21 2 -
1 4 2 3
2 4 2 1
3 4 2 0
",
        );

        let chains = build_chains(&event, 4).unwrap();
        assert_eq!(contents(&chains), vec![vec![3, 1, 2]]);
        assert_eq!(chains[0].parents.iter().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_splitting_takes_first_daughter() {
        // c -> c c, only one of the daughters continues the chain
        let event = event_of(
            "\
event 1
0 21 2 -
1 4 2 0
2 4 2 1
3 4 2 1
4 -4 2 1
",
        );

        let chains = build_chains(&event, 4).unwrap();
        assert_eq!(contents(&chains), vec![vec![1, 2], vec![3], vec![4]]);
        assert_eq!(chains[1].parents.iter().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_entering_parton_separated() {
        // b g -> b g: the incoming b must not swallow the outgoing one
        let event = event_of(
            "\
event 1 pdf 5 21
0 2212 3 -
1 2212 3 -
2 5 3 0
3 21 3 1
4 5 3 2,3
5 21 3 2,3
6 5 2 4
",
        );

        let chains = build_chains(&event, 5).unwrap();
        assert_eq!(contents(&chains), vec![vec![2], vec![4, 6]]);
    }

    #[test]
    fn test_entering_mother_listed_later() {
        // The outgoing b is seeded first and points forward to the incoming b,
        // which is still free when the ancestors are walked
        let event = event_of(
            "\
event 1 pdf 5 21
0 2212 3 -
1 2212 3 -
2 5 3 3,4
3 5 3 0
4 21 3 1
5 5 2 2
",
        );

        let chains = build_chains(&event, 5).unwrap();
        assert_eq!(contents(&chains), vec![vec![2, 5], vec![3]]);
        assert_eq!(chains[0].parents_pdg_id, vec![5, 21]);
    }

    #[test]
    fn test_flavours_filter() {
        let event = event_of(
            "\
event 1
0 21 2 -
1 4 2 0
2 5 2 0
3 -4 2 0
",
        );

        assert_eq!(contents(&build_chains(&event, 5).unwrap()), vec![vec![2]]);
        assert_eq!(contents(&build_chains(&event, 4).unwrap()), vec![vec![1], vec![3]]);
        assert_eq!(
            contents(&ChainBuilder::new(&event).build().unwrap()),
            vec![vec![1], vec![2], vec![3]]
        );
        assert!(build_chains(&event, 6).unwrap().is_empty());
    }

    #[test]
    fn test_cycle_terminates() {
        // Contradictory record: two b quarks that are each other's mother
        let event = event_of(
            "\
event 1
0 5 2 1
1 5 2 0
",
        );

        let chains = build_chains(&event, 5).unwrap();
        assert_eq!(contents(&chains), vec![vec![1, 0]]);
    }

    #[test]
    fn test_claim_double_counting() {
        let event = event_of("event 1\n0 5 2 -\n1 5 2 0\n");
        let mut present = FixedBitSet::with_capacity(event.len());
        present.insert(0);
        present.insert(1);

        claim(&event, &mut present, &[0, 1], 0).unwrap();
        assert_eq!(present.count_ones(..), 0);

        let err = claim(&event, &mut present, &[1], 1).unwrap_err();
        assert_eq!(
            err,
            ChainError::DoubleCounting {
                particle: 1,
                pdg_id: 5,
                chain: 1
            }
        );
        assert_eq!(err.particle(), 1);
        assert!(err.to_string().contains("Double counting"));
    }
}
