use itertools::Itertools;

use super::chain::FlavourChain;

/// Link every pair of chains whose first members share a parent.
///
/// Parents are compared by particle id, so two distinct gluons never make the
/// chains sisters.
pub fn link_sisters(chains: &mut [FlavourChain]) {
    let pairs: Vec<(usize, usize)> = (0..chains.len())
        .tuple_combinations()
        .filter(|&(i, j)| !chains[i].parents.is_disjoint(&chains[j].parents))
        .collect();

    for (i, j) in pairs {
        chains[i].sister_chains.insert(j);
        chains[j].sister_chains.insert(i);
    }
}
