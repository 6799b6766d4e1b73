//! Matching of flavour chains to generator jets.

use crate::libs::flavour::FlavourChain;
use crate::libs::genealogy::{Event, Kinematics};

/// Default matching radius in the (eta, phi) plane
pub const DEFAULT_RADIUS: f64 = 0.4;

/// Nearest jet within `radius` of the given direction
pub fn nearest_jet(jets: &[Kinematics], target: &Kinematics, radius: f64) -> Option<Kinematics> {
    jets.iter()
        .map(|jet| (jet.delta_r(target), jet))
        .filter(|(dr, _)| *dr < radius)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, jet)| *jet)
}

/// Attach to every chain the generator jet closest to its first member.
///
/// Chains whose first member carries no kinematics, or with no jet within
/// `radius`, are left unmatched. Several chains may share one jet.
pub fn match_jets(event: &Event, chains: &mut [FlavourChain], radius: f64) {
    for chain in chains.iter_mut() {
        chain.jet = chain
            .kinematics(event)
            .and_then(|k| nearest_jet(&event.jets, &k, radius));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nearest_jet() {
        let jets = vec![
            Kinematics::new(40.0, 0.0, 0.0, 40.0),
            Kinematics::new(30.0, 0.2, 0.1, 31.0),
            Kinematics::new(25.0, -2.0, 3.1, 100.0),
        ];

        let target = Kinematics::new(20.0, 0.25, 0.1, 22.0);
        let jet = nearest_jet(&jets, &target, 0.4).unwrap();
        assert_relative_eq!(jet.pt, 30.0);

        // Across the phi boundary
        let target = Kinematics::new(20.0, -2.0, -3.1, 80.0);
        let jet = nearest_jet(&jets, &target, 0.4).unwrap();
        assert_relative_eq!(jet.pt, 25.0);

        let target = Kinematics::new(20.0, 1.5, 1.5, 60.0);
        assert!(nearest_jet(&jets, &target, 0.4).is_none());
        assert!(nearest_jet(&[], &target, 0.4).is_none());
    }

    #[test]
    fn test_match_jets() {
        let mut event = Event::new(1);
        let g = event.add_particle(21, 2);
        let b = event.add_particle(5, 2);
        let c = event.add_particle(4, 2);
        event.add_mother(b, g).unwrap();
        event.add_mother(c, g).unwrap();
        event.set_kinematics(b, Kinematics::new(35.0, 1.0, 1.0, 60.0));
        event.jets.push(Kinematics::new(33.0, 1.1, 0.9, 58.0));

        let mut chains = vec![
            FlavourChain::new(&event, 5, vec![b]),
            FlavourChain::new(&event, 4, vec![c]),
        ];
        match_jets(&event, &mut chains, DEFAULT_RADIUS);

        assert_relative_eq!(chains[0].jet.unwrap().pt, 33.0);
        // No kinematics on the charm quark
        assert!(chains[1].jet.is_none());
    }
}
