use std::fmt;

use super::chain::{FlavourChain, FlavourSource};
use crate::libs::genealogy::{Kinematics, GLUON_PDG_ID};

/// Heavy flavour classes of an event. The order is the order of the checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventClass {
    /// <0b|ME|bB>
    MEPair,
    /// <b|ME|b>
    MESpectator,
    /// <0b|ME|b>
    MECreated,
    /// <X|ME|>=1b>
    MEMissFinal,
    /// <bb|ME|X>
    MEDoubleInitial,
    /// <1b|ME|0b>
    MEKilled,
    /// Single FSR splitting of a gluon
    FSRg,
    /// Single FSR splitting off a quark
    FSRq,
    MultipleFSR,
    ISR,
    MultipleISR,
    /// Underlying event
    UE,
    /// None of the above
    Unknown,
    /// The flavour is not found
    Light,
}

impl EventClass {
    /// Integer code of the class, in declaration order
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// 0 for the matrix element classes, 1 for the parton shower, 2 for the
    /// underlying event, 3 for unknown, 4 for light. Lower is better.
    pub fn priority(&self) -> u8 {
        match self {
            EventClass::MEPair
            | EventClass::MESpectator
            | EventClass::MECreated
            | EventClass::MEMissFinal
            | EventClass::MEDoubleInitial
            | EventClass::MEKilled => 0,
            EventClass::FSRg
            | EventClass::FSRq
            | EventClass::MultipleFSR
            | EventClass::ISR
            | EventClass::MultipleISR => 1,
            EventClass::UE => 2,
            EventClass::Unknown => 3,
            EventClass::Light => 4,
        }
    }

    pub fn simple(&self) -> SimpleEventClass {
        match self {
            EventClass::MEPair
            | EventClass::MESpectator
            | EventClass::FSRg
            | EventClass::FSRq
            | EventClass::MultipleFSR
            | EventClass::ISR
            | EventClass::MultipleISR => SimpleEventClass::SPair,
            EventClass::MECreated | EventClass::MEKilled => SimpleEventClass::SSingle,
            EventClass::UE => SimpleEventClass::SUE,
            EventClass::Light => SimpleEventClass::SLight,
            EventClass::MEMissFinal | EventClass::MEDoubleInitial | EventClass::Unknown => {
                SimpleEventClass::SUnknown
            }
        }
    }
}

impl fmt::Display for EventClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Coarse grouping of [`EventClass`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimpleEventClass {
    SPair,
    SSingle,
    SUE,
    SLight,
    SUnknown,
}

impl SimpleEventClass {
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl fmt::Display for SimpleEventClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Cut on the jet matched to a chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicGate {
    pub pt_cut: f64,
    pub abs_eta_cut: f64,
}

impl Default for KinematicGate {
    fn default() -> Self {
        Self {
            pt_cut: 0.0,
            abs_eta_cut: 100.0,
        }
    }
}

impl KinematicGate {
    pub fn passes(&self, jet: &Kinematics) -> bool {
        jet.pt > self.pt_cut && jet.eta.abs() < self.abs_eta_cut
    }
}

/// Outcome of one flavour hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HfDecision {
    /// |PDG id| of the hypothesis
    pub flavour: i32,
    pub class: EventClass,
    pub priority: u8,
}

impl HfDecision {
    pub fn light(flavour: i32) -> Self {
        Self {
            flavour,
            class: EventClass::Light,
            priority: EventClass::Light.priority(),
        }
    }

    pub fn simple(&self) -> SimpleEventClass {
        self.class.simple()
    }

    pub fn is_light(&self) -> bool {
        self.class == EventClass::Light
    }
}

/// Counters over the chains of one flavour, split by sign
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    n_leaving_me: usize,
    nbar_leaving_me: usize,
    n_entering_me: usize,
    nbar_entering_me: usize,
    n_fsr: usize,
    nbar_fsr: usize,
    n_isr: usize,
    nbar_isr: usize,
    n_ue: usize,
    /// Number of parents and first parent PDG id of the last FSR chain
    fsr_parents: Option<(usize, Option<i32>)>,
}

/// Classifies an event under one heavy flavour hypothesis.
pub struct HfClassifier<'a> {
    flavour: i32,
    chains: &'a [FlavourChain],
    pdf_ids: [i32; 2],
    gate: Option<KinematicGate>,
}

impl<'a> HfClassifier<'a> {
    /// `chains` may hold any flavour, only those of `flavour` are looked at.
    /// `pdf_ids` are the initial partons with the gluon as 21.
    pub fn new(flavour: i32, chains: &'a [FlavourChain], pdf_ids: [i32; 2]) -> Self {
        Self {
            flavour: flavour.abs(),
            chains,
            pdf_ids,
            gate: None,
        }
    }

    /// Require at least one chain whose matched jet passes the gate
    pub fn with_gate(mut self, gate: Option<KinematicGate>) -> Self {
        self.gate = gate;
        self
    }

    fn tally(&self) -> Tally {
        let mut tally = Tally::default();

        for chain in self.chains.iter().filter(|c| c.flavour() == self.flavour) {
            let quark = chain.is_quark();
            match chain.source {
                FlavourSource::Me if quark => tally.n_leaving_me += 1,
                FlavourSource::Me => tally.nbar_leaving_me += 1,
                FlavourSource::Fsr => {
                    tally.fsr_parents =
                        Some((chain.parents.len(), chain.parents_pdg_id.first().copied()));
                    if quark {
                        tally.n_fsr += 1;
                    } else {
                        tally.nbar_fsr += 1;
                    }
                }
                FlavourSource::Isr if quark => tally.n_isr += 1,
                FlavourSource::Isr => tally.nbar_isr += 1,
                FlavourSource::Ue => tally.n_ue += 1,
                FlavourSource::Pdf | FlavourSource::Undefined => {}
            }
        }

        for &id in &self.pdf_ids {
            if id == self.flavour {
                tally.n_entering_me += 1;
            } else if id == -self.flavour {
                tally.nbar_entering_me += 1;
            }
        }

        tally
    }

    fn found(&self) -> bool {
        let mut chains = self.chains.iter().filter(|c| c.flavour() == self.flavour).peekable();
        if chains.peek().is_none() {
            return false;
        }

        match &self.gate {
            None => true,
            Some(gate) => chains.any(|c| c.jet.as_ref().map(|j| gate.passes(j)).unwrap_or(false)),
        }
    }

    pub fn classify(&self) -> HfDecision {
        if !self.found() {
            return HfDecision::light(self.flavour);
        }

        let class = decide(&self.tally());
        tracing::debug!(flavour = self.flavour, class = %class, "hypothesis classified");

        HfDecision {
            flavour: self.flavour,
            class,
            priority: class.priority(),
        }
    }
}

fn decide(t: &Tally) -> EventClass {
    let leaving = t.n_leaving_me + t.nbar_leaving_me;
    let entering = t.n_entering_me + t.nbar_entering_me;
    let fsr = t.n_fsr + t.nbar_fsr;
    let isr = t.n_isr + t.nbar_isr;

    let spectator_quark = t.n_leaving_me == 1
        && t.nbar_leaving_me == 0
        && t.n_entering_me == 1
        && t.nbar_entering_me == 0;
    let spectator_antiquark = t.nbar_leaving_me == 1
        && t.n_leaving_me == 0
        && t.nbar_entering_me == 1
        && t.n_entering_me == 0;

    if t.n_leaving_me == 1 && t.nbar_leaving_me == 1 && entering == 0 {
        EventClass::MEPair
    } else if spectator_quark || spectator_antiquark {
        EventClass::MESpectator
    } else if leaving == 1 && entering == 0 {
        EventClass::MECreated
    } else if leaving > 0 {
        EventClass::MEMissFinal
    } else if entering == 2 {
        EventClass::MEDoubleInitial
    } else if entering == 1 {
        EventClass::MEKilled
    } else if fsr == 2 {
        match t.fsr_parents {
            Some((1, Some(GLUON_PDG_ID))) => EventClass::FSRg,
            Some((1, _)) => EventClass::FSRq,
            _ => EventClass::Unknown,
        }
    } else if fsr > 2 {
        EventClass::MultipleFSR
    } else if isr == 2 {
        EventClass::ISR
    } else if isr > 2 {
        EventClass::MultipleISR
    } else if t.n_ue > 0 {
        EventClass::UE
    } else {
        EventClass::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;

    fn chain(pdg_id: i32, source: FlavourSource, parents: &[(usize, i32)]) -> FlavourChain {
        FlavourChain {
            pdg_id,
            source,
            parents: parents.iter().map(|p| p.0).collect::<IndexSet<_>>(),
            parents_pdg_id: parents.iter().map(|p| p.1).collect(),
            ..FlavourChain::default()
        }
    }

    fn class_of(chains: &[FlavourChain], pdf_ids: [i32; 2]) -> EventClass {
        HfClassifier::new(5, chains, pdf_ids).classify().class
    }

    #[test]
    fn test_light_without_chains() {
        let decision = HfClassifier::new(5, &[], [21, 21]).classify();
        assert_eq!(decision, HfDecision::light(5));
        assert_eq!(decision.priority, 4);
        assert_eq!(decision.simple(), SimpleEventClass::SLight);

        // Only chains of the other flavour
        let chains = vec![chain(4, FlavourSource::Me, &[])];
        assert!(HfClassifier::new(5, &chains, [5, 21]).classify().is_light());
    }

    #[test]
    fn test_me_classes() {
        let me = |pdg| chain(pdg, FlavourSource::Me, &[(2, 21)]);

        assert_eq!(class_of(&[me(5), me(-5)], [21, 21]), EventClass::MEPair);
        assert_eq!(class_of(&[me(5)], [5, 21]), EventClass::MESpectator);
        assert_eq!(class_of(&[me(-5)], [21, -5]), EventClass::MESpectator);
        // An entering antiquark with a leaving quark is no spectator
        assert_eq!(class_of(&[me(5)], [-5, 21]), EventClass::MEMissFinal);
        assert_eq!(class_of(&[me(5)], [21, 21]), EventClass::MECreated);
        assert_eq!(class_of(&[me(-5)], [1, 21]), EventClass::MECreated);
        assert_eq!(class_of(&[me(5), me(-5)], [5, 21]), EventClass::MEMissFinal);
        assert_eq!(class_of(&[me(5), me(5)], [21, 21]), EventClass::MEMissFinal);
        assert_eq!(
            class_of(
                &[
                    chain(5, FlavourSource::Pdf, &[]),
                    chain(-5, FlavourSource::Pdf, &[])
                ],
                [5, -5]
            ),
            EventClass::MEDoubleInitial
        );
        assert_eq!(
            class_of(&[chain(5, FlavourSource::Pdf, &[])], [5, 21]),
            EventClass::MEKilled
        );
    }

    #[test]
    fn test_fsr_classes() {
        let fsr = |pdg, parent_pdg| chain(pdg, FlavourSource::Fsr, &[(6, parent_pdg)]);

        let decision = HfClassifier::new(5, &[fsr(5, 21), fsr(-5, 21)], [21, 21]).classify();
        assert_eq!(decision.class, EventClass::FSRg);
        assert_eq!(decision.priority, 1);
        assert_eq!(decision.simple(), SimpleEventClass::SPair);

        assert_eq!(class_of(&[fsr(5, 6), fsr(-5, 6)], [21, 21]), EventClass::FSRq);

        // The representative chain has two parents
        let two_parents = chain(-5, FlavourSource::Fsr, &[(6, 21), (7, 21)]);
        assert_eq!(class_of(&[fsr(5, 21), two_parents], [21, 21]), EventClass::Unknown);

        assert_eq!(
            class_of(&[fsr(5, 21), fsr(-5, 21), fsr(5, 21)], [21, 21]),
            EventClass::MultipleFSR
        );
    }

    #[test]
    fn test_isr_ue_unknown() {
        let isr = |pdg| chain(pdg, FlavourSource::Isr, &[(3, 21)]);
        let ue = |pdg| chain(pdg, FlavourSource::Ue, &[(0, 2212)]);

        assert_eq!(class_of(&[isr(5), isr(-5)], [21, 21]), EventClass::ISR);
        assert_eq!(
            class_of(&[isr(5), isr(-5), isr(5), isr(-5)], [21, 21]),
            EventClass::MultipleISR
        );
        let decision = HfClassifier::new(5, &[ue(5)], [21, 21]).classify();
        assert_eq!(decision.class, EventClass::UE);
        assert_eq!(decision.priority, 2);
        assert_eq!(decision.simple(), SimpleEventClass::SUE);

        // A single FSR chain is not enough for a shower class
        let single = [chain(5, FlavourSource::Fsr, &[(6, 21)])];
        let decision = HfClassifier::new(5, &single, [21, 21]).classify();
        assert_eq!(decision.class, EventClass::Unknown);
        assert_eq!(decision.priority, 3);
        assert_eq!(decision.simple(), SimpleEventClass::SUnknown);
    }

    #[test]
    fn test_kinematic_gate() {
        let gate = KinematicGate {
            pt_cut: 20.0,
            abs_eta_cut: 2.4,
        };
        let mut chains = vec![
            chain(5, FlavourSource::Me, &[(2, 21)]),
            chain(-5, FlavourSource::Me, &[(2, 21)]),
        ];

        // No jet matched at all
        let decision = HfClassifier::new(5, &chains, [21, 21]).with_gate(Some(gate)).classify();
        assert!(decision.is_light());

        chains[0].jet = Some(Kinematics::new(15.0, 0.0, 0.0, 15.0));
        chains[1].jet = Some(Kinematics::new(50.0, 3.0, 0.0, 300.0));
        let decision = HfClassifier::new(5, &chains, [21, 21]).with_gate(Some(gate)).classify();
        assert!(decision.is_light());

        chains[1].jet = Some(Kinematics::new(50.0, -1.0, 0.0, 80.0));
        let decision = HfClassifier::new(5, &chains, [21, 21]).with_gate(Some(gate)).classify();
        assert_eq!(decision.class, EventClass::MEPair);

        // Without a gate the jets do not matter
        chains[1].jet = None;
        let decision = HfClassifier::new(5, &chains, [21, 21]).with_gate(None).classify();
        assert_eq!(decision.class, EventClass::MEPair);
    }

    #[test]
    fn test_priority_light_coupling() {
        let all = [
            EventClass::MEPair,
            EventClass::MESpectator,
            EventClass::MECreated,
            EventClass::MEMissFinal,
            EventClass::MEDoubleInitial,
            EventClass::MEKilled,
            EventClass::FSRg,
            EventClass::FSRq,
            EventClass::MultipleFSR,
            EventClass::ISR,
            EventClass::MultipleISR,
            EventClass::UE,
            EventClass::Unknown,
            EventClass::Light,
        ];
        for (code, class) in all.iter().enumerate() {
            assert_eq!(class.code(), code as i32);
            assert_eq!(class.priority() == 4, *class == EventClass::Light);
        }
        assert_eq!(EventClass::MEKilled.simple(), SimpleEventClass::SSingle);
        assert_eq!(EventClass::MEDoubleInitial.simple(), SimpleEventClass::SUnknown);
        assert_eq!(EventClass::FSRq.to_string(), "FSRq");
        assert_eq!(SimpleEventClass::SLight.code(), 3);
    }
}
