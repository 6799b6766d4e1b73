use super::chain::FlavourChain;
use super::class::{EventClass, HfClassifier, HfDecision, KinematicGate, SimpleEventClass};
use super::{BOTTOM, CHARM};

/// Final classification of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub class: EventClass,
    pub simple: SimpleEventClass,
    /// Flavour of the winning hypothesis, `None` for light events
    pub flavour: Option<i32>,
}

impl Resolution {
    pub fn light() -> Self {
        Self {
            class: EventClass::Light,
            simple: SimpleEventClass::SLight,
            flavour: None,
        }
    }
}

impl From<HfDecision> for Resolution {
    fn from(decision: HfDecision) -> Self {
        Self {
            class: decision.class,
            simple: decision.simple(),
            flavour: Some(decision.flavour),
        }
    }
}

/// Pick between the b and the c hypotheses.
///
/// The better (lower) priority wins and b wins ties.
pub fn resolve(b: HfDecision, c: HfDecision) -> Resolution {
    match (b.is_light(), c.is_light()) {
        (false, false) if b.priority <= c.priority => b.into(),
        (false, false) => c.into(),
        (false, true) => b.into(),
        (true, false) => c.into(),
        (true, true) => Resolution::light(),
    }
}

/// Run both hypotheses over the chains of an event and resolve them
pub fn classify_event(
    chains: &[FlavourChain],
    pdf_ids: [i32; 2],
    gate: Option<KinematicGate>,
) -> Resolution {
    let b = HfClassifier::new(BOTTOM, chains, pdf_ids).with_gate(gate).classify();
    let c = HfClassifier::new(CHARM, chains, pdf_ids).with_gate(gate).classify();

    let resolution = resolve(b, c);
    tracing::debug!(b = %b.class, c = %c.class, class = %resolution.class, "flavours resolved");
    resolution
}
