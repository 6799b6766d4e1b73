//! Heavy flavour chains and the event classification built on top of them.
//!
//! The steps for one event, in order: [`builder`] splits the b and c quarks
//! into chains, [`source`] tells where each chain comes from, [`sister`]
//! links chains sharing a parent, [`class`] classifies the event under the b
//! and under the c hypothesis, and [`resolve`] picks the final answer.

pub mod analyzer;
pub mod builder;
pub mod chain;
pub mod class;
pub mod error;
pub mod resolve;
pub mod sink;
pub mod sister;
pub mod source;

pub use analyzer::{analyze, analyze_all, process_events, Analysis, AnalyzerConfig};
pub use builder::{build_chains, ChainBuilder};
pub use chain::{FlavourChain, FlavourSource};
pub use class::{EventClass, HfClassifier, HfDecision, KinematicGate, SimpleEventClass};
pub use error::ChainError;
pub use resolve::{classify_event, resolve, Resolution};
pub use sink::{ChainSink, ClassSink, ClassificationSink, JetSink, LightSink};

/// |PDG id| of the b quark
pub const BOTTOM: i32 = 5;

/// |PDG id| of the c quark
pub const CHARM: i32 = 4;
