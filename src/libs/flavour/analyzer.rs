use itertools::Itertools;
use rayon::prelude::*;
use std::io::BufRead;

use super::builder::ChainBuilder;
use super::chain::FlavourChain;
use super::class::KinematicGate;
use super::error::ChainError;
use super::resolve::{classify_event, Resolution};
use super::sink::ClassificationSink;
use super::sister::link_sisters;
use super::source::assign_sources;
use super::{BOTTOM, CHARM};
use crate::libs::genealogy::{Event, EventReader, ParticleId};
use crate::libs::jet;

/// What to compute for every event
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// |PDG id|s of the chains
    pub flavours: Vec<i32>,
    /// Cut on the matched jets; no gate when `None`
    pub gate: Option<KinematicGate>,
    /// Radius of the chain to jet matching
    pub jet_radius: f64,
    /// Run the b and c hypotheses, otherwise only chains are produced
    pub classify: bool,
    /// Collect light partons leaving the hard process
    pub light_partons: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            flavours: vec![CHARM, BOTTOM],
            gate: None,
            jet_radius: jet::DEFAULT_RADIUS,
            classify: true,
            light_partons: false,
        }
    }
}

/// Everything derived from one event
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub chains: Vec<FlavourChain>,
    /// `None` when classification is switched off
    pub resolution: Option<Resolution>,
    pub light_partons: Vec<ParticleId>,
}

/// Chains, sources, sisters, jets and the final class of one event
pub fn analyze(event: &Event, config: &AnalyzerConfig) -> Result<Analysis, ChainError> {
    let mut chains = ChainBuilder::new(event).flavours(&config.flavours).build()?;
    assign_sources(event, &mut chains);
    link_sisters(&mut chains);

    if config.gate.is_some() {
        jet::match_jets(event, &mut chains, config.jet_radius);
    }

    let resolution = if config.classify {
        Some(classify_event(&chains, event.pdf_ids(), config.gate))
    } else {
        None
    };

    let light_partons = if config.light_partons {
        event.light_partons_leaving()
    } else {
        Vec::new()
    };

    Ok(Analysis {
        chains,
        resolution,
        light_partons,
    })
}

/// Analyze independent events in parallel, on the current rayon pool.
/// The results keep the order of `events`.
pub fn analyze_all(events: &[Event], config: &AnalyzerConfig) -> Result<Vec<Analysis>, ChainError> {
    events.par_iter().map(|event| analyze(event, config)).collect()
}

/// Events read per parallel batch
const BATCH_SIZE: usize = 1024;

/// Read every event of a listing, analyze batches of them on `pool` and hand
/// the results to the sink in input order.
/// Returns the number of events processed.
pub fn process_events<R: BufRead>(
    reader: R,
    config: &AnalyzerConfig,
    pool: &rayon::ThreadPool,
    sink: &mut dyn ClassificationSink,
) -> anyhow::Result<usize> {
    let mut count = 0;

    for batch in &EventReader::new(reader).chunks(BATCH_SIZE) {
        let events = batch.collect::<Result<Vec<_>, _>>()?;
        let analyses = pool.install(|| analyze_all(&events, config))?;

        for (event, analysis) in events.iter().zip(analyses.iter()) {
            sink.write(event, analysis)?;
        }
        count += events.len();
    }
    sink.flush()?;

    tracing::debug!(events = count, "events processed");
    Ok(count)
}
