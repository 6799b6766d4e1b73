//! Writers of the per-event results.
//!
//! All of them emit tab separated lines, the first column is the event number.

use anyhow::anyhow;
use itertools::Itertools;
use std::io::Write;

use super::analyzer::Analysis;
use crate::libs::genealogy::{Event, Kinematics};

/// Receives the analysis of every event, in input order
pub trait ClassificationSink {
    fn write(&mut self, event: &Event, analysis: &Analysis) -> anyhow::Result<()>;

    fn flush(&mut self) -> anyhow::Result<()>;
}

fn join_or_dash<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    let joined = items.into_iter().join(",");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

fn opt_or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn kinematics_columns(kinematics: Option<Kinematics>) -> String {
    match kinematics {
        Some(k) => format!("{:.3}\t{:.3}\t{:.3}\t{:.3}", k.pt, k.eta, k.phi, k.energy),
        None => "-\t-\t-\t-".to_string(),
    }
}

/// One line per event: class, simple class and flavour of the winner
///
/// ```text
/// 1	MEPair	SPair	5
/// ```
pub struct ClassSink {
    writer: Box<dyn Write>,
    /// Integer codes instead of names
    codes: bool,
    /// Append process id, PDF ids, x and the kinematics of the two partons
    /// entering the hard process
    pdf_info: bool,
}

impl ClassSink {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            codes: false,
            pdf_info: false,
        }
    }

    pub fn with_codes(mut self, codes: bool) -> Self {
        self.codes = codes;
        self
    }

    pub fn with_pdf_info(mut self, pdf_info: bool) -> Self {
        self.pdf_info = pdf_info;
        self
    }
}

impl ClassificationSink for ClassSink {
    fn write(&mut self, event: &Event, analysis: &Analysis) -> anyhow::Result<()> {
        let res = analysis
            .resolution
            .ok_or_else(|| anyhow!("event {} was not classified", event.number))?;

        let (class, simple) = if self.codes {
            (res.class.code().to_string(), res.simple.code().to_string())
        } else {
            (res.class.to_string(), res.simple.to_string())
        };
        write!(
            self.writer,
            "{}\t{}\t{}\t{}",
            event.number,
            class,
            simple,
            res.flavour.unwrap_or(0)
        )?;

        if self.pdf_info {
            let [first, second] = event.pdf_ids();
            let (x_first, x_second) = match event.pdf_x {
                Some([a, b]) => (Some(a), Some(b)),
                None => (None, None),
            };
            write!(
                self.writer,
                "\t{}\t{}\t{}\t{}\t{}",
                opt_or_dash(event.process_id),
                first,
                second,
                opt_or_dash(x_first),
                opt_or_dash(x_second)
            )?;

            // Kinematics of the two partons entering the hard process
            let entering = event.entering_partons();
            for slot in 0..2 {
                let kinematics = entering.get(slot).and_then(|&id| event[id].kinematics);
                write!(self.writer, "\t{}", kinematics_columns(kinematics))?;
            }
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// One line per chain
///
/// Full: event, index, pdgId, source, length2, length3, parents' pdgIds,
/// sister indices, pt eta phi energy of the first member.
/// Minimal: event, index, pdgId, source.
pub struct ChainSink {
    writer: Box<dyn Write>,
    minimal: bool,
    codes: bool,
}

impl ChainSink {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            minimal: false,
            codes: false,
        }
    }

    pub fn with_minimal(mut self, minimal: bool) -> Self {
        self.minimal = minimal;
        self
    }

    pub fn with_codes(mut self, codes: bool) -> Self {
        self.codes = codes;
        self
    }
}

impl ClassificationSink for ChainSink {
    fn write(&mut self, event: &Event, analysis: &Analysis) -> anyhow::Result<()> {
        for (index, chain) in analysis.chains.iter().enumerate() {
            let source = if self.codes {
                chain.source.code().to_string()
            } else {
                chain.source.to_string()
            };
            write!(
                self.writer,
                "{}\t{}\t{}\t{}",
                event.number, index, chain.pdg_id, source
            )?;

            if !self.minimal {
                write!(
                    self.writer,
                    "\t{}\t{}\t{}\t{}\t{}",
                    chain.length2,
                    chain.length3,
                    join_or_dash(&chain.parents_pdg_id),
                    join_or_dash(&chain.sister_chains),
                    kinematics_columns(chain.kinematics(event))
                )?;
            }

            writeln!(self.writer)?;
        }

        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// One line per light parton leaving the hard process: event, index, pdgId,
/// pt eta phi energy
pub struct LightSink {
    writer: Box<dyn Write>,
}

impl LightSink {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl ClassificationSink for LightSink {
    fn write(&mut self, event: &Event, analysis: &Analysis) -> anyhow::Result<()> {
        for &id in &analysis.light_partons {
            let particle = &event[id];
            writeln!(
                self.writer,
                "{}\t{}\t{}\t{}",
                event.number,
                id,
                particle.pdg_id,
                kinematics_columns(particle.kinematics)
            )?;
        }

        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Default lower pt bound of the dumped generator jets
pub const DEFAULT_JET_PT_CUT: f64 = 20.0;

/// One line per generator jet with `pt >= pt_cut`: event, jet index, pt eta
/// phi energy
pub struct JetSink {
    writer: Box<dyn Write>,
    pt_cut: f64,
}

impl JetSink {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            pt_cut: DEFAULT_JET_PT_CUT,
        }
    }

    pub fn with_pt_cut(mut self, pt_cut: f64) -> Self {
        self.pt_cut = pt_cut;
        self
    }
}

impl ClassificationSink for JetSink {
    fn write(&mut self, event: &Event, _: &Analysis) -> anyhow::Result<()> {
        for (index, jet) in event.jets.iter().enumerate() {
            if jet.pt < self.pt_cut {
                continue;
            }
            writeln!(
                self.writer,
                "{}\t{}\t{}",
                event.number,
                index,
                kinematics_columns(Some(*jet))
            )?;
        }

        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::flavour::{analyze, AnalyzerConfig};
    use std::io::BufReader;
    use std::sync::{Arc, Mutex};

    /// Writer whose content stays readable after the sink took it
    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    const PAIR: &str = "\
event 7 pdf 21 21 process 81 x 0.05 0.01
0 2212 3 -
1 2212 3 -
2 21 3 0 0.6 7.5 1.0 300.0
3 21 3 1
4 5 3 2,3 50.0 1.0 0.5 80.0
5 -5 3 2,3
6 5 2 4
7 -5 2 5
8 21 3 2,3
jet 48.0 1.05 0.45 78.0
jet 19.5 -2.0 3.0 90.0
";

    fn run(sink: &mut dyn ClassificationSink, config: &AnalyzerConfig) {
        let event = crate::libs::genealogy::read_events(BufReader::new(PAIR.as_bytes()))
            .unwrap()
            .remove(0);
        let analysis = analyze(&event, config).unwrap();
        sink.write(&event, &analysis).unwrap();
        sink.flush().unwrap();
    }

    #[test]
    fn test_class_sink() {
        let out = Shared::default();
        let mut sink = ClassSink::new(Box::new(out.clone()));
        run(&mut sink, &AnalyzerConfig::default());
        assert_eq!(out.text(), "7\tMEPair\tSPair\t5\n");

        let out = Shared::default();
        let mut sink = ClassSink::new(Box::new(out.clone()))
            .with_codes(true)
            .with_pdf_info(true);
        run(&mut sink, &AnalyzerConfig::default());
        assert_eq!(
            out.text(),
            "7\t0\t0\t5\t81\t21\t21\t0.05\t0.01\t\
             0.600\t7.500\t1.000\t300.000\t-\t-\t-\t-\n"
        );
    }

    #[test]
    fn test_class_sink_needs_resolution() {
        let out = Shared::default();
        let mut sink = ClassSink::new(Box::new(out.clone()));
        let event = Event::new(1);
        assert!(sink.write(&event, &Analysis::default()).is_err());
    }

    #[test]
    fn test_chain_sink() {
        let out = Shared::default();
        let mut sink = ChainSink::new(Box::new(out.clone()));
        run(&mut sink, &AnalyzerConfig::default());
        assert_eq!(
            out.text(),
            "7\t0\t5\tME\t1\t1\t21,21\t1\t50.000\t1.000\t0.500\t80.000\n\
             7\t1\t-5\tME\t1\t1\t21,21\t0\t-\t-\t-\t-\n"
        );

        let out = Shared::default();
        let mut sink = ChainSink::new(Box::new(out.clone()))
            .with_minimal(true)
            .with_codes(true);
        run(&mut sink, &AnalyzerConfig::default());
        assert_eq!(out.text(), "7\t0\t5\t2\n7\t1\t-5\t2\n");
    }

    #[test]
    fn test_jet_sink() {
        let out = Shared::default();
        let mut sink = JetSink::new(Box::new(out.clone()));
        run(&mut sink, &AnalyzerConfig::default());
        assert_eq!(out.text(), "7\t0\t48.000\t1.050\t0.450\t78.000\n");

        let out = Shared::default();
        let mut sink = JetSink::new(Box::new(out.clone())).with_pt_cut(10.0);
        run(&mut sink, &AnalyzerConfig::default());
        assert_eq!(
            out.text(),
            "7\t0\t48.000\t1.050\t0.450\t78.000\n\
             7\t1\t19.500\t-2.000\t3.000\t90.000\n"
        );
    }

    #[test]
    fn test_light_sink() {
        let out = Shared::default();
        let mut sink = LightSink::new(Box::new(out.clone()));
        let config = AnalyzerConfig {
            light_partons: true,
            ..AnalyzerConfig::default()
        };
        run(&mut sink, &config);
        assert_eq!(out.text(), "7\t8\t21\t-\t-\t-\t-\n");
    }
}
