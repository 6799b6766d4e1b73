use clap::*;
use hfc::libs::flavour::{AnalyzerConfig, ClassSink, KinematicGate};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("classify")
        .about("Classifies the heavy flavour production mechanism of events")
        .after_help(
            r###"
Builds b and c flavour chains, assigns each chain a source and decides the
production mechanism of the event under the b and the c hypotheses. The
hypothesis with the better priority wins, b on ties.

Output, one line per event:
    event  class  simple_class  flavour

* class: MEPair MESpectator MECreated MEMissFinal MEDoubleInitial MEKilled
         FSRg FSRq MultipleFSR ISR MultipleISR UE Unknown Light
  with `--codes` they are 0 to 13 in this order
* simple_class: SPair SSingle SUE SLight SUnknown
* flavour: 5 or 4, 0 for light events

Notes:
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'
* `--pdf` appends: process  pdf1  pdf2  x1  x2, then pt eta phi energy of the
  two partons entering the hard process
* The kinematic gate is on when `--jet-pt-cut` or `--jet-eta-cut` is given.
  Chains are then matched to the jets of the event within `--jet-radius`,
  and only chains whose jet passes the cuts are counted
* `--parallel` analyzes batches of events on a thread pool, the output
  keeps the input order

Examples:
1. Classify events:
   hfc classify tests/hfc/pair.txt

2. Integer codes with the PDF columns:
   hfc classify tests/hfc/pair.txt --codes --pdf

3. Only count chains matched to jets with pt > 20 and |eta| < 2.4:
   hfc classify tests/hfc/fsr_g.txt --jet-pt-cut 20 --jet-eta-cut 2.4

"###,
        )
        .arg(super::arg_infiles())
        .arg(
            Arg::new("jet_pt_cut")
                .long("jet-pt-cut")
                .value_parser(value_parser!(f64))
                .num_args(1)
                .help("Minimal pt of the jet matched to a chain"),
        )
        .arg(
            Arg::new("jet_eta_cut")
                .long("jet-eta-cut")
                .value_parser(value_parser!(f64))
                .num_args(1)
                .help("Maximal |eta| of the jet matched to a chain"),
        )
        .arg(
            Arg::new("jet_radius")
                .long("jet-radius")
                .value_parser(value_parser!(f64))
                .num_args(1)
                .default_value("0.4")
                .help("Radius of the chain to jet matching"),
        )
        .arg(
            Arg::new("pdf")
                .long("pdf")
                .action(ArgAction::SetTrue)
                .help("Append process id, PDF ids and x"),
        )
        .arg(
            Arg::new("codes")
                .long("codes")
                .action(ArgAction::SetTrue)
                .help("Print integer codes instead of class names"),
        )
        .arg(super::arg_parallel())
        .arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let opt_pt_cut = args.get_one::<f64>("jet_pt_cut").copied();
    let opt_eta_cut = args.get_one::<f64>("jet_eta_cut").copied();
    let opt_radius = *args.get_one::<f64>("jet_radius").unwrap();

    let gate = if opt_pt_cut.is_some() || opt_eta_cut.is_some() {
        let default = KinematicGate::default();
        Some(KinematicGate {
            pt_cut: opt_pt_cut.unwrap_or(default.pt_cut),
            abs_eta_cut: opt_eta_cut.unwrap_or(default.abs_eta_cut),
        })
    } else {
        None
    };

    let config = AnalyzerConfig {
        gate,
        jet_radius: opt_radius,
        ..AnalyzerConfig::default()
    };

    //----------------------------
    // Operating
    //----------------------------
    let writer = hfc::writer(args.get_one::<String>("outfile").unwrap())?;
    let mut sink = ClassSink::new(writer)
        .with_codes(args.get_flag("codes"))
        .with_pdf_info(args.get_flag("pdf"));

    super::run(args, &config, &mut sink)
}
