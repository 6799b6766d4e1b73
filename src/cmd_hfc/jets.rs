use clap::*;
use hfc::libs::flavour::{AnalyzerConfig, JetSink};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("jets")
        .about("Lists the generator jets of events")
        .after_help(
            r###"
Output, one line per jet with pt >= `--jet-pt-cut`:
    event  index  pt  eta  phi  energy

* index is the position of the jet in the event listing

Notes:
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'

Examples:
1. Jets above 20 GeV:
   hfc jets tests/hfc/fsr_g.txt

2. All jets:
   hfc jets tests/hfc/fsr_g.txt --jet-pt-cut 0

"###,
        )
        .arg(super::arg_infiles())
        .arg(
            Arg::new("jet_pt_cut")
                .long("jet-pt-cut")
                .value_parser(value_parser!(f64))
                .num_args(1)
                .default_value("20")
                .help("Minimal pt of the listed jets"),
        )
        .arg(super::arg_parallel())
        .arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let opt_pt_cut = *args.get_one::<f64>("jet_pt_cut").unwrap();

    let config = AnalyzerConfig {
        classify: false,
        ..AnalyzerConfig::default()
    };

    let writer = hfc::writer(args.get_one::<String>("outfile").unwrap())?;
    let mut sink = JetSink::new(writer).with_pt_cut(opt_pt_cut);

    super::run(args, &config, &mut sink)
}
