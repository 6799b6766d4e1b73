use clap::*;
use hfc::libs::flavour::{AnalyzerConfig, ChainSink};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("chains")
        .about("Lists the flavour chains of events")
        .after_help(
            r###"
A chain is a run of consecutive particles with the same pdgId, linked by
mother/daughter relations. Every b or c particle belongs to exactly one chain.

Output, one line per chain:
    event  index  pdgId  source  length2  length3  parents  sisters  pt  eta  phi  energy

* source: FSR ME PDF UE ISR undefined
* parents: pdgIds of the mothers of the first member
* sisters: indices of the chains sharing a parent
* Kinematics are those of the first member, `-` when absent

Notes:
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'
* `--minimal` keeps the first four columns

Examples:
1. Chains of events:
   hfc chains tests/hfc/pair.txt

2. Source codes only:
   hfc chains tests/hfc/pair.txt --minimal --codes

"###,
        )
        .arg(super::arg_infiles())
        .arg(
            Arg::new("minimal")
                .long("minimal")
                .action(ArgAction::SetTrue)
                .help("Only event, index, pdgId and source"),
        )
        .arg(
            Arg::new("codes")
                .long("codes")
                .action(ArgAction::SetTrue)
                .help("Print integer source codes instead of names"),
        )
        .arg(super::arg_parallel())
        .arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let config = AnalyzerConfig {
        classify: false,
        ..AnalyzerConfig::default()
    };

    let writer = hfc::writer(args.get_one::<String>("outfile").unwrap())?;
    let mut sink = ChainSink::new(writer)
        .with_minimal(args.get_flag("minimal"))
        .with_codes(args.get_flag("codes"));

    super::run(args, &config, &mut sink)
}
