use clap::*;
use hfc::libs::flavour::{AnalyzerConfig, LightSink};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("light")
        .about("Lists the light partons leaving the hard process")
        .after_help(
            r###"
Light partons are u, d, s quarks and gluons. A parton leaves the hard process
when it has a hard process status and none of its daughters has one.

Output, one line per parton:
    event  index  pdgId  pt  eta  phi  energy

Examples:
1. Light partons of events:
   hfc light tests/hfc/mixed.txt

"###,
        )
        .arg(super::arg_infiles())
        .arg(super::arg_parallel())
        .arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let config = AnalyzerConfig {
        classify: false,
        light_partons: true,
        ..AnalyzerConfig::default()
    };

    let writer = hfc::writer(args.get_one::<String>("outfile").unwrap())?;
    let mut sink = LightSink::new(writer);

    super::run(args, &config, &mut sink)
}
