pub mod chains;
pub mod classify;
pub mod jets;
pub mod light;

use anyhow::Context;
use clap::*;
use hfc::libs::flavour::{process_events, AnalyzerConfig, ClassificationSink};

pub fn arg_infiles() -> Arg {
    Arg::new("infiles")
        .required(true)
        .num_args(1..)
        .index(1)
        .help("Event listing(s) to process, plain or gzipped. [stdin] for screen")
}

pub fn arg_parallel() -> Arg {
    Arg::new("parallel")
        .long("parallel")
        .short('p')
        .value_parser(value_parser!(usize))
        .num_args(1)
        .default_value("1")
        .help("Number of threads for parallel processing")
}

pub fn arg_outfile() -> Arg {
    Arg::new("outfile")
        .long("outfile")
        .short('o')
        .num_args(1)
        .default_value("stdout")
        .help("Output filename. [stdout] for screen")
}

/// Feed every input file through the analyzer into the sink
pub fn run(
    args: &ArgMatches,
    config: &AnalyzerConfig,
    sink: &mut dyn ClassificationSink,
) -> anyhow::Result<()> {
    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opt_parallel)
        .build()?;

    for infile in args.get_many::<String>("infiles").unwrap() {
        let reader = hfc::reader(infile)?;
        let count = process_events(reader, config, &pool, sink)
            .with_context(|| format!("failed to process {}", infile))?;
        tracing::info!(file = %infile, events = count, "input done");
    }

    Ok(())
}
