extern crate clap;
use clap::*;
use tracing_subscriber::EnvFilter;

mod cmd_hfc;

/// Diagnostics go to stderr, filtered by `RUST_LOG` and `warn` by default
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let app = Command::new("hfc")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`hfc` - Heavy Flavour Classifier")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_hfc::classify::make_subcommand())
        .subcommand(cmd_hfc::chains::make_subcommand())
        .subcommand(cmd_hfc::light::make_subcommand())
        .subcommand(cmd_hfc::jets::make_subcommand())
        .after_help(
            r###"Subcommands:

* classify - Production mechanism of the b or c quarks of each event
* chains   - Flavour chains with their sources and sisters
* light    - Light partons leaving the hard process
* jets     - Generator jets above a pt cut

Set RUST_LOG=info or RUST_LOG=debug for progress on stderr.

"###,
        );

    match app.get_matches().subcommand() {
        Some(("classify", sub_matches)) => cmd_hfc::classify::execute(sub_matches),
        Some(("chains", sub_matches)) => cmd_hfc::chains::execute(sub_matches),
        Some(("light", sub_matches)) => cmd_hfc::light::execute(sub_matches),
        Some(("jets", sub_matches)) => cmd_hfc::jets::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
