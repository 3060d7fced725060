// Argument parsing via clap.
//
// Note that you probably want to keep this as a single file so the build script doesn't
// trip all over itself.

use clap::*;
use indoc::indoc;

const TEMPLATE: &str = indoc! {
    "{name} {version}
    {author}

    {about}

    {usage-heading} {usage}

    {all-args}"
};

const USAGE: &str = "cpuload [OPTIONS]";

/// The arguments for cpuload.
#[derive(Parser, Debug, Default)]
#[command(
    name = crate_name!(),
    version = crate_version!(),
    author = crate_authors!(),
    about = crate_description!(),
    disable_help_flag = true,
    disable_version_flag = true,
    color = ColorChoice::Auto,
    help_template = TEMPLATE,
    override_usage = USAGE,
)]
pub struct Args {
    #[command(flatten)]
    pub general_args: GeneralArgs,

    #[command(flatten)]
    pub cpu_args: CpuArgs,

    #[command(flatten)]
    pub other_args: OtherArgs,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "General Options")]
pub struct GeneralArgs {
    #[arg(
        short = 'C',
        long,
        value_name = "PATH",
        value_hint = ValueHint::AnyPath,
        help = "Sets the location of the config file.",
        long_help = "Sets the location of the config file. Expects a config file in the TOML format. \
                    Unlike the default location, a path given here must exist."
    )]
    pub config_location: Option<String>,

    #[arg(
        short = 'r',
        long,
        value_name = "TIME",
        help = "Sets how often a sample is taken.",
        long_help = "Sets how often a sample is taken. Takes a number in milliseconds or a human-readable \
                    duration (e.g. 5s). The minimum is 250ms, and defaults to 1000ms."
    )]
    pub rate: Option<String>,

    #[arg(
        short = 'n',
        long,
        value_name = "N",
        value_parser = value_parser!(u64).range(1..),
        help = "Stops after N samples.",
        long_help = "Stops after N samples. If not set, samples are taken until interrupted."
    )]
    pub samples: Option<u64>,

    #[cfg(feature = "logging")]
    #[arg(
        long,
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        help = "Writes debug logs to the given file."
    )]
    pub log_file: Option<String>,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "CPU Options")]
pub struct CpuArgs {
    #[arg(
        long,
        help = "Disables the native load source.",
        long_help = "Disables the native load source, so that load is always computed from tick counters."
    )]
    pub disable_native: bool,

    #[arg(
        short = 'a',
        long,
        help = "Shows the 1, 5, and 15 minute load averages.",
        long_help = "Shows the 1, 5, and 15 minute load averages, if the platform supports them."
    )]
    pub load_average: bool,

    #[arg(
        short = 'p',
        long,
        help = "Shows the load of each logical processor."
    )]
    pub per_core: bool,

    #[arg(
        long,
        help = "Only reports load computed from tick counters.",
        long_help = "Only reports load computed from tick counters, even if a native load source is \
                    available. Unlike --disable_native, the native source is still detected."
    )]
    pub ticks_only: bool,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "Other Options")]
pub struct OtherArgs {
    #[arg(short='h', long, action=ArgAction::Help, help="Prints help info (for more details use `--help`.")]
    help: (),

    #[arg(short='V', long, action=ArgAction::Version, help="Prints version information.")]
    version: (),
}

/// Returns a [`Command`] based off of [`Args`].
#[cfg(test)]
fn build_cmd() -> Command {
    Args::command()
}
