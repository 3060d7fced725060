#![warn(rust_2018_idioms)]

use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use cpuload::{
    options::{get_config, Args, CpuLoadOptions},
    utils::cancellation_token::CancellationToken,
    CentralProcessor, LoadMode,
};

fn main() -> Result<()> {
    let args = Args::parse();

    #[cfg(feature = "logging")]
    {
        if let Some(log_file) = &args.general_args.log_file {
            cpuload::utils::logging::init_logger(
                log::LevelFilter::Trace,
                std::ffi::OsStr::new(log_file),
            )
            .context("Unable to set up the log file.")?;
        }
    }

    let config = get_config(&args).context("Unable to properly parse or read the config file.")?;
    let options = CpuLoadOptions::new(&args, &config)?;
    cpuload::info!("Starting with options: {options:?}");

    let processor = CentralProcessor::platform(options.settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_header(&mut out, &processor)?;

    // Set termination hook
    let cancellation_token = Arc::new(CancellationToken::default());
    {
        let cancellation_token = cancellation_token.clone();
        ctrlc::set_handler(move || cancellation_token.cancel())?;
    }

    let mut taken: u64 = 0;
    while !cancellation_token.sleep_with_cancellation(options.rate) {
        taken += 1;
        print_sample(&mut out, &processor, &options, taken)?;

        if options.samples.is_some_and(|samples| taken >= samples) {
            break;
        }
    }

    Ok(())
}

fn print_header(out: &mut impl Write, processor: &CentralProcessor) -> io::Result<()> {
    let identity = processor.identity();

    writeln!(out, "{} ({})", identity.name(), identity.vendor())?;
    writeln!(out, "Identifier: {}", identity.identifier())?;
    if let Some(hertz) = identity.vendor_freq() {
        writeln!(out, "Frequency: {:.2} GHz", hertz as f64 / 1e9)?;
    }
    writeln!(
        out,
        "Processors: {} logical, {} physical",
        processor.logical_processor_count(),
        processor.physical_processor_count()
    )?;
    writeln!(out, "Load source: {}", processor.load_mode().as_str())?;
    out.flush()
}

fn print_sample(
    out: &mut impl Write, processor: &CentralProcessor, options: &CpuLoadOptions, sample: u64,
) -> io::Result<()> {
    let (load, source) = if options.ticks_only {
        (processor.system_cpu_load_between_ticks(), LoadMode::TickFallback)
    } else {
        (processor.system_cpu_load(), processor.load_mode())
    };

    writeln!(out)?;
    writeln!(out, "[{sample}] CPU: {:.1}% ({})", load * 100.0, source.as_str())?;

    if options.per_core {
        for (cpu, load) in processor.processor_cpu_load_between_ticks().iter().enumerate() {
            writeln!(out, "    cpu{cpu}: {:.1}%", load * 100.0)?;
        }
    }

    if options.load_average {
        match processor.system_load_average() {
            Some([one, five, fifteen]) => {
                writeln!(out, "    load average: {one:.2} {five:.2} {fifteen:.2}")?
            }
            None => writeln!(out, "    load average: unavailable")?,
        }
    }

    out.flush()
}
