use adclog::{Configuration, Statistics};

fn main() -> adclog::Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp_micros()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let config = Configuration::from_args("adclog-dump");
    let samples = adclog::load(&config.path, config.byte_order)?;
    adclog::report(&adclog::summarize(&samples), std::io::stdout().lock())?;
    match Statistics::compute(&samples) {
        Some(stats) =>
            log::info!("{} ({:.3} s at {} Hz)", stats,
                Statistics::duration(samples.len(), config.sample_rate).as_secs_f64(),
                config.sample_rate),
        None =>
            log::info!("{} contains no samples", config.path.display()),
    }
    Ok(())
}
