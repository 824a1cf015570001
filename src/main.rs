use ofwscan::{collect_hardware_tree, config::load_config, Result};

fn run() -> Result<()> {
    let config = load_config()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let scan_config = config.scan_config()?;
    log::debug!(
        "scanning {} with {}-byte words",
        scan_config.root.display(),
        scan_config.word_size.bytes()
    );

    let system = collect_hardware_tree(&scan_config)?;
    println!("{:#?}", system);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
