use std::error::Error;

use clap::Parser;
use log::debug;

use tx_mockgen::config::GeneratorConfig;
use tx_mockgen::generator::Generator;
use tx_mockgen::writer::write_envelope;

const OUTPUT_FILE: &str = "mock_transactions.json";

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    Cli::parse();

    let config = GeneratorConfig::default();
    debug!("Using {:?}", config);
    let envelope = Generator::new(config)?.generate();
    write_envelope(OUTPUT_FILE, &envelope)?;

    println!("Mock data generated in {}", OUTPUT_FILE);
    Ok(())
}
