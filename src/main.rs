use std::env;
use std::error::Error;
use std::process::ExitCode;

use log::error;
use rimraster::config::DEFAULT_MODEL;
use rimraster::{Engine, Model, RenderConfig};

fn run(name: &str) -> Result<(), Box<dyn Error>> {
    let config = RenderConfig::default();
    let model = Model::load(name, &config.model_dir)?;
    let output = Engine::new(config.clone()).render(&model);
    output.save(&config)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let name = env::args().nth(1).unwrap_or_else(|| DEFAULT_MODEL.to_string());
    match run(&name) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
