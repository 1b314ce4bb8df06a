use std::io::Read;
use std::path::Path;

use clap::Parser;

use condor_scheduler::common::cli::RootOptions;
use condor_scheduler::common::setup::setup_logging;
use condor_scheduler::common::utils::fs::get_current_dir;
use condor_scheduler::condor::command::submit_dag;
use condor_scheduler::generate::{GeneratedFile, GeneratorConfig, generate};
use condor_scheduler::partition::split_lines;

fn read_input(path: Option<&Path>) -> condor_scheduler::Result<Vec<u8>> {
    let input = match path {
        Some(path) => {
            log::debug!("Reading input lines from {}", path.display());
            std::fs::read(path)?
        }
        None => {
            log::debug!("Reading input lines from stdin");
            let mut input = Vec::new();
            std::io::stdin().lock().read_to_end(&mut input)?;
            input
        }
    };
    Ok(input)
}

fn print_contents<'a>(files: impl IntoIterator<Item = &'a GeneratedFile>) {
    for file in files {
        println!("#### {} ####", file.name);
        println!("{}", file.contents);
    }
}

fn run(opts: RootOptions) -> condor_scheduler::Result<()> {
    let config = GeneratorConfig::from_options(opts)?;
    let lines = split_lines(&read_input(config.input_file.as_deref())?);
    let files = generate(&config, &lines)?;

    if config.print {
        print_contents(files.descriptors.iter().chain(std::iter::once(&files.dag)));
    }

    if config.submit {
        let output = submit_dag(&config.dag_path, &config.submit_args, &get_current_dir())?;
        log::info!("DAG {} submitted\n{output}", config.dag_path.display());
    }
    Ok(())
}

fn main() {
    let opts = RootOptions::parse();
    setup_logging(opts.general.debug);

    if let Err(error) = run(opts) {
        log::error!("{error}");
        std::process::exit(1);
    }
}
