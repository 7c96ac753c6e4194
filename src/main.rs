// src/main.rs

use wingbridge::{cli, logging, run};

fn main() {
    match run_main() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("wingbridge error: {err:?}");
            std::process::exit(1);
        }
    }
}

fn run_main() -> anyhow::Result<bool> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args)
}
