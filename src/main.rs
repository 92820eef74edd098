use std::{io, process};
use taskers::{cli, Config, TaskList};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.init_logging();

    // Task list setup
    let mut list = TaskList::new();
    if let Err(err) = list.load(&config.data_file) {
        eprintln!(
            "Failed to load tasks from {}: {}",
            config.data_file.display(),
            err
        );
        process::exit(1);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    cli::run(&mut list, &config, &mut input, &mut stdout)?;
    Ok(())
}
