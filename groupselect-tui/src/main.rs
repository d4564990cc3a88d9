use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use groupselect_tui::terminal::Terminal;
use groupselect_tui::{paths, App, AppError, Config, Control};
use log::LevelFilter;
use simplelog::WriteLogger;

fn init_logging(level: LevelFilter) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        eprintln!("Warning: no cache directory, logging disabled");
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, simplelog::Config::default(), file) {
                eprintln!("Warning: failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: cannot create {}: {}", path.display(), e),
    }
}

fn run(config: &Config) -> Result<(), AppError> {
    let catalog = config.catalog()?;
    let mut term = Terminal::new()?;
    let mut app = App::new(config, catalog, term.size()?);

    loop {
        term.draw(app.frame())?;
        for event in term.poll(Some(Duration::from_millis(100)))? {
            if app.handle(&event) == Control::Quit {
                app.shutdown();
                return Ok(());
            }
        }
    }
}

fn main() -> ExitCode {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);

    let config = match Config::load(explicit.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let level = match config.level_filter() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(level);
    log::info!("Starting groupselect-tui with {:?}", config);

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
