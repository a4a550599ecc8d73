use clap::Parser;
use kbconvert::{
    Cli, Command, KbConvert, KbConvertError, OutputFormatter, OutputMode, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Command::GenerateConfig { ref path } = cli.command {
        return handle_generate_config(path.as_deref());
    }

    let app = match KbConvert::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    match app.execute(&cli.command) {
        // Per-file failures are reported in the summary but are not fatal:
        // the batch completed, so the process exits cleanly.
        Ok(_summary) => 0,
        Err(e) => {
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &KbConvertError) -> i32 {
    match error {
        KbConvertError::TargetNotFound { .. }
        | KbConvertError::NotADirectory { .. }
        | KbConvertError::WrongExtension { .. } => 2,
        KbConvertError::ToolMissing { .. } => 3,
        KbConvertError::Config { .. } => 4,
        _ => 1,
    }
}

fn handle_generate_config(path: Option<&std::path::Path>) -> i32 {
    let config_path = path
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "kbconvert.toml".to_string());

    match KbConvert::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  kbconvert pdf2md --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &KbConvertError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
