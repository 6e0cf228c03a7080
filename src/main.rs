use std::{env, fs::read_to_string, path::Path, process::ExitCode};

use bella::{
    display_error,
    pipeline::{compile, CompileOptions, OutputType},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: bella <file> [ast|analyzed|optimized|js]");
        return ExitCode::FAILURE;
    }

    let output = match args.get(2).map(|arg| arg.parse::<OutputType>()) {
        Some(Ok(output)) => output,
        Some(Err(message)) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
        None => OutputType::default(),
    };

    let file_path = &args[1];
    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.clone());

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(err) => {
            error!(path = %file_path, "failed to read source file");
            eprintln!("Failed to read {}: {}", file_path, err);
            return ExitCode::FAILURE;
        }
    };

    info!(file = %file_name, output = %output, "compiling");

    match compile(&source, &CompileOptions { output, file_name }) {
        Ok(result) => {
            println!("{}", result);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("{}", display_error(&err, &source));
            ExitCode::FAILURE
        }
    }
}
