// src/main.rs

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use richtext_code_blocks::{CodeBlockService, config::Config, error::AppError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy)]
enum Command {
    Validate,
    Render,
}

struct Options {
    command: Command,
    json: bool,
    untrusted: bool,
    input: Option<String>,
}

fn main() {
    // Load configuration from environment (and .env, if present)
    let config = Config::from_env();

    // Logs go to stderr; stdout carries the HTML
    let env_filter = EnvFilter::new(&config.rust_log);
    let stderr_layer = fmt::layer().with_writer(io::stderr).with_target(false);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();

    let options = match parse_args(env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(err) => {
            eprintln!("{}", err);
            print_usage();
            process::exit(err.exit_code());
        }
    };

    let service = CodeBlockService::from_config(&config);
    if let Err(err) = run(&service, &options) {
        eprintln!("{}", err);
        process::exit(err.exit_code());
    }
}

fn run(service: &CodeBlockService, options: &Options) -> Result<(), AppError> {
    let source = read_input(options.input.as_deref())?;

    match options.command {
        Command::Validate => {
            let validation = service.validate(&source);
            if options.json {
                println!("{}", serde_json::to_string_pretty(&validation)?);
            } else {
                print!("{}", validation.html);
            }
            if !validation.is_valid() {
                return Err(AppError::ValidationFailed(
                    service.error_message(&validation.errors),
                ));
            }
        }
        Command::Render => {
            let html = if options.untrusted {
                service.render_untrusted(&source)
            } else {
                service.render(&source)
            };
            print!("{}", html);
        }
    }
    Ok(())
}

/// `Ok(None)` means help was requested.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Options>, AppError> {
    let command = match args.next().as_deref() {
        Some("validate") => Command::Validate,
        Some("render") => Command::Render,
        Some("-h") | Some("--help") => return Ok(None),
        Some(other) => {
            return Err(AppError::BadRequest(format!("unknown command: {}", other)));
        }
        None => return Err(AppError::BadRequest("missing command".to_string())),
    };

    let mut options = Options {
        command,
        json: false,
        untrusted: false,
        input: None,
    };
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--json" => options.json = true,
            "--untrusted" => options.untrusted = true,
            _ if options.input.is_none() => options.input = Some(arg.clone()),
            _ => {
                return Err(AppError::BadRequest(format!("unexpected argument: {}", arg)));
            }
        }
    }
    Ok(Some(options))
}

fn read_input(path: Option<&str>) -> Result<String, AppError> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn print_usage() {
    eprintln!("Usage: code-blocks <validate|render> [--json] [--untrusted] [input]");
}
