//! cadview command line: load a model document, reconstruct its
//! geometry, report per-unit statistics, and optionally export the
//! normalized document or call the model-generation service.

use std::path::PathBuf;
use std::process::ExitCode;

use cadview::generate::{GenerateClient, GenerateOutcome, GenerateRequest};
use cadview::Viewer;

const USAGE: &str =
    "usage: cadview --model <path> [--export <path>] [--generate <description>]";

struct CliArgs {
    model: Option<PathBuf>,
    export: Option<PathBuf>,
    generate: Option<String>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Self {
            model: None,
            export: None,
            generate: None,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--model" => {
                    let path = args.next().ok_or("--model needs a path")?;
                    parsed.model = Some(PathBuf::from(path));
                }
                "--export" => {
                    let path = args.next().ok_or("--export needs a path")?;
                    parsed.export = Some(PathBuf::from(path));
                }
                "--generate" => {
                    let desire = args.next().ok_or("--generate needs a description")?;
                    parsed.generate = Some(desire);
                }
                other => return Err(format!("unknown argument: {other}")),
            }
        }
        Ok(parsed)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadview=info".into()),
        )
        .init();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if args.model.is_none() && args.generate.is_none() {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    }

    if let Some(model) = &args.model {
        let mut viewer = Viewer::new();
        match viewer.load_file(model) {
            Ok(stats) => {
                println!("format:   {}", stats.format.name());
                if let Some(name) = &stats.name {
                    println!("name:     {name}");
                }
                println!("units:    {}", stats.unit_count);
                println!("contours: {}", stats.contour_count);
                println!("objects:  {}", viewer.registry.len());
                for (unit, message) in viewer.build_errors() {
                    println!("failed:   {unit}: {message}");
                }
            }
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }

        if let Some(export) = &args.export {
            match viewer.export_file(export) {
                Ok(()) => println!("exported: {}", export.display()),
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    if let Some(desire) = args.generate {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                eprintln!("error: failed to start async runtime: {e}");
                return ExitCode::FAILURE;
            }
        };
        let client = GenerateClient::default();
        match runtime.block_on(client.generate(&GenerateRequest::whole(desire))) {
            Ok(GenerateOutcome::Generated { path }) => {
                println!("generated: {path}");
                println!("load it with: cadview --model <downloaded copy of {path}>");
            }
            Ok(GenerateOutcome::Failed { message }) => {
                eprintln!("generation failed: {message}");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
