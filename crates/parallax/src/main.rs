//! # PARALLAX
//!
//! Command-line driver: reads a scene file, scatters markers that do not
//! overlap on screen, prints a summary and optionally writes the accepted
//! markers as TOML.
//!
//! Logging goes through `tracing`; set `RUST_LOG=debug` to see every
//! commit and abandonment.

use std::path::PathBuf;
use std::process::ExitCode;

use parallax_placement::{PlacementReport, PlacementStatus, ScatterConfig, ScatterError};
use parallax_shared::Vec3;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: parallax <scene.toml> [--out <markers.toml>] [--seed <u64>]";

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Run(Options),
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    scene: PathBuf,
    out: Option<PathBuf>,
    seed: Option<u64>,
}

fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut scene = None;
    let mut out = None;
    let mut seed = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--out" => {
                let path = args.next().ok_or("--out needs a file path")?;
                out = Some(PathBuf::from(path));
            }
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let parsed = value
                    .parse::<u64>()
                    .map_err(|e| format!("invalid seed '{value}': {e}"))?;
                seed = Some(parsed);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
            path => {
                if scene.is_some() {
                    return Err(format!("unexpected argument '{path}'"));
                }
                scene = Some(PathBuf::from(path));
            }
        }
    }

    let scene = scene.ok_or("missing scene file")?;
    Ok(Command::Run(Options { scene, out, seed }))
}

fn run(options: &Options) -> Result<PlacementReport, ScatterError> {
    let mut scene = ScatterConfig::from_file(&options.scene)?;
    if let Some(seed) = options.seed {
        scene.seed = seed;
    }

    let engine = scene.build_engine()?;
    tracing::info!(
        "Scene {}: camera at {}, seed {}",
        options.scene.display(),
        format_point(engine.camera().position()),
        scene.seed
    );
    let report = engine.place(&mut scene.seed().rng());

    if let Some(out) = &options.out {
        let text = toml::to_string(&report)
            .map_err(|e| ScatterError::InvalidConfig(format!("cannot serialize report: {e}")))?;
        std::fs::write(out, text).map_err(|source| ScatterError::Io {
            path: out.clone(),
            source,
        })?;
        tracing::info!("Wrote {} markers to {}", report.markers.len(), out.display());
    }

    Ok(report)
}

fn format_point(p: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", p.x, p.y, p.z)
}

fn print_summary(report: &PlacementReport) {
    let status = match report.status {
        PlacementStatus::Complete => "complete",
        PlacementStatus::BudgetExhausted => "budget exhausted (partial)",
    };
    println!("Placed {} markers: {}", report.markers.len(), status);
    println!(
        "  candidates {}, attempts {} (peak {}), out-of-domain pushes {}, abandoned {}",
        report.stats.candidates_sampled,
        report.stats.total_attempts,
        report.stats.peak_attempts,
        report.stats.out_of_domain_moves,
        report.stats.abandoned
    );
    for (i, marker) in report.markers.iter().enumerate() {
        println!("  [{i:>3}] {}", format_point(marker.position));
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_full_command_line() {
        let command = parse_args(args(&["scene.toml", "--out", "m.toml", "--seed", "9"])).unwrap();
        assert_eq!(
            command,
            Command::Run(Options {
                scene: PathBuf::from("scene.toml"),
                out: Some(PathBuf::from("m.toml")),
                seed: Some(9),
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["a.toml", "b.toml"])).is_err());
        assert!(parse_args(args(&["a.toml", "--seed", "x"])).is_err());
        assert!(parse_args(args(&["a.toml", "--out"])).is_err());
        assert!(parse_args(args(&["a.toml", "--verbose"])).is_err());
        assert_eq!(parse_args(args(&["--help"])), Ok(Command::Help));
    }

    #[test]
    fn test_run_writes_report() {
        let dir = std::env::temp_dir().join(format!("parallax-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let scene = dir.join("scene.toml");
        let out = dir.join("markers.toml");
        std::fs::write(&scene, "seed = 5\n[placement]\ntarget_count = 8\n").unwrap();

        let report = run(&Options {
            scene: scene.clone(),
            out: Some(out.clone()),
            seed: None,
        })
        .unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        let parsed: PlacementReport = toml::from_str(&written).unwrap();
        assert_eq!(parsed.markers.len(), report.markers.len());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_missing_scene_fails() {
        let result = run(&Options {
            scene: PathBuf::from("/nonexistent/parallax/scene.toml"),
            out: None,
            seed: None,
        });
        assert!(matches!(result, Err(ScatterError::Io { .. })));
    }
}
