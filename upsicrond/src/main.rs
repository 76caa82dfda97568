//! # UpsicronOS Host Daemon
//!
//! Main entry point for the UpsicronOS host runtime.

use shell_core::ShellConfig;
use std::env;
use std::fs;
use std::io::{self, BufRead, Read};
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::thread;
use tracing_subscriber::EnvFilter;
use upsicrond::{
    HostMode, HostRuntime, HostRuntimeConfig, JsonFileStore, OutputFormat, TerminalSurface,
};

const DEFAULT_STATE_FILE: &str = "upsicron_state.json";

struct CliOptions {
    runtime: HostRuntimeConfig,
    state_file: PathBuf,
    format: OutputFormat,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("upsicrond");

    init_logging();

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    let store = JsonFileStore::open(&options.state_file);
    let surface = TerminalSurface::new(io::stdout(), options.format);
    let mode = options.runtime.mode;

    let mut runtime = HostRuntime::new(options.runtime, store, surface).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    let result = match mode {
        HostMode::Scripted => runtime.run(),
        HostMode::Interactive => runtime.run_interactive(spawn_stdin_reader()),
    };

    if let Err(e) = result {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr; stdout carries the frames
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Forwards stdin lines to the runtime until EOF
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn read_source(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))
}

fn arg_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        runtime: HostRuntimeConfig::default(),
        state_file: PathBuf::from(DEFAULT_STATE_FILE),
        format: OutputFormat::Text,
    };
    let mut realtime = false;
    let mut i = 1;

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--script" | "-s" => {
                i += 1;
                options.runtime.script = Some(read_source(arg_value(args, i, flag)?)?);
            }
            "--max-steps" => {
                i += 1;
                let raw = arg_value(args, i, flag)?;
                options.runtime.max_steps = raw
                    .parse()
                    .map_err(|_| format!("Invalid max-steps value: {}", raw))?;
            }
            "--height" => {
                i += 1;
                let raw = arg_value(args, i, flag)?;
                options.runtime.viewport_height = raw
                    .parse()
                    .map_err(|_| format!("Invalid height value: {}", raw))?;
            }
            "--state-file" => {
                i += 1;
                options.state_file = PathBuf::from(arg_value(args, i, flag)?);
            }
            "--seed" => {
                i += 1;
                options.runtime.seed = Some(read_source(arg_value(args, i, flag)?)?);
            }
            "--config" | "-c" => {
                i += 1;
                let text = read_source(arg_value(args, i, flag)?)?;
                options.runtime.shell = ShellConfig::from_json(&text).map_err(|e| e.to_string())?;
            }
            "--format" => {
                i += 1;
                let raw = arg_value(args, i, flag)?;
                options.format = OutputFormat::parse(raw)
                    .ok_or_else(|| format!("Invalid format: {}", raw))?;
            }
            "--realtime" => {
                realtime = true;
            }
            "--help" | "-h" => {
                print_usage(args.first().map(String::as_str).unwrap_or("upsicrond"));
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    if options.runtime.script.is_some() {
        options.runtime.mode = HostMode::Scripted;
        options.runtime.realtime = realtime;
    } else {
        options.runtime.mode = HostMode::Interactive;
        options.runtime.realtime = true;
    }

    Ok(options)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --script <FILE|->    Input script (without one, stdin is read live)");
    eprintln!("  --max-steps <N>          Maximum steps to run (0 = unlimited)");
    eprintln!("  --height <PX>            Viewport height in pixels (default 600)");
    eprintln!("  --state-file <FILE>      Session store (default {})", DEFAULT_STATE_FILE);
    eprintln!("  --seed <FILE>            Seed JSON for the file tree");
    eprintln!("  -c, --config <FILE>      Shell configuration JSON");
    eprintln!("  --format <text|json>     Frame output format (default text)");
    eprintln!("  --realtime               Tick at the configured rate in scripted mode");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --script demos/calculator.keys --max-steps 200", program);
    eprintln!("  RUST_LOG=shell=debug {} --height 480", program);
}
