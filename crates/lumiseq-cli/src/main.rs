use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use lumiseq_core::{
    encode, parse_sequence, read_text, LinkConfig, LinkError, ParseError, SerialLink,
};

/// Exit status for an unreadable sequence file.
const EXIT_BAD_SOURCE: u8 = 2;
/// Exit status for a sequence that fails to compile.
const EXIT_BAD_SEQUENCE: u8 = 3;
/// Exit status for a serial port that cannot be opened.
const EXIT_PORT_UNAVAILABLE: u8 = 4;

const AUTORESET_NOTE: &str = "Some controllers reset every time the port opens. If yours does, \
disable the hangup-on-close line discipline first: stty -F /dev/ttyACM<x> -hupcl";

/// Compiles a light-sequence file and sends it to the controller
/// attached to a serial port.
#[derive(Debug, Parser)]
#[command(name = "lumiseq", version, about, after_help = AUTORESET_NOTE)]
struct Args {
    /// Sequence file to compile
    filename: PathBuf,

    /// Serial port the controller is attached to (e.g. /dev/ttyACM0)
    #[arg(required_unless_present = "dry_run")]
    port: Option<String>,

    /// Compile only: print the frame as hex instead of sending it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            if matches!(err.downcast_ref::<LinkError>(), Some(LinkError::Open { .. })) {
                hint_available_ports();
            }
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let text = read_text(&args.filename)
        .with_context(|| format!("cannot read {}", args.filename.display()))?;
    let steps = parse_sequence(&text)?;
    let frame = encode(&steps);
    info!(
        "compiled {} steps into a {}-byte frame",
        steps.len(),
        frame.len()
    );
    debug!("frame: {}", hex::encode(&frame));

    if args.dry_run {
        println!("{}", format_frame(&frame));
        return Ok(());
    }

    let port_name = args.port.as_deref().context("no serial port given")?;
    let mut link = SerialLink::open(&LinkConfig::new(port_name))?;
    link.send(&frame)?;
    info!("sequence uploaded to {port_name}");
    Ok(())
}

/// Maps a failure to the exit status contract: 2 = unreadable input,
/// 3 = compile error, 4 = port unavailable, 1 = anything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<ParseError>().is_some() {
        return EXIT_BAD_SEQUENCE;
    }
    match err.downcast_ref::<LinkError>() {
        Some(LinkError::Open { .. }) => return EXIT_PORT_UNAVAILABLE,
        Some(LinkError::Write(_)) => return 1,
        None => {}
    }
    if err.downcast_ref::<io::Error>().is_some() {
        return EXIT_BAD_SOURCE;
    }
    1
}

fn hint_available_ports() {
    let ports = SerialLink::list_ports();
    if ports.is_empty() {
        eprintln!("no serial ports detected");
        return;
    }
    eprintln!("available ports:");
    for port in ports {
        eprintln!("  {} ({})", port.port_name, port.port_type);
    }
}

/// Renders a frame the way it travels: one spaced hex pair per byte.
fn format_frame(frame: &[u8]) -> String {
    let mut out = String::with_capacity(frame.len() * 3);
    for byte in frame {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("{byte:02X}"));
    }
    out
}
