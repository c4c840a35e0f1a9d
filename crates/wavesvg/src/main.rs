//! Command line harmonics plotter
#![forbid(unsafe_code)]

use {
    clap::Parser,
    std::{
        error::Error,
        io::{BufWriter, IsTerminal, Write},
        path::PathBuf,
    },
    wavesum::{
        Event, EventKind, Frame, HarmonicIdx, HarmonicSet, Inbox, Margin, Pipeline, SynthConfig,
        Viewport,
        config::{DEFAULT_AMPLITUDE_DOMAIN, DEFAULT_MARGIN, DEFAULT_RESOLUTION},
    },
};

/// Stroke colors by harmonic index. Index 0 is used for the axes.
const PALETTE: &[&str] = &[
    "#9e9e9e", "#89b4fa", "#a6e3a1", "#f9e2af", "#f38ba8", "#cba6f7", "#94e2d5", "#fab387",
    "#b4befe",
];
const SUM_COLOR: &str = "#ff7d47";

#[derive(clap::Parser)]
struct Args {
    /// Amplitudes of the harmonics, starting at the fundamental.
    /// Harmonic n gets frequency n.
    #[arg(required = true, allow_negative_numbers = true)]
    amplitudes: Vec<f64>,
    /// Initial viewport width in pixels
    #[arg(short = 'w', long, default_value = "800")]
    width: f64,
    /// Viewport height as a fraction of its width
    #[arg(long, default_value = "0.5")]
    aspect: f64,
    /// Resize the viewport to WIDTHxHEIGHT before drawing. Can be given multiple times.
    #[arg(long, value_parser = parse_size)]
    resize: Vec<Viewport>,
    /// Samples per waveform
    #[arg(short = 'r', long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: usize,
    /// Margin around each plot in pixels
    #[arg(short = 'm', long, default_value_t = DEFAULT_MARGIN)]
    margin: f64,
    /// The y axis covers [-A, A]
    #[arg(short = 'a', long, default_value_t = DEFAULT_AMPLITUDE_DOMAIN.1)]
    amplitude_range: f64,
    /// Write the SVG here instead of stdout
    #[arg(short = 'o', long)]
    out: Option<PathBuf>,
    /// Don't print pass information to stderr
    #[arg(long)]
    quiet: bool,
}

fn parse_size(arg: &str) -> Result<Viewport, String> {
    let (w, h) = arg
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{arg}'"))?;
    let num = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad size '{s}': {e}"))
    };
    Ok(Viewport {
        width: num(w)?,
        height: num(h)?,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let cfg = SynthConfig::new(
        (0.0, std::f64::consts::TAU),
        args.resolution,
        (-args.amplitude_range, args.amplitude_range),
        Margin::uniform(args.margin),
    )?;
    let initial = Viewport::with_aspect(args.width, args.aspect);
    let mut pipeline = Pipeline::new(cfg, initial);
    let set = HarmonicSet::from_amplitudes(&args.amplitudes, pipeline.config().first_index)?;
    pipeline.post(Event {
        seq: 1,
        kind: EventKind::Harmonics(set),
    })?;
    let mut size = initial;
    for (seq, &resize) in (1..).zip(&args.resize) {
        pipeline.post(Event {
            seq,
            kind: EventKind::Resize(resize),
        })?;
        size = resize;
    }
    let quiet = args.quiet;
    let mut passes = 0;
    let mut sink = |frame: &Frame, _: &mut Inbox| {
        passes += 1;
        if !quiet {
            eprintln!(
                "Pass {passes}: {:?}, {} harmonics",
                frame.changed,
                frame.waves.len()
            );
        }
    };
    let Some(frame) = pipeline.process_with(&mut sink) else {
        return Err("Pipeline produced no frame".into());
    };
    match &args.out {
        Some(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| format!("Failed to create '{}': {e}", path.display()))?;
            write_svg(&mut BufWriter::new(file), frame, size)?;
        }
        None => {
            let stdout = std::io::stdout().lock();
            if stdout.is_terminal() && !args.quiet {
                eprintln!("Writing SVG to the terminal. Use -o to write to a file.");
            }
            write_svg(&mut BufWriter::new(stdout), frame, size)?;
        }
    }
    Ok(())
}

fn color(idx: HarmonicIdx) -> &'static str {
    PALETTE[idx.usize() % PALETTE.len()]
}

/// Two panels stacked on top of each other: the harmonics, and their sum
fn write_svg(out: &mut impl Write, frame: &Frame, size: Viewport) -> std::io::Result<()> {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h2}" viewBox="0 0 {w} {h2}">"#,
        w = size.width,
        h2 = size.height * 2.0,
    )?;
    writeln!(out, r#"<g id="harmonics">"#)?;
    for wave in &frame.waves {
        path(out, wave.path.as_str(), color(wave.index), 2)?;
    }
    axes(out, frame)?;
    writeln!(out, "</g>")?;
    writeln!(
        out,
        r#"<g id="sum" transform="translate(0,{})">"#,
        size.height
    )?;
    path(out, frame.sum.as_str(), SUM_COLOR, 2)?;
    axes(out, frame)?;
    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")?;
    out.flush()
}

fn axes(out: &mut impl Write, frame: &Frame) -> std::io::Result<()> {
    for axis in &frame.axes {
        path(out, axis.path.as_str(), color(HarmonicIdx(0)), 1)?;
    }
    Ok(())
}

fn path(out: &mut impl Write, d: &str, stroke: &str, width: u8) -> std::io::Result<()> {
    if d.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        r#"<path d="{d}" fill="none" stroke="{stroke}" stroke-width="{width}px"/>"#
    )
}
