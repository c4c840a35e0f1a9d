//! Testing utilities for wavesum

use {
    anstyle::AnsiColor,
    clap::Parser,
    std::{
        error::Error,
        io::{self},
        path::PathBuf,
    },
    wavesum::{
        Event, EventKind, Harmonic, HarmonicIdx, HarmonicSet, Pipeline, Sample, SynthConfig,
        Viewport, axes, recompute, sample, sum,
    },
};

// Sample tables are dumped by casting the in-memory samples
#[cfg(target_endian = "big")]
const _: () = panic!("Sample dumps are little endian, big endian hosts are not supported.");

#[derive(clap::Parser)]
enum Args {
    /// Write the reference sample table to a file
    DumpSamples { out_path: PathBuf },
    /// Compare the reference sample table against a known good dump
    CompareSamples,
    /// Check that synthesis is deterministic
    CheckPaths,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if let Err(e) = std::fs::create_dir_all(basedir()) {
        eprintln!("Error: Failed to create test dir: {e}");
    }
    match args {
        Args::DumpSamples { out_path } => dump_samples_file(out_path)?,
        Args::CompareSamples => cmp_samples()?,
        Args::CheckPaths => check_paths()?,
    }
    Ok(())
}

/// A square-ish wave with a few phase shifted overtones mixed in
fn reference_set() -> Result<HarmonicSet, Box<dyn Error>> {
    let descriptors = [
        (1.0, 1.0, 0.0),
        (1.0 / 3.0, 3.0, 0.0),
        (0.2, 5.0, 0.0),
        (0.5, 2.0, 1.25),
        (0.125, 7.5, -0.5),
    ];
    let set = HarmonicSet::from_descriptors(
        (1..).zip(descriptors).map(|(i, (amplitude, frequency, phase))| {
            (
                HarmonicIdx(i),
                Harmonic {
                    amplitude,
                    frequency,
                    phase,
                },
            )
        }),
        HarmonicIdx::FIRST,
    )?;
    Ok(set)
}

/// Every harmonic's samples followed by the sum, as raw little endian `f64` pairs
fn dump_samples_buf() -> Result<Vec<u8>, Box<dyn Error>> {
    let cfg = SynthConfig::default();
    let set = reference_set()?;
    let mut out = Vec::new();
    for (_, harmonic) in set.iter() {
        out.extend_from_slice(bytemuck::cast_slice::<Sample, u8>(&sample(
            harmonic, &cfg.grid,
        )));
    }
    out.extend_from_slice(bytemuck::cast_slice::<Sample, u8>(&sum(&set, &cfg.grid)));
    Ok(out)
}

fn dump_samples_file(out_path: PathBuf) -> Result<(), Box<dyn Error>> {
    std::fs::write(out_path, dump_samples_buf()?)?;
    Ok(())
}

fn basedir() -> PathBuf {
    std::env::temp_dir().join("wavesum-test")
}

fn cmp_samples() -> Result<(), Box<dyn Error>> {
    let path = basedir().join("clean-samples.bin");
    if !path.exists() {
        return Err(format!("Need clean file at '{}'", path.display()).into());
    }
    let clean = std::fs::read(path)?;
    let dirty = dump_samples_buf()?;
    if clean.len() != dirty.len() {
        fail(&format!(
            "Sample table size mismatch ({} vs {} bytes)",
            clean.len(),
            dirty.len()
        ));
        return Ok(());
    }
    let clean: Vec<Sample> = bytemuck::pod_collect_to_vec(&clean);
    let dirty: Vec<Sample> = bytemuck::pod_collect_to_vec(&dirty);
    match clean
        .iter()
        .zip(&dirty)
        .position(|(a, b)| a.x.to_bits() != b.x.to_bits() || a.y.to_bits() != b.y.to_bits())
    {
        None => pass("Sample tables match"),
        Some(i) => fail(&format!(
            "Sample table mismatch at {i}: {:?} vs {:?}",
            clean[i], dirty[i]
        )),
    }
    Ok(())
}

fn check_paths() -> io::Result<()> {
    let Ok(set) = reference_set() else {
        return Err(io::Error::other("Reference set is invalid"));
    };
    let cfg = SynthConfig::default();
    let size = Viewport::with_aspect(960.0, 0.5);
    let mut pipeline = Pipeline::new(cfg, size);
    let Some(before) = pipeline
        .submit(Event {
            seq: 1,
            kind: EventKind::Harmonics(set.clone()),
        })
        .map_err(io::Error::other)?
        .cloned()
    else {
        return Err(io::Error::other("No frame after harmonic update"));
    };
    let (_, _, scales) = pipeline.snapshot();
    let pure = recompute(&set, scales, &axes(&cfg.grid, cfg.amplitude_domain), &cfg.grid);
    check(
        "Pipeline frame equals pure recompute",
        before.waves == pure.waves && before.sum == pure.sum && before.axes == pure.axes,
    );
    let again = recompute(&set, scales, &axes(&cfg.grid, cfg.amplitude_domain), &cfg.grid);
    check("Recompute is idempotent", again == pure);

    let scales_before = *pipeline.scales();
    pipeline
        .submit(Event {
            seq: 2,
            kind: EventKind::Resize(Viewport::with_aspect(333.0, 0.75)),
        })
        .map_err(io::Error::other)?;
    pipeline
        .submit(Event {
            seq: 3,
            kind: EventKind::Resize(size),
        })
        .map_err(io::Error::other)?;
    let (_, snap_size, scales_after) = pipeline.snapshot();
    check(
        "Resize round trip reproduces scales",
        snap_size == size && *scales_after == scales_before,
    );
    let after = pipeline.frame().map(|f| (f.sum.clone(), f.waves.clone()));
    check(
        "Resize round trip reproduces paths",
        after == Some((before.sum, before.waves)),
    );
    Ok(())
}

fn check(what: &str, ok: bool) {
    if ok {
        pass(what);
    } else {
        fail(what);
    }
}

fn pass(msg: &str) {
    let style = anstyle::Style::new()
        .fg_color(Some(anstyle::Color::Ansi(AnsiColor::Green)))
        .bold();
    eprintln!("{style}[PASS]{style:#} {msg}");
}

fn fail(msg: &str) {
    let style = anstyle::Style::new()
        .fg_color(Some(anstyle::Color::Ansi(AnsiColor::Red)))
        .bold();
    eprintln!("{style}[FAIL]{style:#} {msg}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_is_little_endian_pairs() {
        let grid = SynthConfig::default().grid;
        let set = reference_set().unwrap();
        let buf = dump_samples_buf().unwrap();
        assert_eq!(buf.len(), (set.len() + 1) * grid.resolution() * 16);
        let first = sample(set.get(HarmonicIdx::FIRST).unwrap(), &grid)[1];
        assert_eq!(buf[16..24], first.x.to_le_bytes());
        assert_eq!(buf[24..32], first.y.to_le_bytes());
    }
}
