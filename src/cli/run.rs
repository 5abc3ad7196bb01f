//! Batch runner: resolve input/output pairs and process them in parallel.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, bail};
use rayon::prelude::*;

use crate::cli::Commands;
use crate::config::LogoConfig;
use crate::image::{Change, Operation, process_file};
use crate::logger::ProgressLine;
use crate::{debug, log};

/// One file to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Run `command` over every input it names.
///
/// Files are independent: a failure is logged and the rest still run.
/// Returns an error if any file failed.
pub fn run(command: &Commands, config: &LogoConfig) -> Result<()> {
    let op = config.operation(command);
    let jobs = resolve_jobs(command, config)?;
    debug!(op.name(); "{:?}", op);

    let failed = AtomicUsize::new(0);
    let progress = (jobs.len() > 1).then(|| ProgressLine::new(op.name(), jobs.len()));

    jobs.par_iter().for_each(|job| {
        if !run_job(job, &op, config) {
            failed.fetch_add(1, Ordering::Relaxed);
        }
        if let Some(p) = &progress {
            p.inc();
        }
    });

    if let Some(p) = progress {
        p.finish();
    }

    let failed = failed.into_inner();
    if failed > 0 {
        bail!("{} of {} failed", failed, plural_count(jobs.len(), "file"));
    }
    log!("done"; "{} processed", plural_count(jobs.len(), "file"));
    Ok(())
}

/// Process one job, logging the outcome. Returns `false` on failure.
fn run_job(job: &Job, op: &Operation, config: &LogoConfig) -> bool {
    let input = config.root_relative(&job.input);
    let output = config.root_relative(&job.output);

    match process_file(&job.input, &job.output, op) {
        Ok(change) => {
            log!(op.name(); "{} -> {} ({})", input.display(), output.display(), describe(&change));
            true
        }
        Err(err) => {
            log!("error"; "{:#}", anyhow::Error::from(err));
            false
        }
    }
}

/// Human-readable summary of a change.
fn describe(change: &Change) -> String {
    match change {
        Change::Recolored(pixels) => format!("{} changed", plural_count(*pixels, "pixel")),
        Change::Cropped { from, to } => format!(
            "{}x{} -> {}x{} at ({}, {})",
            from.0, from.1, to.width, to.height, to.x, to.y
        ),
        Change::Uncropped => "no border to trim".to_string(),
    }
}

/// Pair every input with its output path.
///
/// - no inputs: `[paths] input` from the config
/// - `--output`: only with a single input
/// - otherwise `dark` writes `<stem><suffix>.png` next to the input and
///   the other commands rewrite the input as PNG in place
/// - two inputs sharing an output, or an output that is another input,
///   are refused before anything runs
pub fn resolve_jobs(command: &Commands, config: &LogoConfig) -> Result<Vec<Job>> {
    let io = command.io();

    let inputs = if io.inputs.is_empty() {
        vec![config.default_input()]
    } else {
        io.inputs.clone()
    };

    if let Some(output) = &io.output {
        if inputs.len() > 1 {
            bail!("--output accepts a single input, got {}", inputs.len());
        }
        return Ok(vec![Job {
            input: inputs[0].clone(),
            output: output.clone(),
        }]);
    }

    let jobs: Vec<Job> = inputs
        .into_iter()
        .map(|input| {
            let output = if command.is_dark() {
                config.paths.dark_output(&input)
            } else {
                in_place_output(&input)
            };
            Job { input, output }
        })
        .collect();

    let mut seen = HashSet::with_capacity(jobs.len());
    for job in &jobs {
        if !seen.insert(job.output.as_path()) {
            bail!(
                "more than one input would be written to `{}`",
                job.output.display()
            );
        }
    }

    // Jobs run concurrently, so no job may overwrite a file another job
    // still has to read.
    let inputs: HashSet<&Path> = jobs.iter().map(|job| job.input.as_path()).collect();
    for job in &jobs {
        if job.output != job.input && inputs.contains(job.output.as_path()) {
            bail!(
                "`{}` is both an input and the output of another input",
                job.output.display()
            );
        }
    }

    Ok(jobs)
}

/// Output is always PNG; a `.png` input is overwritten as-is.
fn in_place_output(input: &Path) -> PathBuf {
    let is_png = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        input.to_path_buf()
    } else {
        input.with_extension("png")
    }
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(0, "file")` -> `"0 files"`
/// - `plural_count(1, "file")` -> `"1 file"`
#[inline]
fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
