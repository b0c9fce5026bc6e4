use crate::core::io::traits::{PendingWrite, StructureLoader, StructureWriter};
use crate::core::models::error::LookupError;
use crate::engine::error::GraftError;
use crate::engine::plan::Plan;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::resolver::{OutputTarget, PlanResolver};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraftOptions {
    /// Resolve and execute the plan but write nothing.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraftReport {
    pub structures_loaded: usize,
    pub operations_applied: usize,
    /// Destinations written, in plan order. Empty on a dry run.
    pub outputs_written: Vec<String>,
}

/// Runs a plan end to end: load, resolve, execute every operation, write outputs.
///
/// Writing only starts after all operations succeeded, so a plan that fails to
/// resolve or execute produces no output at all. Every output is staged first
/// and only moved into place once all of them were written, so a writer
/// failure leaves no output either.
///
/// # Arguments
///
/// * `plan` - The parsed plan.
/// * `resolver` - Kind table used to build operations.
/// * `loader` - Source of the declared structures.
/// * `writer` - Sink for the declared outputs.
/// * `options` - Run options.
/// * `reporter` - Receives phase and task progress.
///
/// # Errors
///
/// Returns the first [`GraftError`] raised by any phase.
#[instrument(skip_all, name = "graft_workflow")]
pub fn run<L, W>(
    plan: &Plan,
    resolver: &PlanResolver,
    loader: &L,
    writer: &W,
    options: &GraftOptions,
    reporter: &ProgressReporter,
) -> Result<GraftReport, GraftError>
where
    L: StructureLoader,
    W: StructureWriter,
{
    // === Phase 1: Resolution ===
    reporter.report(Progress::PhaseStart { name: "Resolving" });
    let mut resolved = resolver.resolve(plan, loader)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Execution ===
    reporter.report(Progress::PhaseStart { name: "Grafting" });
    let operations_applied = resolved
        .registry
        .execute_all(&mut resolved.pool, reporter)?;
    reporter.report(Progress::PhaseFinish);
    info!("Applied {} operation(s).", operations_applied);

    let mut report = GraftReport {
        structures_loaded: resolved.pool.len(),
        operations_applied,
        outputs_written: Vec::new(),
    };

    if options.dry_run {
        warn!("Dry run: skipping {} output(s).", resolved.outputs.len());
        reporter.report(Progress::Message(format!(
            "Dry run complete, {} output(s) not written.",
            resolved.outputs.len()
        )));
        return Ok(report);
    }

    // === Phase 3: Output ===
    reporter.report(Progress::PhaseStart { name: "Writing" });
    reporter.report(Progress::TaskStart {
        total_steps: resolved.outputs.len() as u64,
    });
    let mut staged = Vec::with_capacity(resolved.outputs.len());
    for output in &resolved.outputs {
        let Some(structure) = resolved.pool.get(output.structure) else {
            return Err(LookupError::StructureNotFound {
                name: output.name.clone(),
            }
            .into());
        };
        let pending = writer
            .stage(structure, &output.destination)
            .map_err(|e| write_error(output, e))?;
        staged.push((output, pending));
        reporter.report(Progress::TaskIncrement {
            label: output.name.clone(),
        });
    }
    for (output, pending) in staged {
        pending.commit().map_err(|e| write_error(output, e))?;
        info!("Wrote '{}' to {}.", output.name, output.destination);
        report.outputs_written.push(output.destination.clone());
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    Ok(report)
}

fn write_error<E>(output: &OutputTarget, error: E) -> GraftError
where
    E: std::error::Error + Send + Sync + 'static,
{
    GraftError::Write {
        name: output.name.clone(),
        destination: output.destination.clone(),
        source: Box::new(error),
    }
}
