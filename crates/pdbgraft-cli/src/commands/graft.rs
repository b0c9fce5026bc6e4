use crate::cli::Cli;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pdbgraft::{
    core::io::store::PdbStore,
    engine::{progress::ProgressReporter, resolver::PlanResolver},
    workflows::graft::{self, GraftOptions, GraftReport},
};
use tracing::{info, warn};

pub fn run(args: &Cli) -> Result<GraftReport> {
    execute(args, CliProgressHandler::new())
}

fn execute(args: &Cli, progress_handler: CliProgressHandler) -> Result<GraftReport> {
    let plan = config::load_plan(&args.plan)?;
    if plan.operations.is_empty() {
        warn!("Plan {:?} declares no operations.", &args.plan);
    }

    let store = PdbStore::new();
    let resolver = PlanResolver::new();
    let options = GraftOptions {
        dry_run: args.dry_run,
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the graft workflow...");
    let report = graft::run(&plan, &resolver, &store, &store, &options, &reporter)?;

    info!(
        "Workflow finished: {} structure(s) loaded, {} operation(s) applied.",
        report.structures_loaded, report.operations_applied
    );
    if options.dry_run {
        println!(
            "Dry run: applied {} operation(s), no files written.",
            report.operations_applied
        );
    } else {
        for destination in &report.outputs_written {
            println!("✓ Written: {}", destination);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use pdbgraft::engine::error::{ConfigError, GraftError};
    use std::fs;
    use std::path::{Path, PathBuf};

    const A_PDB: &str = "\
ATOM      1  CA  GLY X   5       1.000   2.000   3.000  1.00  0.00           C
ATOM      2  CA  ALA X   6       4.800   2.000   3.000  1.00  0.00           C
END
";

    const B_PDB: &str = "\
ATOM      1  N   TRP Y  10      10.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  TRP Y  10      11.500   0.000   0.000  1.00  0.00           C
END
";

    fn args(plan: PathBuf, dry_run: bool) -> Cli {
        Cli {
            plan,
            dry_run,
            verbose: 0,
            quiet: true,
            log_file: None,
        }
    }

    fn write_plan(dir: &Path, source_structure: &str) -> PathBuf {
        fs::write(dir.join("a.pdb"), A_PDB).unwrap();
        fs::write(dir.join("b.pdb"), B_PDB).unwrap();
        let plan = format!(
            r#"
            [[structures]]
            name = "A"
            file = {a:?}

            [[structures]]
            name = "B"
            file = {b:?}

            [[operations]]
            kind = "residueGrafter"
            target = {{ structure = "A", model = 0, chain = "X", residue = 5 }}
            source = {{ structure = "{source_structure}", model = 0, chain = "Y", residue = 10 }}

            [[outputs]]
            name = "A"
            file = {out:?}
            "#,
            a = dir.join("a.pdb").to_str().unwrap(),
            b = dir.join("b.pdb").to_str().unwrap(),
            out = dir.join("out.pdb").to_str().unwrap(),
        );
        let path = dir.join("plan.toml");
        fs::write(&path, plan).unwrap();
        path
    }

    #[test]
    fn plan_file_drives_a_complete_run() {
        let dir = tempfile::tempdir().unwrap();
        let plan = write_plan(dir.path(), "B");

        let report = execute(&args(plan, false), CliProgressHandler::hidden()).unwrap();

        assert_eq!(report.operations_applied, 1);
        let written = fs::read_to_string(dir.path().join("out.pdb")).unwrap();
        assert!(written.contains("TRP X   5"));
        assert!(written.contains("ALA X   6"));
        assert_eq!(fs::read_to_string(dir.path().join("b.pdb")).unwrap(), B_PDB);
    }

    #[test]
    fn dry_run_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let plan = write_plan(dir.path(), "B");

        let report = execute(&args(plan, true), CliProgressHandler::hidden()).unwrap();

        assert_eq!(report.operations_applied, 1);
        assert!(!dir.path().join("out.pdb").exists());
    }

    #[test]
    fn unknown_structure_reference_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let plan = write_plan(dir.path(), "C");

        let err = execute(&args(plan, false), CliProgressHandler::hidden()).unwrap_err();

        assert!(matches!(
            err,
            CliError::Graft(GraftError::Config(ConfigError::UnknownStructure { .. }))
        ));
        assert!(!dir.path().join("out.pdb").exists());
    }
}
