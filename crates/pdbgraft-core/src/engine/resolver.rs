use super::error::{ConfigError, GraftError, NameKind};
use super::operation::{Operation, ResidueGrafter, ResidueLocation};
use super::plan::{LocationEntry, OperationEntry, Plan};
use super::pool::{StructureHandle, StructurePool};
use super::registry::OperationRegistry;
use crate::core::io::traits::StructureLoader;
use crate::core::models::error::LookupError;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use tracing::{debug, info};

/// Builds an executable operation from a plan entry of one kind.
pub trait OperationFactory {
    /// # Errors
    ///
    /// Returns [`GraftError`] if the entry references an unknown structure or
    /// carries a malformed coordinate.
    fn build(
        &self,
        entry: &OperationEntry,
        pool: &StructurePool,
    ) -> Result<Box<dyn Operation>, GraftError>;
}

/// Factory for the `residue-grafter` kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResidueGrafterFactory;

impl OperationFactory for ResidueGrafterFactory {
    fn build(
        &self,
        entry: &OperationEntry,
        pool: &StructurePool,
    ) -> Result<Box<dyn Operation>, GraftError> {
        let name = entry.synthesized_name();
        let target = resolve_location(&entry.target, &name, pool)?;
        let source = resolve_location(&entry.source, &name, pool)?;
        Ok(Box::new(ResidueGrafter::new(target, source)))
    }
}

/// Destination of one output, bound to a pooled structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub name: String,
    pub structure: StructureHandle,
    pub destination: String,
}

/// Everything a run needs after resolution: loaded structures, ordered
/// operations, and where to write the results.
#[derive(Debug)]
pub struct ResolvedPlan {
    pub pool: StructurePool,
    pub registry: OperationRegistry,
    pub outputs: Vec<OutputTarget>,
}

/// Turns a [`Plan`] into a [`ResolvedPlan`].
///
/// Operation kinds are dispatched through an open table; [`PlanResolver::default`]
/// knows `residue-grafter` and its camel-case alias `residueGrafter`.
pub struct PlanResolver {
    factories: HashMap<String, Box<dyn OperationFactory>>,
}

impl Default for PlanResolver {
    fn default() -> Self {
        let mut resolver = Self::empty();
        resolver.register_kind(ResidueGrafter::KIND, Box::new(ResidueGrafterFactory));
        resolver.register_kind("residueGrafter", Box::new(ResidueGrafterFactory));
        resolver
    }
}

impl PlanResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver that knows no operation kinds.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Associates `kind` with a factory, returning the factory it replaces.
    pub fn register_kind(
        &mut self,
        kind: &str,
        factory: Box<dyn OperationFactory>,
    ) -> Option<Box<dyn OperationFactory>> {
        self.factories.insert(kind.to_string(), factory)
    }

    pub fn knows_kind(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Loads every declared structure, builds and registers every operation,
    /// and binds every output to its structure, in that order.
    ///
    /// # Errors
    ///
    /// Fails at the first problem found; nothing is executed or written here.
    pub fn resolve<L: StructureLoader>(
        &self,
        plan: &Plan,
        loader: &L,
    ) -> Result<ResolvedPlan, GraftError> {
        let pool = self.load_structures(plan, loader)?;
        let registry = self.build_operations(plan, &pool)?;
        let outputs = bind_outputs(plan, &pool)?;

        info!(
            "Resolved plan: {} structure(s), {} operation(s), {} output(s).",
            pool.len(),
            registry.len(),
            outputs.len()
        );

        Ok(ResolvedPlan {
            pool,
            registry,
            outputs,
        })
    }

    fn load_structures<L: StructureLoader>(
        &self,
        plan: &Plan,
        loader: &L,
    ) -> Result<StructurePool, GraftError> {
        let mut pool = StructurePool::new();
        for entry in &plan.structures {
            require("structures.name", &entry.name)?;
            require("structures.file", &entry.file)?;
            if pool.handle(&entry.name).is_some() {
                return Err(GraftError::DuplicateName {
                    kind: NameKind::Structure,
                    name: entry.name.clone(),
                });
            }

            let structure = loader
                .load(&entry.name, &entry.file)
                .map_err(|e| GraftError::Load {
                    name: entry.name.clone(),
                    location: entry.file.clone(),
                    source: Box::new(e),
                })?;
            info!(
                "Loaded structure '{}' from {} ({} residues, {} atoms).",
                entry.name,
                entry.file,
                structure.residue_count(),
                structure.atom_count()
            );
            pool.insert(&entry.name, structure)?;
        }
        Ok(pool)
    }

    fn build_operations(
        &self,
        plan: &Plan,
        pool: &StructurePool,
    ) -> Result<OperationRegistry, GraftError> {
        let mut registry = OperationRegistry::new();
        for entry in &plan.operations {
            let factory = self
                .factories
                .get(&entry.kind)
                .ok_or_else(|| ConfigError::UnknownOperationKind(entry.kind.clone()))?;
            let operation = factory.build(entry, pool)?;
            let name = entry.synthesized_name();
            debug!("Registering operation '{}' of kind '{}'.", name, entry.kind);
            registry.register(name, operation)?;
        }
        Ok(registry)
    }
}

fn bind_outputs(plan: &Plan, pool: &StructurePool) -> Result<Vec<OutputTarget>, GraftError> {
    let mut seen = HashSet::new();
    let mut outputs = Vec::with_capacity(plan.outputs.len());
    for entry in &plan.outputs {
        require("outputs.name", &entry.name)?;
        require("outputs.file", &entry.file)?;
        if !seen.insert(entry.name.as_str()) {
            return Err(GraftError::DuplicateName {
                kind: NameKind::Output,
                name: entry.name.clone(),
            });
        }
        let structure = pool
            .handle(&entry.name)
            .ok_or_else(|| LookupError::StructureNotFound {
                name: entry.name.clone(),
            })?;
        outputs.push(OutputTarget {
            name: entry.name.clone(),
            structure,
            destination: entry.file.clone(),
        });
    }
    Ok(outputs)
}

/// Resolves one raw plan coordinate against the pool.
///
/// `operation` is only used to name the offender in errors.
///
/// # Errors
///
/// * [`ConfigError::UnknownStructure`] if the structure was never declared.
/// * [`GraftError::Parse`] if the model is not a non-negative integer or the
///   residue is not an integer.
pub fn resolve_location(
    entry: &LocationEntry,
    operation: &str,
    pool: &StructurePool,
) -> Result<ResidueLocation, GraftError> {
    let structure = pool
        .handle(&entry.structure)
        .ok_or_else(|| ConfigError::UnknownStructure {
            operation: operation.to_string(),
            structure: entry.structure.clone(),
        })?;

    Ok(ResidueLocation {
        structure,
        structure_name: entry.structure.clone(),
        model: parse_number("model", &entry.model)?,
        chain: entry.chain.clone(),
        residue: parse_number("residue", &entry.residue)?,
    })
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, GraftError> {
    value.trim().parse().map_err(|_| GraftError::Parse {
        field,
        value: value.to_string(),
    })
}

fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingValue(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::builder::StructureBuilder;
    use crate::core::models::ids::ResidueKey;
    use crate::core::models::structure::Structure;
    use crate::engine::plan::{OutputEntry, StructureEntry};
    use nalgebra::Point3;
    use std::cell::RefCell;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("nothing stored at '{0}'")]
    struct NotStored(String);

    /// Serves structures keyed by location and records every load.
    #[derive(Default)]
    struct MemoryLoader {
        files: HashMap<String, (&'static str, &'static str)>,
        loads: RefCell<Vec<String>>,
    }

    impl MemoryLoader {
        fn with(mut self, location: &str, chain: &'static str, residue: &'static str) -> Self {
            self.files.insert(location.to_string(), (chain, residue));
            self
        }
    }

    impl StructureLoader for MemoryLoader {
        type Error = NotStored;

        fn load(&self, name: &str, location: &str) -> Result<Structure, NotStored> {
            self.loads.borrow_mut().push(name.to_string());
            let (chain, residue) = self
                .files
                .get(location)
                .ok_or_else(|| NotStored(location.to_string()))?;
            let mut builder = StructureBuilder::new(name);
            builder.start_model(1).start_chain(chain);
            builder
                .start_residue(ResidueKey::standard(5), residue)
                .add_atom(Atom::new("CA", Point3::origin()));
            Ok(builder.build())
        }
    }

    fn structures(entries: &[(&str, &str)]) -> Vec<StructureEntry> {
        entries
            .iter()
            .map(|(name, file)| StructureEntry {
                name: name.to_string(),
                file: file.to_string(),
            })
            .collect()
    }

    fn graft(target: LocationEntry, source: LocationEntry) -> OperationEntry {
        OperationEntry {
            kind: "residue-grafter".to_string(),
            target,
            source,
        }
    }

    fn base_plan() -> Plan {
        Plan {
            structures: structures(&[("A", "a.pdb"), ("B", "b.pdb")]),
            operations: vec![graft(
                LocationEntry::new("A", "0", "X", "5"),
                LocationEntry::new("B", "0", "Y", "5"),
            )],
            outputs: vec![OutputEntry {
                name: "A".to_string(),
                file: "out.pdb".to_string(),
            }],
        }
    }

    fn loader() -> MemoryLoader {
        MemoryLoader::default()
            .with("a.pdb", "X", "GLY")
            .with("b.pdb", "Y", "TRP")
    }

    #[test]
    fn resolves_structures_operations_and_outputs() {
        let resolved = PlanResolver::new().resolve(&base_plan(), &loader()).unwrap();

        assert_eq!(resolved.pool.len(), 2);
        assert_eq!(
            resolved.registry.names().collect::<Vec<_>>(),
            vec!["A_0_X_5-B_0_Y_5"]
        );
        assert_eq!(resolved.outputs.len(), 1);
        assert_eq!(resolved.outputs[0].destination, "out.pdb");
        assert_eq!(Some(resolved.outputs[0].structure), resolved.pool.handle("A"));
    }

    #[test]
    fn camel_case_kind_alias_is_accepted() {
        let mut plan = base_plan();
        plan.operations[0].kind = "residueGrafter".to_string();
        assert!(PlanResolver::new().resolve(&plan, &loader()).is_ok());
    }

    #[test]
    fn unknown_kind_is_a_config_error() {
        let mut plan = base_plan();
        plan.operations[0].kind = "atomDeleter".to_string();
        let err = PlanResolver::new().resolve(&plan, &loader()).unwrap_err();
        assert!(matches!(
            err,
            GraftError::Config(ConfigError::UnknownOperationKind(kind)) if kind == "atomDeleter"
        ));
    }

    #[test]
    fn operation_referencing_undeclared_structure_is_a_config_error() {
        let mut plan = base_plan();
        plan.operations[0].source = LocationEntry::new("C", "0", "Y", "5");
        let err = PlanResolver::new().resolve(&plan, &loader()).unwrap_err();
        assert!(matches!(
            err,
            GraftError::Config(ConfigError::UnknownStructure { structure, .. }) if structure == "C"
        ));
    }

    #[test]
    fn malformed_residue_number_is_a_parse_error() {
        let mut plan = base_plan();
        plan.operations[0].target = LocationEntry::new("A", "0", "X", "five");
        let err = PlanResolver::new().resolve(&plan, &loader()).unwrap_err();
        assert!(matches!(
            err,
            GraftError::Parse { field: "residue", value } if value == "five"
        ));
    }

    #[test]
    fn negative_model_is_a_parse_error_and_negative_residue_is_not() {
        let mut plan = base_plan();
        plan.operations[0].target = LocationEntry::new("A", "-1", "X", "5");
        assert!(matches!(
            PlanResolver::new().resolve(&plan, &loader()),
            Err(GraftError::Parse { field: "model", .. })
        ));

        plan.operations[0].target = LocationEntry::new("A", "0", "X", "-3");
        assert!(PlanResolver::new().resolve(&plan, &loader()).is_ok());
    }

    #[test]
    fn identical_operations_collide_on_synthesized_name() {
        let mut plan = base_plan();
        let duplicate = plan.operations[0].clone();
        plan.operations.push(duplicate);
        let err = PlanResolver::new().resolve(&plan, &loader()).unwrap_err();
        assert!(matches!(
            err,
            GraftError::DuplicateName {
                kind: NameKind::Operation,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_structure_name_is_rejected_before_second_load() {
        let mut plan = base_plan();
        plan.structures = structures(&[("A", "a.pdb"), ("A", "b.pdb")]);
        let loader = loader();
        let err = PlanResolver::new().resolve(&plan, &loader).unwrap_err();

        assert!(matches!(
            err,
            GraftError::DuplicateName {
                kind: NameKind::Structure,
                ..
            }
        ));
        assert_eq!(*loader.loads.borrow(), vec!["A".to_string()]);
    }

    #[test]
    fn duplicate_output_name_is_rejected() {
        let mut plan = base_plan();
        let again = plan.outputs[0].clone();
        plan.outputs.push(again);
        let err = PlanResolver::new().resolve(&plan, &loader()).unwrap_err();
        assert!(matches!(
            err,
            GraftError::DuplicateName {
                kind: NameKind::Output,
                ..
            }
        ));
    }

    #[test]
    fn output_for_unknown_structure_is_a_lookup_error() {
        let mut plan = base_plan();
        plan.outputs[0].name = "Z".to_string();
        let err = PlanResolver::new().resolve(&plan, &loader()).unwrap_err();
        assert!(matches!(
            err,
            GraftError::Lookup(LookupError::StructureNotFound { name }) if name == "Z"
        ));
    }

    #[test]
    fn loader_failure_keeps_source_error() {
        let mut plan = base_plan();
        plan.structures[1].file = "missing.pdb".to_string();
        let err = PlanResolver::new().resolve(&plan, &loader()).unwrap_err();

        match err {
            GraftError::Load {
                name,
                location,
                source,
            } => {
                assert_eq!(name, "B");
                assert_eq!(location, "missing.pdb");
                assert!(source.downcast_ref::<NotStored>().is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_structure_file_is_a_config_error() {
        let mut plan = base_plan();
        plan.structures[0].file = "  ".to_string();
        let err = PlanResolver::new().resolve(&plan, &loader()).unwrap_err();
        assert!(matches!(
            err,
            GraftError::Config(ConfigError::MissingValue("structures.file"))
        ));
    }

    #[test]
    fn custom_kind_can_be_registered() {
        #[derive(Debug)]
        struct NoOp;
        impl Operation for NoOp {
            fn kind(&self) -> &'static str {
                "no-op"
            }
            fn apply(&self, _pool: &mut StructurePool) -> Result<(), GraftError> {
                Ok(())
            }
        }
        struct NoOpFactory;
        impl OperationFactory for NoOpFactory {
            fn build(
                &self,
                _entry: &OperationEntry,
                _pool: &StructurePool,
            ) -> Result<Box<dyn Operation>, GraftError> {
                Ok(Box::new(NoOp))
            }
        }

        let mut resolver = PlanResolver::empty();
        assert!(!resolver.knows_kind("residue-grafter"));
        resolver.register_kind("no-op", Box::new(NoOpFactory));

        let mut plan = base_plan();
        plan.operations[0].kind = "no-op".to_string();
        let resolved = resolver.resolve(&plan, &loader()).unwrap();
        assert_eq!(resolved.registry.get("A_0_X_5-B_0_Y_5").unwrap().kind(), "no-op");
    }
}
