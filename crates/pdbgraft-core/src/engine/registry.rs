use super::error::{GraftError, NameKind};
use super::operation::Operation;
use super::pool::StructurePool;
use super::progress::{Progress, ProgressReporter};
use std::collections::HashSet;
use tracing::info;

#[derive(Debug)]
struct Entry {
    name: String,
    operation: Box<dyn Operation>,
}

/// Ordered, uniquely named collection of operations.
///
/// Execution order is registration order; there is no reordering by name,
/// kind or dependency.
#[derive(Debug, Default)]
pub struct OperationRegistry {
    entries: Vec<Entry>,
    names: HashSet<String>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GraftError::DuplicateName`] if `name` is already registered;
    /// the registry is left unchanged.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        operation: Box<dyn Operation>,
    ) -> Result<(), GraftError> {
        let name = name.into();
        if !self.names.insert(name.clone()) {
            return Err(GraftError::DuplicateName {
                kind: NameKind::Operation,
                name,
            });
        }
        self.entries.push(Entry { name, operation });
        Ok(())
    }

    /// Applies every operation to `pool`, in registration order.
    ///
    /// Stops at the first failure. Operations before the failing one keep
    /// their effect on the pool; later ones are never run.
    ///
    /// # Return
    ///
    /// Returns the number of operations applied.
    pub fn execute_all(
        &self,
        pool: &mut StructurePool,
        reporter: &ProgressReporter,
    ) -> Result<usize, GraftError> {
        reporter.report(Progress::TaskStart {
            total_steps: self.entries.len() as u64,
        });

        for (index, entry) in self.entries.iter().enumerate() {
            info!(
                "Executing operation {}/{}: {} ({})",
                index + 1,
                self.entries.len(),
                entry.name,
                entry.operation.kind()
            );
            entry.operation.apply(pool)?;
            reporter.report(Progress::TaskIncrement {
                label: entry.name.clone(),
            });
        }

        reporter.report(Progress::TaskFinish);
        Ok(self.entries.len())
    }

    /// Registered names, in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Operation> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.operation.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::error::LookupError;
    use crate::core::models::structure::Structure;
    use std::sync::{Arc, Mutex};

    /// Records its name into a shared log when applied.
    #[derive(Debug)]
    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    }

    impl Operation for Recorder {
        fn kind(&self) -> &'static str {
            "recorder"
        }

        fn apply(&self, _pool: &mut StructurePool) -> Result<(), GraftError> {
            if self.fail {
                return Err(LookupError::StructureNotFound {
                    name: self.label.to_string(),
                }
                .into());
            }
            self.log.lock().unwrap().push(self.label);
            Ok(())
        }
    }

    fn recorder(
        label: &'static str,
        log: &Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    ) -> Box<dyn Operation> {
        Box::new(Recorder {
            label,
            log: Arc::clone(log),
            fail,
        })
    }

    #[test]
    fn executes_in_registration_order_not_name_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = OperationRegistry::new();
        registry.register("zeta", recorder("zeta", &log, false)).unwrap();
        registry.register("alpha", recorder("alpha", &log, false)).unwrap();
        registry.register("mid", recorder("mid", &log, false)).unwrap();

        let mut pool = StructurePool::new();
        let applied = registry
            .execute_all(&mut pool, &ProgressReporter::new())
            .unwrap();

        assert_eq!(applied, 3);
        assert_eq!(*log.lock().unwrap(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = OperationRegistry::new();
        registry.register("op", recorder("first", &log, false)).unwrap();
        let err = registry
            .register("op", recorder("second", &log, false))
            .unwrap_err();

        assert!(matches!(
            err,
            GraftError::DuplicateName {
                kind: NameKind::Operation,
                ..
            }
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn execution_stops_at_first_failure() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = OperationRegistry::new();
        registry.register("one", recorder("one", &log, false)).unwrap();
        registry.register("two", recorder("two", &log, true)).unwrap();
        registry.register("three", recorder("three", &log, false)).unwrap();

        let mut pool = StructurePool::new();
        pool.insert("A", Structure::new("A")).unwrap();
        let result = registry.execute_all(&mut pool, &ProgressReporter::new());

        assert!(matches!(result, Err(GraftError::Lookup(_))));
        assert_eq!(*log.lock().unwrap(), vec!["one"]);
    }

    #[test]
    fn progress_reports_one_increment_per_operation() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = OperationRegistry::new();
        registry.register("a", recorder("a", &log, false)).unwrap();
        registry.register("b", recorder("b", &log, false)).unwrap();

        let events = Mutex::new(Vec::new());
        {
            let reporter = ProgressReporter::with_callback(Box::new(|event| {
                events.lock().unwrap().push(event);
            }));
            registry
                .execute_all(&mut StructurePool::new(), &reporter)
                .unwrap();
        }

        let events = events.into_inner().unwrap();
        assert_eq!(events.first(), Some(&Progress::TaskStart { total_steps: 2 }));
        assert_eq!(events.last(), Some(&Progress::TaskFinish));
        let increments = events
            .iter()
            .filter(|e| matches!(e, Progress::TaskIncrement { .. }))
            .count();
        assert_eq!(increments, 2);
    }

    #[test]
    fn empty_registry_is_a_no_op() {
        let registry = OperationRegistry::new();
        assert!(registry.is_empty());
        let applied = registry
            .execute_all(&mut StructurePool::new(), &ProgressReporter::new())
            .unwrap();
        assert_eq!(applied, 0);
    }
}
