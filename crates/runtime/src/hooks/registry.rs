//! Hook registry for managing per-frame hooks.

use std::collections::HashMap;
use std::sync::Arc;

use tpb_core::HookFailure;
use tracing::{debug, error};

use super::{HookCriticality, TickHook};
use crate::error::RuntimeError;

/// Registry that holds the tick hooks in execution order.
///
/// Hooks are sorted by priority on construction and indexed by name so hosts
/// can inspect or replace individual hooks.
pub struct HookRegistry {
    hooks: Arc<[Arc<dyn TickHook>]>,
    lookup_table: HashMap<&'static str, Arc<dyn TickHook>>,
}

impl HookRegistry {
    /// Creates a registry; hooks are sorted by priority (lower values first).
    pub fn new(mut hooks: Vec<Arc<dyn TickHook>>) -> Self {
        hooks.sort_by_key(|h| h.priority());

        let lookup_table = hooks.iter().map(|h| (h.name(), Arc::clone(h))).collect();

        Self {
            hooks: hooks.into(),
            lookup_table,
        }
    }

    /// Creates a registry with the default set of hooks.
    ///
    /// Default hooks: charge, cast, idle and slip.
    pub fn default_hooks() -> Self {
        Self::new(tpb_core::default_hooks().to_vec())
    }

    /// Returns a registry with `hook` added (or replacing a hook of the same name).
    #[must_use]
    pub fn with_hook(self, hook: Arc<dyn TickHook>) -> Self {
        let mut hooks: Vec<_> = self
            .hooks
            .iter()
            .filter(|h| h.name() != hook.name())
            .cloned()
            .collect();
        hooks.push(hook);
        Self::new(hooks)
    }

    /// Returns a registry without the hook named `name`.
    #[must_use]
    pub fn without(self, name: &str) -> Self {
        Self::new(
            self.hooks
                .iter()
                .filter(|h| h.name() != name)
                .cloned()
                .collect(),
        )
    }

    /// Hooks in execution order.
    pub fn hooks(&self) -> &[Arc<dyn TickHook>] {
        &self.hooks
    }

    pub fn find(&self, name: &str) -> Option<&Arc<dyn TickHook>> {
        self.lookup_table.get(name)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities (for debugging).
    pub fn names(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|h| (h.name(), h.priority()))
    }

    /// Logs the failures of one frame according to each hook's criticality.
    ///
    /// Returns an error for the first critical failure; the caller discards the
    /// frame in that case.
    pub fn handle_failures(&self, failures: &[HookFailure]) -> Result<(), RuntimeError> {
        for failure in failures {
            match failure.criticality {
                HookCriticality::Critical => {
                    error!(
                        target: "runtime::hooks",
                        hook = failure.hook,
                        battler = %failure.battler,
                        criticality = "critical",
                        error = %failure.error,
                        "Critical hook failed, discarding frame"
                    );
                    return Err(RuntimeError::CriticalHook {
                        battler: failure.battler,
                        hook: failure.hook,
                        error: failure.error.clone(),
                    });
                }
                HookCriticality::Important => error!(
                    target: "runtime::hooks",
                    hook = failure.hook,
                    battler = %failure.battler,
                    criticality = "important",
                    error = %failure.error,
                    "Hook failed, battler skipped this frame"
                ),
                HookCriticality::Optional => debug!(
                    target: "runtime::hooks",
                    hook = failure.hook,
                    battler = %failure.battler,
                    criticality = "optional",
                    error = %failure.error,
                    "Optional hook failed"
                ),
            }
        }

        Ok(())
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks()
    }
}

#[cfg(test)]
mod tests {
    use tpb_core::{Battler, BattlerId, SlipHook, TickContext, TickError};

    use super::*;

    struct Sparkle;

    impl TickHook for Sparkle {
        fn name(&self) -> &'static str {
            "sparkle"
        }

        fn priority(&self) -> i32 {
            -100
        }

        fn criticality(&self) -> HookCriticality {
            HookCriticality::Optional
        }

        fn should_run(&self, _battler: &Battler) -> bool {
            false
        }

        fn apply(&self, _ctx: &mut TickContext<'_, '_>) -> Result<(), TickError> {
            Ok(())
        }
    }

    fn failure(criticality: HookCriticality) -> HookFailure {
        HookFailure {
            battler: BattlerId(4),
            hook: "charge",
            criticality,
            error: TickError::Hook {
                hook: "charge",
                message: "test".into(),
            },
        }
    }

    #[test]
    fn default_registry_is_sorted() {
        let registry = HookRegistry::default();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            [("charge", -20), ("cast", -10), ("idle", 0), ("slip", 10)]
        );
        assert!(registry.find("slip").is_some());
    }

    #[test]
    fn custom_hook_is_inserted_by_priority() {
        let registry = HookRegistry::default()
            .with_hook(Arc::new(Sparkle))
            .without("slip");
        let names: Vec<_> = registry.names().map(|(name, _)| name).collect();
        assert_eq!(names, ["sparkle", "charge", "cast", "idle"]);
        assert!(registry.find("slip").is_none());

        let registry = registry.with_hook(Arc::new(SlipHook));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn only_critical_failures_abort() {
        let registry = HookRegistry::default();
        assert!(
            registry
                .handle_failures(&[failure(HookCriticality::Important)])
                .is_ok()
        );
        assert!(
            registry
                .handle_failures(&[failure(HookCriticality::Optional)])
                .is_ok()
        );
        let err = registry
            .handle_failures(&[
                failure(HookCriticality::Optional),
                failure(HookCriticality::Critical),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::CriticalHook {
                battler: BattlerId(4),
                hook: "charge",
                ..
            }
        ));
    }
}
