use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use strum::{Display, EnumIter, IntoStaticStr};

/// Outcome a lifecycle hook reports through its completion callback
pub type HookResult = Result<(), String>;

/// Completion callback handed to a lifecycle hook
pub type Done = Box<dyn FnOnce(HookResult) + Send>;

/// The lifecycle slots a mutation run calls out to, keyed by option name
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum HookSlot {
    Before,
    BeforeEach,
    Test,
    AfterEach,
    After,
}

impl HookSlot {
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// A callback stored as an option value. It receives a `Done` continuation
/// and must call it exactly once.
#[derive(Clone)]
pub struct LifecycleHook(Arc<dyn Fn(Done) + Send + Sync>);

static NOOP_HOOK: Lazy<LifecycleHook> =
    Lazy::new(|| LifecycleHook(Arc::new(|done: Done| done(Ok(())))));

impl LifecycleHook {
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(Done) + Send + Sync + 'static,
    {
        Self(Arc::new(hook))
    }

    /// The shared hook that signals success immediately
    pub fn noop() -> Self {
        NOOP_HOOK.clone()
    }

    pub fn is_noop(&self) -> bool {
        Arc::ptr_eq(&self.0, &NOOP_HOOK.0)
    }

    pub fn call(&self, done: Done) {
        (self.0)(done)
    }
}

// Hooks are equal only when they are the same closure.
impl PartialEq for LifecycleHook {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            f.write_str("LifecycleHook(noop)")
        } else {
            f.write_str("LifecycleHook(custom)")
        }
    }
}

impl Default for LifecycleHook {
    fn default() -> Self {
        Self::noop()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LifecycleHooks {
    pub before: LifecycleHook,
    pub before_each: LifecycleHook,
    pub test: LifecycleHook,
    pub after_each: LifecycleHook,
    pub after: LifecycleHook,
}

impl LifecycleHooks {
    pub fn get(&self, slot: HookSlot) -> &LifecycleHook {
        match slot {
            HookSlot::Before => &self.before,
            HookSlot::BeforeEach => &self.before_each,
            HookSlot::Test => &self.test,
            HookSlot::AfterEach => &self.after_each,
            HookSlot::After => &self.after,
        }
    }

    pub fn set(&mut self, slot: HookSlot, hook: LifecycleHook) {
        match slot {
            HookSlot::Before => self.before = hook,
            HookSlot::BeforeEach => self.before_each = hook,
            HookSlot::Test => self.test = hook,
            HookSlot::AfterEach => self.after_each = hook,
            HookSlot::After => self.after = hook,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use strum::IntoEnumIterator;

    #[test]
    fn noop_signals_success() {
        let (tx, rx) = mpsc::channel();
        LifecycleHook::noop().call(Box::new(move |result: HookResult| tx.send(result).unwrap()));
        assert_eq!(rx.recv().unwrap(), Ok(()));
    }

    #[test]
    fn noop_instances_compare_equal() {
        assert_eq!(LifecycleHook::noop(), LifecycleHook::default());
        assert_ne!(LifecycleHook::noop(), LifecycleHook::new(|done| done(Ok(()))));
    }

    #[test]
    fn slot_keys_match_option_names() {
        let keys: Vec<&str> = HookSlot::iter().map(HookSlot::key).collect();
        assert_eq!(keys, ["before", "beforeEach", "test", "afterEach", "after"]);
    }

    #[test]
    fn set_replaces_only_the_named_slot() {
        let custom = LifecycleHook::new(|done| done(Err("boom".to_string())));
        let mut hooks = LifecycleHooks::default();
        hooks.set(HookSlot::AfterEach, custom.clone());
        assert_eq!(hooks.get(HookSlot::AfterEach), &custom);
        assert!(hooks.get(HookSlot::Before).is_noop());
        assert!(hooks.get(HookSlot::After).is_noop());
    }
}
