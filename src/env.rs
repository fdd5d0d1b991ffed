use std::collections::BTreeMap;

use crate::error::Error;

/// Destination for loaded environment variables, and the source the typed
/// accessors read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEnv {
    kind: TargetEnvKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TargetEnvKind {
    /// Read and write the current process environment.
    ///
    /// Writes go through [`std::env::set_var`], which mutates global process
    /// state without any locking.
    Process,
    /// Read and write an in-memory map.
    Memory(BTreeMap<String, String>),
}

impl Default for TargetEnv {
    fn default() -> Self {
        Self::memory()
    }
}

impl TargetEnv {
    /// Create a process-environment target.
    ///
    /// # Safety
    ///
    /// The caller must ensure no other threads concurrently read or write the
    /// process environment for the duration of operations that may mutate this
    /// target. Loading files from several threads needs external
    /// synchronization.
    pub unsafe fn process() -> Self {
        Self {
            kind: TargetEnvKind::Process,
        }
    }

    /// Create an in-memory environment target.
    ///
    /// Use this to avoid mutating the process environment.
    pub fn memory() -> Self {
        Self::from_memory(BTreeMap::new())
    }

    /// Create an in-memory environment target from an existing map.
    pub fn from_memory(map: BTreeMap<String, String>) -> Self {
        Self {
            kind: TargetEnvKind::Memory(map),
        }
    }

    pub fn as_memory(&self) -> Option<&BTreeMap<String, String>> {
        match &self.kind {
            TargetEnvKind::Memory(map) => Some(map),
            TargetEnvKind::Process => None,
        }
    }

    pub fn as_memory_mut(&mut self) -> Option<&mut BTreeMap<String, String>> {
        match &mut self.kind {
            TargetEnvKind::Memory(map) => Some(map),
            TargetEnvKind::Process => None,
        }
    }

    /// Current value of `name`, or `None` when unset.
    ///
    /// This is the keyed lookup; there is no `Index` impl because indexing
    /// cannot report an absent variable.
    ///
    /// Process values that are not valid Unicode are converted lossily.
    pub fn get(&self, name: &str) -> Option<String> {
        match &self.kind {
            TargetEnvKind::Process => {
                if !is_valid_name(name) {
                    return None;
                }
                std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
            }
            TargetEnvKind::Memory(map) => map.get(name).cloned(),
        }
    }

    /// Value of `name` parsed as a base-10 integer.
    ///
    /// Unset yields `Ok(None)`; a set but non-numeric value yields
    /// [`Error::InvalidInteger`].
    pub fn get_as_int(&self, name: &str) -> Result<Option<i64>, Error> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        value
            .parse::<i64>()
            .map(Some)
            .map_err(|source| Error::InvalidInteger {
                key: name.to_owned(),
                source,
            })
    }

    /// Value of `name` as a boolean.
    ///
    /// `true`, `yes`, and `1` in any casing are true; every other set value,
    /// including the empty string, is false.
    pub fn get_as_bool(&self, name: &str) -> Option<bool> {
        self.get(name).map(|value| is_truthy(&value))
    }

    /// Snapshot of every variable in the target, not just loaded ones.
    pub fn all(&self) -> BTreeMap<String, String> {
        match &self.kind {
            TargetEnvKind::Process => std::env::vars_os()
                .map(|(key, value)| {
                    (
                        key.to_string_lossy().into_owned(),
                        value.to_string_lossy().into_owned(),
                    )
                })
                .collect(),
            TargetEnvKind::Memory(map) => map.clone(),
        }
    }

    pub fn contains_key(&self, name: &str) -> bool {
        match &self.kind {
            TargetEnvKind::Process => is_valid_name(name) && std::env::var_os(name).is_some(),
            TargetEnvKind::Memory(map) => map.contains_key(name),
        }
    }

    /// Set `name` to `value`, overwriting any previous value.
    pub(crate) fn set(&mut self, name: &str, value: &str) {
        match &mut self.kind {
            // SAFETY: `TargetEnv::process` is unsafe and its caller guarantees
            // exclusive access to the process environment.
            TargetEnvKind::Process => unsafe { std::env::set_var(name, value) },
            TargetEnvKind::Memory(map) => {
                map.insert(name.to_owned(), value.to_owned());
            }
        }
    }
}

// The OS table cannot hold these names and `std::env` may panic on them.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['=', '\0'])
}

fn is_truthy(value: &str) -> bool {
    ["true", "yes", "1"]
        .iter()
        .any(|truthy| value.eq_ignore_ascii_case(truthy))
}
