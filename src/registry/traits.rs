use crate::utils::error::Result;

/// Hierarchical key-value configuration store
///
/// Keys are backslash-separated paths relative to a root chosen by the
/// implementation; values are strings addressed by name, where the empty name
/// is the key's default value. This isolates the registrar from the OS
/// registry so it can be exercised against an in-memory store.
pub trait KeyValueStore {
    /// Short identifier for log lines (e.g., "windows-registry", "memory")
    fn id(&self) -> &'static str;

    /// Create `key_path` if needed and set `name` to `value`
    fn set_value(&self, key_path: &str, name: &str, value: &str) -> Result<()>;

    /// Read `name` under `key_path`; `None` when the key or value is absent
    fn get_value(&self, key_path: &str, name: &str) -> Result<Option<String>>;

    /// Open `key_path` with create semantics and delete `name` from it.
    ///
    /// The key itself is left in place. Deleting a value that does not exist
    /// is an error.
    fn delete_value(&self, key_path: &str, name: &str) -> Result<()>;
}
