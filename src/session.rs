use std::collections::HashMap;

/// Session key under which the CSRF state is stored between the redirect and
/// the callback.
pub const STATE_SESSION_KEY: &str = "state";

/// Key-value storage scoped to the end user's session.
///
/// `pull` returns the stored value and removes it in the same step, which is
/// what makes a state token single-use.
pub trait SessionStore {
    fn put(&mut self, key: &str, value: String);

    fn pull(&mut self, key: &str) -> Option<String>;
}

impl SessionStore for HashMap<String, String> {
    fn put(&mut self, key: &str, value: String) {
        self.insert(key.to_string(), value);
    }

    fn pull(&mut self, key: &str) -> Option<String> {
        self.remove(key)
    }
}

/// In-memory session store, handy for tests and single-process tools.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl SessionStore for MemorySession {
    fn put(&mut self, key: &str, value: String) {
        self.values.put(key, value);
    }

    fn pull(&mut self, key: &str) -> Option<String> {
        self.values.pull(key)
    }
}
