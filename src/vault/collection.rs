//! Ordered, name-keyed collection of secret entries.
//!
//! Serialized as a bare JSON array, which is also the whole legacy
//! envelope format. Insertion order is kept; a rotated entry is dropped
//! from its old position and appended at the tail.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::secret::Secret;
use crate::errors::{Result, SctlError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretCollection {
    entries: Vec<Secret>,
}

impl SecretCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert an entry. An existing entry with the same name is removed
    /// first, so the fresh copy always ends up at the tail.
    pub fn add(&mut self, secret: Secret) {
        let before = self.entries.len();
        self.entries.retain(|existing| existing.name != secret.name);
        if self.entries.len() != before {
            debug!(name = %secret.name, "rotating entry");
        }
        self.entries.push(secret);
    }

    /// Remove the entry called `name`. Absent names are a no-op.
    pub fn remove(&mut self, name: &str) {
        if let Some(index) = self.entries.iter().position(|s| s.name == name) {
            debug!(name, "removing entry");
            self.entries.remove(index);
        }
    }

    /// Look up an entry by exact name.
    pub fn find(&self, name: &str) -> Result<&Secret> {
        self.entries
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SctlError::SecretNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Secret> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Secret> {
        self.entries.iter_mut()
    }

    /// Entry names sorted alphabetically.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl From<Vec<Secret>> for SecretCollection {
    fn from(entries: Vec<Secret>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for SecretCollection {
    type Item = Secret;
    type IntoIter = std::vec::IntoIter<Secret>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a SecretCollection {
    type Item = &'a Secret;
    type IntoIter = std::slice::Iter<'a, Secret>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::secret::Encoding;

    fn secret(name: &str, ciphertext: &str) -> Secret {
        Secret::new(name, ciphertext, Encoding::Plain)
    }

    #[test]
    fn remove_drops_named_entry() {
        let mut s = SecretCollection::from(vec![secret("TEST", "ABC123"), secret("DOUBLEMINT", "123ABC")]);

        s.remove("TEST");
        assert_eq!(s.len(), 1);
        assert_eq!(s.iter().next().unwrap().name, "DOUBLEMINT");
    }

    #[test]
    fn remove_absent_name_is_noop() {
        let mut s = SecretCollection::from(vec![secret("A", "1"), secret("B", "2")]);
        let before = s.clone();

        s.remove("MISSING");
        assert_eq!(s, before);
    }

    #[test]
    fn add_rotates_existing_entry() {
        let mut s = SecretCollection::new();
        s.add(secret("TOADD", "TOADD123"));
        s.add(secret("TOADD", "123TOADD"));

        assert_eq!(s.len(), 1);
        assert_eq!(s.find("TOADD").unwrap().ciphertext, "123TOADD");
    }

    #[test]
    fn repeated_rotation_keeps_single_latest_entry() {
        let mut s = SecretCollection::new();
        for i in 0..5 {
            s.add(secret("KEY", &format!("v{i}")));
        }

        assert_eq!(s.len(), 1);
        assert_eq!(s.find("KEY").unwrap().ciphertext, "v4");
    }

    #[test]
    fn rotated_entry_moves_to_tail() {
        let mut s = SecretCollection::new();
        s.add(secret("FIRST", "1"));
        s.add(secret("SECOND", "2"));
        s.add(secret("FIRST", "1b"));

        let order: Vec<&str> = s.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, vec!["SECOND", "FIRST"]);
    }

    #[test]
    fn rotation_refreshes_created() {
        let mut s = SecretCollection::new();
        let mut old = secret("KEY", "old");
        old.created = chrono::DateTime::parse_from_rfc3339("2019-05-01T13:01:27Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        s.add(old.clone());
        s.add(secret("KEY", "new"));

        assert!(s.find("KEY").unwrap().created > old.created);
    }

    #[test]
    fn find_returns_entry() {
        let mut s = SecretCollection::new();
        s.add(secret("TEST", "123TEST"));

        let found = s.find("TEST").unwrap();
        assert_eq!(found.name, "TEST");
        assert_eq!(found.ciphertext, "123TEST");
    }

    #[test]
    fn find_missing_names_search_term() {
        let mut s = SecretCollection::new();
        s.add(secret("TEST", "123TEST"));

        let err = s.find("NO").unwrap_err();
        assert!(matches!(err, SctlError::SecretNotFound(ref n) if n == "NO"));
        assert!(err.to_string().contains("NO"));
    }

    #[test]
    fn names_are_sorted() {
        let s = SecretCollection::from(vec![secret("ZEBRA", "z"), secret("ALPHA", "a"), secret("MIDDLE", "m")]);
        assert_eq!(s.names(), vec!["ALPHA", "MIDDLE", "ZEBRA"]);
    }

    #[test]
    fn serializes_as_bare_array() {
        let s = SecretCollection::from(vec![secret("A", "1")]);
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["cypher"], "1");
    }
}
