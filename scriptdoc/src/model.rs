//! Format-agnostic data model for extracted documentation.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// Synthetic field holding the script's filesystem path.
pub const FILE_PATH: &str = "file_path";

/// Fields parsed from one `# @doc` block.
///
/// Keys are whatever `@name` tokens appear in the block; there is no fixed
/// schema. Accessors treat an empty value the same as a missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap(BTreeMap<String, String>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any earlier value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Raw lookup, including empty values.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Non-empty value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.raw(name).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// @name
    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    /// @category, defaulting to "Miscellaneous"
    pub fn category(&self) -> &str {
        self.get("category").unwrap_or(DEFAULT_CATEGORY)
    }

    /// Serialize back into a `# @doc` block, one line per field.
    ///
    /// The synthetic `file_path` entry is not part of the source grammar and
    /// is skipped.
    pub fn to_doc_block(&self) -> String {
        let mut out = String::from("# @doc\n");
        for (name, value) in self.iter().filter(|(name, _)| *name != FILE_PATH) {
            if value.is_empty() {
                out.push_str(&format!("# @{}:\n", name));
            } else {
                out.push_str(&format!("# @{}: {}\n", name, value));
            }
        }
        out.push_str("# @/doc\n");
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Category used when a script has no `@category`.
pub const DEFAULT_CATEGORY: &str = "Miscellaneous";

/// All documented scripts from one scan, keyed by `/`-separated path
/// relative to the scan root.
///
/// Iteration is lexicographic by path regardless of the order entries were
/// inserted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocSet(BTreeMap<String, FieldMap>);

impl DocSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, fields: FieldMap) {
        self.0.insert(path.into(), fields);
    }

    pub fn get(&self, path: &str) -> Option<&FieldMap> {
        self.0.get(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldMap)> {
        self.0.iter().map(|(path, fields)| (path.as_str(), fields))
    }

    /// Entries grouped by category. Both the categories and the entries
    /// within each category come out sorted.
    pub fn by_category(&self) -> BTreeMap<&str, Vec<(&str, &FieldMap)>> {
        let mut groups: BTreeMap<&str, Vec<(&str, &FieldMap)>> = BTreeMap::new();
        for (path, fields) in self.iter() {
            groups.entry(fields.category()).or_default().push((path, fields));
        }
        groups
    }

    /// Entries grouped by display name of their top-level directory.
    pub fn by_directory(&self) -> BTreeMap<String, Vec<(&str, &FieldMap)>> {
        let mut groups: BTreeMap<String, Vec<(&str, &FieldMap)>> = BTreeMap::new();
        for (path, fields) in self.iter() {
            groups.entry(directory_group(path)).or_default().push((path, fields));
        }
        groups
    }
}

impl<K: Into<String>> FromIterator<(K, FieldMap)> for DocSet {
    fn from_iter<I: IntoIterator<Item = (K, FieldMap)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Display name of the directory group a relative path belongs to.
///
/// "Python/install.sh" → "Python", "install.sh" → "Root",
/// "Shared/utils.sh" → "Utilities"
pub fn directory_group(path: &str) -> String {
    match path.split_once('/') {
        Some(("Shared", _)) => "Utilities".to_string(),
        Some((dir, _)) => dir.to_string(),
        None => "Root".to_string(),
    }
}
