use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::{definition::GestureDefinition, error::Result};

/// Where the batch driver looks up a gesture by identifier.
pub trait GestureSource {
    /// `Ok(None)` when there is simply no definition for `id`.
    fn find(&self, id: &str) -> Result<Option<GestureDefinition>>;

    fn ids(&self) -> Result<Vec<String>>;
}

/// `<root>/<id>.json`
#[derive(Debug, Clone)]
pub struct GestureDirectory {
    root: PathBuf,
}

impl GestureDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

impl GestureSource for GestureDirectory {
    fn find(&self, id: &str) -> Result<Option<GestureDefinition>> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Ok(None);
        }
        GestureDefinition::load(&path).map(Some)
    }

    fn ids(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|source| {
            super::HandsignGestureError::Read {
                path: self.root.clone(),
                source,
            }
        })?;

        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
            .collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(feature = "builtin-gestures")]
const BUILTIN: &[(&str, &str)] = &[
    ("c", include_str!("../../gestures/c.json")),
    ("f", include_str!("../../gestures/f.json")),
    ("hello", include_str!("../../gestures/hello.json")),
    ("i", include_str!("../../gestures/i.json")),
    ("namaste", include_str!("../../gestures/namaste.json")),
    ("x", include_str!("../../gestures/x.json")),
    ("y", include_str!("../../gestures/y.json")),
];

#[cfg(not(feature = "builtin-gestures"))]
const BUILTIN: &[(&str, &str)] = &[];

/// The authored letters and words shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinGestures;

impl GestureSource for BuiltinGestures {
    fn find(&self, id: &str) -> Result<Option<GestureDefinition>> {
        BUILTIN
            .iter()
            .find(|(name, _)| *name == id)
            .map(|(_, json)| GestureDefinition::from_json(json))
            .transpose()
    }

    fn ids(&self) -> Result<Vec<String>> {
        Ok(BUILTIN.iter().map(|(name, _)| name.to_string()).collect())
    }
}

impl GestureSource for IndexMap<String, GestureDefinition> {
    fn find(&self, id: &str) -> Result<Option<GestureDefinition>> {
        Ok(self.get(id).cloned())
    }

    fn ids(&self) -> Result<Vec<String>> {
        Ok(self.keys().cloned().collect())
    }
}

impl<S: GestureSource + ?Sized> GestureSource for &S {
    fn find(&self, id: &str) -> Result<Option<GestureDefinition>> {
        (**self).find(id)
    }

    fn ids(&self) -> Result<Vec<String>> {
        (**self).ids()
    }
}

impl<S: GestureSource + ?Sized> GestureSource for Box<S> {
    fn find(&self, id: &str) -> Result<Option<GestureDefinition>> {
        (**self).find(id)
    }

    fn ids(&self) -> Result<Vec<String>> {
        (**self).ids()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_directory_lookup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            r#"{ "name": "a", "fingers": { "index": { "base": [10, 20, 30] } } }"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a gesture").unwrap();

        let gestures = GestureDirectory::new(dir.path());
        assert_eq!(gestures.find("a").unwrap().map(|g| g.name), Some("a".to_string()));
        assert!(gestures.find("b").unwrap().is_none());
        assert_eq!(gestures.ids().unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn test_directory_malformed_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "[]").unwrap();
        assert!(GestureDirectory::new(dir.path()).find("a").is_err());
    }

    #[cfg(feature = "builtin-gestures")]
    #[test]
    fn test_builtin_library_parses() {
        let builtin = BuiltinGestures;
        for id in builtin.ids().unwrap() {
            let definition = builtin
                .find(&id)
                .unwrap()
                .unwrap_or_else(|| panic!("{id} listed but not found"));
            assert_eq!(definition.name, id);
        }
        assert!(builtin.find("q").unwrap().is_none());
    }
}
