use crate::{
    codec,
    models::{DependencyRecord, IndexEntry, PackageSpec},
};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

pub const QUICK_DIR: &str = "quick/Marshal.4.8";
pub const GEMS_DIR: &str = "gems";
pub const SPECS_INDEX: &str = "specs.4.8";
pub const PRERELEASE_SPECS_INDEX: &str = "prerelease_specs.4.8";

/// Read-only view over a fixture gem repository on disk.
#[derive(Debug, Clone)]
pub struct GemRepository {
    root: PathBuf,
}

impl GemRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for_quick(
        &self,
        id: &str,
    ) -> PathBuf {
        self.root.join(QUICK_DIR).join(id)
    }

    pub fn path_for_gem(
        &self,
        id: &str,
    ) -> PathBuf {
        self.root.join(GEMS_DIR).join(id)
    }

    pub fn path_for_spec(
        &self,
        entry: &IndexEntry,
    ) -> PathBuf {
        self.path_for_quick(&format!("{}.gemspec.rz", entry.full_name()))
    }

    /// Reads `relative` below the root verbatim.
    pub fn read(
        &self,
        relative: impl AsRef<Path>,
    ) -> crate::Result<Vec<u8>> {
        read_file(&self.root.join(relative))
    }

    pub fn read_quick(
        &self,
        id: &str,
    ) -> crate::Result<Vec<u8>> {
        read_file(&self.path_for_quick(id))
    }

    pub fn read_gem(
        &self,
        id: &str,
    ) -> crate::Result<Vec<u8>> {
        read_file(&self.path_for_gem(id))
    }

    pub fn load_index(
        &self,
        file_name: &str,
    ) -> crate::Result<Vec<IndexEntry>> {
        let path = self.root.join(file_name);
        let bytes = read_file(&path)?;
        codec::decode(&bytes).map_err(crate::Error::with_path(path))
    }

    /// Release entries followed by prerelease entries. Entries listed in both
    /// indexes appear twice.
    pub fn all_specs(&self) -> crate::Result<Vec<IndexEntry>> {
        let mut entries = self.load_index(SPECS_INDEX)?;
        entries.extend(self.load_index(PRERELEASE_SPECS_INDEX)?);
        Ok(entries)
    }

    pub fn load_spec(
        &self,
        entry: &IndexEntry,
    ) -> crate::Result<PackageSpec> {
        let path = self.path_for_spec(entry);
        let blob = read_file(&path)?;
        codec::inflate(&blob)
            .and_then(|raw| codec::decode(&raw))
            .map_err(crate::Error::with_path(path))
    }

    /// Dependency records for every index entry whose spec is named in
    /// `gem_names`, in index order.
    pub fn dependencies_for<S: AsRef<str>>(
        &self,
        gem_names: &[S],
    ) -> crate::Result<Vec<DependencyRecord>> {
        if gem_names.is_empty() {
            return Ok(vec![]);
        }

        let wanted: HashSet<&str> = gem_names
            .iter()
            .map(AsRef::as_ref)
            .collect();

        let mut records = Vec::new();
        for entry in self.all_specs()? {
            let spec = self.load_spec(&entry)?;
            if !wanted.contains(spec.name.as_str()) {
                continue;
            }
            records.push(DependencyRecord::from(&spec));
        }

        tracing::trace!(
            "resolved {} dependency records for {} gems",
            records.len(),
            wanted.len()
        );

        Ok(records)
    }
}

fn read_file(path: &Path) -> crate::Result<Vec<u8>> {
    tracing::trace!("reading fixture {}", path.display());
    std::fs::read(path).map_err(crate::Error::io(path))
}
