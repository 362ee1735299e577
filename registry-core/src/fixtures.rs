//! Fixture builders for gem repositories.
//!
//! Writes the on-disk layout the endpoint serves: both specs indexes (plain
//! and gzipped), one `.gemspec.rz` per gem and a `gems/<full_name>.gem`
//! archive stand-in.
//!
//! This module is only available when the `test` feature is enabled.

use crate::{
    GemRepository, Result, codec,
    models::{DEFAULT_PLATFORM, Dependency, IndexEntry, PackageSpec, Requirement},
    repo::{GEMS_DIR, PRERELEASE_SPECS_INDEX, QUICK_DIR, SPECS_INDEX},
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Auto,
    Release,
    Prerelease,
    Both,
}

pub struct GemFixture {
    spec: PackageSpec,
    placement: Placement,
    archive: Option<Vec<u8>>,
}

pub fn gem(
    name: &str,
    version: &str,
) -> GemFixture {
    GemFixture {
        spec: PackageSpec {
            name: name.to_string(),
            version: version.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
            dependencies: vec![],
        },
        placement: Placement::Auto,
        archive: None,
    }
}

impl GemFixture {
    pub fn platform(
        mut self,
        platform: &str,
    ) -> Self {
        self.spec.platform = platform.to_string();
        self
    }

    /// Adds a runtime dependency. `requirement` is a comma separated list of
    /// `op version` clauses, e.g. `">= 1.0, < 2"`.
    pub fn dep(
        mut self,
        name: &str,
        requirement: &str,
    ) -> Self {
        self.spec
            .dependencies
            .push(Dependency::runtime(name, parse_requirement(requirement)));
        self
    }

    pub fn dev_dep(
        mut self,
        name: &str,
        requirement: &str,
    ) -> Self {
        self.spec
            .dependencies
            .push(Dependency::development(name, parse_requirement(requirement)));
        self
    }

    pub fn release(mut self) -> Self {
        self.placement = Placement::Release;
        self
    }

    pub fn prerelease(mut self) -> Self {
        self.placement = Placement::Prerelease;
        self
    }

    /// Lists the gem in the release and the prerelease index.
    pub fn in_both_indexes(mut self) -> Self {
        self.placement = Placement::Both;
        self
    }

    pub fn archive(
        mut self,
        contents: &[u8],
    ) -> Self {
        self.archive = Some(contents.to_vec());
        self
    }

    pub fn spec(&self) -> &PackageSpec {
        &self.spec
    }

    fn is_prerelease(&self) -> bool {
        self.spec
            .version
            .chars()
            .any(|c| c.is_ascii_alphabetic())
    }

    fn in_release(&self) -> bool {
        match self.placement {
            Placement::Auto => !self.is_prerelease(),
            Placement::Release | Placement::Both => true,
            Placement::Prerelease => false,
        }
    }

    fn in_prerelease(&self) -> bool {
        match self.placement {
            Placement::Auto => self.is_prerelease(),
            Placement::Prerelease | Placement::Both => true,
            Placement::Release => false,
        }
    }

    fn default_archive(&self) -> Vec<u8> {
        format!("{} archive", self.spec.full_name()).into_bytes()
    }
}

pub struct RepoFixture {
    root: PathBuf,
    gems: Vec<GemFixture>,
}

pub fn repo(root: impl AsRef<Path>) -> RepoFixture {
    RepoFixture {
        root: root.as_ref().to_path_buf(),
        gems: vec![],
    }
}

impl RepoFixture {
    pub fn gem(
        mut self,
        gem: GemFixture,
    ) -> Self {
        self.gems.push(gem);
        self
    }

    pub fn gems(
        mut self,
        gems: impl IntoIterator<Item = GemFixture>,
    ) -> Self {
        self.gems.extend(gems);
        self
    }

    pub fn write(self) -> Result<GemRepository> {
        let quick = self.root.join(QUICK_DIR);
        let archives = self.root.join(GEMS_DIR);
        create_dir(&quick)?;
        create_dir(&archives)?;

        let mut release: Vec<IndexEntry> = vec![];
        let mut prerelease: Vec<IndexEntry> = vec![];

        for gem in &self.gems {
            let full_name = gem.spec.full_name();

            let blob = codec::deflate(&codec::encode(&gem.spec)?)?;
            write_file(&quick.join(format!("{full_name}.gemspec.rz")), &blob)?;

            let archive = gem
                .archive
                .clone()
                .unwrap_or_else(|| gem.default_archive());
            write_file(&archives.join(format!("{full_name}.gem")), &archive)?;

            if gem.in_release() {
                release.push(gem.spec.index_entry());
            }
            if gem.in_prerelease() {
                prerelease.push(gem.spec.index_entry());
            }
        }

        write_index(&self.root, SPECS_INDEX, &release)?;
        write_index(&self.root, PRERELEASE_SPECS_INDEX, &prerelease)?;

        tracing::debug!(
            "wrote fixture repository at {} ({} release, {} prerelease)",
            self.root.display(),
            release.len(),
            prerelease.len()
        );

        Ok(GemRepository::new(self.root))
    }
}

fn parse_requirement(requirement: &str) -> Requirement {
    Requirement::new(
        requirement
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(|clause| {
                match clause.split_once(' ') {
                    Some((op, version)) => (op.to_string(), version.trim().to_string()),
                    None => ("=".to_string(), clause.to_string()),
                }
            }),
    )
}

fn write_index(
    root: &Path,
    name: &str,
    entries: &[IndexEntry],
) -> Result<()> {
    let plain = codec::encode(entries)?;
    write_file(&root.join(format!("{name}.gz")), &codec::gzip(&plain)?)?;
    write_file(&root.join(name), &plain)
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(crate::Error::io(path))
}

fn write_file(
    path: &Path,
    contents: &[u8],
) -> Result<()> {
    std::fs::write(path, contents).map_err(crate::Error::io(path))
}
