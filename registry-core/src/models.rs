use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Platform of gems that are not platform-specific.
pub const DEFAULT_PLATFORM: &str = "ruby";

/// One `(name, version, platform)` row of a specs index.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry(pub String, pub String, pub String);

impl IndexEntry {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self(name.into(), version.into(), platform.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn version(&self) -> &str {
        &self.1
    }

    pub fn platform(&self) -> &str {
        &self.2
    }

    /// `name-version`, suffixed with `-platform` for non-default platforms.
    pub fn full_name(&self) -> String {
        full_name(self.name(), self.version(), self.platform())
    }
}

pub fn full_name(
    name: &str,
    version: &str,
    platform: &str,
) -> String {
    if platform == DEFAULT_PLATFORM {
        format!("{name}-{version}")
    } else {
        format!("{name}-{version}-{platform}")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    #[default]
    Runtime,
    Development,
}

/// A version constraint made of `(operator, version)` clauses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Requirement(pub Vec<(String, String)>);

impl Requirement {
    pub fn new<O: Into<String>, V: Into<String>>(clauses: impl IntoIterator<Item = (O, V)>) -> Self {
        Self(
            clauses
                .into_iter()
                .map(|(op, version)| (op.into(), version.into()))
                .collect(),
        )
    }

    /// The unconstrained requirement, `>= 0`.
    pub fn any() -> Self {
        Self::new([(">=", "0")])
    }

    pub fn clauses(&self) -> &[(String, String)] {
        &self.0
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        for (i, (op, version)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{op} {version}")?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub requirement: Requirement,
    #[serde(default)]
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn runtime(
        name: impl Into<String>,
        requirement: Requirement,
    ) -> Self {
        Self {
            name: name.into(),
            requirement,
            kind: DependencyKind::Runtime,
        }
    }

    pub fn development(
        name: impl Into<String>,
        requirement: Requirement,
    ) -> Self {
        Self {
            name: name.into(),
            requirement,
            kind: DependencyKind::Development,
        }
    }

    pub fn is_runtime(&self) -> bool {
        self.kind == DependencyKind::Runtime
    }
}

/// Detailed specification of a single gem release, as stored in
/// `quick/Marshal.4.8/<full_name>.gemspec.rz`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub version: String,
    pub platform: String,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl PackageSpec {
    pub fn full_name(&self) -> String {
        full_name(&self.name, &self.version, &self.platform)
    }

    pub fn index_entry(&self) -> IndexEntry {
        IndexEntry::new(&self.name, &self.version, &self.platform)
    }

    pub fn runtime_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .filter(|dep| dep.is_runtime())
    }
}

/// Wire record returned by the dependency API, one per index entry.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    /// Gem name
    #[schema(example = "rack")]
    pub name: String,
    /// Gem version
    #[schema(example = "1.0.0")]
    pub number: String,
    /// Gem platform
    #[schema(example = "ruby")]
    pub platform: String,
    /// Runtime dependencies as `(name, requirement)` pairs
    #[schema(value_type = Vec<Vec<String>>)]
    pub dependencies: Vec<(String, String)>,
}

impl From<&PackageSpec> for DependencyRecord {
    fn from(spec: &PackageSpec) -> Self {
        Self {
            name: spec.name.clone(),
            number: spec.version.clone(),
            platform: spec.platform.clone(),
            dependencies: spec
                .runtime_dependencies()
                .map(|dep| (dep.name.clone(), dep.requirement.to_string()))
                .collect(),
        }
    }
}
