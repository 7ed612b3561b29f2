//! Dependencies, their exclusions and the `dependencyManagement` section.

use crate::error::PomError;

pom_element! {
    /// An artifact excluded from a dependency's transitive closure.
    Exclusion : "exclusion" {
        text {
            ARTIFACT_ID = 0 => artifact_id, set_artifact_id, unset_artifact_id, is_artifact_id_set : "artifactId";
            GROUP_ID = 1 => group_id, set_group_id, unset_group_id, is_group_id_set : "groupId";
        }
        child {}
        list {}
    }
}

pom_element! {
    Dependency : "dependency" {
        text {
            GROUP_ID = 0 => group_id, set_group_id, unset_group_id, is_group_id_set : "groupId";
            ARTIFACT_ID = 1 => artifact_id, set_artifact_id, unset_artifact_id, is_artifact_id_set : "artifactId";
            /// Version or version range; property references are kept as written.
            VERSION = 2 => version, set_version, unset_version, is_version_set : "version";
            /// The `<type>` element (`jar`, `pom`, `test-jar`, ...).
            KIND = 3 => kind, set_kind, unset_kind, is_kind_set : "type";
            CLASSIFIER = 4 => classifier, set_classifier, unset_classifier, is_classifier_set : "classifier";
            SCOPE = 5 => scope, set_scope, unset_scope, is_scope_set : "scope";
            SYSTEM_PATH = 6 => system_path, set_system_path, unset_system_path, is_system_path_set : "systemPath";
            OPTIONAL = 7 => optional, set_optional, unset_optional, is_optional_set : "optional";
        }
        child {}
        list {
            EXCLUSIONS = 8 => exclusions, exclusions_mut : Exclusion, "exclusions" / "exclusion";
        }
    }
}

pom_element! {
    /// Default versions and scopes inherited by child projects.
    DependencyManagement : "dependencyManagement" {
        text {}
        child {}
        list {
            DEPENDENCIES = 0 => dependencies, dependencies_mut : Dependency, "dependencies" / "dependency";
        }
    }
}

/// Value of `<scope>`. An absent scope means [`Compile`](Self::Compile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DependencyScope {
    #[default]
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    Import,
}

impl DependencyScope {
    pub const ALL: [Self; 6] = [
        Self::Compile,
        Self::Provided,
        Self::Runtime,
        Self::Test,
        Self::System,
        Self::Import,
    ];

    /// The name as written in `<scope>`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::System => "system",
            Self::Import => "import",
        }
    }

    /// Whether dependents inherit a dependency with this scope.
    pub const fn is_transitive(self) -> bool {
        matches!(self, Self::Compile | Self::Runtime)
    }
}

impl std::fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DependencyScope {
    type Err = PomError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| PomError::UnknownScope {
                scope: name.to_string(),
            })
    }
}

impl Dependency {
    /// Creates a dependency with its coordinates filled in.
    pub fn with_coordinates(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: Option<&str>,
    ) -> Self {
        let mut dep = Self::new();
        dep.set_group_id(group_id);
        dep.set_artifact_id(artifact_id);
        if let Some(version) = version {
            dep.set_version(version);
        }
        dep
    }

    /// Canonical identifier: "{groupId}:{artifactId}". `None` unless both
    /// coordinates are present.
    pub fn coordinates(&self) -> Option<String> {
        let group_id = self.group_id()?;
        let artifact_id = self.artifact_id()?;
        Some(format!("{group_id}:{artifact_id}"))
    }

    /// Scope parsed into [`DependencyScope`]. Absent and unrecognized
    /// scopes both count as `compile`.
    pub fn scope_kind(&self) -> DependencyScope {
        let Some(scope) = self.scope() else {
            return DependencyScope::Compile;
        };
        scope.parse().unwrap_or_else(|e| {
            tracing::debug!("{e}, treating as compile");
            DependencyScope::Compile
        })
    }

    pub fn set_scope_kind(&mut self, scope: DependencyScope) {
        self.set_scope(scope.as_str());
    }

    pub fn is_optional(&self) -> bool {
        self.optional()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }
}

impl DependencyManagement {
    /// First managed dependency with the given coordinates.
    pub fn find(&self, group_id: &str, artifact_id: &str) -> Option<&Dependency> {
        self.dependencies()
            .iter()
            .find(|d| d.group_id() == Some(group_id) && d.artifact_id() == Some(artifact_id))
    }
}
