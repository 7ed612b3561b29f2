//! The `<project>` root element together with `<parent>` and
//! `<prerequisites>`.

use super::{
    Build, Dependency, DependencyManagement, DistributionManagement, IssueManagement, License,
    Profile, Reporting, Scm,
};

pom_element! {
    /// Coordinates of the parent project.
    Parent : "parent" {
        text {
            ARTIFACT_ID = 0 => artifact_id, set_artifact_id, unset_artifact_id, is_artifact_id_set : "artifactId";
            GROUP_ID = 1 => group_id, set_group_id, unset_group_id, is_group_id_set : "groupId";
            VERSION = 2 => version, set_version, unset_version, is_version_set : "version";
            /// Path to the parent's pom.xml, relative to this project.
            RELATIVE_PATH = 3 => relative_path, set_relative_path, unset_relative_path, is_relative_path_set : "relativePath";
        }
        child {}
        list {}
    }
}

pom_element! {
    /// Build environment requirements.
    Prerequisites : "prerequisites" {
        text {
            MAVEN = 0 => maven, set_maven, unset_maven, is_maven_set : "maven" unsettable;
        }
        child {}
        list {}
    }
}

pom_element! {
    Project : "project" {
        text {
            MODEL_VERSION = 0 => model_version, set_model_version, unset_model_version, is_model_version_set : "modelVersion";
            GROUP_ID = 1 => group_id, set_group_id, unset_group_id, is_group_id_set : "groupId";
            ARTIFACT_ID = 2 => artifact_id, set_artifact_id, unset_artifact_id, is_artifact_id_set : "artifactId";
            VERSION = 3 => version, set_version, unset_version, is_version_set : "version";
            PACKAGING = 4 => packaging, set_packaging, unset_packaging, is_packaging_set : "packaging";
            NAME = 5 => name, set_name, unset_name, is_name_set : "name";
            DESCRIPTION = 6 => description, set_description, unset_description, is_description_set : "description";
            URL = 7 => url, set_url, unset_url, is_url_set : "url";
            INCEPTION_YEAR = 8 => inception_year, set_inception_year, unset_inception_year, is_inception_year_set : "inceptionYear";
        }
        child {
            PARENT = 9 => parent, parent_mut, set_parent, unset_parent, is_parent_set : Parent, "parent";
            PREREQUISITES = 10 => prerequisites, prerequisites_mut, set_prerequisites, unset_prerequisites, is_prerequisites_set : Prerequisites, "prerequisites";
            ISSUE_MANAGEMENT = 11 => issue_management, issue_management_mut, set_issue_management, unset_issue_management, is_issue_management_set : IssueManagement, "issueManagement";
            SCM = 12 => scm, scm_mut, set_scm, unset_scm, is_scm_set : Scm, "scm";
            DISTRIBUTION_MANAGEMENT = 13 => distribution_management, distribution_management_mut, set_distribution_management, unset_distribution_management, is_distribution_management_set : DistributionManagement, "distributionManagement";
            DEPENDENCY_MANAGEMENT = 16 => dependency_management, dependency_management_mut, set_dependency_management, unset_dependency_management, is_dependency_management_set : DependencyManagement, "dependencyManagement";
            BUILD = 18 => build, build_mut, set_build, unset_build, is_build_set : Build, "build";
            REPORTING = 19 => reporting, reporting_mut, set_reporting, unset_reporting, is_reporting_set : Reporting, "reporting";
        }
        list {
            LICENSES = 14 => licenses, licenses_mut : License, "licenses" / "license";
            /// Relative paths of aggregated sub-modules.
            MODULES = 15 => modules, modules_mut : String, "modules" / "module";
            DEPENDENCIES = 17 => dependencies, dependencies_mut : Dependency, "dependencies" / "dependency";
            PROFILES = 20 => profiles, profiles_mut : Profile, "profiles" / "profile";
        }
    }
}

/// Maven version assumed when `<prerequisites><maven>` is omitted.
pub const DEFAULT_MAVEN_PREREQUISITE: &str = "2.0";

impl Parent {
    /// "{groupId}:{artifactId}:{version}" when all three are present.
    pub fn gav(&self) -> Option<String> {
        Some(format!(
            "{}:{}:{}",
            self.group_id()?,
            self.artifact_id()?,
            self.version()?
        ))
    }
}

impl Prerequisites {
    pub fn effective_maven(&self) -> &str {
        self.maven().unwrap_or(DEFAULT_MAVEN_PREREQUISITE)
    }
}

impl Project {
    /// groupId, inherited from the parent when the project omits it.
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id()
            .or_else(|| self.parent().and_then(Parent::group_id))
    }

    /// version, inherited from the parent when the project omits it.
    pub fn effective_version(&self) -> Option<&str> {
        self.version()
            .or_else(|| self.parent().and_then(Parent::version))
    }

    /// Packaging, `jar` when omitted.
    pub fn effective_packaging(&self) -> &str {
        self.packaging().unwrap_or("jar")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PomError;
    use crate::notify::{ChangeLog, NotificationKind, Notifying};
    use crate::reflect::{FeatureKind, Reflective};
    use crate::value::{PomNode, Value};

    fn parent() -> Parent {
        let mut parent = Parent::new();
        parent.set_group_id("org.example");
        parent.set_artifact_id("parent");
        parent.set_version("1.0.0");
        parent
    }

    #[test]
    fn test_parent_scalar_lifecycle() {
        let mut parent = Parent::new();
        assert!(parent.artifact_id().is_none());
        assert!(!parent.is_artifact_id_set());

        parent.set_artifact_id("p");
        assert_eq!(parent.artifact_id(), Some("p"));
        assert!(parent.is_artifact_id_set());

        parent.unset_artifact_id();
        assert!(parent.artifact_id().is_none());
        assert!(!parent.is_artifact_id_set());
    }

    #[test]
    fn test_parent_display() {
        assert_eq!(
            Parent::new().to_string(),
            "Parent (artifactId: null, groupId: null, version: null, relativePath: null)"
        );
        let mut parent = parent();
        parent.set_relative_path("../pom.xml");
        assert_eq!(
            parent.to_string(),
            "Parent (artifactId: parent, groupId: org.example, version: 1.0.0, relativePath: ../pom.xml)"
        );
        assert_eq!(parent.gav(), Some("org.example:parent:1.0.0".into()));
    }

    #[test]
    fn test_prerequisites_default() {
        let mut prerequisites = Prerequisites::new();
        assert_eq!(prerequisites.effective_maven(), DEFAULT_MAVEN_PREREQUISITE);
        assert!(!prerequisites.is_maven_set());
        assert!(Prerequisites::feature(Prerequisites::MAVEN).unwrap().unsettable);

        prerequisites.set_maven("3.6.3");
        assert_eq!(prerequisites.effective_maven(), "3.6.3");
        prerequisites.unset_maven();
        assert_eq!(prerequisites.effective_maven(), "2.0");
    }

    #[test]
    fn test_project_feature_table() {
        assert_eq!(Project::features().len(), 21);
        for code in 0..21 {
            assert!(Project::feature(code).is_ok(), "missing feature {code}");
        }
        assert!(matches!(
            Project::feature(21),
            Err(PomError::UnknownFeature {
                element: "Project",
                code: 21
            })
        ));
        assert_eq!(Project::feature(Project::BUILD).unwrap().kind, FeatureKind::Child);
        assert_eq!(Project::feature(Project::MODULES).unwrap().kind, FeatureKind::List);
        assert_eq!(
            Project::feature_by_name("dependencyManagement").map(|f| f.code),
            Some(Project::DEPENDENCY_MANAGEMENT)
        );
    }

    #[test]
    fn test_project_inherits_from_parent() {
        let mut project = Project::new();
        project.set_artifact_id("child");
        assert!(project.effective_group_id().is_none());

        project.set_parent(parent());
        assert_eq!(project.effective_group_id(), Some("org.example"));
        assert_eq!(project.effective_version(), Some("1.0.0"));

        project.set_version("2.0.0");
        assert_eq!(project.effective_version(), Some("2.0.0"));
        assert_eq!(project.effective_packaging(), "jar");
    }

    #[test]
    fn test_project_reflective_child() {
        let mut project = Project::new();
        project
            .set(Project::PARENT, Value::Node(Box::new(PomNode::Parent(parent()))))
            .unwrap();
        assert_eq!(project.parent(), Some(&parent()));
        assert!(project.is_set(Project::PARENT).unwrap());

        let err = project
            .set(Project::SCM, Value::Node(Box::new(PomNode::Parent(parent()))))
            .unwrap_err();
        assert!(matches!(
            err,
            PomError::TypeMismatch {
                feature: "scm",
                found: "Parent",
                ..
            }
        ));

        project.unset(Project::PARENT).unwrap();
        assert!(project.parent().is_none());
        assert_eq!(project.get(Project::PARENT).unwrap(), Value::Null);
    }

    #[test]
    fn test_modules_list() {
        let log = ChangeLog::shared();
        let mut project = Project::new();
        project.subscribe(log.clone());

        project.modules_mut().push("core".into());
        project.modules_mut().push("cli".into());
        project.modules_mut().push("core".into());
        assert_eq!(project.modules(), ["core", "cli", "core"]);

        let removed = project.modules_mut().clear();
        assert_eq!(removed.len(), 3);
        assert!(project.modules().is_empty());

        let kinds: Vec<_> = log.take().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationKind::Add,
                NotificationKind::Add,
                NotificationKind::Add,
                NotificationKind::Unset
            ]
        );
    }

    #[test]
    fn test_each_setter_fires_once() {
        let log = ChangeLog::shared();
        let mut project = Project::new();
        project.subscribe(log.clone());

        project.set_group_id("g");
        project.set_group_id("g2");
        project.unset_group_id();
        project.set_build(Build::new());

        let notifications = log.take();
        assert_eq!(notifications.len(), 4);
        assert_eq!(notifications[1].old_value, Value::from("g"));
        assert_eq!(notifications[1].new_value, Value::from("g2"));
        assert_eq!(notifications[2].kind, NotificationKind::Unset);
        assert_eq!(notifications[3].feature, Project::BUILD);
    }
}
