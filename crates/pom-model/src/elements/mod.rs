//! Typed POM element records.

mod build;
mod dependency;
mod distribution;
mod info;
mod profile;
mod project;
mod reporting;

pub use build::{Build, DEFAULT_PLUGIN_GROUP_ID, Plugin, PluginManagement};
pub use dependency::{Dependency, DependencyManagement, DependencyScope, Exclusion};
pub use distribution::{DistributionManagement, Relocation};
pub use info::{DEFAULT_SCM_TAG, IssueManagement, License, Scm};
pub use profile::{Activation, ActivationFile, ActivationOs, Profile};
pub use project::{DEFAULT_MAVEN_PREREQUISITE, Parent, Prerequisites, Project};
pub use reporting::{DEFAULT_REPORT_SET_ID, ReportPlugin, ReportSet, Reporting};
