//! Site reporting: report plugins and their report sets.

use crate::configuration::Configuration;

pom_element! {
    /// A named group of reports produced by one report plugin.
    ReportSet : "reportSet" {
        text {
            ID = 0 => id, set_id, unset_id, is_id_set : "id" unsettable;
            INHERITED = 1 => inherited, set_inherited, unset_inherited, is_inherited_set : "inherited";
        }
        child {
            CONFIGURATION = 2 => configuration, configuration_mut, set_configuration, unset_configuration, is_configuration_set : Configuration, "configuration";
        }
        list {
            /// Report goal names, e.g. `javadoc` or `test-javadoc`.
            REPORTS = 3 => reports, reports_mut : String, "reports" / "report";
        }
    }
}

pom_element! {
    ReportPlugin : "plugin" {
        text {
            GROUP_ID = 0 => group_id, set_group_id, unset_group_id, is_group_id_set : "groupId";
            ARTIFACT_ID = 1 => artifact_id, set_artifact_id, unset_artifact_id, is_artifact_id_set : "artifactId";
            VERSION = 2 => version, set_version, unset_version, is_version_set : "version";
            INHERITED = 3 => inherited, set_inherited, unset_inherited, is_inherited_set : "inherited";
        }
        child {
            CONFIGURATION = 4 => configuration, configuration_mut, set_configuration, unset_configuration, is_configuration_set : Configuration, "configuration";
        }
        list {
            REPORT_SETS = 5 => report_sets, report_sets_mut : ReportSet, "reportSets" / "reportSet";
        }
    }
}

pom_element! {
    Reporting : "reporting" {
        text {
            EXCLUDE_DEFAULTS = 0 => exclude_defaults, set_exclude_defaults, unset_exclude_defaults, is_exclude_defaults_set : "excludeDefaults";
            OUTPUT_DIRECTORY = 1 => output_directory, set_output_directory, unset_output_directory, is_output_directory_set : "outputDirectory";
        }
        child {}
        list {
            PLUGINS = 2 => plugins, plugins_mut : ReportPlugin, "plugins" / "plugin";
        }
    }
}

/// Report set id Maven uses when `<id>` is omitted.
pub const DEFAULT_REPORT_SET_ID: &str = "default";

impl ReportSet {
    pub fn effective_id(&self) -> &str {
        self.id().unwrap_or(DEFAULT_REPORT_SET_ID)
    }
}

impl ReportPlugin {
    /// Report set with the given effective id.
    pub fn report_set(&self, id: &str) -> Option<&ReportSet> {
        self.report_sets().iter().find(|set| set.effective_id() == id)
    }
}
