//! Build section: plugins and plugin management.

use super::Dependency;
use crate::configuration::Configuration;

pom_element! {
    Plugin : "plugin" {
        text {
            GROUP_ID = 0 => group_id, set_group_id, unset_group_id, is_group_id_set : "groupId";
            ARTIFACT_ID = 1 => artifact_id, set_artifact_id, unset_artifact_id, is_artifact_id_set : "artifactId";
            VERSION = 2 => version, set_version, unset_version, is_version_set : "version";
            EXTENSIONS = 3 => extensions, set_extensions, unset_extensions, is_extensions_set : "extensions";
            INHERITED = 4 => inherited, set_inherited, unset_inherited, is_inherited_set : "inherited";
        }
        child {
            /// Plugin-specific configuration, kept as raw XML.
            CONFIGURATION = 5 => configuration, configuration_mut, set_configuration, unset_configuration, is_configuration_set : Configuration, "configuration";
        }
        list {
            /// Extra dependencies on the plugin's classpath.
            DEPENDENCIES = 6 => dependencies, dependencies_mut : Dependency, "dependencies" / "dependency";
        }
    }
}

pom_element! {
    PluginManagement : "pluginManagement" {
        text {}
        child {}
        list {
            PLUGINS = 0 => plugins, plugins_mut : Plugin, "plugins" / "plugin";
        }
    }
}

pom_element! {
    Build : "build" {
        text {
            DEFAULT_GOAL = 0 => default_goal, set_default_goal, unset_default_goal, is_default_goal_set : "defaultGoal";
            DIRECTORY = 1 => directory, set_directory, unset_directory, is_directory_set : "directory";
            FINAL_NAME = 2 => final_name, set_final_name, unset_final_name, is_final_name_set : "finalName";
        }
        child {
            PLUGIN_MANAGEMENT = 3 => plugin_management, plugin_management_mut, set_plugin_management, unset_plugin_management, is_plugin_management_set : PluginManagement, "pluginManagement";
        }
        list {
            PLUGINS = 4 => plugins, plugins_mut : Plugin, "plugins" / "plugin";
        }
    }
}

/// groupId assumed by Maven when a plugin omits it.
pub const DEFAULT_PLUGIN_GROUP_ID: &str = "org.apache.maven.plugins";

impl Plugin {
    pub fn with_coordinates(
        group_id: Option<&str>,
        artifact_id: impl Into<String>,
        version: Option<&str>,
    ) -> Self {
        let mut plugin = Self::new();
        if let Some(group_id) = group_id {
            plugin.set_group_id(group_id);
        }
        plugin.set_artifact_id(artifact_id);
        if let Some(version) = version {
            plugin.set_version(version);
        }
        plugin
    }

    /// groupId, falling back to [`DEFAULT_PLUGIN_GROUP_ID`].
    pub fn effective_group_id(&self) -> &str {
        self.group_id().unwrap_or(DEFAULT_PLUGIN_GROUP_ID)
    }

    /// "{groupId}:{artifactId}" using the effective groupId.
    pub fn key(&self) -> Option<String> {
        let artifact_id = self.artifact_id()?;
        Some(format!("{}:{}", self.effective_group_id(), artifact_id))
    }

    /// Configuration node, created empty on first use.
    pub fn configuration_or_default(&mut self) -> &mut Configuration {
        if !self.is_configuration_set() {
            self.set_configuration(Configuration::new());
        }
        match self.configuration_mut() {
            Some(configuration) => configuration,
            None => unreachable!("configuration was just attached"),
        }
    }
}

impl PluginManagement {
    pub fn find(&self, key: &str) -> Option<&Plugin> {
        self.plugins().iter().find(|p| p.key().as_deref() == Some(key))
    }
}

impl Build {
    pub fn find_plugin(&self, key: &str) -> Option<&Plugin> {
        self.plugins().iter().find(|p| p.key().as_deref() == Some(key))
    }
}
