//! Build profiles and their activation triggers.

use super::Dependency;

pom_element! {
    /// File-based activation: the profile is active when `exists` is present
    /// or `missing` is absent.
    ActivationFile : "file" {
        text {
            MISSING = 0 => missing, set_missing, unset_missing, is_missing_set : "missing";
            EXISTS = 1 => exists, set_exists, unset_exists, is_exists_set : "exists";
        }
        child {}
        list {}
    }
}

pom_element! {
    /// Operating-system activation.
    ActivationOs : "os" {
        text {
            NAME = 0 => name, set_name, unset_name, is_name_set : "name";
            FAMILY = 1 => family, set_family, unset_family, is_family_set : "family";
            ARCH = 2 => arch, set_arch, unset_arch, is_arch_set : "arch";
            VERSION = 3 => version, set_version, unset_version, is_version_set : "version";
        }
        child {}
        list {}
    }
}

pom_element! {
    Activation : "activation" {
        text {
            ACTIVE_BY_DEFAULT = 0 => active_by_default, set_active_by_default, unset_active_by_default, is_active_by_default_set : "activeByDefault";
            JDK = 1 => jdk, set_jdk, unset_jdk, is_jdk_set : "jdk";
        }
        child {
            OS = 2 => os, os_mut, set_os, unset_os, is_os_set : ActivationOs, "os";
            FILE = 3 => file, file_mut, set_file, unset_file, is_file_set : ActivationFile, "file";
        }
        list {}
    }
}

pom_element! {
    Profile : "profile" {
        text {
            ID = 0 => id, set_id, unset_id, is_id_set : "id";
        }
        child {
            ACTIVATION = 1 => activation, activation_mut, set_activation, unset_activation, is_activation_set : Activation, "activation";
        }
        list {
            DEPENDENCIES = 2 => dependencies, dependencies_mut : Dependency, "dependencies" / "dependency";
        }
    }
}

impl Activation {
    /// `activeByDefault` parsed as a boolean; anything but `true` is false.
    pub fn is_active_by_default(&self) -> bool {
        self.active_by_default()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }
}
