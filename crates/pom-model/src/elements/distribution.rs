//! `distributionManagement` and artifact relocation.

pom_element! {
    /// New coordinates of an artifact that moved.
    Relocation : "relocation" {
        text {
            GROUP_ID = 0 => group_id, set_group_id, unset_group_id, is_group_id_set : "groupId";
            ARTIFACT_ID = 1 => artifact_id, set_artifact_id, unset_artifact_id, is_artifact_id_set : "artifactId";
            VERSION = 2 => version, set_version, unset_version, is_version_set : "version";
            /// Message shown to users of the old coordinates.
            MESSAGE = 3 => message, set_message, unset_message, is_message_set : "message";
        }
        child {}
        list {}
    }
}

pom_element! {
    DistributionManagement : "distributionManagement" {
        text {
            DOWNLOAD_URL = 0 => download_url, set_download_url, unset_download_url, is_download_url_set : "downloadUrl";
            STATUS = 1 => status, set_status, unset_status, is_status_set : "status";
        }
        child {
            RELOCATION = 2 => relocation, relocation_mut, set_relocation, unset_relocation, is_relocation_set : Relocation, "relocation";
        }
        list {}
    }
}

impl DistributionManagement {
    pub fn is_relocated(&self) -> bool {
        self.is_relocation_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Reflective;
    use crate::value::{PomNode, Value};

    #[test]
    fn test_relocation_accessors() {
        let mut relocation = Relocation::new();
        relocation.set_group_id("org.new");
        relocation.set_message("moved to org.new");
        assert_eq!(relocation.group_id(), Some("org.new"));
        assert!(relocation.artifact_id().is_none());
        assert_eq!(
            relocation.to_string(),
            "Relocation (groupId: org.new, artifactId: null, version: null, message: moved to org.new)"
        );
    }

    #[test]
    fn test_distribution_relocation_child() {
        let mut management = DistributionManagement::new();
        assert!(!management.is_relocated());

        let mut relocation = Relocation::new();
        relocation.set_artifact_id("renamed");
        management
            .set(
                DistributionManagement::RELOCATION,
                Value::Node(Box::new(PomNode::Relocation(relocation.clone()))),
            )
            .unwrap();
        assert!(management.is_relocated());
        assert_eq!(management.relocation(), Some(&relocation));

        management
            .relocation_mut()
            .unwrap()
            .set_version("2.0");
        assert_eq!(
            management.relocation().and_then(Relocation::version),
            Some("2.0")
        );

        let detached = management.unset_relocation().unwrap();
        assert_eq!(detached.artifact_id(), Some("renamed"));
        assert!(!management.is_relocated());
    }

    #[test]
    fn test_unknown_feature() {
        let mut management = DistributionManagement::new();
        assert!(management.get(3).is_err());
        assert!(management.set(3, Value::Null).is_err());
        assert!(management.unset(42).is_err());
        assert!(management.is_set(42).is_err());
    }
}
