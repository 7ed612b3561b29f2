//! Descriptive project metadata: licenses, source control and issue
//! tracking.

pom_element! {
    License : "license" {
        text {
            NAME = 0 => name, set_name, unset_name, is_name_set : "name";
            URL = 1 => url, set_url, unset_url, is_url_set : "url";
            /// `repo` or `manual`.
            DISTRIBUTION = 2 => distribution, set_distribution, unset_distribution, is_distribution_set : "distribution";
            COMMENTS = 3 => comments, set_comments, unset_comments, is_comments_set : "comments";
        }
        child {}
        list {}
    }
}

pom_element! {
    /// Source control coordinates.
    Scm : "scm" {
        text {
            CONNECTION = 0 => connection, set_connection, unset_connection, is_connection_set : "connection";
            DEVELOPER_CONNECTION = 1 => developer_connection, set_developer_connection, unset_developer_connection, is_developer_connection_set : "developerConnection";
            TAG = 2 => tag, set_tag, unset_tag, is_tag_set : "tag" unsettable;
            URL = 3 => url, set_url, unset_url, is_url_set : "url";
        }
        child {}
        list {}
    }
}

pom_element! {
    IssueManagement : "issueManagement" {
        text {
            SYSTEM = 0 => system, set_system, unset_system, is_system_set : "system";
            URL = 1 => url, set_url, unset_url, is_url_set : "url";
        }
        child {}
        list {}
    }
}

/// Tag Maven reports when `<scm><tag>` is omitted.
pub const DEFAULT_SCM_TAG: &str = "HEAD";

impl Scm {
    pub fn effective_tag(&self) -> &str {
        self.tag().unwrap_or(DEFAULT_SCM_TAG)
    }
}
