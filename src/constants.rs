/// Jira issue type names
///
/// Matching is exact and case-sensitive, mirroring what Jira sends in
/// `issue.fields.issuetype.name`.
pub mod issue_types {
    /// Only events for this issue type trigger test-case generation
    pub const STORY: &str = "Story";
    /// Issue type used for the generated test-case issue
    pub const TEST: &str = "Test";
}

/// Compiled-in defaults (overridable through configuration)
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 6000;
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
    pub const OPENAI_MODEL: &str = "gpt-4o-mini";
    pub const JIRA_BASE_URL: &str = "http://localhost:8080/";
    pub const JIRA_PROJECT_KEY: &str = "PROJ";
}

/// Path of the Jira issue-creation endpoint, relative to the base URL
pub const JIRA_CREATE_ISSUE_PATH: &str = "rest/api/3/issue";

/// Route the tracker posts webhook deliveries to
pub const WEBHOOK_ROUTE: &str = "/jira-webhook";
