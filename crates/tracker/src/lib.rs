//! Jira Cloud REST client for Jirabot.
//!
//! Implements the `Tracker` trait against the Jira Cloud REST API (v2)
//! using basic auth (login email + API token). The client is read-only
//! shared state: all methods take `&self` and it is safe to hand the same
//! instance to every tool behind an `Arc`.

use async_trait::async_trait;
use jirabot_core::error::TrackerError;
use jirabot_core::tracker::{
    CreatedIssue, IssueDetails, IssueSummary, Project, Tracker, UserInfo,
};
use serde::Deserialize;
use tracing::{debug, warn};

/// A Jira Cloud REST client.
pub struct JiraClient {
    base_url: String,
    email: String,
    api_token: String,
    client: reqwest::Client,
}

impl JiraClient {
    /// Create a new client for the given Jira Cloud site.
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            email: email.into(),
            api_token: api_token.into(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/api/2/{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .basic_auth(&self.email, Some(&self.api_token))
            .header("Accept", "application/json")
    }

    /// Map transport failures to the tracker error taxonomy.
    fn transport_error(e: reqwest::Error) -> TrackerError {
        if e.is_timeout() {
            TrackerError::Timeout(e.to_string())
        } else {
            TrackerError::Network(e.to_string())
        }
    }

    /// Map a non-success HTTP response to a tracker error.
    async fn api_error(response: reqwest::Response) -> TrackerError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!(status, body = %body, "Jira returned error");
        match status {
            401 | 403 => TrackerError::Auth("Invalid Jira credentials or insufficient permissions".into()),
            404 => TrackerError::NotFound(body),
            _ => TrackerError::Api {
                status_code: status,
                message: body,
            },
        }
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, TrackerError> {
        let response = builder.send().await.map_err(Self::transport_error)?;
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(response)
    }
}

#[async_trait]
impl Tracker for JiraClient {
    async fn current_user(&self) -> Result<UserInfo, TrackerError> {
        let response = self.send(self.request(reqwest::Method::GET, "myself")).await?;
        let user: ApiUser = response
            .json()
            .await
            .map_err(|e| TrackerError::InvalidResponse(e.to_string()))?;
        Ok(UserInfo {
            display_name: user.display_name,
        })
    }

    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError> {
        let response = self.send(self.request(reqwest::Method::GET, "project")).await?;
        let projects: Vec<ApiProject> = response
            .json()
            .await
            .map_err(|e| TrackerError::InvalidResponse(e.to_string()))?;
        Ok(projects
            .into_iter()
            .map(|p| Project {
                key: p.key,
                name: p.name,
            })
            .collect())
    }

    async fn search(&self, jql: &str, limit: u32) -> Result<Vec<IssueSummary>, TrackerError> {
        debug!(jql, limit, "Running JQL search");
        let response = self
            .send(
                self.request(reqwest::Method::GET, "search").query(&[
                    ("jql", jql),
                    ("maxResults", &limit.to_string()),
                    ("fields", "summary,status,priority"),
                ]),
            )
            .await?;

        let results: ApiSearchResults = response
            .json()
            .await
            .map_err(|e| TrackerError::InvalidResponse(e.to_string()))?;

        Ok(results
            .issues
            .into_iter()
            .map(|issue| issue.into_summary())
            .collect())
    }

    async fn get_issue(&self, key: &str) -> Result<IssueDetails, TrackerError> {
        let response = self
            .send(
                self.request(reqwest::Method::GET, &format!("issue/{key}")).query(&[(
                    "fields",
                    "summary,status,priority,assignee,duedate,description",
                )]),
            )
            .await?;

        let issue: ApiIssue = response
            .json()
            .await
            .map_err(|e| TrackerError::InvalidResponse(e.to_string()))?;
        Ok(issue.into_details())
    }

    async fn set_status(&self, key: &str, status_name: &str) -> Result<(), TrackerError> {
        // Jira has no direct status setter: fetch the transitions available
        // from the current status, find the one landing on the requested
        // status, then post its id.
        let response = self
            .send(self.request(reqwest::Method::GET, &format!("issue/{key}/transitions")))
            .await?;

        let transitions: ApiTransitions = response
            .json()
            .await
            .map_err(|e| TrackerError::InvalidResponse(e.to_string()))?;

        let transition_id = find_transition(&transitions.transitions, status_name)
            .ok_or_else(|| TrackerError::Api {
                status_code: 400,
                message: format!(
                    "No transition to status '{status_name}' available for {key}. Available: {}",
                    transitions
                        .transitions
                        .iter()
                        .map(|t| t.to.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })?;

        debug!(key, status_name, transition_id, "Posting status transition");
        self.send(
            self.request(reqwest::Method::POST, &format!("issue/{key}/transitions"))
                .json(&serde_json::json!({ "transition": { "id": transition_id } })),
        )
        .await?;
        Ok(())
    }

    async fn update_field(
        &self,
        key: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<(), TrackerError> {
        self.send(
            self.request(reqwest::Method::PUT, &format!("issue/{key}"))
                .json(&serde_json::json!({ "fields": { field: value } })),
        )
        .await?;
        Ok(())
    }

    async fn create_issue(
        &self,
        project_key: &str,
        summary: &str,
        issue_type: &str,
        description: &str,
    ) -> Result<CreatedIssue, TrackerError> {
        let body = serde_json::json!({
            "fields": {
                "project": { "key": project_key },
                "summary": summary,
                "description": description,
                "issuetype": { "name": issue_type },
            }
        });

        let response = self
            .send(self.request(reqwest::Method::POST, "issue").json(&body))
            .await?;

        let created: ApiCreatedIssue = response
            .json()
            .await
            .map_err(|e| TrackerError::InvalidResponse(e.to_string()))?;
        Ok(CreatedIssue { key: created.key })
    }
}

/// Find the transition whose target status matches `status_name`,
/// case-insensitively. Falls back to matching the transition's own name,
/// since some workflows name them after the destination.
fn find_transition<'a>(transitions: &'a [ApiTransition], status_name: &str) -> Option<&'a str> {
    let wanted = status_name.to_lowercase();
    transitions
        .iter()
        .find(|t| t.to.name.to_lowercase() == wanted || t.name.to_lowercase() == wanted)
        .map(|t| t.id.as_str())
}

// --- Jira API types (internal) ---

#[derive(Debug, Deserialize)]
struct ApiUser {
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ApiProject {
    key: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiSearchResults {
    #[serde(default)]
    issues: Vec<ApiIssue>,
}

#[derive(Debug, Deserialize)]
struct ApiIssue {
    key: String,
    fields: ApiIssueFields,
}

#[derive(Debug, Deserialize)]
struct ApiIssueFields {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    status: Option<ApiNamed>,
    #[serde(default)]
    priority: Option<ApiNamed>,
    #[serde(default)]
    assignee: Option<ApiAssignee>,
    #[serde(default, rename = "duedate")]
    due_date: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiAssignee {
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ApiTransitions {
    #[serde(default)]
    transitions: Vec<ApiTransition>,
}

#[derive(Debug, Deserialize)]
struct ApiTransition {
    id: String,
    #[serde(default)]
    name: String,
    to: ApiNamed,
}

#[derive(Debug, Deserialize)]
struct ApiCreatedIssue {
    key: String,
}

impl ApiIssue {
    fn into_summary(self) -> IssueSummary {
        IssueSummary {
            key: self.key,
            summary: self.fields.summary,
            status: named_or_none(self.fields.status),
            priority: named_or_none(self.fields.priority),
        }
    }

    fn into_details(self) -> IssueDetails {
        IssueDetails {
            key: self.key,
            summary: self.fields.summary,
            status: named_or_none(self.fields.status),
            priority: named_or_none(self.fields.priority),
            assignee: self.fields.assignee.map(|a| a.display_name),
            due_date: self.fields.due_date,
            description: self.fields.description,
        }
    }
}

fn named_or_none(named: Option<ApiNamed>) -> String {
    named.map(|n| n.name).unwrap_or_else(|| "None".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let client = JiraClient::new("https://example.atlassian.net/", "pm@example.com", "tok");
        assert_eq!(
            client.url("issue/KAN-1"),
            "https://example.atlassian.net/rest/api/2/issue/KAN-1"
        );
    }

    #[test]
    fn parse_myself_response() {
        let data = r#"{"accountId": "abc123", "displayName": "Dana PM", "active": true}"#;
        let user: ApiUser = serde_json::from_str(data).unwrap();
        assert_eq!(user.display_name, "Dana PM");
    }

    #[test]
    fn parse_project_list() {
        let data = r#"[
            {"id": "10000", "key": "KAN", "name": "Kanban Project"},
            {"id": "10001", "key": "OPS", "name": "Operations"}
        ]"#;
        let projects: Vec<ApiProject> = serde_json::from_str(data).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].key, "KAN");
        assert_eq!(projects[1].name, "Operations");
    }

    #[test]
    fn parse_search_results() {
        let data = r#"{
            "total": 2,
            "issues": [
                {"key": "KAN-1", "fields": {
                    "summary": "Fix login bug",
                    "status": {"name": "In Progress"},
                    "priority": {"name": "High"}
                }},
                {"key": "KAN-2", "fields": {
                    "summary": "Update docs",
                    "status": {"name": "To Do"},
                    "priority": null
                }}
            ]
        }"#;
        let results: ApiSearchResults = serde_json::from_str(data).unwrap();
        assert_eq!(results.issues.len(), 2);

        let first = results.issues.into_iter().next().unwrap().into_summary();
        assert_eq!(first.key, "KAN-1");
        assert_eq!(first.status, "In Progress");
        assert_eq!(first.priority, "High");
    }

    #[test]
    fn missing_priority_renders_as_none() {
        let data = r#"{"key": "KAN-2", "fields": {"summary": "Update docs", "status": {"name": "To Do"}}}"#;
        let issue: ApiIssue = serde_json::from_str(data).unwrap();
        let summary = issue.into_summary();
        assert_eq!(summary.priority, "None");
    }

    #[test]
    fn parse_issue_details_with_nulls() {
        let data = r#"{
            "key": "KAN-3",
            "fields": {
                "summary": "Spike: auth options",
                "status": {"name": "Done"},
                "priority": {"name": "Low"},
                "assignee": null,
                "duedate": null,
                "description": null
            }
        }"#;
        let issue: ApiIssue = serde_json::from_str(data).unwrap();
        let details = issue.into_details();
        assert_eq!(details.key, "KAN-3");
        assert!(details.assignee.is_none());
        assert!(details.due_date.is_none());
        assert!(details.description.is_none());
    }

    #[test]
    fn parse_issue_details_fully_populated() {
        let data = r#"{
            "key": "KAN-4",
            "fields": {
                "summary": "Ship v2",
                "status": {"name": "In Progress"},
                "priority": {"name": "Highest"},
                "assignee": {"accountId": "a1", "displayName": "Sam Dev"},
                "duedate": "2026-09-04",
                "description": "Release checklist"
            }
        }"#;
        let issue: ApiIssue = serde_json::from_str(data).unwrap();
        let details = issue.into_details();
        assert_eq!(details.assignee.as_deref(), Some("Sam Dev"));
        assert_eq!(details.due_date.as_deref(), Some("2026-09-04"));
        assert_eq!(details.description.as_deref(), Some("Release checklist"));
    }

    #[test]
    fn find_transition_matches_target_status_case_insensitively() {
        let data = r#"{
            "transitions": [
                {"id": "11", "name": "Start Progress", "to": {"name": "In Progress"}},
                {"id": "31", "name": "Done", "to": {"name": "Done"}}
            ]
        }"#;
        let transitions: ApiTransitions = serde_json::from_str(data).unwrap();
        assert_eq!(find_transition(&transitions.transitions, "in progress"), Some("11"));
        assert_eq!(find_transition(&transitions.transitions, "Done"), Some("31"));
        assert_eq!(find_transition(&transitions.transitions, "Blocked"), None);
    }

    #[test]
    fn find_transition_falls_back_to_transition_name() {
        let data = r#"{
            "transitions": [
                {"id": "21", "name": "Reopen", "to": {"name": "To Do"}}
            ]
        }"#;
        let transitions: ApiTransitions = serde_json::from_str(data).unwrap();
        assert_eq!(find_transition(&transitions.transitions, "reopen"), Some("21"));
    }

    #[test]
    fn parse_created_issue() {
        let data = r#"{"id": "10042", "key": "KAN-42", "self": "https://example.atlassian.net/rest/api/2/issue/10042"}"#;
        let created: ApiCreatedIssue = serde_json::from_str(data).unwrap();
        assert_eq!(created.key, "KAN-42");
    }
}
