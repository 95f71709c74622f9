//! Gitea REST wire types.
//!
//! Shapes mirror the JSON served under `/api/v1`; field names follow the
//! backend, not the neutral model. Translation into neutral structs happens
//! in the adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed page size for paginated traversals.
pub const PAGE_SIZE: u32 = 100;

/// Error body returned by Gitea on failed requests.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    #[serde(default)]
    pub message: String,
}

/// A Gitea user.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct User {
    /// User ID.
    #[serde(default)]
    pub id: i64,
    /// Login name.
    #[serde(default)]
    pub login: String,
    /// Display name.
    #[serde(default)]
    pub full_name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar_url: String,
}

/// A Gitea organisation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Organization {
    /// Organisation ID.
    #[serde(default)]
    pub id: i64,
    /// Organisation login.
    #[serde(default)]
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub full_name: String,
}

/// A Gitea repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    /// Repository ID.
    #[serde(default)]
    pub id: i64,
    /// Repository name.
    #[serde(default)]
    pub name: String,
    /// Owner.
    pub owner: Option<User>,
    /// Whether the repository is private.
    #[serde(default)]
    pub private: bool,
    /// Whether the repository is a fork.
    #[serde(default)]
    pub fork: bool,
    /// Whether the repository is archived.
    #[serde(default)]
    pub archived: bool,
    /// Web URL.
    #[serde(default)]
    pub html_url: String,
    /// HTTPS clone URL.
    #[serde(default)]
    pub clone_url: String,
    /// SSH clone URL.
    #[serde(default)]
    pub ssh_url: String,
    /// Stargazer count.
    #[serde(default)]
    pub stars_count: i64,
    /// Open issue count.
    #[serde(default)]
    pub open_issues_count: i64,
    /// Whether issues are enabled.
    #[serde(default)]
    pub has_issues: bool,
    /// Whether projects are enabled.
    #[serde(default)]
    pub has_projects: bool,
    /// Whether the wiki is enabled.
    #[serde(default)]
    pub has_wiki: bool,
}

/// A release attachment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attachment {
    /// Attachment ID.
    #[serde(default)]
    pub id: i64,
    /// File name.
    #[serde(default)]
    pub name: String,
    /// Download count.
    #[serde(default)]
    pub download_count: i64,
    /// Direct download URL.
    #[serde(default)]
    pub browser_download_url: String,
}

/// A Gitea release.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Release {
    /// Release ID.
    #[serde(default)]
    pub id: i64,
    /// Tag name.
    #[serde(default)]
    pub tag_name: String,
    /// Release title.
    #[serde(default)]
    pub name: String,
    /// Release notes.
    #[serde(default)]
    pub body: String,
    /// API URL.
    #[serde(default)]
    pub url: String,
    /// Whether the release is a draft.
    #[serde(default)]
    pub draft: bool,
    /// Whether the release is a pre-release.
    #[serde(default)]
    pub prerelease: bool,
    /// Attached assets.
    #[serde(default)]
    pub assets: Vec<Attachment>,
}

/// Head or base branch info of a pull request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrBranchInfo {
    /// Branch label.
    #[serde(default)]
    pub label: String,
    /// Ref name.
    #[serde(rename = "ref", default)]
    pub ref_name: String,
    /// Commit SHA.
    #[serde(default)]
    pub sha: String,
}

/// A Gitea pull request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    /// Pull request ID.
    #[serde(default)]
    pub id: i64,
    /// Pull request number.
    #[serde(default)]
    pub number: u64,
    /// API URL.
    #[serde(default)]
    pub url: String,
    /// Web URL.
    #[serde(default)]
    pub html_url: String,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub body: String,
    /// Lifecycle state.
    #[serde(default)]
    pub state: String,
    /// Author.
    pub user: Option<User>,
    /// Whether the backend considers it mergeable.
    #[serde(default)]
    pub mergeable: bool,
    /// Whether the pull request has been merged.
    #[serde(default)]
    pub merged: bool,
    /// Merge time.
    pub merged_at: Option<DateTime<Utc>>,
    /// Merge commit SHA.
    pub merge_commit_sha: Option<String>,
    /// Head branch.
    pub head: Option<PrBranchInfo>,
    /// Base branch.
    pub base: Option<PrBranchInfo>,
}

/// A label.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Label {
    /// Label ID.
    #[serde(default)]
    pub id: i64,
    /// Label name.
    #[serde(default)]
    pub name: String,
    /// Label color (hex).
    #[serde(default)]
    pub color: String,
    /// Label URL.
    #[serde(default)]
    pub url: String,
}

/// Marker object present when an issue is actually a pull request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestMeta {
    /// Whether the pull request has been merged.
    #[serde(default)]
    pub merged: bool,
}

/// A Gitea issue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Issue {
    /// Issue ID.
    #[serde(default)]
    pub id: i64,
    /// Issue number.
    #[serde(default)]
    pub number: u64,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub body: String,
    /// Lifecycle state.
    #[serde(default)]
    pub state: String,
    /// Reporter.
    pub user: Option<User>,
    /// Labels.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Assignees.
    #[serde(default)]
    pub assignees: Vec<User>,
    /// Present when the issue is a pull request.
    pub pull_request: Option<PullRequestMeta>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
    /// Close time.
    pub closed_at: Option<DateTime<Utc>>,
}

/// A commit inside a branch response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayloadCommit {
    /// Commit SHA.
    #[serde(default)]
    pub id: String,
    /// Commit message.
    #[serde(default)]
    pub message: String,
    /// Commit URL.
    #[serde(default)]
    pub url: String,
    /// Author.
    pub author: Option<PayloadUser>,
    /// Committer.
    pub committer: Option<PayloadUser>,
}

/// Author or committer identity inside a commit payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayloadUser {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Login name.
    #[serde(default)]
    pub username: String,
}

/// A branch with its tip commit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Branch {
    /// Branch name.
    #[serde(default)]
    pub name: String,
    /// Tip commit.
    pub commit: Option<PayloadCommit>,
    /// Whether the branch is protected.
    #[serde(default)]
    pub protected: bool,
}

/// A commit status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitStatus {
    /// Status ID.
    #[serde(default)]
    pub id: i64,
    /// Status state (pending, success, error, failure, warning).
    #[serde(default)]
    pub status: String,
    /// Status context.
    #[serde(default)]
    pub context: String,
    /// Status URL.
    #[serde(default)]
    pub url: String,
    /// Target URL.
    #[serde(default)]
    pub target_url: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// A registered webhook.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hook {
    /// Hook ID.
    #[serde(default)]
    pub id: i64,
    /// Hook type.
    #[serde(rename = "type", default)]
    pub hook_type: String,
    /// Hook configuration (url, content_type, secret).
    #[serde(default)]
    pub config: HashMap<String, String>,
    /// Events that trigger the hook.
    #[serde(default)]
    pub events: Vec<String>,
    /// Whether the hook is active.
    #[serde(default)]
    pub active: bool,
}

// Request options

/// Page and page-size query parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOptions {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Request to create a repository.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepoOption {
    /// Repository name.
    pub name: String,
    /// Whether the repository is private.
    pub private: bool,
}

/// Request to fork a repository.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateForkOption {
    /// Destination organisation; the user's namespace when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

/// Request to register a webhook.
#[derive(Debug, Clone, Serialize)]
pub struct CreateHookOption {
    /// Hook type.
    #[serde(rename = "type")]
    pub hook_type: String,
    /// Hook configuration (url, content_type, secret).
    pub config: HashMap<String, String>,
    /// Events that trigger the hook.
    pub events: Vec<String>,
    /// Whether the hook is active.
    pub active: bool,
}

/// Request to open a pull request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePullRequestOption {
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Head ref.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
    /// Base ref.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

/// Request to merge a pull request. Gitea uses capitalized JSON keys here.
#[derive(Debug, Clone, Serialize)]
pub struct MergePullRequestOption {
    /// Merge style (merge, rebase, rebase-merge, squash).
    #[serde(rename = "Do")]
    pub style: String,
    /// Title of the merge commit.
    #[serde(rename = "MergeTitleField")]
    pub title: String,
    /// Message of the merge commit.
    #[serde(rename = "MergeMessageField")]
    pub message: String,
}

/// Request to create an issue.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueOption {
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
}

/// Request to comment on an issue or pull request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueCommentOption {
    /// Comment body.
    pub body: String,
}

/// Issue list filters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListIssueOption {
    /// Page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// State filter (open, closed, all).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Keyword filter.
    #[serde(rename = "q", skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Pull request list filters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPullRequestsOption {
    /// Page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// State filter (open, closed, all).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Request to create a release.
#[derive(Debug, Clone, Serialize)]
pub struct CreateReleaseOption {
    /// Tag name.
    pub tag_name: String,
    /// Release title.
    pub name: String,
    /// Release notes.
    pub body: String,
    /// Whether the release is a draft.
    pub draft: bool,
    /// Whether the release is a pre-release.
    pub prerelease: bool,
}

/// Request to edit a release. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditReleaseOption {
    /// Tag name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    /// Release title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Release notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Whether the release is a draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// Whether the release is a pre-release.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
}
