//! The provider-neutral data model all backends map into.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An organisation the authenticated identity belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitOrganisation {
    /// Organisation login.
    pub login: String,
}

/// A repository on any backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitRepository {
    /// Backend identifier.
    pub id: i64,
    /// Repository name. Always populated, even when the backend's native
    /// object omits it — the caller supplies it alongside the fetched object.
    pub name: String,
    /// Owning user or organisation.
    pub organisation: String,
    /// Clone URL (HTTPS).
    pub clone_url: String,
    /// Web URL.
    pub html_url: String,
    /// SSH clone URL.
    pub ssh_url: String,
    /// Whether the repository is private.
    pub private: bool,
    /// Whether the repository is a fork.
    pub fork: bool,
    /// Whether the repository is archived.
    pub archived: bool,
    /// Whether issues are enabled.
    pub has_issues: bool,
    /// Whether projects are enabled.
    pub has_projects: bool,
    /// Whether the wiki is enabled.
    pub has_wiki: bool,
    /// Whether merge commits are allowed.
    pub allow_merge_commit: bool,
    /// Stargazer count.
    pub stars: i64,
    /// Open issue count.
    pub open_issue_count: i64,
}

/// A release with its assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitRelease {
    /// Backend identifier.
    pub id: i64,
    /// Release name.
    pub name: String,
    /// Tag the release points at.
    pub tag_name: String,
    /// Release notes.
    pub body: String,
    /// Release URL.
    pub url: String,
    /// Web URL.
    pub html_url: String,
    /// Whether the release is a pre-release.
    pub pre_release: bool,
    /// Sum of the download counts of all assets.
    pub download_count: i64,
    /// Release assets in backend order.
    pub assets: Vec<GitReleaseAsset>,
}

/// A single downloadable asset attached to a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitReleaseAsset {
    /// Backend identifier.
    pub id: i64,
    /// Asset name.
    pub name: String,
    /// Direct download URL.
    pub browser_download_url: String,
}

/// A pull request snapshot.
///
/// `number` is absent only before creation succeeds. The merge-state fields
/// are optional because the backend does not always know them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitPullRequest {
    /// Owning user or organisation.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Pull request number, assigned by the backend on creation.
    pub number: Option<u64>,
    /// Web URL.
    pub url: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Author of the pull request.
    pub author: Option<GitUser>,
    /// Whether the pull request has been merged.
    pub merged: Option<bool>,
    /// Whether the backend considers it mergeable.
    pub mergeable: Option<bool>,
    /// SHA of the merge commit, when merged.
    pub merge_commit_sha: Option<String>,
    /// Time of the merge, when merged.
    pub merged_at: Option<DateTime<Utc>>,
    /// SHA of the head commit.
    pub last_commit_sha: String,
    /// Lifecycle state as reported by the backend (open string enum).
    pub state: Option<String>,
}

/// Arguments for creating a pull request.
///
/// Empty optional fields mean "use the backend default" and are not forwarded.
#[derive(Debug, Clone, Default)]
pub struct GitPullRequestArguments {
    /// Target repository.
    pub repository: GitRepository,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Head ref.
    pub head: String,
    /// Base ref.
    pub base: String,
}

/// An issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitIssue {
    /// Issue number.
    pub number: Option<u64>,
    /// Web URL.
    pub url: String,
    /// Lifecycle state as reported by the backend.
    pub state: Option<String>,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Whether the issue is actually a pull request.
    pub is_pull_request: bool,
    /// Labels attached to the issue.
    pub labels: Vec<GitLabel>,
    /// Reporter.
    pub user: Option<GitUser>,
    /// Assignees.
    pub assignees: Vec<GitUser>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
    /// Close time.
    pub closed_at: Option<DateTime<Utc>>,
}

/// A label on an issue or pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitLabel {
    /// Label name.
    pub name: String,
    /// Label color (hex).
    pub color: String,
    /// Label URL.
    pub url: String,
}

/// A user on any backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitUser {
    /// Login name.
    pub login: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL.
    pub avatar_url: String,
    /// Profile URL.
    pub url: String,
}

/// A commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitCommit {
    /// Commit SHA.
    pub sha: String,
    /// Commit message.
    pub message: String,
    /// Author.
    pub author: Option<GitUser>,
    /// Committer.
    pub committer: Option<GitUser>,
    /// Web URL.
    pub url: String,
    /// Branch the commit was resolved on, when known.
    pub branch: String,
}

/// A branch with its tip commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitBranch {
    /// Branch name.
    pub name: String,
    /// Tip commit.
    pub commit: Option<GitCommit>,
    /// Whether the branch is protected.
    pub protected: bool,
}

/// One check reported against a commit SHA.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitCommitStatus {
    /// Backend identifier.
    pub id: String,
    /// Status context.
    pub context: String,
    /// Status URL.
    pub url: String,
    /// Target URL.
    pub target_url: String,
    /// Status state as reported by the backend.
    pub state: String,
    /// Human-readable description.
    pub description: String,
}

/// Arguments for registering a webhook.
#[derive(Debug, Clone, Default)]
pub struct GitWebhookArguments {
    /// Owning user or organisation.
    pub owner: String,
    /// Target repository.
    pub repo: GitRepository,
    /// URL the backend should deliver payloads to.
    pub url: String,
    /// Shared secret, empty for none.
    pub secret: String,
}

/// File content fetched from a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitFileContent {
    /// File name.
    pub name: String,
    /// Path within the repository.
    pub path: String,
    /// Content, base64 encoded.
    pub content: String,
    /// Git SHA of the blob.
    pub sha: String,
    /// Entry type (file, dir, symlink).
    #[serde(rename = "type")]
    pub entry_type: String,
}

/// A pending collaborator invitation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitInvitation {
    /// Backend identifier.
    pub id: i64,
    /// Repository the invitation is for.
    pub repo: String,
    /// Invitee login.
    pub invitee: String,
}

/// A project board attached to a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitProject {
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
}

/// Arguments for listing commits.
#[derive(Debug, Clone, Default)]
pub struct ListCommitsArguments {
    /// Ref to list from.
    pub sha: String,
    /// Page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
}

/// Keeps only the issues closed at or after `since`.
///
/// Backends without server-side time filtering return all closed issues; the
/// closure-timestamp cut happens client-side after retrieval.
pub fn filter_issues_closed_since(issues: Vec<GitIssue>, since: DateTime<Utc>) -> Vec<GitIssue> {
    issues
        .into_iter()
        .filter(|issue| issue.closed_at.map(|t| t >= since).unwrap_or(false))
        .collect()
}
