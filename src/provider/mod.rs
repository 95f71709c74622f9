//! The provider-neutral capability contract every backend implements.
//!
//! Callers consume [`GitProvider`] without knowing which backend is active;
//! behavior differences are expressed through [`ProviderKind`] and the
//! [`Capabilities`] descriptor rather than per-feature boolean probes.

use crate::errors::ProviderResult;
use crate::types::*;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt;

/// The backend product behind an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// GitHub (cloud or enterprise).
    GitHub,
    /// Gitea.
    Gitea,
    /// Bitbucket Cloud.
    BitbucketCloud,
    /// Bitbucket Server.
    BitbucketServer,
    /// Gerrit.
    Gerrit,
}

impl ProviderKind {
    /// Stable lowercase identifier for configuration and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::Gitea => "gitea",
            Self::BitbucketCloud => "bitbucketcloud",
            Self::BitbucketServer => "bitbucketserver",
            Self::Gerrit => "gerrit",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported-operation flags for one adapter instance.
///
/// Fixed at construction; callers branch on these instead of probing each
/// operation for the not-supported sentinel.
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    /// Backend tracks issues.
    pub issues: bool,
    /// Backend can list registered webhooks.
    pub webhook_listing: bool,
    /// Backend can update a registered webhook.
    pub webhook_update: bool,
    /// Backend can edit a pull request's title/body after creation.
    pub pull_request_update: bool,
    /// Backend exposes the commits of a pull request.
    pub pull_request_commits: bool,
    /// Backend can report a new commit status.
    pub commit_status_update: bool,
    /// Backend can serve file contents.
    pub content_retrieval: bool,
    /// Backend manages collaborator invitations.
    pub collaborator_invitations: bool,
    /// Backend can list commits of a repository.
    pub commit_listing: bool,
    /// Backend can attach labels in bulk.
    pub bulk_labels: bool,
    /// Backend can rename a repository.
    pub repository_rename: bool,
}

/// The provider-neutral contract: every operation a backend may expose.
///
/// Operations follow a uniform shape, `(owner_or_org, repo_name, ...)` to a
/// `ProviderResult`. Backends that cannot perform an operation return the
/// not-supported sentinel so callers can distinguish "nothing to do" from
/// "cannot do this".
#[async_trait]
pub trait GitProvider: Send + Sync {
    // Identity and static capability queries

    /// The backend product this adapter talks to.
    fn kind(&self) -> ProviderKind;

    /// The supported-operation descriptor for this adapter instance.
    fn capabilities(&self) -> &Capabilities;

    /// The server base URL.
    fn server_url(&self) -> &str;

    /// The username of the authenticated identity.
    fn current_username(&self) -> &str;

    /// Human-readable label for the server.
    fn label(&self) -> String;

    /// Web URL of an issue or pull request.
    fn issue_url(&self, org: &str, name: &str, number: u64, is_pull: bool) -> String;

    /// Archive download URL for a branch.
    fn branch_archive_url(&self, org: &str, name: &str, branch: &str) -> String;

    /// Web URL where an operator can mint an API token.
    fn access_token_url(&self) -> String;

    /// Local path webhook payloads are delivered to.
    fn webhook_path(&self) -> &'static str;

    /// Whether a personal fork is needed before opening a pull request.
    fn should_fork_for_pull_request(
        &self,
        original_owner: &str,
        repo_name: &str,
        username: &str,
    ) -> bool;

    // Organisations and repositories

    /// Lists the organisations the authenticated identity belongs to.
    async fn list_organisations(&self) -> ProviderResult<Vec<GitOrganisation>>;

    /// Lists repositories owned by `org`, or by the authenticated user when
    /// `org` is empty.
    async fn list_repositories(&self, org: &str) -> ProviderResult<Vec<GitRepository>>;

    /// Creates a repository under `org`, or under the user when `org` is empty.
    async fn create_repository(
        &self,
        org: &str,
        name: &str,
        private: bool,
    ) -> ProviderResult<GitRepository>;

    /// Fetches a repository.
    async fn get_repository(&self, org: &str, name: &str) -> ProviderResult<GitRepository>;

    /// Deletes a repository.
    async fn delete_repository(&self, org: &str, name: &str) -> ProviderResult<()>;

    /// Initiates a fork, waiting for eventually-consistent backends to
    /// materialize it.
    async fn fork_repository(
        &self,
        original_org: &str,
        name: &str,
        destination_org: &str,
    ) -> ProviderResult<GitRepository>;

    /// Renames a repository.
    async fn rename_repository(
        &self,
        org: &str,
        name: &str,
        new_name: &str,
    ) -> ProviderResult<GitRepository>;

    /// Succeeds when `name` is free under `org`; "already exists" error when
    /// the repository is present.
    async fn validate_repository_name(&self, org: &str, name: &str) -> ProviderResult<()>;

    // Webhooks

    /// Registers a webhook unless one already targets the same URL.
    async fn create_webhook(&self, args: &GitWebhookArguments) -> ProviderResult<()>;

    /// Lists the webhooks registered on a repository.
    async fn list_webhooks(
        &self,
        owner: &str,
        repo: &str,
    ) -> ProviderResult<Vec<GitWebhookArguments>>;

    /// Updates a registered webhook.
    async fn update_webhook(&self, args: &GitWebhookArguments) -> ProviderResult<()>;

    // Pull requests

    /// Opens a pull request. Only non-empty optional fields are forwarded.
    async fn create_pull_request(
        &self,
        args: &GitPullRequestArguments,
    ) -> ProviderResult<GitPullRequest>;

    /// Edits the title/body of an existing pull request.
    async fn update_pull_request(
        &self,
        args: &GitPullRequestArguments,
        number: u64,
    ) -> ProviderResult<GitPullRequest>;

    /// Fetches the current backend state of `pr` and returns a fresh
    /// snapshot. Requires `pr.number`.
    async fn update_pull_request_status(
        &self,
        pr: &GitPullRequest,
    ) -> ProviderResult<GitPullRequest>;

    /// Fetches a pull request by number.
    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &GitRepository,
        number: u64,
    ) -> ProviderResult<GitPullRequest>;

    /// Lists all open pull requests, traversing every page in order.
    async fn list_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> ProviderResult<Vec<GitPullRequest>>;

    /// Lists the commits of a pull request; empty when the backend has no
    /// diff-commits endpoint.
    async fn get_pull_request_commits(
        &self,
        owner: &str,
        repo: &GitRepository,
        number: u64,
    ) -> ProviderResult<Vec<GitCommit>>;

    /// Merges a pull request. Requires `pr.number`.
    async fn merge_pull_request(&self, pr: &GitPullRequest, message: &str) -> ProviderResult<()>;

    /// The first non-empty status state reported against the pull request's
    /// last commit. Requires a non-empty `pr.last_commit_sha`.
    async fn pull_request_last_commit_status(&self, pr: &GitPullRequest)
        -> ProviderResult<String>;

    /// Comments on a pull request. Requires `pr.number`.
    async fn add_pull_request_comment(
        &self,
        pr: &GitPullRequest,
        comment: &str,
    ) -> ProviderResult<()>;

    // Issues

    /// Fetches an issue; `Ok(None)` when the backend reports it missing.
    async fn get_issue(&self, org: &str, name: &str, number: u64)
        -> ProviderResult<Option<GitIssue>>;

    /// Creates an issue.
    async fn create_issue(&self, owner: &str, repo: &str, issue: &GitIssue)
        -> ProviderResult<GitIssue>;

    /// Comments on an issue.
    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        comment: &str,
    ) -> ProviderResult<()>;

    /// Searches issues by keyword.
    async fn search_issues(&self, org: &str, name: &str, filter: &str)
        -> ProviderResult<Vec<GitIssue>>;

    /// Closed issues whose closure time is at or after `since`.
    async fn search_issues_closed_since(
        &self,
        org: &str,
        name: &str,
        since: DateTime<Utc>,
    ) -> ProviderResult<Vec<GitIssue>>;

    /// Attaches labels to an issue or pull request.
    async fn add_labels_to_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> ProviderResult<()>;

    // Commit statuses and commits

    /// All statuses reported against a commit SHA.
    async fn list_commit_status(
        &self,
        org: &str,
        repo: &str,
        sha: &str,
    ) -> ProviderResult<Vec<GitCommitStatus>>;

    /// Reports a new commit status.
    async fn update_commit_status(
        &self,
        org: &str,
        repo: &str,
        sha: &str,
        status: &GitCommitStatus,
    ) -> ProviderResult<GitCommitStatus>;

    /// Lists commits of a repository.
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        args: &ListCommitsArguments,
    ) -> ProviderResult<Vec<GitCommit>>;

    // Releases

    /// Lists releases.
    async fn list_releases(&self, org: &str, name: &str) -> ProviderResult<Vec<GitRelease>>;

    /// Fetches the release for a tag.
    async fn get_release(&self, org: &str, name: &str, tag: &str) -> ProviderResult<GitRelease>;

    /// The most recent release; `Ok(None)` when there is none.
    async fn get_latest_release(&self, org: &str, name: &str)
        -> ProviderResult<Option<GitRelease>>;

    /// Creates the release for `tag` when absent; otherwise edits it, filling
    /// only fields the backend currently has empty.
    async fn update_release(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
        info: &GitRelease,
    ) -> ProviderResult<()>;

    /// Toggles the pre-release flag when it differs from the current value.
    async fn update_release_status(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
        info: &GitRelease,
    ) -> ProviderResult<()>;

    /// Uploads binary content as a release asset.
    async fn upload_release_asset(
        &self,
        org: &str,
        repo: &str,
        release_id: i64,
        name: &str,
        content: Bytes,
    ) -> ProviderResult<GitReleaseAsset>;

    // Branches, content and users

    /// Fetches a branch with its tip commit.
    async fn get_branch(&self, owner: &str, repo: &str, branch: &str)
        -> ProviderResult<GitBranch>;

    /// Fetches file contents at a ref.
    async fn get_content(
        &self,
        org: &str,
        name: &str,
        path: &str,
        git_ref: &str,
    ) -> ProviderResult<GitFileContent>;

    /// Public profile of a user; `Ok(None)` when the lookup fails.
    async fn user_info(&self, username: &str) -> ProviderResult<Option<GitUser>>;

    /// Invites a collaborator to a repository.
    async fn add_collaborator(
        &self,
        user: &str,
        organisation: &str,
        repo: &str,
    ) -> ProviderResult<()>;

    /// Lists pending collaborator invitations for the authenticated identity.
    async fn list_invitations(&self) -> ProviderResult<Vec<GitInvitation>>;

    /// Accepts a collaborator invitation.
    async fn accept_invitation(&self, id: i64) -> ProviderResult<()>;

    /// Whether the repository has its wiki enabled.
    async fn is_wiki_enabled(&self, owner: &str, repo: &str) -> ProviderResult<bool>;

    /// Project boards attached to a repository.
    async fn get_projects(&self, owner: &str, repo: &str) -> ProviderResult<Vec<GitProject>>;

    /// Enables or disables repository features; `Ok(None)` when the backend
    /// has no equivalent toggle.
    async fn configure_features(
        &self,
        owner: &str,
        repo: &str,
        issues: Option<bool>,
        projects: Option<bool>,
        wikis: Option<bool>,
    ) -> ProviderResult<Option<GitRepository>>;
}
