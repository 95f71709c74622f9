//! Gitea backend adapter.
//!
//! Translates between the neutral model and Gitea's REST shapes. Every method
//! either forwards a request and reshapes the response, or returns the
//! not-supported sentinel for operations Gitea has no equivalent of.

use crate::api;
use crate::client::GiteaClient;
use crate::config::GiteaConfig;
use crate::errors::{ProviderError, ProviderResult};
use crate::provider::{Capabilities, GitProvider, ProviderKind};
use crate::types::*;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::time::{sleep, Instant};
use tracing::{info, warn};

/// Local path Gitea webhook payloads are delivered to.
const WEBHOOK_PATH: &str = "/gitea-webhook/post";

/// Events registered on created webhooks.
const WEBHOOK_EVENTS: [&str; 3] = ["create", "push", "pull_request"];

/// Gitea implementation of the provider contract.
pub struct GiteaProvider {
    client: GiteaClient,
    capabilities: Capabilities,
}

impl GiteaProvider {
    /// Creates a new Gitea provider from a validated configuration.
    pub fn new(config: GiteaConfig) -> ProviderResult<Self> {
        let client = GiteaClient::new(config)?;
        Ok(Self {
            client,
            capabilities: Capabilities {
                issues: true,
                ..Default::default()
            },
        })
    }

    fn config(&self) -> &GiteaConfig {
        self.client.config()
    }

    /// The owner to use when an empty org means "the authenticated user".
    fn owner_or_user<'a>(&'a self, org: &'a str) -> &'a str {
        if org.is_empty() {
            &self.config().username
        } else {
            org
        }
    }

    /// The one place that recognizes Gitea's "fork still materializing"
    /// signal, which is only present in the error wording.
    fn fork_in_progress(error: &ProviderError) -> bool {
        error.message().contains("try again later")
    }

    /// Waits for a forked repository to become queryable.
    async fn wait_for_fork(
        &self,
        owner: &str,
        name: &str,
        mut last_error: ProviderError,
    ) -> ProviderResult<GitRepository> {
        let poll = &self.config().fork_poll;
        let started = Instant::now();
        loop {
            sleep(poll.interval).await;
            match self
                .client
                .get::<api::Repository>(&format!("repos/{}/{}", owner, name))
                .await
            {
                Ok(repo) => return Ok(self.to_repository(name, repo)),
                Err(e) => last_error = e,
            }
            if started.elapsed() >= poll.deadline {
                return Err(ProviderError::deadline_exceeded(format!(
                    "Gave up waiting for repository {}/{} to appear: {}",
                    owner, name, last_error
                ))
                .with_cause(last_error));
            }
        }
    }

    // Translation into the neutral model

    fn to_repository(&self, name: &str, repo: api::Repository) -> GitRepository {
        GitRepository {
            id: repo.id,
            // The caller-supplied name wins so the field is always populated.
            name: name.to_string(),
            organisation: repo.owner.map(|o| o.login).unwrap_or_default(),
            clone_url: repo.clone_url,
            html_url: repo.html_url,
            ssh_url: repo.ssh_url,
            private: repo.private,
            fork: repo.fork,
            archived: repo.archived,
            has_issues: repo.has_issues,
            has_projects: repo.has_projects,
            has_wiki: repo.has_wiki,
            allow_merge_commit: true,
            stars: repo.stars_count,
            open_issue_count: repo.open_issues_count,
        }
    }

    fn to_release(release: api::Release) -> GitRelease {
        let mut download_count = 0;
        let assets: Vec<GitReleaseAsset> = release
            .assets
            .into_iter()
            .map(|asset| {
                download_count += asset.download_count;
                GitReleaseAsset {
                    id: asset.id,
                    name: asset.name,
                    browser_download_url: asset.browser_download_url,
                }
            })
            .collect();

        GitRelease {
            id: release.id,
            name: release.name,
            tag_name: release.tag_name,
            body: release.body,
            url: release.url.clone(),
            html_url: release.url,
            pre_release: release.prerelease,
            download_count,
            assets,
        }
    }

    fn to_user(&self, user: api::User) -> GitUser {
        GitUser {
            url: format!("{}/{}", self.server_url(), user.login),
            login: user.login,
            name: user.full_name,
            email: user.email,
            avatar_url: user.avatar_url,
        }
    }

    /// Commit identities carry no avatar, so the URL is derived from the
    /// server's avatar route.
    fn to_commit_user(&self, user: api::PayloadUser) -> GitUser {
        GitUser {
            url: format!("{}/{}", self.server_url(), user.username),
            avatar_url: format!("{}/user/avatar/{}/-1", self.server_url(), user.username),
            login: user.username,
            name: user.name,
            email: user.email,
        }
    }

    fn to_label(label: api::Label) -> GitLabel {
        GitLabel {
            name: label.name,
            color: label.color,
            url: label.url,
        }
    }

    fn to_issue(&self, org: &str, name: &str, issue: api::Issue) -> GitIssue {
        GitIssue {
            number: Some(issue.number),
            url: self.issue_url(org, name, issue.number, false),
            state: Some(issue.state),
            title: issue.title,
            body: issue.body,
            is_pull_request: issue.pull_request.is_some(),
            labels: issue.labels.into_iter().map(Self::to_label).collect(),
            user: issue.user.map(|u| self.to_user(u)),
            assignees: issue
                .assignees
                .into_iter()
                .map(|u| self.to_user(u))
                .collect(),
            created_at: issue.created_at,
            updated_at: issue.updated_at,
            closed_at: issue.closed_at,
        }
    }

    fn to_pull_request(&self, owner: &str, repo: &str, pr: api::PullRequest) -> GitPullRequest {
        GitPullRequest {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number: Some(pr.number),
            url: pr.html_url,
            title: pr.title,
            body: pr.body,
            author: pr.user.map(|u| self.to_user(u)),
            merged: Some(pr.merged),
            mergeable: Some(pr.mergeable),
            merge_commit_sha: pr.merge_commit_sha,
            merged_at: pr.merged_at,
            last_commit_sha: pr.head.map(|h| h.sha).unwrap_or_default(),
            state: Some(pr.state),
        }
    }

    async fn search_issues_with_options(
        &self,
        org: &str,
        name: &str,
        options: api::ListIssueOption,
    ) -> ProviderResult<Vec<GitIssue>> {
        let result: Result<Vec<api::Issue>, ProviderError> = self
            .client
            .get_with_params(&format!("repos/{}/{}/issues", org, name), &options)
            .await;

        match result {
            Ok(issues) => Ok(issues
                .into_iter()
                .map(|issue| self.to_issue(org, name, issue))
                .collect()),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl GitProvider for GiteaProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gitea
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn server_url(&self) -> &str {
        self.config().server_root()
    }

    fn current_username(&self) -> &str {
        &self.config().username
    }

    fn label(&self) -> String {
        self.server_url().to_string()
    }

    fn issue_url(&self, org: &str, name: &str, number: u64, is_pull: bool) -> String {
        let path = if is_pull { "pulls" } else { "issues" };
        format!("{}/{}/{}/{}/{}", self.server_url(), org, name, path, number)
    }

    fn branch_archive_url(&self, org: &str, name: &str, branch: &str) -> String {
        format!("{}/{}/{}/archive/{}.zip", self.server_url(), org, name, branch)
    }

    fn access_token_url(&self) -> String {
        format!("{}/user/settings/applications", self.server_url())
    }

    fn webhook_path(&self) -> &'static str {
        WEBHOOK_PATH
    }

    fn should_fork_for_pull_request(
        &self,
        original_owner: &str,
        _repo_name: &str,
        username: &str,
    ) -> bool {
        original_owner != username
    }

    async fn list_organisations(&self) -> ProviderResult<Vec<GitOrganisation>> {
        let orgs: Vec<api::Organization> = self.client.get("user/orgs").await?;
        Ok(orgs
            .into_iter()
            .filter(|org| !org.username.is_empty())
            .map(|org| GitOrganisation { login: org.username })
            .collect())
    }

    async fn list_repositories(&self, org: &str) -> ProviderResult<Vec<GitRepository>> {
        let path = if org.is_empty() {
            "user/repos".to_string()
        } else {
            format!("orgs/{}/repos", org)
        };
        let repos: Vec<api::Repository> = self.client.get(&path).await?;
        Ok(repos
            .into_iter()
            .map(|repo| {
                let name = repo.name.clone();
                self.to_repository(&name, repo)
            })
            .collect())
    }

    async fn create_repository(
        &self,
        org: &str,
        name: &str,
        private: bool,
    ) -> ProviderResult<GitRepository> {
        let option = api::CreateRepoOption {
            name: name.to_string(),
            private,
        };
        let path = if org.is_empty() {
            "user/repos".to_string()
        } else {
            format!("orgs/{}/repos", org)
        };

        let repo: api::Repository = self.client.post(&path, &option).await.map_err(|e| {
            e.context(format!("Failed to create repository {}/{}", org, name))
        })?;
        Ok(self.to_repository(name, repo))
    }

    async fn get_repository(&self, org: &str, name: &str) -> ProviderResult<GitRepository> {
        let repo: api::Repository = self
            .client
            .get(&format!("repos/{}/{}", org, name))
            .await
            .map_err(|e| e.context(format!("Failed to get repository {}/{}", org, name)))?;
        Ok(self.to_repository(name, repo))
    }

    async fn delete_repository(&self, org: &str, name: &str) -> ProviderResult<()> {
        let owner = self.owner_or_user(org);
        self.client
            .delete(&format!("repos/{}/{}", owner, name))
            .await
            .map_err(|e| e.context(format!("Failed to delete repository {}/{}", owner, name)))
    }

    async fn fork_repository(
        &self,
        original_org: &str,
        name: &str,
        destination_org: &str,
    ) -> ProviderResult<GitRepository> {
        let option = api::CreateForkOption {
            organization: if destination_org.is_empty() {
                None
            } else {
                Some(destination_org.to_string())
            },
        };

        let result: Result<api::Repository, ProviderError> = self
            .client
            .post(&format!("repos/{}/{}/forks", original_org, name), &option)
            .await;

        match result {
            Ok(repo) => Ok(self.to_repository(name, repo)),
            Err(e) if Self::fork_in_progress(&e) => {
                let owner = self.owner_or_user(destination_org).to_string();
                warn!(owner = %owner, repo = %name, "waiting for the fork to appear");
                self.wait_for_fork(&owner, name, e).await
            }
            Err(e) => {
                let suffix = if destination_org.is_empty() {
                    String::new()
                } else {
                    format!(" to {}", destination_org)
                };
                Err(e.context(format!(
                    "Failed to fork repository {}/{}{}",
                    original_org, name, suffix
                )))
            }
        }
    }

    async fn rename_repository(
        &self,
        _org: &str,
        _name: &str,
        _new_name: &str,
    ) -> ProviderResult<GitRepository> {
        Err(ProviderError::not_supported(
            "RenameRepository",
            self.kind().as_str(),
        ))
    }

    async fn validate_repository_name(&self, org: &str, name: &str) -> ProviderResult<()> {
        let result: Result<api::Repository, ProviderError> = self
            .client
            .get(&format!("repos/{}/{}", org, name))
            .await;

        match result {
            Ok(_) => Err(ProviderError::already_exists(format!(
                "Repository {}/{} already exists",
                org, name
            ))),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn create_webhook(&self, args: &GitWebhookArguments) -> ProviderResult<()> {
        let owner = self.owner_or_user(&args.owner).to_string();
        let repo = &args.repo.name;
        if repo.is_empty() {
            return Err(ProviderError::precondition("Missing property repo"));
        }
        if args.url.is_empty() {
            return Err(ProviderError::precondition("Missing property URL"));
        }

        let hooks: Vec<api::Hook> = self
            .client
            .get(&format!("repos/{}/{}/hooks", owner, repo))
            .await?;
        if hooks
            .iter()
            .any(|hook| hook.config.get("url") == Some(&args.url))
        {
            warn!(url = %args.url, "webhook already registered");
            return Ok(());
        }

        let mut config = std::collections::HashMap::new();
        config.insert("url".to_string(), args.url.clone());
        config.insert("content_type".to_string(), "json".to_string());
        if !args.secret.is_empty() {
            config.insert("secret".to_string(), args.secret.clone());
        }
        let hook = api::CreateHookOption {
            hook_type: "gitea".to_string(),
            config,
            events: WEBHOOK_EVENTS.iter().map(|e| e.to_string()).collect(),
            active: true,
        };

        info!(owner = %owner, repo = %repo, url = %args.url, "creating webhook");
        self.client
            .post_no_response(&format!("repos/{}/{}/hooks", owner, repo), &hook)
            .await
            .map_err(|e| e.context(format!("Failed to create webhook for {}/{}", owner, repo)))
    }

    async fn list_webhooks(
        &self,
        _owner: &str,
        _repo: &str,
    ) -> ProviderResult<Vec<GitWebhookArguments>> {
        Err(ProviderError::not_supported(
            "ListWebHooks",
            self.kind().as_str(),
        ))
    }

    async fn update_webhook(&self, _args: &GitWebhookArguments) -> ProviderResult<()> {
        Err(ProviderError::not_supported(
            "UpdateWebHook",
            self.kind().as_str(),
        ))
    }

    async fn create_pull_request(
        &self,
        args: &GitPullRequestArguments,
    ) -> ProviderResult<GitPullRequest> {
        let owner = &args.repository.organisation;
        let repo = &args.repository.name;

        // Empty fields mean "use the backend default" and are not forwarded.
        let non_empty = |s: &str| {
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        };
        let option = api::CreatePullRequestOption {
            title: non_empty(&args.title),
            body: non_empty(&args.body),
            head: non_empty(&args.head),
            base: non_empty(&args.base),
        };

        let pr: api::PullRequest = self
            .client
            .post(&format!("repos/{}/{}/pulls", owner, repo), &option)
            .await?;

        Ok(GitPullRequest {
            owner: owner.clone(),
            repo: repo.clone(),
            number: Some(pr.number),
            url: pr.html_url,
            last_commit_sha: pr.head.map(|h| h.sha).unwrap_or_default(),
            ..Default::default()
        })
    }

    async fn update_pull_request(
        &self,
        _args: &GitPullRequestArguments,
        _number: u64,
    ) -> ProviderResult<GitPullRequest> {
        Err(ProviderError::not_supported(
            "UpdatePullRequest",
            self.kind().as_str(),
        ))
    }

    async fn update_pull_request_status(
        &self,
        pr: &GitPullRequest,
    ) -> ProviderResult<GitPullRequest> {
        let number = pr
            .number
            .ok_or_else(|| ProviderError::precondition("Missing number for pull request"))?;

        let current: api::PullRequest = self
            .client
            .get(&format!("repos/{}/{}/pulls/{}", pr.owner, pr.repo, number))
            .await
            .map_err(|e| {
                e.context(format!(
                    "Could not find pull request for {}/{} #{}",
                    pr.owner, pr.repo, number
                ))
            })?;

        Ok(self.to_pull_request(&pr.owner, &pr.repo, current))
    }

    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &GitRepository,
        number: u64,
    ) -> ProviderResult<GitPullRequest> {
        let pr = GitPullRequest {
            owner: owner.to_string(),
            repo: repo.name.clone(),
            number: Some(number),
            ..Default::default()
        };
        self.update_pull_request_status(&pr).await
    }

    async fn list_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> ProviderResult<Vec<GitPullRequest>> {
        let mut answer = Vec::new();
        let mut page = 1;
        loop {
            let options = api::ListPullRequestsOption {
                page: Some(page),
                limit: Some(api::PAGE_SIZE),
                state: Some("open".to_string()),
            };
            let prs: Vec<api::PullRequest> = self
                .client
                .get_with_params(&format!("repos/{}/{}/pulls", owner, repo), &options)
                .await?;

            let count = prs.len();
            answer.extend(
                prs.into_iter()
                    .map(|pr| self.to_pull_request(owner, repo, pr)),
            );
            if count < api::PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }
        Ok(answer)
    }

    async fn get_pull_request_commits(
        &self,
        _owner: &str,
        _repo: &GitRepository,
        _number: u64,
    ) -> ProviderResult<Vec<GitCommit>> {
        // Gitea has no endpoint for the commits of a pull request diff.
        Ok(Vec::new())
    }

    async fn merge_pull_request(&self, pr: &GitPullRequest, message: &str) -> ProviderResult<()> {
        let number = pr
            .number
            .ok_or_else(|| ProviderError::precondition("Missing number for pull request"))?;

        let option = api::MergePullRequestOption {
            style: "merge".to_string(),
            title: format!("{} (#{})", pr.title, number),
            message: message.to_string(),
        };
        self.client
            .post_no_response(
                &format!("repos/{}/{}/pulls/{}/merge", pr.owner, pr.repo, number),
                &option,
            )
            .await
    }

    async fn pull_request_last_commit_status(
        &self,
        pr: &GitPullRequest,
    ) -> ProviderResult<String> {
        if pr.last_commit_sha.is_empty() {
            return Err(ProviderError::precondition(
                "Missing last commit SHA for pull request",
            ));
        }

        let statuses: Vec<api::CommitStatus> = self
            .client
            .get(&format!(
                "repos/{}/{}/statuses/{}",
                pr.owner, pr.repo, pr.last_commit_sha
            ))
            .await?;

        statuses
            .into_iter()
            .map(|status| status.status)
            .find(|state| !state.is_empty())
            .ok_or_else(|| {
                ProviderError::not_found(format!(
                    "Could not find a status for repository {}/{} with ref {}",
                    pr.owner, pr.repo, pr.last_commit_sha
                ))
            })
    }

    async fn add_pull_request_comment(
        &self,
        pr: &GitPullRequest,
        comment: &str,
    ) -> ProviderResult<()> {
        let number = pr
            .number
            .ok_or_else(|| ProviderError::precondition("Missing number for pull request"))?;
        self.create_issue_comment(&pr.owner, &pr.repo, number, comment)
            .await
    }

    async fn get_issue(
        &self,
        org: &str,
        name: &str,
        number: u64,
    ) -> ProviderResult<Option<GitIssue>> {
        let result: Result<api::Issue, ProviderError> = self
            .client
            .get(&format!("repos/{}/{}/issues/{}", org, name, number))
            .await;

        match result {
            Ok(issue) => Ok(Some(self.to_issue(org, name, issue))),
            // Absent and failed are different outcomes.
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        issue: &GitIssue,
    ) -> ProviderResult<GitIssue> {
        let option = api::CreateIssueOption {
            title: issue.title.clone(),
            body: issue.body.clone(),
        };
        let created: api::Issue = self
            .client
            .post(&format!("repos/{}/{}/issues", owner, repo), &option)
            .await?;
        Ok(self.to_issue(owner, repo, created))
    }

    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        comment: &str,
    ) -> ProviderResult<()> {
        let option = api::CreateIssueCommentOption {
            body: comment.to_string(),
        };
        self.client
            .post_no_response(
                &format!("repos/{}/{}/issues/{}/comments", owner, repo, number),
                &option,
            )
            .await
    }

    async fn search_issues(
        &self,
        org: &str,
        name: &str,
        filter: &str,
    ) -> ProviderResult<Vec<GitIssue>> {
        let options = api::ListIssueOption {
            keyword: if filter.is_empty() {
                None
            } else {
                Some(filter.to_string())
            },
            ..Default::default()
        };
        self.search_issues_with_options(org, name, options).await
    }

    async fn search_issues_closed_since(
        &self,
        org: &str,
        name: &str,
        since: DateTime<Utc>,
    ) -> ProviderResult<Vec<GitIssue>> {
        let options = api::ListIssueOption {
            state: Some("closed".to_string()),
            ..Default::default()
        };
        // Gitea cannot filter by closure time server-side.
        let issues = self.search_issues_with_options(org, name, options).await?;
        Ok(filter_issues_closed_since(issues, since))
    }

    async fn add_labels_to_issue(
        &self,
        _owner: &str,
        _repo: &str,
        _number: u64,
        _labels: &[String],
    ) -> ProviderResult<()> {
        Err(ProviderError::not_supported(
            "AddLabelsToIssue",
            self.kind().as_str(),
        ))
    }

    async fn list_commit_status(
        &self,
        org: &str,
        repo: &str,
        sha: &str,
    ) -> ProviderResult<Vec<GitCommitStatus>> {
        let statuses: Vec<api::CommitStatus> = self
            .client
            .get(&format!("repos/{}/{}/statuses/{}", org, repo, sha))
            .await
            .map_err(|e| {
                e.context(format!(
                    "Could not find a status for repository {}/{} with ref {}",
                    org, repo, sha
                ))
            })?;

        Ok(statuses
            .into_iter()
            .map(|status| GitCommitStatus {
                id: status.id.to_string(),
                context: status.context,
                url: status.url,
                target_url: status.target_url,
                state: status.status,
                description: status.description,
            })
            .collect())
    }

    async fn update_commit_status(
        &self,
        _org: &str,
        _repo: &str,
        _sha: &str,
        _status: &GitCommitStatus,
    ) -> ProviderResult<GitCommitStatus> {
        Err(ProviderError::not_supported(
            "UpdateCommitStatus",
            self.kind().as_str(),
        ))
    }

    async fn list_commits(
        &self,
        _owner: &str,
        _repo: &str,
        _args: &ListCommitsArguments,
    ) -> ProviderResult<Vec<GitCommit>> {
        Err(ProviderError::not_supported(
            "ListCommits",
            self.kind().as_str(),
        ))
    }

    async fn list_releases(&self, org: &str, name: &str) -> ProviderResult<Vec<GitRelease>> {
        let owner = self.owner_or_user(org);
        let releases: Vec<api::Release> = self
            .client
            .get(&format!("repos/{}/{}/releases", owner, name))
            .await?;
        Ok(releases.into_iter().map(Self::to_release).collect())
    }

    async fn get_release(&self, org: &str, name: &str, tag: &str) -> ProviderResult<GitRelease> {
        let owner = self.owner_or_user(org);
        let release: api::Release = self
            .client
            .get(&format!("repos/{}/{}/releases/tags/{}", owner, name, tag))
            .await?;
        Ok(Self::to_release(release))
    }

    async fn get_latest_release(
        &self,
        org: &str,
        name: &str,
    ) -> ProviderResult<Option<GitRelease>> {
        let options = api::ListOptions {
            page: Some(1),
            limit: Some(1),
        };
        let releases: Vec<api::Release> = self
            .client
            .get_with_params(&format!("repos/{}/{}/releases", org, name), &options)
            .await
            .map_err(|e| e.context(format!("getting releases for {}/{}", org, name)))?;

        Ok(releases.into_iter().next().map(Self::to_release))
    }

    async fn update_release(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
        info: &GitRelease,
    ) -> ProviderResult<()> {
        let existing: Option<api::Release> = match self
            .client
            .get(&format!("repos/{}/{}/releases/tags/{}", owner, repo, tag))
            .await
        {
            Ok(release) => Some(release),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };

        match existing {
            None => {
                let option = api::CreateReleaseOption {
                    tag_name: info.tag_name.clone(),
                    name: info.name.clone(),
                    body: info.body.clone(),
                    draft: false,
                    prerelease: false,
                };
                self.client
                    .post_no_response(&format!("repos/{}/{}/releases", owner, repo), &option)
                    .await
            }
            Some(release) => {
                // Only fill fields the backend currently has empty; a
                // populated backend field is never clobbered.
                let fill = |current: &str, supplied: &str| {
                    if current.is_empty() && !supplied.is_empty() {
                        Some(supplied.to_string())
                    } else {
                        Some(current.to_string())
                    }
                };
                let option = api::EditReleaseOption {
                    tag_name: fill(&release.tag_name, &info.tag_name),
                    name: fill(&release.name, &info.name),
                    body: fill(&release.body, &info.body),
                    draft: Some(false),
                    prerelease: Some(false),
                };
                let _updated: api::Release = self
                    .client
                    .patch(
                        &format!("repos/{}/{}/releases/{}", owner, repo, release.id),
                        &option,
                    )
                    .await?;
                Ok(())
            }
        }
    }

    async fn update_release_status(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
        info: &GitRelease,
    ) -> ProviderResult<()> {
        let release: api::Release = self
            .client
            .get(&format!("repos/{}/{}/releases/tags/{}", owner, repo, tag))
            .await?;

        let option = api::EditReleaseOption {
            tag_name: Some(release.tag_name.clone()),
            name: Some(release.name.clone()),
            body: Some(release.body.clone()),
            draft: Some(false),
            prerelease: if release.prerelease != info.pre_release {
                Some(info.pre_release)
            } else {
                None
            },
        };

        let _updated: api::Release = self
            .client
            .patch(
                &format!("repos/{}/{}/releases/{}", owner, repo, release.id),
                &option,
            )
            .await?;
        Ok(())
    }

    async fn upload_release_asset(
        &self,
        org: &str,
        repo: &str,
        release_id: i64,
        name: &str,
        content: Bytes,
    ) -> ProviderResult<GitReleaseAsset> {
        // The asset name goes into the query string and may carry reserved
        // characters.
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("name", name)
            .finish();
        let asset: api::Attachment = self
            .client
            .post_attachment(
                &format!(
                    "repos/{}/{}/releases/{}/assets?{}",
                    org, repo, release_id, query
                ),
                name,
                content,
            )
            .await?;

        Ok(GitReleaseAsset {
            id: asset.id,
            name: asset.name,
            browser_download_url: asset.browser_download_url,
        })
    }

    async fn get_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> ProviderResult<GitBranch> {
        let result: api::Branch = self
            .client
            .get(&format!("repos/{}/{}/branches/{}", owner, repo, branch))
            .await?;

        let commit = result.commit.map(|commit| GitCommit {
            url: format!("{}/{}/{}/commit/{}", self.server_url(), owner, repo, commit.id),
            sha: commit.id,
            message: commit.message,
            author: commit.author.map(|u| self.to_commit_user(u)),
            committer: commit.committer.map(|u| self.to_commit_user(u)),
            branch: result.name.clone(),
        });

        Ok(GitBranch {
            name: result.name,
            commit,
            protected: result.protected,
        })
    }

    async fn get_content(
        &self,
        _org: &str,
        _name: &str,
        _path: &str,
        _git_ref: &str,
    ) -> ProviderResult<GitFileContent> {
        Err(ProviderError::not_supported(
            "GetContent",
            self.kind().as_str(),
        ))
    }

    async fn user_info(&self, username: &str) -> ProviderResult<Option<GitUser>> {
        let result: Result<api::User, ProviderError> =
            self.client.get(&format!("users/{}", username)).await;
        Ok(result.ok().map(|user| self.to_user(user)))
    }

    async fn add_collaborator(
        &self,
        user: &str,
        _organisation: &str,
        _repo: &str,
    ) -> ProviderResult<()> {
        info!(
            user = %user,
            "automatically adding collaborators is not implemented for gitea; \
             please add the user as a collaborator manually"
        );
        Ok(())
    }

    async fn list_invitations(&self) -> ProviderResult<Vec<GitInvitation>> {
        info!("collaborator invitations are not implemented for gitea");
        Ok(Vec::new())
    }

    async fn accept_invitation(&self, _id: i64) -> ProviderResult<()> {
        info!("collaborator invitations are not implemented for gitea");
        Ok(())
    }

    async fn is_wiki_enabled(&self, owner: &str, repo: &str) -> ProviderResult<bool> {
        let repository: api::Repository = self
            .client
            .get(&format!("repos/{}/{}", owner, repo))
            .await?;
        Ok(repository.has_wiki)
    }

    async fn get_projects(&self, _owner: &str, _repo: &str) -> ProviderResult<Vec<GitProject>> {
        Ok(Vec::new())
    }

    async fn configure_features(
        &self,
        _owner: &str,
        _repo: &str,
        _issues: Option<bool>,
        _projects: Option<bool>,
        _wikis: Option<bool>,
    ) -> ProviderResult<Option<GitRepository>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_provider() -> GiteaProvider {
        let config = GiteaConfig::builder()
            .server_url("https://gitea.example.com")
            .token("abc123")
            .username("pipeline-bot")
            .build()
            .unwrap();
        GiteaProvider::new(config).unwrap()
    }

    #[test]
    fn test_kind_and_capabilities() {
        let provider = test_provider();
        assert_eq!(provider.kind(), ProviderKind::Gitea);
        assert!(provider.capabilities().issues);
        assert!(!provider.capabilities().webhook_listing);
        assert!(!provider.capabilities().commit_status_update);
    }

    #[test]
    fn test_fork_in_progress_predicate() {
        let pending = ProviderError::from_response(
            500,
            "fork in progress, try again later".to_string(),
        );
        assert!(GiteaProvider::fork_in_progress(&pending));

        let other = ProviderError::from_response(403, "forbidden".to_string());
        assert!(!GiteaProvider::fork_in_progress(&other));
    }

    #[test]
    fn test_issue_url() {
        let provider = test_provider();
        assert_eq!(
            provider.issue_url("acme", "widgets", 12, false),
            "https://gitea.example.com/acme/widgets/issues/12"
        );
        assert_eq!(
            provider.issue_url("acme", "widgets", 12, true),
            "https://gitea.example.com/acme/widgets/pulls/12"
        );
    }

    #[test]
    fn test_branch_archive_url() {
        let provider = test_provider();
        assert_eq!(
            provider.branch_archive_url("acme", "widgets", "main"),
            "https://gitea.example.com/acme/widgets/archive/main.zip"
        );
    }

    #[test]
    fn test_should_fork_for_pull_request() {
        let provider = test_provider();
        assert!(provider.should_fork_for_pull_request("acme", "widgets", "someone-else"));
        assert!(!provider.should_fork_for_pull_request("acme", "widgets", "acme"));
    }

    #[test]
    fn test_owner_or_user() {
        let provider = test_provider();
        assert_eq!(provider.owner_or_user(""), "pipeline-bot");
        assert_eq!(provider.owner_or_user("acme"), "acme");
    }

    #[test]
    fn test_release_translation_sums_downloads() {
        let release = api::Release {
            id: 3,
            tag_name: "v1.2.0".to_string(),
            name: "1.2.0".to_string(),
            body: "notes".to_string(),
            url: "https://gitea.example.com/api/v1/repos/acme/widgets/releases/3".to_string(),
            draft: false,
            prerelease: true,
            assets: vec![
                api::Attachment {
                    id: 1,
                    name: "widgets-linux".to_string(),
                    download_count: 7,
                    browser_download_url: "https://example.com/1".to_string(),
                },
                api::Attachment {
                    id: 2,
                    name: "widgets-darwin".to_string(),
                    download_count: 5,
                    browser_download_url: "https://example.com/2".to_string(),
                },
            ],
        };

        let neutral = GiteaProvider::to_release(release);
        assert_eq!(neutral.download_count, 12);
        assert_eq!(neutral.assets.len(), 2);
        assert!(neutral.pre_release);
    }

    #[test]
    fn test_commit_user_avatar_is_derived() {
        let provider = test_provider();
        let user = provider.to_commit_user(api::PayloadUser {
            name: "Jo Doe".to_string(),
            email: "jo@example.com".to_string(),
            username: "jdoe".to_string(),
        });

        assert_eq!(user.avatar_url, "https://gitea.example.com/user/avatar/jdoe/-1");
        assert_eq!(user.url, "https://gitea.example.com/jdoe");
    }

    #[test]
    fn test_fork_poll_config_is_injectable() {
        let config = GiteaConfig::builder()
            .server_url("https://gitea.example.com")
            .token("abc123")
            .username("bot")
            .fork_poll(crate::config::ForkPollConfig {
                interval: Duration::from_millis(10),
                deadline: Duration::from_millis(50),
            })
            .build()
            .unwrap();
        let provider = GiteaProvider::new(config).unwrap();
        assert_eq!(
            provider.config().fork_poll.interval,
            Duration::from_millis(10)
        );
    }
}
