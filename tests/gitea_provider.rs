//! Integration tests driving the Gitea adapter against a fake REST server.

use bytes::Bytes;
use integrations_gitea::{
    ForkPollConfig, GiteaConfig, GiteaProvider, GitProvider, GitPullRequest,
    GitPullRequestArguments, GitRelease, GitRepository, GitWebhookArguments, ProviderErrorKind,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn provider_for(server: &MockServer) -> GiteaProvider {
    let config = GiteaConfig::builder()
        .server_url(server.uri())
        .token("test-token")
        .username("pipeline-bot")
        .fork_poll(ForkPollConfig {
            interval: Duration::from_millis(10),
            deadline: Duration::from_millis(500),
        })
        .build()
        .unwrap();
    GiteaProvider::new(config).unwrap()
}

fn repo_json(name: &str, owner: &str) -> Value {
    json!({
        "id": 7,
        "name": name,
        "owner": {"id": 1, "login": owner, "full_name": owner, "email": "", "avatar_url": ""},
        "private": false,
        "fork": false,
        "archived": false,
        "html_url": format!("https://gitea.example.com/{}/{}", owner, name),
        "clone_url": format!("https://gitea.example.com/{}/{}.git", owner, name),
        "ssh_url": format!("git@gitea.example.com:{}/{}.git", owner, name),
        "stars_count": 1,
        "open_issues_count": 0,
        "has_issues": true,
        "has_projects": false,
        "has_wiki": true
    })
}

fn pr_json(number: u64) -> Value {
    json!({
        "id": number,
        "number": number,
        "url": format!("https://gitea.example.com/api/v1/repos/acme/widgets/pulls/{}", number),
        "html_url": format!("https://gitea.example.com/acme/widgets/pulls/{}", number),
        "title": format!("change {}", number),
        "body": "",
        "state": "open",
        "user": {"id": 2, "login": "jdoe", "full_name": "Jo Doe", "email": "", "avatar_url": ""},
        "mergeable": true,
        "merged": false,
        "merged_at": null,
        "merge_commit_sha": null,
        "head": {"label": "feature", "ref": "feature", "sha": format!("sha-{}", number)},
        "base": {"label": "main", "ref": "main", "sha": "base-sha"}
    })
}

#[tokio::test]
async fn list_repositories_always_populates_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            repo_json("widgets", "acme"),
            repo_json("gadgets", "acme"),
        ])))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let repos = provider.list_repositories("acme").await.unwrap();

    assert_eq!(repos.len(), 2);
    assert!(repos.iter().all(|r| !r.name.is_empty()));
    assert_eq!(repos[0].organisation, "acme");
}

#[tokio::test]
async fn fork_polls_until_the_repository_appears() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/repos/acme/widgets/forks"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "repository is being forked, try again later"
        })))
        .mount(&server)
        .await;
    // The fork target 404s twice before materializing.
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/pipeline-bot/widgets"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/pipeline-bot/widgets"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(repo_json("widgets", "pipeline-bot")),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let repo = provider.fork_repository("acme", "widgets", "").await.unwrap();

    assert_eq!(repo.name, "widgets");
    assert_eq!(repo.organisation, "pipeline-bot");
}

#[tokio::test]
async fn fork_poll_gives_up_after_the_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/repos/acme/widgets/forks"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "repository is being forked, try again later"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/pipeline-bot/widgets"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let config = GiteaConfig::builder()
        .server_url(server.uri())
        .token("test-token")
        .username("pipeline-bot")
        .fork_poll(ForkPollConfig {
            interval: Duration::from_millis(10),
            deadline: Duration::from_millis(50),
        })
        .build()
        .unwrap();
    let provider = GiteaProvider::new(config).unwrap();

    let error = provider
        .fork_repository("acme", "widgets", "")
        .await
        .unwrap_err();
    assert_eq!(*error.kind(), ProviderErrorKind::DeadlineExceeded);
    assert!(error.message().contains("Gave up waiting"));
}

#[tokio::test]
async fn create_webhook_twice_registers_one_hook() {
    let server = MockServer::start().await;
    // First listing sees no hooks; after creation the hook is present.
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/hooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/hooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "type": "gitea",
            "config": {"url": "https://ci.example.com/gitea-webhook/post", "content_type": "json"},
            "events": ["create", "push", "pull_request"],
            "active": true
        }])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/repos/acme/widgets/hooks"))
        .and(body_partial_json(json!({
            "type": "gitea",
            "config": {"url": "https://ci.example.com/gitea-webhook/post"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let args = GitWebhookArguments {
        owner: "acme".to_string(),
        repo: GitRepository {
            name: "widgets".to_string(),
            ..Default::default()
        },
        url: "https://ci.example.com/gitea-webhook/post".to_string(),
        secret: String::new(),
    };

    provider.create_webhook(&args).await.unwrap();
    provider.create_webhook(&args).await.unwrap();
}

#[tokio::test]
async fn get_issue_returns_none_on_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/issues/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let issue = provider.get_issue("acme", "widgets", 42).await.unwrap();
    assert!(issue.is_none());
}

#[tokio::test]
async fn validate_repository_name_distinguishes_free_and_taken() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/free-name"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("widgets", "acme")))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;

    provider
        .validate_repository_name("acme", "free-name")
        .await
        .unwrap();

    let error = provider
        .validate_repository_name("acme", "widgets")
        .await
        .unwrap_err();
    assert_eq!(*error.kind(), ProviderErrorKind::AlreadyExists);
    assert!(error.message().contains("already exists"));
}

#[tokio::test]
async fn update_release_creates_when_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/releases/tags/v1.0.0"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/repos/acme/widgets/releases"))
        .and(body_json(json!({
            "tag_name": "v1.0.0",
            "name": "1.0.0",
            "body": "release notes",
            "draft": false,
            "prerelease": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let info = GitRelease {
        tag_name: "v1.0.0".to_string(),
        name: "1.0.0".to_string(),
        body: "release notes".to_string(),
        ..Default::default()
    };
    provider
        .update_release("acme", "widgets", "v1.0.0", &info)
        .await
        .unwrap();
}

#[tokio::test]
async fn update_release_never_clobbers_populated_backend_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/releases/tags/v1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "tag_name": "v1.0.0",
            "name": "backend name",
            "body": "",
            "url": "",
            "draft": false,
            "prerelease": false,
            "assets": []
        })))
        .mount(&server)
        .await;
    // The backend's populated name survives; only the empty body is filled.
    Mock::given(method("PATCH"))
        .and(path("/api/v1/repos/acme/widgets/releases/5"))
        .and(body_partial_json(json!({
            "tag_name": "v1.0.0",
            "name": "backend name",
            "body": "caller notes"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "tag_name": "v1.0.0",
            "name": "backend name",
            "body": "caller notes",
            "url": "",
            "draft": false,
            "prerelease": false,
            "assets": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let info = GitRelease {
        tag_name: "v1.0.0".to_string(),
        name: "caller name".to_string(),
        body: "caller notes".to_string(),
        ..Default::default()
    };
    provider
        .update_release("acme", "widgets", "v1.0.0", &info)
        .await
        .unwrap();
}

#[tokio::test]
async fn update_release_status_toggles_prerelease_only_when_different() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/releases/tags/v1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "tag_name": "v1.0.0",
            "name": "1.0.0",
            "body": "notes",
            "url": "",
            "draft": false,
            "prerelease": true,
            "assets": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/repos/acme/widgets/releases/5"))
        .and(body_partial_json(json!({"prerelease": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "tag_name": "v1.0.0",
            "name": "1.0.0",
            "body": "notes",
            "url": "",
            "draft": false,
            "prerelease": false,
            "assets": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let info = GitRelease {
        pre_release: false,
        ..Default::default()
    };
    provider
        .update_release_status("acme", "widgets", "v1.0.0", &info)
        .await
        .unwrap();
}

#[tokio::test]
async fn list_open_pull_requests_concatenates_pages_in_order() {
    let server = MockServer::start().await;
    let full_page: Vec<Value> = (1..=100).map(pr_json).collect();
    let short_page: Vec<Value> = (101..=102).map(pr_json).collect();

    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/pulls"))
        .and(query_param("page", "1"))
        .and(query_param("state", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_page))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/pulls"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(short_page))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let prs = provider
        .list_open_pull_requests("acme", "widgets")
        .await
        .unwrap();

    assert_eq!(prs.len(), 102);
    let numbers: Vec<u64> = prs.iter().map(|pr| pr.number.unwrap()).collect();
    let expected: Vec<u64> = (1..=102).collect();
    assert_eq!(numbers, expected);
}

#[tokio::test]
async fn last_commit_status_returns_first_non_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/statuses/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "status": "", "context": "lint", "url": "", "target_url": "", "description": ""},
            {"id": 2, "status": "success", "context": "ci", "url": "", "target_url": "", "description": ""},
            {"id": 3, "status": "failure", "context": "deploy", "url": "", "target_url": "", "description": ""}
        ])))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let pr = GitPullRequest {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        number: Some(7),
        last_commit_sha: "abc123".to_string(),
        ..Default::default()
    };

    let state = provider.pull_request_last_commit_status(&pr).await.unwrap();
    assert_eq!(state, "success");
}

#[tokio::test]
async fn last_commit_status_errors_when_all_states_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/statuses/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "status": "", "context": "lint", "url": "", "target_url": "", "description": ""}
        ])))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let pr = GitPullRequest {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        number: Some(7),
        last_commit_sha: "abc123".to_string(),
        ..Default::default()
    };

    let error = provider
        .pull_request_last_commit_status(&pr)
        .await
        .unwrap_err();
    assert!(error.message().contains("Could not find a status"));
}

#[tokio::test]
async fn last_commit_status_requires_a_sha() {
    let server = MockServer::start().await;
    let provider = provider_for(&server).await;
    let pr = GitPullRequest {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        number: Some(7),
        ..Default::default()
    };

    let error = provider
        .pull_request_last_commit_status(&pr)
        .await
        .unwrap_err();
    assert_eq!(*error.kind(), ProviderErrorKind::Precondition);
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn list_commit_status_preserves_the_underlying_cause() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/statuses/abc123"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({"message": "bad gateway"})))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let error = provider
        .list_commit_status("acme", "widgets", "abc123")
        .await
        .unwrap_err();

    assert!(error.message().contains("Could not find a status"));
    assert_eq!(*error.kind(), ProviderErrorKind::BadGateway);
    assert!(std::error::Error::source(&error).is_some());
}

#[tokio::test]
async fn update_pull_request_status_returns_a_fresh_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/pulls/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "number": 7,
            "url": "",
            "html_url": "https://gitea.example.com/acme/widgets/pulls/7",
            "title": "fix crash",
            "body": "details",
            "state": "closed",
            "user": {"id": 2, "login": "jdoe", "full_name": "Jo Doe", "email": "", "avatar_url": ""},
            "mergeable": true,
            "merged": true,
            "merged_at": "2024-03-05T12:00:00Z",
            "merge_commit_sha": "deadbeef",
            "head": {"label": "feature", "ref": "feature", "sha": "abc123"},
            "base": {"label": "main", "ref": "main", "sha": "base"}
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let stale = GitPullRequest {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        number: Some(7),
        ..Default::default()
    };

    let fresh = provider.update_pull_request_status(&stale).await.unwrap();
    assert_eq!(fresh.merged, Some(true));
    assert_eq!(fresh.merge_commit_sha.as_deref(), Some("deadbeef"));
    assert_eq!(fresh.last_commit_sha, "abc123");
    assert_eq!(fresh.title, "fix crash");
    assert_eq!(fresh.author.unwrap().login, "jdoe");
    // The caller's copy is untouched; replacing it is their decision.
    assert_eq!(stale.merged, None);
}

#[tokio::test]
async fn update_pull_request_status_requires_a_number() {
    let server = MockServer::start().await;
    let provider = provider_for(&server).await;
    let pr = GitPullRequest {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        ..Default::default()
    };

    let error = provider.update_pull_request_status(&pr).await.unwrap_err();
    assert_eq!(*error.kind(), ProviderErrorKind::Precondition);
}

#[tokio::test]
async fn merge_pull_request_synthesizes_the_commit_title() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/repos/acme/widgets/pulls/7/merge"))
        .and(body_json(json!({
            "Do": "merge",
            "MergeTitleField": "fix crash (#7)",
            "MergeMessageField": "merging the fix"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let pr = GitPullRequest {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        number: Some(7),
        title: "fix crash".to_string(),
        ..Default::default()
    };

    provider.merge_pull_request(&pr, "merging the fix").await.unwrap();
}

#[tokio::test]
async fn create_pull_request_forwards_only_non_empty_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/repos/acme/widgets/pulls"))
        .and(body_json(json!({"head": "feature", "base": "main"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(pr_json(8)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let args = GitPullRequestArguments {
        repository: GitRepository {
            name: "widgets".to_string(),
            organisation: "acme".to_string(),
            ..Default::default()
        },
        head: "feature".to_string(),
        base: "main".to_string(),
        ..Default::default()
    };

    let pr = provider.create_pull_request(&args).await.unwrap();
    assert_eq!(pr.number, Some(8));
    assert_eq!(pr.last_commit_sha, "sha-8");
}

#[tokio::test]
async fn get_latest_release_returns_none_when_there_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/releases"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let release = provider.get_latest_release("acme", "widgets").await.unwrap();
    assert!(release.is_none());
}

#[tokio::test]
async fn get_branch_fabricates_avatar_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/branches/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "main",
            "protected": true,
            "commit": {
                "id": "abc123",
                "message": "tip commit",
                "url": "",
                "author": {"name": "Jo Doe", "email": "jo@example.com", "username": "jdoe"},
                "committer": {"name": "Jo Doe", "email": "jo@example.com", "username": "jdoe"}
            }
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let branch = provider.get_branch("acme", "widgets", "main").await.unwrap();

    assert!(branch.protected);
    let commit = branch.commit.unwrap();
    let author = commit.author.unwrap();
    assert_eq!(
        author.avatar_url,
        format!("{}/user/avatar/jdoe/-1", server.uri())
    );
    assert_eq!(
        commit.url,
        format!("{}/acme/widgets/commit/abc123", server.uri())
    );
    assert_eq!(commit.branch, "main");
}

#[tokio::test]
async fn search_issues_closed_since_filters_client_side() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/widgets/issues"))
        .and(query_param("state", "closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1, "number": 1, "title": "old", "body": "", "state": "closed",
                "closed_at": "2024-01-01T00:00:00Z"
            },
            {
                "id": 2, "number": 2, "title": "recent", "body": "", "state": "closed",
                "closed_at": "2024-06-01T00:00:00Z"
            }
        ])))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let since = chrono::DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let issues = provider
        .search_issues_closed_since("acme", "widgets", since)
        .await
        .unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "recent");
}

#[tokio::test]
async fn search_issues_tolerates_missing_repository() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos/acme/gone/issues"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let issues = provider.search_issues("acme", "gone", "crash").await.unwrap();
    assert!(issues.is_empty());
}

#[tokio::test]
async fn list_organisations_skips_entries_without_a_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user/orgs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "username": "acme", "full_name": "Acme"},
            {"id": 2, "username": "", "full_name": "nameless"}
        ])))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let orgs = provider.list_organisations().await.unwrap();
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0].login, "acme");
}

#[tokio::test]
async fn upload_release_asset_translates_the_attachment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/repos/acme/widgets/releases/5/assets"))
        .and(query_param("name", "widgets-linux"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9,
            "name": "widgets-linux",
            "download_count": 0,
            "browser_download_url": "https://gitea.example.com/attachments/9"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let asset = provider
        .upload_release_asset(
            "acme",
            "widgets",
            5,
            "widgets-linux",
            Bytes::from_static(b"binary-bits"),
        )
        .await
        .unwrap();

    assert_eq!(asset.id, 9);
    assert_eq!(asset.name, "widgets-linux");
    assert_eq!(
        asset.browser_download_url,
        "https://gitea.example.com/attachments/9"
    );
}

#[tokio::test]
async fn upload_release_asset_encodes_reserved_characters_in_the_name() {
    let server = MockServer::start().await;
    // An unencoded `&` or `#` in the name would truncate the query string
    // and the server would see a different name.
    Mock::given(method("POST"))
        .and(path("/api/v1/repos/acme/widgets/releases/5/assets"))
        .and(query_param("name", "widgets v1&2 #linux"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 10,
            "name": "widgets v1&2 #linux",
            "download_count": 0,
            "browser_download_url": "https://gitea.example.com/attachments/10"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let asset = provider
        .upload_release_asset(
            "acme",
            "widgets",
            5,
            "widgets v1&2 #linux",
            Bytes::from_static(b"binary-bits"),
        )
        .await
        .unwrap();

    assert_eq!(asset.name, "widgets v1&2 #linux");
}

#[tokio::test]
async fn user_info_returns_none_when_the_lookup_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let user = provider.user_info("ghost").await.unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn unsupported_operations_return_the_sentinel() {
    let server = MockServer::start().await;
    let provider = provider_for(&server).await;

    let error = provider.list_webhooks("acme", "widgets").await.unwrap_err();
    assert!(error.is_not_supported());
    assert_eq!(error.operation(), Some("ListWebHooks"));

    let error = provider
        .rename_repository("acme", "widgets", "gadgets")
        .await
        .unwrap_err();
    assert!(error.is_not_supported());

    let error = provider
        .update_commit_status("acme", "widgets", "abc", &Default::default())
        .await
        .unwrap_err();
    assert!(error.is_not_supported());

    // No network traffic for any of these.
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn get_pull_request_commits_degrades_to_empty() {
    let server = MockServer::start().await;
    let provider = provider_for(&server).await;
    let repo = GitRepository {
        name: "widgets".to_string(),
        ..Default::default()
    };

    let commits = provider
        .get_pull_request_commits("acme", &repo, 7)
        .await
        .unwrap();
    assert!(commits.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}
