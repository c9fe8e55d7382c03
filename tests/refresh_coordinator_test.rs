//! Integration tests for 401 recovery through `ApiClient`.
//!
//! The refresh endpoint is held behind a gate so several requests can fail
//! while one exchange is outstanding; the gate is released once the
//! expected number of callers has queued.

mod common;

use std::sync::Arc;

use common::*;
use folio::auth::{CoordinatorState, SessionManager};
use folio::error::AuthError;
use folio::traits::TeardownReason;
use folio::ClientError;
use futures::future::join_all;
use serde_json::json;

fn bearer(token: &str) -> Option<String> {
    Some(format!("Bearer {}", token))
}

/// URLs of the recorded requests that carried `token`, in issue order.
fn urls_sent_with(mock: &MockHttpClient, token: &str) -> Vec<String> {
    let expected = format!("Bearer {}", token);
    mock.get_requests()
        .into_iter()
        .filter(|request| request.header(AUTHORIZATION) == Some(expected.as_str()))
        .map(|request| request.url)
        .collect()
}

#[tokio::test]
async fn test_two_concurrent_401s_share_one_refresh() {
    let t = TestClient::signed_in();
    let projects = t.url("/api/project");
    let skills = t.url("/api/skill");
    t.mock.set_response(REFRESH_URL, refresh_ok("T2", "R2"));
    t.mock.set_handler(&projects, accept_only("T2"));
    t.mock.set_handler(&skills, accept_only("T2"));
    let gate = t.mock.hold(REFRESH_URL);

    let (a, b, _) = tokio::join!(
        t.client.send(ApiRequest::get(projects.as_str())),
        t.client.send(ApiRequest::get(skills.as_str())),
        async {
            t.wait_for_queue(1).await;
            gate.release();
        }
    );

    assert_eq!(a.unwrap().status, 200);
    assert_eq!(b.unwrap().status, 200);

    assert_eq!(t.mock.request_count(REFRESH_URL), 1);
    let refresh = &t.mock.requests_to(REFRESH_URL)[0];
    let body: serde_json::Value = serde_json::from_str(refresh.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "refresh_token": "R1" }));

    assert_eq!(t.mock.authorizations_to(&projects), vec![bearer("T1"), bearer("T2")]);
    assert_eq!(t.mock.authorizations_to(&skills), vec![bearer("T1"), bearer("T2")]);
    assert_eq!(urls_sent_with(&t.mock, "T2"), vec![projects, skills]);

    assert_eq!(t.stored("access_token").as_deref(), Some("T2"));
    assert_eq!(t.stored("refresh_token").as_deref(), Some("R2"));
    assert_eq!(t.state(), CoordinatorState::Idle);
    assert_eq!(t.notifier.count(), 0);
}

#[tokio::test]
async fn test_many_401s_replay_in_failure_order() {
    let t = TestClient::signed_in();
    t.mock.set_response(REFRESH_URL, refresh_ok("T2", "R2"));
    t.mock.set_handler(&t.url("/api/project"), accept_only("T2"));
    let gate = t.mock.hold(REFRESH_URL);

    let urls: Vec<String> = (0..5).map(|i| t.url(&format!("/api/project/{}", i))).collect();
    let sends = urls
        .iter()
        .map(|url| t.client.send(ApiRequest::get(url.as_str())));

    let (results, _) = tokio::join!(join_all(sends), async {
        t.wait_for_queue(4).await;
        gate.release();
    });

    for result in results {
        assert_eq!(result.unwrap().status, 200);
    }
    assert_eq!(t.mock.request_count(REFRESH_URL), 1);
    assert_eq!(urls_sent_with(&t.mock, "T1"), urls);
    assert_eq!(urls_sent_with(&t.mock, "T2"), urls);
}

#[tokio::test]
async fn test_refresh_failure_rejects_every_queued_caller() {
    let t = TestClient::signed_in();
    t.mock.set_response(REFRESH_URL, refresh_declined());
    t.mock.set_handler(&t.url("/api/project"), accept_only("T2"));
    let gate = t.mock.hold(REFRESH_URL);

    let urls: Vec<String> = (0..3).map(|i| t.url(&format!("/api/project/{}", i))).collect();
    let sends = urls
        .iter()
        .map(|url| t.client.send(ApiRequest::get(url.as_str())));

    let (results, _) = tokio::join!(join_all(sends), async {
        t.wait_for_queue(2).await;
        gate.release();
    });

    for result in results {
        match result {
            Err(ClientError::Auth(AuthError::RefreshRejected { message })) => {
                assert_eq!(message, "Invalid refresh token")
            }
            other => panic!("expected refresh rejection, got {:?}", other),
        }
    }

    assert_eq!(t.mock.request_count(REFRESH_URL), 1);
    // No replays after a failed refresh.
    assert!(urls_sent_with(&t.mock, "T2").is_empty());
    assert!(t.store.is_empty());
    assert_eq!(t.notifier.count(), 1);
    assert!(matches!(
        t.notifier.reasons()[0],
        TeardownReason::RefreshFailed(AuthError::RefreshRejected { .. })
    ));
    assert_eq!(t.state(), CoordinatorState::Idle);
}

#[tokio::test]
async fn test_missing_refresh_token_rejects_without_refresh_call() {
    let t = TestClient::with_entries(&[("access_token", "T1"), ("user", "{}")]);
    t.mock.set_handler(&t.url("/api/skill"), accept_only("T2"));

    let err = t
        .client
        .send(ApiRequest::get(t.url("/api/skill")))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Auth(AuthError::MissingRefreshToken)));
    assert!(err.requires_reauth());
    assert_eq!(t.mock.request_count(REFRESH_URL), 0);
    assert!(t.store.is_empty());
    assert_eq!(t.notifier.count(), 1);
}

#[tokio::test]
async fn test_status_false_refresh_tears_down() {
    let t = TestClient::signed_in();
    t.mock.set_response(REFRESH_URL, refresh_declined());
    t.mock.set_handler(&t.url("/api/skill"), accept_only("T2"));

    let err = t
        .client
        .get_json::<serde_json::Value>("/api/skill")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Auth(AuthError::RefreshRejected { .. })));
    assert!(t.store.is_empty());
    assert_eq!(t.notifier.count(), 1);
}

#[tokio::test]
async fn test_replayed_401_is_not_retried_again() {
    let t = TestClient::signed_in();
    let skills = t.url("/api/skill");
    t.mock.set_response(REFRESH_URL, refresh_ok("T2", "R2"));
    t.mock.set_handler(&skills, accept_only("T3"));

    let response = t.client.send(ApiRequest::get(skills.as_str())).await.unwrap();
    assert_eq!(response.status, 401);

    let err = t
        .client
        .get_json::<serde_json::Value>("/api/skill")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));

    // One refresh per call, one replay per call.
    assert_eq!(t.mock.request_count(REFRESH_URL), 2);
    assert_eq!(t.mock.request_count(&skills), 4);
    // A 401 on a replay is an ordinary failure, not a teardown.
    assert_eq!(t.notifier.count(), 0);
}

#[tokio::test]
async fn test_non_401_failures_pass_through_during_refresh() {
    let t = TestClient::signed_in();
    let projects = t.url("/api/project");
    let broken = t.url("/api/personal-info");
    t.mock.set_response(REFRESH_URL, refresh_ok("T2", "R2"));
    t.mock.set_handler(&projects, accept_only("T2"));
    t.mock.set_response(&broken, MockResponse::status(500));
    let gate = t.mock.hold(REFRESH_URL);

    let (a, b) = tokio::join!(t.client.send(ApiRequest::get(projects.as_str())), async {
        let response = t.client.send(ApiRequest::get(broken.as_str())).await;
        assert_eq!(t.state(), CoordinatorState::Refreshing { queued: 0 });
        gate.release();
        response
    });

    assert_eq!(a.unwrap().status, 200);
    assert_eq!(b.unwrap().status, 500);
    assert_eq!(t.mock.request_count(&broken), 1);
}

#[tokio::test]
async fn test_each_episode_refreshes_once() {
    let t = TestClient::signed_in();
    let skills = t.url("/api/skill");
    t.mock.push_response(REFRESH_URL, refresh_ok("T2", "R2"));
    t.mock.push_response(REFRESH_URL, refresh_ok("T3", "R3"));

    t.mock.set_handler(&skills, accept_only("T2"));
    t.client.send(ApiRequest::get(skills.as_str())).await.unwrap();

    // The server revokes T2.
    t.mock.set_handler(&skills, accept_only("T3"));
    let response = t.client.send(ApiRequest::get(skills.as_str())).await.unwrap();
    assert_eq!(response.status, 200);

    let refreshes = t.mock.requests_to(REFRESH_URL);
    assert_eq!(refreshes.len(), 2);
    let second: serde_json::Value =
        serde_json::from_str(refreshes[1].body.as_deref().unwrap()).unwrap();
    assert_eq!(second["refresh_token"], "R2");
    assert_eq!(t.stored("access_token").as_deref(), Some("T3"));
}

#[tokio::test]
async fn test_explicit_refresh_joins_running_episode() {
    let t = TestClient::signed_in();
    let projects = t.url("/api/project");
    t.mock.set_response(REFRESH_URL, refresh_ok("T2", "R2"));
    t.mock.set_handler(&projects, accept_only("T2"));
    let gate = t.mock.hold(REFRESH_URL);
    let session = SessionManager::new(t.client.clone());

    let (a, refreshed, _) = tokio::join!(
        t.client.send(ApiRequest::get(projects.as_str())),
        session.refresh_access_token(),
        async {
            t.wait_for_queue(1).await;
            gate.release();
        }
    );

    assert_eq!(a.unwrap().status, 200);
    refreshed.unwrap();
    assert_eq!(t.mock.request_count(REFRESH_URL), 1);
}

#[tokio::test]
async fn test_no_token_sends_no_authorization() {
    let t = TestClient::with_entries(&[]);
    let skills = t.url("/api/skill");
    t.mock.set_response(&skills, envelope(json!([])));

    t.client.send(ApiRequest::get(skills.as_str())).await.unwrap();

    assert_eq!(t.mock.authorizations_to(&skills), vec![None]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_tasks_on_multi_thread_runtime() {
    let t = TestClient::signed_in();
    t.mock.set_response(REFRESH_URL, refresh_ok("T2", "R2"));
    t.mock.set_handler(&t.url("/api/project"), accept_only("T2"));
    let gate = t.mock.hold(REFRESH_URL);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = Arc::clone(&t.client);
            let url = t.url(&format!("/api/project/{}", i));
            tokio::spawn(async move { client.send(ApiRequest::get(url)).await })
        })
        .collect();

    t.wait_for_queue(7).await;
    gate.release();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().status, 200);
    }
    assert_eq!(t.mock.request_count(REFRESH_URL), 1);
    assert_eq!(urls_sent_with(&t.mock, "T2").len(), 8);
    assert_eq!(t.state(), CoordinatorState::Idle);
}
