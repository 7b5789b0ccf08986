//! End-to-end checks against a live API.
//!
//! Runs only when `BASE_URL` (and usually `REQRES_API_KEY`) is set; every test
//! is skipped otherwise.

use reqres_harness::{
    assertions, fixtures, users_page_path, wait_for_rate_limit, AuthCredential, HarnessConfig,
    ReqresClient, RetryPolicy,
};

fn live_client() -> Option<ReqresClient> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    match HarnessConfig::from_env() {
        Ok(config) => Some(ReqresClient::from_config(&config)),
        Err(err) => {
            eprintln!("skipping live test: {err}");
            None
        }
    }
}

#[tokio::test]
async fn live_user_directory() {
    let Some(client) = live_client() else {
        return;
    };

    let page = client.list_users_page(1).await.expect("page 1 must load");
    assert_eq!(page.page, 1);

    let user = client.get_user(2).await.expect("user 2 must exist");
    assert_eq!(user.data.id, 2);
    let again = client.get_user(2).await.expect("user 2 must exist");
    assert_eq!(user, again);

    let err = client
        .get_user(999)
        .await
        .expect_err("user 999 must not exist");
    assert_eq!(err.status(), Some(404));

    let all = client.list_all_users().await.expect("walk must succeed");
    assert_eq!(all.len() as u32, page.total);
}

#[tokio::test]
async fn live_create_update_delete_flow() {
    let Some(client) = live_client() else {
        return;
    };
    let user = fixtures::create_user_payload();

    let created = client.create_user(&user).await.expect("create must succeed");
    assertions::expect_valid_user(&created).expect("created user must be complete");
    let id: u64 = created
        .id
        .as_deref()
        .and_then(|id| id.parse().ok())
        .expect("created id must be numeric");

    let updated = client
        .update_user(id, &user.with_job("Lead QA"))
        .await
        .expect("update must succeed");
    assert!(!updated.updated_at.is_empty());

    let status = client.delete_user(id).await.expect("delete must complete");
    assert_eq!(status.as_u16(), 204);
}

#[tokio::test]
async fn live_auth_scenarios() {
    let Some(client) = live_client() else {
        return;
    };

    let registered = client
        .register(&fixtures::auth_data())
        .await
        .expect("registration must succeed");
    assert!(registered.id.is_some());
    assert!(registered.token.is_some());

    let err = client
        .register(&AuthCredential::email_only(fixtures::EXISTING_EMAIL))
        .await
        .expect_err("registration without password must fail");
    assertions::expect_http_status(&err.to_string(), 400).expect("message must mention 400");
    assert!(err.to_string().contains(fixtures::MISSING_PASSWORD));

    let token = client
        .login_token(fixtures::DEFAULT_EMAIL, fixtures::DEFAULT_PASSWORD)
        .await
        .expect("login must complete");
    let Some(token) = token else {
        panic!("login must return a token");
    };

    let secured = client
        .with_bearer(token)
        .http()
        .get_raw(&users_page_path(1))
        .await
        .expect("secured request must complete");
    assertions::expect_status_ok(secured.status.as_u16()).expect("secured list must be 200");
}

#[tokio::test]
async fn live_resilience_checks() {
    let Some(client) = live_client() else {
        return;
    };
    let path = users_page_path(1);

    let response = RetryPolicy::default()
        .run(|| client.http().get_raw(&path))
        .await
        .expect("request must complete");
    assertions::expect_status_below_500(response.status.as_u16()).expect("must be below 500");

    let response = client.http().get_raw(&path).await.expect("request must complete");
    wait_for_rate_limit(&response).await;
    assertions::expect_rate_limit_status(response.status.as_u16())
        .expect("status must be 200 or 429");

    if response.is_success() {
        assertions::expect_json_content_type(&response.headers).expect("body must be JSON");
        assertions::expect_response_time(response.elapsed, assertions::DEFAULT_MAX_RESPONSE_TIME)
            .expect("response must be fast enough");
    }
}
