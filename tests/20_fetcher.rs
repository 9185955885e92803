mod common;

use anyhow::Result;
use reqwest::Method;
use serde_json::json;

use clarify_client::error::GENERIC_ERROR_MESSAGE;
use clarify_client::session::{SessionStore, ACTIVE_GROUP_KEY, TOKEN_KEY, USER_PLAN_KEY};
use clarify_client::ClientError;

#[tokio::test]
async fn bearer_token_is_attached() -> Result<()> {
    let h = common::Harness::new(vec![]).await?.logged_in("tok-abc", None);
    h.mock
        .respond("GET", "/users/me", 200, common::user_json(1, "Ana", "ana@x.com", "premium"));

    let user = h.ctx.api.users_me().await?;
    assert_eq!(user.id, "1");
    assert!(user.is_premium());

    let hits = h.mock.hits_for("GET", "/users/me");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].authorization.as_deref(), Some("Bearer tok-abc"));
    Ok(())
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects_once() -> Result<()> {
    let h = common::Harness::new(vec![]).await?.logged_in("stale", Some("4"));
    h.store.set(USER_PLAN_KEY, "premium")?;
    h.mock.respond("GET", "/users/me", 401, json!({ "detail": "Could not validate credentials" }));
    h.mock.respond("GET", "/groups/4/dashboard", 401, json!({ "detail": "expired" }));

    let api = &h.ctx.api;
    let results = futures::future::join_all((0..5).map(|i| async move {
        if i % 2 == 0 {
            api.users_me().await.map(|_| ())
        } else {
            api.dashboard("4").await.map(|_| ())
        }
    }))
    .await;

    assert!(results
        .iter()
        .all(|r| matches!(r, Err(ClientError::SessionExpired))));
    assert_eq!(h.navigator.redirects(), 1);
    assert_eq!(h.store.get(TOKEN_KEY)?, None);
    assert_eq!(h.store.get(ACTIVE_GROUP_KEY)?, None);
    assert_eq!(h.store.get(USER_PLAN_KEY)?, None);
    Ok(())
}

#[tokio::test]
async fn no_request_after_expiry() -> Result<()> {
    let h = common::Harness::new(vec![]).await?.logged_in("stale", None);
    h.mock.respond("GET", "/users/me", 401, json!({ "detail": "expired" }));

    assert!(h.ctx.api.users_me().await.is_err());
    let second = h.ctx.api.users_me().await;
    assert!(matches!(second, Err(ClientError::LoginRequired)));
    assert_eq!(h.mock.hits().len(), 1);
    Ok(())
}

#[tokio::test]
async fn server_detail_is_surfaced() -> Result<()> {
    let h = common::Harness::new(vec![]).await?.logged_in("tok", Some("1"));
    h.mock.respond("POST", "/api/groups/1/invites", 400, json!({ "detail": "Limite de membros atingido" }));
    h.mock.respond(
        "PUT",
        "/users/me",
        422,
        json!({ "detail": [
            { "loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error" }
        ] }),
    );
    h.mock.respond("DELETE", "/users/me", 500, json!({ "error": "boom" }));

    let err = h.ctx.api.invite("1", "x@y.com").await.unwrap_err();
    assert_eq!(err.to_string(), "Limite de membros atingido");
    assert_eq!(err.status(), Some(400));

    let update = clarify_client::api::endpoints::ProfileUpdate {
        nome: "Ana".to_string(),
        email: "nope".to_string(),
    };
    let err = h.ctx.api.update_me(&update).await.unwrap_err();
    assert_eq!(err.to_string(), "email: value is not a valid email address");

    let err = h.ctx.api.delete_me().await.unwrap_err();
    assert_eq!(err.to_string(), GENERIC_ERROR_MESSAGE);

    // none of these end the session
    assert_eq!(h.token().as_deref(), Some("tok"));
    assert_eq!(h.navigator.redirects(), 0);
    Ok(())
}

#[tokio::test]
async fn empty_body_is_null_and_garbage_is_decode_error() -> Result<()> {
    let h = common::Harness::new(vec![]).await?.logged_in("tok", None);
    h.mock.respond("DELETE", "/api/groups/1/members/2", 204, serde_json::Value::Null);

    let value = h.ctx.api.remove_member("1", "2").await?;
    assert!(value.is_null());

    // a 200 whose body is not the expected shape
    h.mock.respond("GET", "/users/me", 200, json!({ "unexpected": true }));
    let err = h.ctx.api.users_me().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
    Ok(())
}

#[tokio::test]
async fn transport_failure_is_reported() -> Result<()> {
    use std::sync::Arc;
    use clarify_client::api::ApiClient;
    use clarify_client::session::{MemorySessionStore, RecordingNavigator, SessionManager};

    let port = portpicker::pick_unused_port().expect("free port");
    let store = Arc::new(MemorySessionStore::new());
    store.set(TOKEN_KEY, "tok")?;
    let session = Arc::new(SessionManager::new(store, Arc::new(RecordingNavigator::new())));
    let api = ApiClient::new(format!("http://127.0.0.1:{}", port), session)?;

    let err = api.request(Method::GET, "/users/me", None).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(!err.is_terminal());
    Ok(())
}

#[tokio::test]
async fn bad_credentials_on_login_do_not_touch_session() -> Result<()> {
    let h = common::Harness::new(vec![]).await?.logged_in("existing", None);
    h.mock.respond("POST", "/collaborators/token", 401, json!({ "detail": "Email ou senha incorretos" }));

    let err = h.ctx.api.login("ana@x.com", "errada").await.unwrap_err();
    assert_eq!(err.to_string(), "Email ou senha incorretos");
    assert_eq!(h.token().as_deref(), Some("existing"));
    assert_eq!(h.navigator.redirects(), 0);
    Ok(())
}
