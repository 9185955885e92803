mod common;

use anyhow::Result;
use serde_json::json;

use clarify_client::dialog::DialogChoice;
use clarify_client::pages::{AdminPage, LoginPage, RecoveryFlow, RecoveryStep, RegisterForm};
use clarify_client::render::views::{NO_MATCHING_USERS, NO_USERS};
use clarify_client::session::{SessionStore, ACTIVE_GROUP_KEY, USER_PLAN_KEY};
use clarify_client::ClientError;

fn seed_admin(h: &common::Harness) {
    h.mock.respond(
        "GET",
        "/api/admin/dashboard/stats",
        200,
        json!({ "total_users": 3, "premium_users": 1, "total_groups": 2, "total_transactions": 41 }),
    );
    h.mock.respond(
        "GET",
        "/api/admin/users/",
        200,
        json!([
            common::user_json(1, "Ana Souza", "ana@clarify.app", "premium"),
            common::user_json(2, "Bruno Lima", "bruno@mail.com", "gratuito"),
            common::user_json(3, "Carla Dias", "carla@mail.com", "gratuito")
        ]),
    );
}

#[tokio::test]
async fn search_filters_cached_list_without_requests() -> Result<()> {
    let h = common::Harness::new(vec![]).await?.logged_in("tok", None);
    seed_admin(&h);

    let mut page = AdminPage::open(h.ctx.clone())?;
    page.refresh().await?;
    assert!(page.view().frame().contains("Usuários:       3"));
    let after_load = h.mock.hits().len();
    assert_eq!(after_load, 2);

    page.set_query("MAIL.COM");
    let ids: Vec<&str> = page.visible_users().iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "3"]);
    assert!(!page.view().frame().contains("Ana Souza"));

    page.set_query("zzz");
    assert!(page.visible_users().is_empty());
    assert!(page.view().frame().contains(NO_MATCHING_USERS));

    page.set_query("");
    assert_eq!(page.visible_users().len(), 3);

    assert_eq!(h.mock.hits().len(), after_load);
    Ok(())
}

#[tokio::test]
async fn empty_user_list_has_its_own_message() -> Result<()> {
    let h = common::Harness::new(vec![]).await?.logged_in("tok", None);
    h.mock.respond("GET", "/api/admin/dashboard/stats", 200, json!({}));
    h.mock.respond("GET", "/api/admin/users/", 200, json!([]));

    let mut page = AdminPage::open(h.ctx.clone())?;
    page.refresh().await?;
    assert!(page.view().frame().contains(NO_USERS));
    Ok(())
}

#[tokio::test]
async fn grant_premium_needs_confirmation() -> Result<()> {
    let h = common::Harness::new(vec![DialogChoice::Cancel, DialogChoice::Confirm])
        .await?
        .logged_in("tok", None);
    seed_admin(&h);
    h.mock.respond("POST", "/api/admin/users/2/grant-premium", 200, json!({ "ok": true }));

    let mut page = AdminPage::open(h.ctx.clone())?;
    page.refresh().await?;

    assert!(!page.grant_premium("2").await?);
    assert!(h.mock.hits_for("POST", "/api/admin/users/2/grant-premium").is_empty());

    assert!(page.grant_premium("2").await?);
    assert_eq!(h.mock.hits_for("POST", "/api/admin/users/2/grant-premium").len(), 1);
    assert_eq!(h.mock.hits_for("GET", "/api/admin/users/").len(), 2);
    assert!(h.prompter.shown()[1].message.contains("Bruno Lima"));
    Ok(())
}

#[tokio::test]
async fn user_detail_lists_transactions() -> Result<()> {
    let h = common::Harness::new(vec![]).await?.logged_in("tok", None);
    let mut user = common::user_json(2, "Bruno Lima", "bruno@mail.com", "gratuito");
    user["movimentacoes"] = json!([
        { "descricao": "Salário", "tipo": "ganho", "valor": 4200, "data_transacao": "2024-03-05" }
    ]);
    h.mock.respond("GET", "/api/admin/users/2", 200, user);

    let mut page = AdminPage::open(h.ctx.clone())?;
    let detail = page.user_detail("2").await?;
    assert_eq!(detail.movimentacoes.len(), 1);
    let frame = page.view().frame();
    assert!(frame.contains("Bruno Lima <bruno@mail.com>"));
    assert!(frame.contains("Salário"));
    assert!(frame.contains("R$ 4.200,00"));
    Ok(())
}

#[tokio::test]
async fn login_stores_token_and_plan() -> Result<()> {
    let h = common::Harness::new(vec![]).await?;
    h.mock.respond(
        "POST",
        "/collaborators/token",
        200,
        json!({ "access_token": "fresh", "token_type": "bearer" }),
    );
    h.mock.respond("GET", "/users/me", 200, common::user_json(1, "Ana", "ana@x.com", "premium"));

    let mut page = LoginPage::new(h.ctx.clone());
    let user = page.login("ana@x.com", "segredo", false).await?;
    assert_eq!(user.nome, "Ana");

    let login = &h.mock.hits_for("POST", "/collaborators/token")[0];
    assert_eq!(login.authorization, None);
    assert_eq!(login.body, json!({ "email": "ana@x.com", "password": "segredo" }));
    assert_eq!(
        h.mock.hits_for("GET", "/users/me")[0].authorization.as_deref(),
        Some("Bearer fresh")
    );
    assert_eq!(h.token().as_deref(), Some("fresh"));
    assert_eq!(h.store.get(USER_PLAN_KEY)?.as_deref(), Some("premium"));

    page.select_group("5")?;
    assert_eq!(h.store.get(ACTIVE_GROUP_KEY)?.as_deref(), Some("5"));

    page.logout()?;
    assert_eq!(h.token(), None);
    assert_eq!(h.store.get(ACTIVE_GROUP_KEY)?, None);
    Ok(())
}

#[tokio::test]
async fn legacy_login_posts_a_form() -> Result<()> {
    let h = common::Harness::new(vec![]).await?;
    h.mock.respond("POST", "/token", 200, json!({ "access_token": "legacy" }));
    h.mock.respond("GET", "/users/me", 200, common::user_json(1, "Ana", "ana@x.com", "gratuito"));

    let mut page = LoginPage::new(h.ctx.clone());
    page.login("ana@x.com", "segredo", true).await?;

    let hit = &h.mock.hits_for("POST", "/token")[0];
    assert!(hit
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded")));
    assert_eq!(hit.body, json!({ "username": "ana@x.com", "password": "segredo" }));
    assert_eq!(h.token().as_deref(), Some("legacy"));
    Ok(())
}

#[tokio::test]
async fn login_after_expiry_redirects_again_on_next_expiry() -> Result<()> {
    let h = common::Harness::new(vec![]).await?.logged_in("stale", None);
    h.mock.respond("GET", "/api/admin/users/9", 401, json!({ "detail": "expired" }));
    h.mock.respond("POST", "/collaborators/token", 200, json!({ "access_token": "fresh" }));
    h.mock.respond("GET", "/users/me", 200, common::user_json(1, "Ana", "ana@x.com", "premium"));

    assert!(h.ctx.api.admin_user("9").await.is_err());
    assert_eq!(h.navigator.redirects(), 1);

    LoginPage::new(h.ctx.clone()).login("ana@x.com", "segredo", false).await?;
    assert!(h.ctx.api.admin_user("9").await.is_err());
    assert_eq!(h.navigator.redirects(), 2);
    Ok(())
}

#[tokio::test]
async fn registration_checks_passwords_locally() -> Result<()> {
    let h = common::Harness::new(vec![]).await?;
    h.mock.respond("POST", "/register", 201, json!({ "id": 10 }));

    let mut page = LoginPage::new(h.ctx.clone());
    let mismatch = RegisterForm {
        nome: "Dani".to_string(),
        email: "dani@x.com".to_string(),
        password: "abc123".to_string(),
        confirm_password: "abc124".to_string(),
    };
    assert!(matches!(page.register(&mismatch).await, Err(ClientError::Validation(_))));
    assert!(h.mock.hits().is_empty());

    let ok = RegisterForm {
        confirm_password: "abc123".to_string(),
        ..mismatch
    };
    page.register(&ok).await?;
    assert_eq!(
        h.mock.hits_for("POST", "/register")[0].body,
        json!({ "nome": "Dani", "email": "dani@x.com", "password": "abc123" })
    );
    Ok(())
}

#[tokio::test]
async fn recovery_walks_code_then_reset() -> Result<()> {
    let h = common::Harness::new(vec![]).await?;
    h.mock.respond("POST", "/api/forgot-password", 200, json!({ "message": "ok" }));
    h.mock.on("POST", "/api/verify-code", |req| {
        if req.body["code"] == "123456" {
            (200, json!({ "valid": true }))
        } else {
            (400, json!({ "detail": "Código inválido ou expirado" }))
        }
    });
    h.mock.respond("POST", "/api/reset-password", 200, json!({ "message": "ok" }));

    let mut flow = RecoveryFlow::new(h.ctx.clone());
    assert!(flow.verify_code("123456").await.is_err());

    flow.request_code("ana@x.com").await?;
    assert_eq!(
        flow.step(),
        &RecoveryStep::VerifyCode { email: "ana@x.com".to_string() }
    );

    let err = flow.verify_code("000000").await.unwrap_err();
    assert_eq!(err.to_string(), "Código inválido ou expirado");
    flow.verify_code("123456").await?;

    assert!(flow.reset_password("nova", "outra").await.is_err());
    assert!(h.mock.hits_for("POST", "/api/reset-password").is_empty());

    flow.reset_password("nova", "nova").await?;
    assert_eq!(flow.step(), &RecoveryStep::Done);
    let reset = &h.mock.hits_for("POST", "/api/reset-password")[0];
    assert_eq!(reset.body["email"], "ana@x.com");
    assert_eq!(reset.body["code"], "123456");
    Ok(())
}
