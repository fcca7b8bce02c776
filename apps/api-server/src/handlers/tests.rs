use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use blog_core::domain::{Post, PostDraft};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository, TokenService};
use blog_infra::auth::{JwtConfig, JwtTokenService};
use blog_infra::database::{InMemoryStore, InMemoryThemeRepository};

use super::configure_routes;
use crate::middleware::auth::ADMIN_ROLE;
use crate::state::AppState;

fn jwt() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret: "handler-test-secret".to_string(),
        expiration_hours: 1,
        issuer: "blog-test".to_string(),
    })
}

fn tokens() -> Arc<dyn TokenService> {
    Arc::new(jwt())
}

fn bearer(roles: &[&str]) -> (header::HeaderName, String) {
    let roles = roles.iter().map(|r| r.to_string()).collect();
    let token = jwt().generate_token(1, "autor@blog.com", roles).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

fn user() -> (header::HeaderName, String) {
    bearer(&["NORMAL"])
}

fn admin() -> (header::HeaderName, String) {
    bearer(&[ADMIN_ROLE])
}

fn memory_state() -> AppState {
    AppState::in_memory(Arc::new(InMemoryStore::with_users([1])))
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(web::Data::new(tokens()))
                .configure(configure_routes),
        )
        .await
    };
}

/// Post repository that records calls and can simulate a broken store.
struct CountingRepository {
    calls: AtomicUsize,
    broken: bool,
}

impl CountingRepository {
    fn new(broken: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            broken,
        })
    }

    fn hit(&self) -> Result<(), RepoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(RepoError::Connection("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Post, PostDraft, i32> for CountingRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        self.hit().map(|_| Vec::new())
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Post>, RepoError> {
        self.hit().map(|_| None)
    }

    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError> {
        self.hit()?;
        Ok(Post::from_draft(1, draft, chrono::Utc::now()))
    }

    async fn update(&self, id: i32, _draft: PostDraft) -> Result<Post, RepoError> {
        self.hit()?;
        Err(RepoError::not_found("Post", id))
    }

    async fn delete(&self, _id: i32) -> Result<(), RepoError> {
        self.hit()
    }
}

impl PostRepository for CountingRepository {}

fn repo_state(repo: Arc<CountingRepository>) -> AppState {
    AppState {
        posts: repo,
        themes: Arc::new(InMemoryThemeRepository::new(Arc::new(InMemoryStore::new()))),
        storage: "memory",
    }
}

fn post_body(title: &str, theme_id: i32) -> Value {
    json!({
        "titulo": title,
        "descricao": "Um pouco mais...",
        "foto": "URLFOTO",
        "criador": { "id": 1 },
        "tema": { "id": theme_id }
    })
}

#[actix_web::test]
async fn test_anonymous_caller_never_reaches_repository() {
    let repo = CountingRepository::new(false);
    let app = init_app!(repo_state(repo.clone()));

    let req = test::TestRequest::get().uri("/api/Postagens").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["Mensagem"].is_string());
    assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_garbage_token_is_unauthorized() {
    let repo = CountingRepository::new(false);
    let app = init_app!(repo_state(repo.clone()));

    let req = test::TestRequest::delete()
        .uri("/api/Postagens/deletar/1")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_empty_lists_are_no_content() {
    let app = init_app!(memory_state());

    for uri in ["/api/Postagens", "/api/Temas"] {
        let req = test::TestRequest::get().uri(uri).insert_header(user()).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT, "{uri}");
        let body = test::read_body(resp).await;
        assert!(body.is_empty());
    }
}

#[actix_web::test]
async fn test_create_theme_returns_created_with_location() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/Temas")
        .insert_header(user())
        .set_json(json!({ "descricao": "Programação" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/api/Temas/id/1"
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "id": 1, "descricao": "Programação" }));
}

#[actix_web::test]
async fn test_blank_theme_is_bad_request() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/Temas")
        .insert_header(user())
        .set_json(json!({ "descricao": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "Mensagem": "descricao is required" }));
}

#[actix_web::test]
async fn test_delete_missing_theme_as_admin_is_not_found() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::delete()
        .uri("/api/Temas/deletar/999")
        .insert_header(admin())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "Mensagem": "Theme with id 999 not found" }));
}

#[actix_web::test]
async fn test_theme_writes_need_admin_but_reads_do_not() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/Temas")
        .insert_header(user())
        .set_json(json!({ "descricao": "Rust" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::put()
        .uri("/api/Temas")
        .insert_header(user())
        .set_json(json!({ "id": 1, "descricao": "Go" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri("/api/Temas/deletar/1")
        .insert_header(user())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/Temas/id/1")
        .insert_header(user())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["descricao"], "Rust");

    let req = test::TestRequest::get().uri("/api/Temas").insert_header(user()).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_admin_updates_and_deletes_theme() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/Temas")
        .insert_header(admin())
        .set_json(json!({ "descricao": "Programação" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let update = json!({ "id": 1, "descricao": "Linguagens de programação" });
    let req = test::TestRequest::put()
        .uri("/api/Temas")
        .insert_header(admin())
        .set_json(update.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, update);

    let req = test::TestRequest::delete()
        .uri("/api/Temas/deletar/1")
        .insert_header(admin())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/Temas/id/1")
        .insert_header(admin())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_unknown_theme_is_bad_request() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::put()
        .uri("/api/Temas")
        .insert_header(admin())
        .set_json(json!({ "id": 42, "descricao": "Go" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["Mensagem"], "Theme with id 42 not found");
}

#[actix_web::test]
async fn test_post_create_then_get_roundtrip() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/Temas")
        .insert_header(user())
        .set_json(json!({ "descricao": "Vida" }))
        .to_request();
    let theme: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/Postagens")
        .insert_header(user())
        .set_json(post_body("Um dia na vida", theme["id"].as_i64().unwrap() as i32))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["titulo"], "Um dia na vida");
    assert_eq!(created["criador"], json!({ "id": 1 }));

    let uri = format!("/api/Postagens/id/{}", created["id"]);
    let req = test::TestRequest::get().uri(&uri).insert_header(user()).to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::get().uri("/api/Postagens").insert_header(user()).to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, json!([created]));
}

#[actix_web::test]
async fn test_post_update_is_reflected_by_get() {
    let app = init_app!(memory_state());

    for description in ["Vida", "Trabalho"] {
        let req = test::TestRequest::post()
            .uri("/api/Temas")
            .insert_header(user())
            .set_json(json!({ "descricao": description }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }
    let req = test::TestRequest::post()
        .uri("/api/Postagens")
        .insert_header(user())
        .set_json(post_body("Um dia na vida", 1))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let update = json!({
        "id": 1,
        "titulo": "Outro dia na vida",
        "descricao": "Um pouco menos...",
        "foto": null,
        "criador": { "id": 1 },
        "tema": { "id": 2 }
    });
    let req = test::TestRequest::put()
        .uri("/api/Postagens")
        .insert_header(user())
        .set_json(update.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: Value = test::read_body_json(resp).await;
    assert_eq!(echoed, update);

    let req = test::TestRequest::get()
        .uri("/api/Postagens/id/1")
        .insert_header(user())
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    for field in ["id", "titulo", "descricao", "foto", "criador", "tema"] {
        assert_eq!(fetched[field], update[field], "{field}");
    }
}

#[actix_web::test]
async fn test_padded_text_is_stored_as_sent() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/Temas")
        .insert_header(admin())
        .set_json(json!({ "descricao": "Programação" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let theme = json!({ "id": 1, "descricao": "  Linguagens  " });
    let req = test::TestRequest::put()
        .uri("/api/Temas")
        .insert_header(admin())
        .set_json(theme.clone())
        .to_request();
    let echoed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(echoed, theme);

    let req = test::TestRequest::get().uri("/api/Temas/id/1").insert_header(user()).to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, theme);

    let req = test::TestRequest::post()
        .uri("/api/Postagens")
        .insert_header(user())
        .set_json(post_body("Um dia na vida", 1))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let post = json!({
        "id": 1,
        "titulo": " Um dia na vida ",
        "descricao": "Um pouco mais...\n",
        "foto": " URLFOTO ",
        "criador": { "id": 1 },
        "tema": { "id": 1 }
    });
    let req = test::TestRequest::put()
        .uri("/api/Postagens")
        .insert_header(user())
        .set_json(post.clone())
        .to_request();
    let echoed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(echoed, post);

    let req = test::TestRequest::get()
        .uri("/api/Postagens/id/1")
        .insert_header(user())
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    for field in ["id", "titulo", "descricao", "foto", "criador", "tema"] {
        assert_eq!(fetched[field], post[field], "{field}");
    }
}

#[actix_web::test]
async fn test_post_update_with_unknown_references_is_bad_request() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/Temas")
        .insert_header(user())
        .set_json(json!({ "descricao": "Vida" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    let req = test::TestRequest::post()
        .uri("/api/Postagens")
        .insert_header(user())
        .set_json(post_body("Um dia na vida", 1))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let cases = [
        (1, 42, "Invalid reference: Theme with id 42 does not exist"),
        (7, 1, "Invalid reference: User with id 7 does not exist"),
    ];
    for (creator, theme, message) in cases {
        let req = test::TestRequest::put()
            .uri("/api/Postagens")
            .insert_header(user())
            .set_json(json!({
                "id": 1,
                "titulo": "Outro dia na vida",
                "descricao": "Um pouco menos...",
                "criador": { "id": creator },
                "tema": { "id": theme }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["Mensagem"], message);
    }

    let req = test::TestRequest::get()
        .uri("/api/Postagens/id/1")
        .insert_header(user())
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["titulo"], "Um dia na vida");
}

#[actix_web::test]
async fn test_post_delete_then_get_is_not_found() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/Temas")
        .insert_header(user())
        .set_json(json!({ "descricao": "Vida" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    let req = test::TestRequest::post()
        .uri("/api/Postagens")
        .insert_header(user())
        .set_json(post_body("Um dia na vida", 1))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::delete()
        .uri("/api/Postagens/deletar/1")
        .insert_header(user())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::get()
        .uri("/api/Postagens/id/1")
        .insert_header(user())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/Postagens").insert_header(user()).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_post_with_unknown_theme_is_bad_request() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/Postagens")
        .insert_header(user())
        .set_json(post_body("Sem tema", 42))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["Mensagem"],
        "Invalid reference: Theme with id 42 does not exist"
    );
}

#[actix_web::test]
async fn test_post_without_title_or_theme_is_bad_request() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/Postagens")
        .insert_header(user())
        .set_json(post_body("", 1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["Mensagem"], "titulo is required");

    let req = test::TestRequest::post()
        .uri("/api/Postagens")
        .insert_header(user())
        .set_json(json!({ "titulo": "x", "descricao": "y", "criador": { "id": 1 } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["Mensagem"], "tema is required");
}

#[actix_web::test]
async fn test_missing_post_is_not_found_for_get_and_delete() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::get()
        .uri("/api/Postagens/id/999")
        .insert_header(user())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["Mensagem"], "Post with id 999 not found");

    let req = test::TestRequest::delete()
        .uri("/api/Postagens/deletar/999")
        .insert_header(user())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_without_id_is_bad_request() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::put()
        .uri("/api/Postagens")
        .insert_header(user())
        .set_json(post_body("Sem id", 1))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["Mensagem"], "id is required");
}

#[actix_web::test]
async fn test_store_failure_is_internal_error_not_not_found() {
    let repo = CountingRepository::new(true);
    let app = init_app!(repo_state(repo.clone()));

    let req = test::TestRequest::get()
        .uri("/api/Postagens/id/1")
        .insert_header(user())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "Mensagem": "Internal server error" }));
    assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_malformed_body_and_path_keep_message_shape() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/Temas")
        .insert_header(user())
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["Mensagem"].as_str().unwrap().starts_with("Invalid request body"));

    let req = test::TestRequest::get()
        .uri("/api/Temas/id/abc")
        .insert_header(user())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["Mensagem"].is_string());
}

#[actix_web::test]
async fn test_health_is_public() {
    let app = init_app!(memory_state());

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}
