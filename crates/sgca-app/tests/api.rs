//! End-to-end tests over the real route tree and a real Postgres database.
//!
//! They need `DATABASE_URL` pointing at a migratable database and are
//! therefore ignored by default:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test -p sgca-app -- --ignored
//! ```

use salvo::Service;
use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};
use serde_json::{Value, json};
use uuid::Uuid;

use sgca_app::app;
use sgca_app::db_handler::DbProviderHandler;
use sgca_db::db::connection::create_pool;

async fn service() -> Service {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for api tests");
    sgca_db::run_migrations(&url).expect("migrations should apply");
    let pool = create_pool(&url, 2).await.expect("pool should build");
    Service::new(
        salvo::Router::new()
            .hoop(DbProviderHandler { provider: pool })
            .push(app::api::routes()),
    )
}

fn unique_llave() -> String {
    format!("KEY_{}", Uuid::new_v4().simple().to_string().to_uppercase())
}

fn unique_nombre(prefix: &str) -> String {
    format!("{prefix} {}", Uuid::new_v4().simple())
}

async fn post_json(service: &Service, path: &str, body: &Value) -> (Option<StatusCode>, Value) {
    let mut res = TestClient::post(format!("http://127.0.0.1{path}"))
        .json(body)
        .send(service)
        .await;
    let status = res.status_code;
    let body = res.take_json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

async fn get_json(service: &Service, path: &str) -> (Option<StatusCode>, Value) {
    let mut res = TestClient::get(format!("http://127.0.0.1{path}"))
        .send(service)
        .await;
    let status = res.status_code;
    let body = res.take_json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

async fn crear_aplicacion(service: &Service) -> Value {
    let (status, body) = post_json(
        service,
        "/api/aplicaciones",
        &json!({
            "nombre": unique_nombre("Sistema"),
            "url": format!("https://{}.example", Uuid::new_v4().simple()),
            "llaveIdentificadora": unique_llave(),
            "descripcion": "aplicación de prueba",
            "estado": "ACTIVO",
        }),
    )
    .await;
    assert_eq!(status, Some(StatusCode::CREATED), "body: {body}");
    body["data"].clone()
}

async fn crear_seccion(service: &Service) -> Value {
    let (status, body) = post_json(
        service,
        "/api/secciones",
        &json!({
            "nombre": unique_nombre("Sección"),
            "descripcion": "sección de prueba",
        }),
    )
    .await;
    assert_eq!(status, Some(StatusCode::CREATED), "body: {body}");
    body["data"].clone()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn aplicacion_create_then_read_echoes_fields() {
    let service = service().await;
    let nombre = unique_nombre("Sistema X");
    let llave = unique_llave();
    let url = format!("https://{}.example", Uuid::new_v4().simple());

    let (status, body) = post_json(
        &service,
        "/api/aplicaciones",
        &json!({
            "nombre": nombre,
            "url": url,
            "llaveIdentificadora": llave,
            "descripcion": "d",
            "estado": "ACTIVO",
        }),
    )
    .await;
    assert_eq!(status, Some(StatusCode::CREATED), "body: {body}");
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_str().expect("generated id").to_owned();

    let (status, body) = get_json(&service, &format!("/api/aplicaciones/{id}")).await;
    assert_eq!(status, Some(StatusCode::OK));
    assert_eq!(body["data"]["nombre"], nombre.as_str());
    assert_eq!(body["data"]["url"], url.as_str());
    assert_eq!(body["data"]["llaveIdentificadora"], llave.as_str());
    assert_eq!(body["data"]["descripcion"], "d");
    assert_eq!(body["data"]["estado"], "ACTIVO");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn duplicated_llave_is_rejected_with_conflict_message() {
    let service = service().await;
    let llave = unique_llave();

    let (status, _) = post_json(
        &service,
        "/api/aplicaciones",
        &json!({
            "nombre": unique_nombre("Primero"),
            "url": format!("https://{}.example", Uuid::new_v4().simple()),
            "llaveIdentificadora": llave,
        }),
    )
    .await;
    assert_eq!(status, Some(StatusCode::CREATED));

    let (status, body) = post_json(
        &service,
        "/api/aplicaciones",
        &json!({
            "nombre": unique_nombre("Segundo"),
            "url": format!("https://{}.example", Uuid::new_v4().simple()),
            "llaveIdentificadora": llave,
        }),
    )
    .await;
    assert_eq!(status, Some(StatusCode::BAD_REQUEST));
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains(&llave), "message: {message}");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn accion_referencing_deleted_seccion_is_not_found() {
    let service = service().await;
    let aplicacion = crear_aplicacion(&service).await;
    let seccion = crear_seccion(&service).await;
    let seccion_id = seccion["id"].as_str().unwrap();

    let res = TestClient::delete(format!("http://127.0.0.1/api/secciones/{seccion_id}"))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::OK));

    let (status, body) = post_json(
        &service,
        "/api/acciones",
        &json!({
            "nombre": "N",
            "aplicacionId": aplicacion["id"],
            "seccionId": seccion_id,
        }),
    )
    .await;
    assert_eq!(status, Some(StatusCode::NOT_FOUND), "body: {body}");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn accion_nombre_is_unique_within_parents() {
    let service = service().await;
    let aplicacion = crear_aplicacion(&service).await;
    let seccion = crear_seccion(&service).await;
    let payload = json!({
        "nombre": "Crear",
        "aplicacionId": aplicacion["id"],
        "seccionId": seccion["id"],
    });

    let (status, _) = post_json(&service, "/api/acciones", &payload).await;
    assert_eq!(status, Some(StatusCode::CREATED));

    let (status, body) = post_json(&service, "/api/acciones", &payload).await;
    assert_eq!(status, Some(StatusCode::BAD_REQUEST), "body: {body}");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn deleted_seccion_is_invisible_until_restored() {
    let service = service().await;
    let seccion = crear_seccion(&service).await;
    let id = seccion["id"].as_str().unwrap();

    let res = TestClient::delete(format!("http://127.0.0.1/api/secciones/{id}"))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::OK));

    let (status, _) = get_json(&service, &format!("/api/secciones/{id}")).await;
    assert_eq!(status, Some(StatusCode::NOT_FOUND));

    let (status, body) =
        post_json(&service, &format!("/api/secciones/{id}/restaurar"), &json!({})).await;
    assert_eq!(status, Some(StatusCode::OK), "body: {body}");
    assert_eq!(body["data"]["id"], seccion["id"]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn paginated_secciones_report_window_totals() {
    let service = service().await;
    let prefijo = format!("Pagina {}", Uuid::new_v4().simple());

    for n in 0..25 {
        let (status, _) = post_json(
            &service,
            "/api/secciones",
            &json!({ "nombre": format!("{prefijo} {n:02}") }),
        )
        .await;
        assert_eq!(status, Some(StatusCode::CREATED));
    }

    let path = format!(
        "/api/secciones/paginated?page=1&size=10&sort=nombre,asc&nombre={}",
        prefijo.replace(' ', "%20")
    );
    let (status, body) = get_json(&service, &path).await;
    assert_eq!(status, Some(StatusCode::OK), "body: {body}");
    let data = &body["data"];
    assert_eq!(data["content"].as_array().map(Vec::len), Some(10));
    assert_eq!(data["totalElements"], 25);
    assert_eq!(data["totalPages"], 3);
    assert_eq!(data["number"], 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn paginated_aplicaciones_never_repeat_rows_across_pages() {
    let service = service().await;
    // Several aplicaciones may share a nombre, so ordering by nombre alone
    // would leave the window order up to the planner.
    let nombre = unique_nombre("Duplicada");
    for _ in 0..12 {
        let (status, _) = post_json(
            &service,
            "/api/aplicaciones",
            &json!({
                "nombre": nombre,
                "url": format!("https://{}.example", Uuid::new_v4().simple()),
                "llaveIdentificadora": unique_llave(),
            }),
        )
        .await;
        assert_eq!(status, Some(StatusCode::CREATED));
    }

    let mut seen = std::collections::HashSet::new();
    let mut page = 0;
    let total = loop {
        let path = format!("/api/aplicaciones/paginado?page={page}&size=7&sort=nombre,asc");
        let (status, body) = get_json(&service, &path).await;
        assert_eq!(status, Some(StatusCode::OK), "body: {body}");
        let data = &body["data"];
        for row in data["content"].as_array().expect("page content") {
            let id = row["id"].as_str().expect("row id").to_owned();
            assert!(seen.insert(id), "row repeated across pages: {row}");
        }
        page += 1;
        if page >= data["totalPages"].as_i64().unwrap_or(0) {
            break data["totalElements"].as_i64().unwrap_or(0);
        }
    };
    assert_eq!(seen.len() as i64, total);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn paginated_acciones_filter_by_texto_in_descripcion() {
    let service = service().await;
    let aplicacion = crear_aplicacion(&service).await;
    let seccion = crear_seccion(&service).await;
    let marca = Uuid::new_v4().simple().to_string();

    for n in 0..3 {
        let (status, _) = post_json(
            &service,
            "/api/acciones",
            &json!({
                "nombre": format!("Accion {n}"),
                "descripcion": format!("permite {marca}"),
                "aplicacionId": aplicacion["id"],
                "seccionId": seccion["id"],
            }),
        )
        .await;
        assert_eq!(status, Some(StatusCode::CREATED));
    }
    let (status, _) = post_json(
        &service,
        "/api/acciones",
        &json!({
            "nombre": "Sin marca",
            "descripcion": "otra cosa",
            "aplicacionId": aplicacion["id"],
            "seccionId": seccion["id"],
        }),
    )
    .await;
    assert_eq!(status, Some(StatusCode::CREATED));

    let path = format!("/api/acciones/paginado?texto={marca}&page=0&size=2&sort=nombre,asc");
    let (status, body) = get_json(&service, &path).await;
    assert_eq!(status, Some(StatusCode::OK), "body: {body}");
    let data = &body["data"];
    assert_eq!(data["totalElements"], 3);
    assert_eq!(data["totalPages"], 2);
    assert_eq!(data["content"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn tipo_usuario_nombre_is_unique_per_aplicacion() {
    let service = service().await;
    let primera = crear_aplicacion(&service).await;
    let segunda = crear_aplicacion(&service).await;
    let nombre = unique_nombre("Admin");

    let (status, _) = post_json(
        &service,
        "/api/tipos-usuario",
        &json!({ "nombre": nombre, "aplicacionId": primera["id"] }),
    )
    .await;
    assert_eq!(status, Some(StatusCode::CREATED));

    let (status, body) = post_json(
        &service,
        "/api/tipos-usuario",
        &json!({ "nombre": nombre, "aplicacionId": primera["id"] }),
    )
    .await;
    assert_eq!(status, Some(StatusCode::BAD_REQUEST), "body: {body}");

    let (status, _) = post_json(
        &service,
        "/api/tipos-usuario",
        &json!({ "nombre": nombre, "aplicacionId": segunda["id"] }),
    )
    .await;
    assert_eq!(status, Some(StatusCode::CREATED));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn healthcheck_answers_ok() {
    let service = service().await;
    let mut res = TestClient::get("http://127.0.0.1/api/healthcheck")
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::OK));
    assert_eq!(res.take_string().await.unwrap(), "OK");
}
