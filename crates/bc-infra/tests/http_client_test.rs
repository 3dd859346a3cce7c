//! HTTP client against a mock backend.

use bc_core::config::ApiConfig;
use bc_core::error::ApiError;
use bc_core::form::FileRef;
use bc_core::ids::AnimalId;
use bc_core::models::{AnimalPayload, AnimalQuery, Credentials, Sex, Size, Species};
use bc_core::ports::{AnimalPort, AuthPort, FavoritePort, LookupPort};
use bc_infra::HttpApiClient;
use mockito::{Matcher, Server};
use serde_json::json;

const ANA: &str = r#"{"user":{"id":"u1","name":"Ana","email":"ana@abrigo.org","kind":"adopter"}}"#;

fn client(base_url: String) -> HttpApiClient {
    HttpApiClient::new(&ApiConfig {
        base_url,
        timeout_secs: 5,
    })
    .unwrap()
}

fn credentials() -> Credentials {
    Credentials {
        email: "ana@abrigo.org".into(),
        password: "segredo".into(),
    }
}

fn png_photo() -> FileRef {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image::RgbImage::new(64, 48))
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    FileRef::new("rex.png", "image/png", bytes)
}

fn summary(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Rex",
        "species": "dog",
        "sex": "male",
        "size": "medium",
        "age_years": 3,
        "city": "Recife",
        "ong_id": "o1",
        "ong_name": "Patas Unidas",
        "status": "available"
    })
}

#[tokio::test]
async fn login_cookie_is_sent_on_later_requests() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/auth/login")
        .match_body(Matcher::Json(json!({
            "email": "ana@abrigo.org",
            "password": "segredo"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("set-cookie", "sid=abc123; Path=/; HttpOnly")
        .with_body(ANA)
        .create_async()
        .await;
    let session = server
        .mock("GET", "/auth/session")
        .match_header("cookie", "sid=abc123")
        .with_status(200)
        .with_body(ANA)
        .create_async()
        .await;

    let client = client(server.url());
    let user = client.login(credentials()).await.unwrap();
    assert_eq!(user.name, "Ana");

    let restored = client.current_session().await.unwrap();
    assert_eq!(restored.map(|u| u.id), Some(user.id));

    login.assert_async().await;
    session.assert_async().await;
}

#[tokio::test]
async fn anonymous_session_is_none() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/auth/session")
        .with_status(401)
        .with_body(r#"{"message":"Não autenticado"}"#)
        .create_async()
        .await;

    let session = client(server.url()).current_session().await.unwrap();

    assert!(session.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn rejected_request_carries_status_and_server_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(409)
        .with_body(r#"{"message":"E-mail já cadastrado"}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/auth/logout")
        .with_status(500)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let client = client(server.url());
    assert_eq!(
        client.login(credentials()).await.unwrap_err(),
        ApiError::Status {
            code: 409,
            message: Some("E-mail já cadastrado".into()),
        }
    );
    assert_eq!(client.logout().await.unwrap_err(), ApiError::status(500));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/lookup/cep/50030230")
        .with_status(200)
        .with_body(r#"{"cep":"50030230"}"#)
        .create_async()
        .await;

    let err = client(server.url())
        .address_by_cep("50030230")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let err = client("http://127.0.0.1:9".to_string())
        .address_by_cep("50030230")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Network(_)), "{err:?}");
    assert!(err.is_transport());
}

#[tokio::test]
async fn animal_list_sends_filters_and_pagination() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/animals")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "12".into()),
            Matcher::UrlEncoded("species".into(), "dog".into()),
            Matcher::UrlEncoded("city".into(), "Recife".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "data": [summary("a1"), summary("a2")],
                "page": 2,
                "totalPages": 2
            })
            .to_string(),
        )
        .create_async()
        .await;

    let query = AnimalQuery {
        species: Some(Species::Dog),
        size: None,
        city: Some(" Recife ".into()),
    };
    let page = AnimalPort::list(&client(server.url()), &query, 2, 12)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert!(page.is_last());
    mock.assert_async().await;
}

#[tokio::test]
async fn animal_create_uploads_data_and_prepared_photos() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/animals")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".into()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="data""#.into()),
            Matcher::Regex(r#""breed":"Labrador""#.into()),
            Matcher::Regex(r#"name="photos"; filename="rex.jpg""#.into()),
            Matcher::Regex("image/jpeg".into()),
        ]))
        .with_status(201)
        .with_body(
            json!({
                "id": "a9",
                "ong_id": "o1",
                "name": "Rex",
                "species": "dog",
                "breed": "Labrador",
                "sex": "male",
                "size": "large",
                "age_years": 4,
                "vaccinated": false,
                "neutered": true,
                "special_needs": false,
                "description": "Dócil, brincalhão e ótimo com crianças.",
                "photo_urls": ["https://cdn.local/a9/1.jpg"],
                "status": "available",
                "created_at": "2026-05-01T12:00:00Z"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let payload = AnimalPayload {
        name: "Rex".into(),
        species: Species::Dog,
        breed: "Labrador".into(),
        sex: Sex::Male,
        size: Size::Large,
        age_years: 4,
        vaccinated: false,
        vaccines: Vec::new(),
        neutered: true,
        special_needs: false,
        special_needs_description: None,
        description: "Dócil, brincalhão e ótimo com crianças.".into(),
        keep_photo_urls: Vec::new(),
    };
    let animal = client(server.url())
        .create(payload, vec![png_photo()])
        .await
        .unwrap();

    assert_eq!(animal.id, AnimalId::from_str("a9"));
    assert_eq!(animal.photo_urls.len(), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn undecodable_photo_never_reaches_the_backend() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/animals")
        .expect(0)
        .create_async()
        .await;

    let payload = AnimalPayload {
        name: "Mia".into(),
        species: Species::Cat,
        breed: "SRD".into(),
        sex: Sex::Female,
        size: Size::Small,
        age_years: 1,
        vaccinated: true,
        vaccines: vec!["V4".into()],
        neutered: false,
        special_needs: false,
        special_needs_description: None,
        description: "Filhote carinhosa resgatada na chuva.".into(),
        keep_photo_urls: Vec::new(),
    };
    let bogus = FileRef::new("mia.jpg", "image/jpeg", b"not really a jpeg".to_vec());
    let err = client(server.url())
        .create(payload, vec![bogus])
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidPayload(_)), "{err:?}");
    mock.assert_async().await;
}

#[tokio::test]
async fn favorites_add_and_remove_by_animal_id() {
    let mut server = Server::new_async().await;
    let add = server
        .mock("POST", "/favorites/a1")
        .with_status(204)
        .create_async()
        .await;
    let remove = server
        .mock("DELETE", "/favorites/a1")
        .with_status(204)
        .create_async()
        .await;

    let client = client(server.url());
    let id = AnimalId::from_str("a1");
    client.add(&id).await.unwrap();
    client.remove(&id).await.unwrap();

    add.assert_async().await;
    remove.assert_async().await;
}
