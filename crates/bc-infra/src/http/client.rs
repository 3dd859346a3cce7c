//! reqwest-backed implementation of every backend port.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use bc_core::config::ApiConfig;
use bc_core::error::ApiError;
use bc_core::form::FileRef;
use bc_core::ids::{AnimalId, OngId};
use bc_core::models::{
    AddressLookup, AdoptionProcess, Animal, AnimalPayload, AnimalQuery, AnimalSummary, AuthUser,
    CompanyRecord, Credentials, OngProfile, OngProfileUpdate, OngSignup, Page, UserProfile,
    UserProfileUpdate, UserSignup,
};
use bc_core::ports::{AdoptionPort, AnimalPort, AuthPort, FavoritePort, LookupPort, ProfilePort};

use super::dto::{ErrorBody, ListEnvelope, PageEnvelope, PageParams, UserEnvelope};
use crate::media::ImagePreparer;

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Cookie-session HTTP client for the Bicho Capiba backend.
///
/// One instance is shared by every port so the session cookie set at login
/// travels with every later request.
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: Url,
    photos: ImagePreparer,
    logos: ImagePreparer,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("invalid api base url {}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("api base url {} cannot carry a path", config.base_url);
        }
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build http client")?;

        Ok(Self {
            client,
            base_url,
            photos: ImagePreparer::photo(),
            logos: ImagePreparer::logo(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Unexpected(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute(&self, request: RequestBuilder) -> ApiResult<Response> {
        let request = request.build().map_err(map_transport)?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(%method, %path, "api request");

        let response = self.client.execute(request).await.map_err(|err| {
            let mapped = map_transport(err);
            warn!(%method, %path, error = %mapped, "api request failed");
            mapped
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
            .and_then(|body| body.message);
        debug!(%method, %path, status = status.as_u16(), "api request rejected");
        Err(ApiError::Status {
            code: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.execute(request).await?;
        decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        self.fetch(self.client.get(url)).await
    }

    async fn send_json<B, T>(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        body: &B,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.fetch(self.client.request(method, url).json(body)).await
    }

    async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        form: Form,
    ) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        self.fetch(self.client.request(method, url).multipart(form)).await
    }

    async fn send_empty(&self, method: reqwest::Method, segments: &[&str]) -> ApiResult<()> {
        let url = self.endpoint(segments)?;
        self.execute(self.client.request(method, url)).await?;
        Ok(())
    }

    /// `data` JSON part followed by one part per prepared image.
    fn multipart(
        &self,
        data: &impl Serialize,
        file_field: &'static str,
        files: &[FileRef],
        preparer: &ImagePreparer,
    ) -> ApiResult<Form> {
        let json =
            serde_json::to_string(data).map_err(|err| ApiError::InvalidPayload(err.to_string()))?;
        let data_part = Part::text(json)
            .mime_str("application/json")
            .map_err(map_transport)?;
        let mut form = Form::new().part("data", data_part);

        for file in files {
            let prepared = preparer
                .prepare(file)
                .map_err(|err| ApiError::InvalidPayload(format!("{err:#}")))?;
            let part = Part::bytes(prepared.bytes.to_vec())
                .file_name(prepared.file_name.clone())
                .mime_str(&prepared.content_type)
                .map_err(map_transport)?;
            form = form.part(file_field, part);
        }
        Ok(form)
    }
}

fn map_transport(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else if error.is_decode() {
        ApiError::Decode(error.to_string())
    } else if error.is_builder() {
        ApiError::Unexpected(error.to_string())
    } else if let Some(status) = error.status() {
        ApiError::status(status.as_u16())
    } else {
        ApiError::Network(error.to_string())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.bytes().await.map_err(map_transport)?;
    serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait]
impl AuthPort for HttpApiClient {
    async fn signup_user(&self, signup: UserSignup) -> ApiResult<AuthUser> {
        let envelope: UserEnvelope = self
            .send_json(reqwest::Method::POST, &["auth", "signup", "user"], &signup)
            .await?;
        Ok(envelope.user)
    }

    async fn signup_ong(&self, signup: OngSignup, logo: Option<FileRef>) -> ApiResult<AuthUser> {
        let form = self.multipart(&signup, "logo", logo.as_slice(), &self.logos)?;
        let envelope: UserEnvelope = self
            .send_multipart(reqwest::Method::POST, &["auth", "signup", "ong"], form)
            .await?;
        Ok(envelope.user)
    }

    async fn login(&self, credentials: Credentials) -> ApiResult<AuthUser> {
        let envelope: UserEnvelope = self
            .send_json(reqwest::Method::POST, &["auth", "login"], &credentials)
            .await?;
        Ok(envelope.user)
    }

    async fn logout(&self) -> ApiResult<()> {
        self.send_empty(reqwest::Method::POST, &["auth", "logout"])
            .await
    }

    async fn current_session(&self) -> ApiResult<Option<AuthUser>> {
        match self.get_json::<UserEnvelope>(&["auth", "session"]).await {
            Ok(envelope) => Ok(Some(envelope.user)),
            Err(err) if err.status_code() == Some(StatusCode::UNAUTHORIZED.as_u16()) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl AnimalPort for HttpApiClient {
    async fn list(
        &self,
        query: &AnimalQuery,
        page: u32,
        limit: u32,
    ) -> ApiResult<Page<AnimalSummary>> {
        let url = self.endpoint(&["animals"])?;
        let request = self
            .client
            .get(url)
            .query(&PageParams { page, limit })
            .query(&query.to_pairs());
        let envelope: PageEnvelope<AnimalSummary> = self.fetch(request).await?;
        Ok(envelope.into())
    }

    async fn get(&self, id: &AnimalId) -> ApiResult<Animal> {
        self.get_json(&["animals", id.as_str()]).await
    }

    async fn create(&self, payload: AnimalPayload, photos: Vec<FileRef>) -> ApiResult<Animal> {
        let form = self.multipart(&payload, "photos", &photos, &self.photos)?;
        self.send_multipart(reqwest::Method::POST, &["animals"], form)
            .await
    }

    async fn update(
        &self,
        id: &AnimalId,
        payload: AnimalPayload,
        photos: Vec<FileRef>,
    ) -> ApiResult<Animal> {
        let form = self.multipart(&payload, "photos", &photos, &self.photos)?;
        self.send_multipart(reqwest::Method::PATCH, &["animals", id.as_str()], form)
            .await
    }

    async fn list_by_ong(&self, ong: &OngId) -> ApiResult<Vec<AnimalSummary>> {
        let envelope: ListEnvelope<AnimalSummary> =
            self.get_json(&["ongs", ong.as_str(), "animals"]).await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ProfilePort for HttpApiClient {
    async fn my_profile(&self) -> ApiResult<UserProfile> {
        self.get_json(&["users", "me"]).await
    }

    async fn update_my_profile(&self, update: UserProfileUpdate) -> ApiResult<UserProfile> {
        self.send_json(reqwest::Method::PATCH, &["users", "me"], &update)
            .await
    }

    async fn ong_profile(&self, id: &OngId) -> ApiResult<OngProfile> {
        self.get_json(&["ongs", id.as_str()]).await
    }

    async fn update_ong_profile(
        &self,
        update: OngProfileUpdate,
        logo: Option<FileRef>,
    ) -> ApiResult<OngProfile> {
        let form = self.multipart(&update, "logo", logo.as_slice(), &self.logos)?;
        self.send_multipart(reqwest::Method::PATCH, &["ongs", "me"], form)
            .await
    }
}

#[async_trait]
impl LookupPort for HttpApiClient {
    async fn address_by_cep(&self, cep: &str) -> ApiResult<AddressLookup> {
        self.get_json(&["lookup", "cep", cep]).await
    }

    async fn company_by_cnpj(&self, cnpj: &str) -> ApiResult<CompanyRecord> {
        self.get_json(&["lookup", "cnpj", cnpj]).await
    }
}

#[async_trait]
impl FavoritePort for HttpApiClient {
    async fn list(&self) -> ApiResult<Vec<AnimalSummary>> {
        let envelope: ListEnvelope<AnimalSummary> = self.get_json(&["favorites"]).await?;
        Ok(envelope.data)
    }

    async fn add(&self, animal: &AnimalId) -> ApiResult<()> {
        self.send_empty(reqwest::Method::POST, &["favorites", animal.as_str()])
            .await
    }

    async fn remove(&self, animal: &AnimalId) -> ApiResult<()> {
        self.send_empty(reqwest::Method::DELETE, &["favorites", animal.as_str()])
            .await
    }
}

#[async_trait]
impl AdoptionPort for HttpApiClient {
    async fn list(&self) -> ApiResult<Vec<AdoptionProcess>> {
        let envelope: ListEnvelope<AdoptionProcess> = self.get_json(&["adoptions"]).await?;
        Ok(envelope.data)
    }
}
