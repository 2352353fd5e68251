use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::config::ProviderConfig;

use super::models::{
    AccessBundle, AccessFlow, Identity, Integration, ManualWebhook, Page, PageRequest,
    UpdateAccessBundle, UpdateAccessFlow, UpdateIntegration, UpdateManualWebhook,
    UpsertAccessBundle, UpsertAccessFlow, UpsertIntegration, UpsertManualWebhook, User,
};
use super::{ApiClient, ApiError, ApiResult};

const API_PREFIX: [&str; 3] = ["api", "terraform", "v1"];
const USER_AGENT: &str = concat!("apono-provider-core/", env!("CARGO_PKG_VERSION"));

const ACCESS_FLOWS: &str = "access-flows";
const ACCESS_BUNDLES: &str = "access-bundles";
const INTEGRATIONS: &str = "integrations";
const IDENTITIES: &str = "identities";
const USERS: &str = "users";

/// Blocking JSON client for the Terraform API.
#[derive(Debug)]
pub struct HttpApiClient {
    base_url: Url,
    token: SecretString,
    http: Client,
}

impl HttpApiClient {
    pub fn new(config: ProviderConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;
        let base_url = config.endpoint().clone();
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidConfig(format!(
                "endpoint '{base_url}' cannot carry a path"
            )));
        }
        Ok(HttpApiClient {
            base_url,
            token: SecretString::from(config.personal_token().to_string()),
            http,
        })
    }

    /// Build `<endpoint>/api/terraform/v1/<segments…>`, escaping each segment.
    pub(crate) fn url_for(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidConfig(format!("endpoint '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(self.token.expose_secret())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
    }

    fn execute(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = self.authorized(request).send()?;
        let status = response.status();
        let body = response.text()?;
        trace!(event = "Http", phase = "Response", status = status.as_u16(), body = %body);
        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    fn decode<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.execute(request)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.url_for(segments)?;
        debug!(event = "Http", phase = "Request", method = "GET", url = %url);
        self.decode(self.http.get(url))
    }

    fn list<T: DeserializeOwned>(&self, segments: &[&str], page: PageRequest) -> ApiResult<Page<T>> {
        let url = self.url_for(segments)?;
        debug!(event = "Http", phase = "Request", method = "GET", url = %url, limit = page.limit, offset = page.offset);
        self.decode(
            self.http
                .get(url)
                .query(&[("limit", page.limit), ("offset", page.offset)]),
        )
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, segments: &[&str], body: &B) -> ApiResult<T> {
        let url = self.url_for(segments)?;
        debug!(event = "Http", phase = "Request", method = "POST", url = %url);
        self.decode(self.http.post(url).json(body))
    }

    fn patch<B: Serialize, T: DeserializeOwned>(&self, segments: &[&str], body: &B) -> ApiResult<T> {
        let url = self.url_for(segments)?;
        debug!(event = "Http", phase = "Request", method = "PATCH", url = %url);
        self.decode(self.http.patch(url).json(body))
    }

    fn delete(&self, segments: &[&str]) -> ApiResult<()> {
        let url = self.url_for(segments)?;
        debug!(event = "Http", phase = "Request", method = "DELETE", url = %url);
        self.execute(self.http.delete(url)).map(|_| ())
    }
}

impl ApiClient for HttpApiClient {
    fn list_identities(&self, page: PageRequest) -> ApiResult<Page<Identity>> {
        self.list(&[IDENTITIES], page)
    }

    fn get_user(&self, id_or_email: &str) -> ApiResult<User> {
        self.get(&[USERS, id_or_email])
    }

    fn list_integrations(&self, page: PageRequest) -> ApiResult<Page<Integration>> {
        self.list(&[INTEGRATIONS], page)
    }

    fn get_integration(&self, id: &str) -> ApiResult<Integration> {
        self.get(&[INTEGRATIONS, id])
    }

    fn create_integration(&self, body: &UpsertIntegration) -> ApiResult<Integration> {
        self.post(&[INTEGRATIONS], body)
    }

    fn update_integration(&self, id: &str, body: &UpdateIntegration) -> ApiResult<Integration> {
        self.patch(&[INTEGRATIONS, id], body)
    }

    fn delete_integration(&self, id: &str) -> ApiResult<()> {
        self.delete(&[INTEGRATIONS, id])
    }

    fn list_access_bundles(&self, page: PageRequest) -> ApiResult<Page<AccessBundle>> {
        self.list(&[ACCESS_BUNDLES], page)
    }

    fn get_access_bundle(&self, id: &str) -> ApiResult<AccessBundle> {
        self.get(&[ACCESS_BUNDLES, id])
    }

    fn create_access_bundle(&self, body: &UpsertAccessBundle) -> ApiResult<AccessBundle> {
        self.post(&[ACCESS_BUNDLES], body)
    }

    fn update_access_bundle(
        &self,
        id: &str,
        body: &UpdateAccessBundle,
    ) -> ApiResult<AccessBundle> {
        self.patch(&[ACCESS_BUNDLES, id], body)
    }

    fn delete_access_bundle(&self, id: &str) -> ApiResult<()> {
        self.delete(&[ACCESS_BUNDLES, id])
    }

    fn get_access_flow(&self, id: &str) -> ApiResult<AccessFlow> {
        self.get(&[ACCESS_FLOWS, id])
    }

    fn create_access_flow(&self, body: &UpsertAccessFlow) -> ApiResult<AccessFlow> {
        self.post(&[ACCESS_FLOWS], body)
    }

    fn update_access_flow(&self, id: &str, body: &UpdateAccessFlow) -> ApiResult<AccessFlow> {
        self.patch(&[ACCESS_FLOWS, id], body)
    }

    fn delete_access_flow(&self, id: &str) -> ApiResult<()> {
        self.delete(&[ACCESS_FLOWS, id])
    }

    fn get_manual_webhook(&self, id: &str) -> ApiResult<ManualWebhook> {
        self.get(&["webhooks", "manual", id])
    }

    fn create_manual_webhook(&self, body: &UpsertManualWebhook) -> ApiResult<ManualWebhook> {
        self.post(&["webhooks", "manual"], body)
    }

    fn update_manual_webhook(
        &self,
        id: &str,
        body: &UpdateManualWebhook,
    ) -> ApiResult<ManualWebhook> {
        self.patch(&["webhooks", "manual", id], body)
    }

    fn delete_manual_webhook(&self, id: &str) -> ApiResult<()> {
        self.delete(&["webhooks", "manual", id])
    }
}
