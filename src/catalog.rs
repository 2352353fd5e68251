//! Bulk catalogs used to resolve names to IDs.
//!
//! A [`CatalogProvider`] is injected into every conversion. [`ApiCatalog`]
//! pages through the upstream list endpoints, and [`ConversionScope`]
//! guarantees each list is fetched at most once per top-level conversion.

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::api::models::{AccessBundle, Identity, Integration, Page, PageRequest, User};
use crate::api::{ApiClient, ApiResult, invoke};
use crate::context::RequestContext;
use crate::error::ProviderError;

pub const PAGE_SIZE: u32 = 100;

/// Source of the identity, integration and bundle catalogs.
pub trait CatalogProvider {
    fn identities(&self) -> Result<Vec<Identity>, ProviderError>;
    fn integrations(&self) -> Result<Vec<Integration>, ProviderError>;
    fn access_bundles(&self) -> Result<Vec<AccessBundle>, ProviderError>;
    /// Single user by ID or email. Users are not part of the bulk identity list.
    fn user(&self, id_or_email: &str) -> Result<User, ProviderError>;
}

/// Catalogs read live from the API, honouring the request context.
pub struct ApiCatalog<'a> {
    client: &'a dyn ApiClient,
    ctx: &'a RequestContext,
}

impl<'a> ApiCatalog<'a> {
    pub fn new(client: &'a dyn ApiClient, ctx: &'a RequestContext) -> Self {
        ApiCatalog { client, ctx }
    }

    fn fetch_all<T, F>(&self, object: &str, mut list: F) -> Result<Vec<T>, ProviderError>
    where
        F: FnMut(PageRequest) -> ApiResult<Page<T>>,
    {
        let mut items = Vec::new();
        let mut offset: u32 = 0;
        loop {
            let request = PageRequest {
                limit: PAGE_SIZE,
                offset,
            };
            let page = invoke(self.ctx, "list", object, None, || list(request))?;
            let received = u32::try_from(page.data.len()).unwrap_or(u32::MAX);
            items.extend(page.data);
            offset = offset.saturating_add(received);
            if received == 0 || u64::from(offset) >= page.pagination.total {
                break;
            }
        }
        debug!(event = "Catalog", phase = "Fetched", object, count = items.len());
        Ok(items)
    }
}

impl CatalogProvider for ApiCatalog<'_> {
    fn identities(&self) -> Result<Vec<Identity>, ProviderError> {
        self.fetch_all("identities", |page| self.client.list_identities(page))
    }

    fn integrations(&self) -> Result<Vec<Integration>, ProviderError> {
        self.fetch_all("integrations", |page| self.client.list_integrations(page))
    }

    fn access_bundles(&self) -> Result<Vec<AccessBundle>, ProviderError> {
        self.fetch_all("access bundles", |page| self.client.list_access_bundles(page))
    }

    fn user(&self, id_or_email: &str) -> Result<User, ProviderError> {
        invoke(self.ctx, "read", "user", Some(id_or_email), || {
            self.client.get_user(id_or_email)
        })
    }
}

/// Per-conversion view of a catalog.
///
/// The first access to each list performs the fetch and keeps its outcome,
/// failures included, so a conversion that resolves many references issues
/// one list call per catalog and reports a failed fetch once.
pub struct ConversionScope<'a> {
    catalog: &'a dyn CatalogProvider,
    identities: OnceCell<Result<Vec<Identity>, ProviderError>>,
    integrations: OnceCell<Result<Vec<Integration>, ProviderError>>,
    bundles: OnceCell<Result<Vec<AccessBundle>, ProviderError>>,
}

impl<'a> ConversionScope<'a> {
    pub fn new(catalog: &'a dyn CatalogProvider) -> Self {
        ConversionScope {
            catalog,
            identities: OnceCell::new(),
            integrations: OnceCell::new(),
            bundles: OnceCell::new(),
        }
    }

    pub fn identities(&self) -> Result<&[Identity], ProviderError> {
        self.identities
            .get_or_init(|| self.catalog.identities())
            .as_deref()
            .map_err(Clone::clone)
    }

    pub fn integrations(&self) -> Result<&[Integration], ProviderError> {
        self.integrations
            .get_or_init(|| self.catalog.integrations())
            .as_deref()
            .map_err(Clone::clone)
    }

    pub fn access_bundles(&self) -> Result<&[AccessBundle], ProviderError> {
        self.bundles
            .get_or_init(|| self.catalog.access_bundles())
            .as_deref()
            .map_err(Clone::clone)
    }

    pub fn user(&self, id_or_email: &str) -> Result<User, ProviderError> {
        self.catalog.user(id_or_email)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::resources::tests::fixtures::{FakeApi, group};

    struct CountingCatalog {
        identity_calls: Cell<usize>,
        fail: bool,
    }

    impl CatalogProvider for CountingCatalog {
        fn identities(&self) -> Result<Vec<Identity>, ProviderError> {
            self.identity_calls.set(self.identity_calls.get() + 1);
            if self.fail {
                Err(ProviderError::Canceled("stop".into()))
            } else {
                Ok(vec![group("g1", "Test Group 1")])
            }
        }

        fn integrations(&self) -> Result<Vec<Integration>, ProviderError> {
            Ok(Vec::new())
        }

        fn access_bundles(&self) -> Result<Vec<AccessBundle>, ProviderError> {
            Ok(Vec::new())
        }

        fn user(&self, id_or_email: &str) -> Result<User, ProviderError> {
            Err(ProviderError::IdentityNotFound {
                name: id_or_email.to_string(),
                identity_type: "user".to_string(),
            })
        }
    }

    #[test]
    fn test_scope_fetches_once() {
        let catalog = CountingCatalog {
            identity_calls: Cell::new(0),
            fail: false,
        };
        let scope = ConversionScope::new(&catalog);
        assert_eq!(scope.identities().unwrap().len(), 1);
        assert_eq!(scope.identities().unwrap()[0].id, "g1");
        assert_eq!(catalog.identity_calls.get(), 1);
    }

    #[test]
    fn test_scope_keeps_failure() {
        let catalog = CountingCatalog {
            identity_calls: Cell::new(0),
            fail: true,
        };
        let scope = ConversionScope::new(&catalog);
        assert!(scope.identities().is_err());
        assert!(scope.identities().is_err());
        assert_eq!(catalog.identity_calls.get(), 1);
    }

    #[test]
    fn test_api_catalog_pages_until_total() {
        let api = FakeApi::new();
        for i in 0..250 {
            api.add_identity(group(&format!("g{i}"), &format!("Group {i}")));
        }
        let ctx = RequestContext::new();
        let catalog = ApiCatalog::new(&api, &ctx);

        let identities = catalog.identities().unwrap();

        assert_eq!(identities.len(), 250);
        assert_eq!(identities[249].id, "g249");
        assert_eq!(api.calls("list_identities"), 3);
    }

    #[test]
    fn test_api_catalog_stops_when_canceled() {
        let api = FakeApi::new();
        let ctx = RequestContext::new();
        ctx.cancel();
        let catalog = ApiCatalog::new(&api, &ctx);

        let err = catalog.integrations().unwrap_err();

        assert!(matches!(err, ProviderError::Canceled(_)));
        assert_eq!(api.calls("list_integrations"), 0);
    }
}
