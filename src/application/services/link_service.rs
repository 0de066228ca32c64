//! Short link creation and resolution.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tracing::{error, info, warn};

use crate::application::services::{AuthValidator, ClickRecorder, CodeAllocator};
use crate::domain::entities::{Expiration, MAX_EXPIRATION_DAYS, ShortLink};
use crate::domain::repositories::LinkStore;
use crate::error::{AppError, store_failure};
use crate::utils::url_normalizer::normalize_url;

/// Random codes drawn before giving up on a collision streak.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Input for [`LinkService::create_short_link`].
///
/// Empty strings for the optional fields count as absent.
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    pub long_url: String,
    pub custom_handle: Option<String>,
    pub auth_code: Option<String>,
    pub expiration_days: Option<i64>,
}

/// Orchestrates the short link lifecycle.
///
/// Creation composes [`AuthValidator`], [`CodeAllocator`] and the
/// [`LinkStore`]; resolution composes the store and the [`ClickRecorder`].
/// Both flows are single pass. The service holds no mutable state of its own;
/// uniqueness of codes rests entirely on [`LinkStore::reserve`].
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    allocator: Arc<CodeAllocator>,
    auth: Arc<AuthValidator>,
    recorder: ClickRecorder,
    public_base: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `scheme` and `domain` form the externally visible short URL prefix,
    /// e.g. `https` + `riid.me` gives `https://riid.me/{code}`.
    pub fn new(
        store: Arc<dyn LinkStore>,
        allocator: Arc<CodeAllocator>,
        auth: Arc<AuthValidator>,
        recorder: ClickRecorder,
        scheme: &str,
        domain: &str,
    ) -> Self {
        Self {
            store,
            allocator,
            auth,
            recorder,
            public_base: format!("{}://{}", scheme, domain.trim_end_matches('/')),
        }
    }

    /// Creates a short link.
    ///
    /// Without a custom handle a random code with the default expiration is
    /// reserved. A custom handle requires a valid authorization code, which in
    /// turn unlocks `expiration_days` (`0` = never, `1..=3650` days). When no
    /// value is supplied the default one-year expiration applies.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] - empty or malformed URL, bad handle shape,
    ///   expiration out of range
    /// - [`AppError::Unauthorized`] - custom handle without a valid auth code
    /// - [`AppError::Conflict`] - custom handle already live
    /// - [`AppError::Internal`] - code generation or store failure
    pub async fn create_short_link(&self, request: CreateLinkRequest) -> Result<ShortLink, AppError> {
        let target = normalize_url(&request.long_url).map_err(|e| {
            info!(error = %e, "Rejected long URL");
            AppError::bad_request(e.to_string(), json!({ "long_url": request.long_url }))
        })?;

        let link = match request.custom_handle.filter(|h| !h.is_empty()) {
            Some(handle) => {
                let expiration = self.authorize_custom_handle(
                    &handle,
                    request.auth_code.as_deref(),
                    request.expiration_days,
                )?;
                self.reserve_custom(handle, target, expiration).await?
            }
            None => self.reserve_random(target).await?,
        };

        info!(
            code = %link.code,
            long_url = %link.target,
            expiration = ?link.expiration,
            "URL shortened successfully"
        );
        counter!("riid_links_created_total").increment(1);

        Ok(link)
    }

    /// Builds the public short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.public_base, code)
    }

    /// Resolves `code` to its target and records the click.
    ///
    /// The click is handed to the background queue; whether it is eventually
    /// written has no bearing on the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown or expired and
    /// [`AppError::Internal`] on store failure. No click is recorded in either
    /// case.
    pub async fn resolve_and_record(
        &self,
        code: &str,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Result<String, AppError> {
        let target = self
            .store
            .get(code)
            .await
            .map_err(|e| store_failure("get", code, e))?
            .ok_or_else(|| {
                info!(code, "Short URL not found");
                AppError::not_found("Short URL not found", json!({ "code": code }))
            })?;

        self.recorder.record(code, user_agent, referrer);
        counter!("riid_redirects_total").increment(1);

        Ok(target)
    }

    /// Reports whether `handle` could be reserved right now.
    ///
    /// Advisory only: nothing is held, and a concurrent create may still win.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed handle and
    /// [`AppError::Internal`] on store failure.
    pub async fn is_handle_available(&self, handle: &str) -> Result<bool, AppError> {
        self.allocator.validate_custom_handle(handle)?;

        let taken = self
            .store
            .exists(handle)
            .await
            .map_err(|e| store_failure("exists", handle, e))?;

        Ok(!taken)
    }

    /// Checks link store connectivity.
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    /// Gates a custom handle and resolves its expiration.
    fn authorize_custom_handle(
        &self,
        handle: &str,
        auth_code: Option<&str>,
        expiration_days: Option<i64>,
    ) -> Result<Expiration, AppError> {
        let Some(auth_code) = auth_code.filter(|c| !c.is_empty()) else {
            info!(custom_handle = %handle, "Attempt to use custom handle without auth code");
            return Err(AppError::unauthorized(
                "Authorization code required for custom handle.",
                json!({}),
            ));
        };

        if !self.auth.validate(auth_code) {
            info!(custom_handle = %handle, "Invalid auth code provided for custom handle");
            return Err(AppError::unauthorized(
                "Invalid authorization code.",
                json!({}),
            ));
        }

        self.allocator.validate_custom_handle(handle)?;

        match expiration_days {
            None => Ok(Expiration::Default),
            Some(days) => Expiration::from_days(days).ok_or_else(|| {
                info!(custom_handle = %handle, days, "Invalid expiration days provided");
                AppError::bad_request(
                    format!(
                        "Expiration must be 0 (for no expiry) or between 1 and {} days.",
                        MAX_EXPIRATION_DAYS
                    ),
                    json!({ "expiration_days": days }),
                )
            }),
        }
    }

    async fn reserve_custom(
        &self,
        handle: String,
        target: String,
        expiration: Expiration,
    ) -> Result<ShortLink, AppError> {
        let won = self
            .store
            .reserve(&handle, &target, expiration.ttl())
            .await
            .map_err(|e| store_failure("reserve", &handle, e))?;

        if !won {
            info!(custom_handle = %handle, "Custom handle already taken");
            return Err(AppError::conflict(
                format!("Custom handle '{}' is already taken.", handle),
                json!({ "custom_handle": handle }),
            ));
        }

        Ok(ShortLink::new(handle, target, expiration))
    }

    /// Reserves a fresh random code, drawing again on collision.
    async fn reserve_random(&self, target: String) -> Result<ShortLink, AppError> {
        let expiration = Expiration::Default;

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = self.allocator.generate_random().map_err(|e| {
                error!(error = %e, "Failed to generate short code");
                AppError::internal("Error generating short code", json!({}))
            })?;

            let won = self
                .store
                .reserve(&code, &target, expiration.ttl())
                .await
                .map_err(|e| store_failure("reserve", &code, e))?;

            if won {
                return Ok(ShortLink::new(code, target, expiration));
            }

            warn!(code = %code, attempt, "Generated code already in use, retrying");
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::click_event::ClickEvent;
    use crate::domain::repositories::MockLinkStore;
    use crate::error::StoreError;
    use std::time::Duration;
    use tokio::sync::mpsc;

    const AUTH: &str = "secret-auth";

    fn service(store: MockLinkStore) -> (LinkService, mpsc::Receiver<ClickEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let service = LinkService::new(
            Arc::new(store),
            Arc::new(CodeAllocator::with_seed(9, 2342)),
            Arc::new(AuthValidator::new([AUTH.to_string()])),
            ClickRecorder::new(tx),
            "https",
            "riid.me",
        );
        (service, rx)
    }

    fn custom(handle: &str, auth: Option<&str>, days: Option<i64>) -> CreateLinkRequest {
        CreateLinkRequest {
            long_url: "example.com".to_string(),
            custom_handle: Some(handle.to_string()),
            auth_code: auth.map(str::to_string),
            expiration_days: days,
        }
    }

    fn one_year() -> Option<Duration> {
        Some(Duration::from_secs(365 * 86_400))
    }

    #[tokio::test]
    async fn test_create_random_link_normalizes_url() {
        let mut store = MockLinkStore::new();
        store
            .expect_reserve()
            .withf(|code, target, ttl| {
                code.len() == 9 && target == "https://example.com" && *ttl == one_year()
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let (service, _rx) = service(store);

        let link = service
            .create_short_link(CreateLinkRequest {
                long_url: "example.com".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(link.target, "https://example.com");
        assert_eq!(link.expiration, Expiration::Default);
        assert_eq!(
            service.short_url(&link.code),
            format!("https://riid.me/{}", link.code)
        );
    }

    #[tokio::test]
    async fn test_empty_url_is_rejected_before_store() {
        let mut store = MockLinkStore::new();
        store.expect_reserve().times(0);

        let (service, _rx) = service(store);

        let result = service.create_short_link(CreateLinkRequest::default()).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_random_code_collision_draws_again() {
        let mut store = MockLinkStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_reserve()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(false));
        store
            .expect_reserve()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(true));

        let (service, _rx) = service(store);

        let result = service
            .create_short_link(CreateLinkRequest {
                long_url: "https://example.com".to_string(),
                ..Default::default()
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_random_code_gives_up_after_max_attempts() {
        let mut store = MockLinkStore::new();
        store
            .expect_reserve()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|_, _, _| Ok(false));

        let (service, _rx) = service(store);

        let result = service
            .create_short_link(CreateLinkRequest {
                long_url: "https://example.com".to_string(),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_empty_custom_handle_means_random() {
        let mut store = MockLinkStore::new();
        store
            .expect_reserve()
            .withf(|code, _, _| code.len() == 9)
            .times(1)
            .returning(|_, _, _| Ok(true));

        let (service, _rx) = service(store);

        let result = service.create_short_link(custom("", None, None)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_custom_handle_requires_auth_code() {
        let mut store = MockLinkStore::new();
        store.expect_reserve().times(0);

        let (service, _rx) = service(store);

        let missing = service.create_short_link(custom("promo", None, None)).await;
        let empty = service
            .create_short_link(custom("promo", Some(""), None))
            .await;

        assert!(matches!(missing, Err(AppError::Unauthorized { .. })));
        assert!(matches!(empty, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_custom_handle_rejects_wrong_auth_code() {
        let mut store = MockLinkStore::new();
        store.expect_reserve().times(0);

        let (service, _rx) = service(store);

        let result = service
            .create_short_link(custom("promo", Some("guess"), None))
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_auth_is_checked_before_handle_shape() {
        let (service, _rx) = service(MockLinkStore::new());

        let result = service.create_short_link(custom("x", None, None)).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_custom_handle_shape_is_validated() {
        let (service, _rx) = service(MockLinkStore::new());

        let result = service
            .create_short_link(custom("ab", Some(AUTH), None))
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_custom_handle_default_expiration() {
        let mut store = MockLinkStore::new();
        store
            .expect_reserve()
            .withf(|code, _, ttl| code == "promo" && *ttl == one_year())
            .times(1)
            .returning(|_, _, _| Ok(true));

        let (service, _rx) = service(store);

        let link = service
            .create_short_link(custom("promo", Some(AUTH), None))
            .await
            .unwrap();

        assert_eq!(link.code, "promo");
        assert_eq!(link.expiration, Expiration::Default);
    }

    #[tokio::test]
    async fn test_custom_handle_never_expires() {
        let mut store = MockLinkStore::new();
        store
            .expect_reserve()
            .withf(|_, _, ttl| ttl.is_none())
            .times(1)
            .returning(|_, _, _| Ok(true));

        let (service, _rx) = service(store);

        let link = service
            .create_short_link(custom("forever", Some(AUTH), Some(0)))
            .await
            .unwrap();

        assert_eq!(link.expiration, Expiration::Never);
    }

    #[tokio::test]
    async fn test_custom_handle_custom_days() {
        let mut store = MockLinkStore::new();
        store
            .expect_reserve()
            .withf(|_, _, ttl| *ttl == Some(Duration::from_secs(30 * 86_400)))
            .times(1)
            .returning(|_, _, _| Ok(true));

        let (service, _rx) = service(store);

        let link = service
            .create_short_link(custom("monthly", Some(AUTH), Some(30)))
            .await
            .unwrap();

        assert_eq!(link.expiration, Expiration::Days(30));
    }

    #[tokio::test]
    async fn test_expiration_out_of_range_is_rejected_before_reservation() {
        let mut store = MockLinkStore::new();
        store.expect_reserve().times(0);

        let (service, _rx) = service(store);

        for days in [-1, 3651, 100_000] {
            let result = service
                .create_short_link(custom("promo", Some(AUTH), Some(days)))
                .await;
            assert!(matches!(result, Err(AppError::Validation { .. })));
        }
    }

    #[tokio::test]
    async fn test_expiration_ignored_without_custom_handle() {
        let mut store = MockLinkStore::new();
        store
            .expect_reserve()
            .withf(|_, _, ttl| *ttl == one_year())
            .times(1)
            .returning(|_, _, _| Ok(true));

        let (service, _rx) = service(store);

        let result = service
            .create_short_link(CreateLinkRequest {
                long_url: "example.com".to_string(),
                auth_code: Some(AUTH.to_string()),
                expiration_days: Some(99_999),
                ..Default::default()
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_custom_handle_conflict() {
        let mut store = MockLinkStore::new();
        store
            .expect_reserve()
            .times(1)
            .returning(|_, _, _| Ok(false));

        let (service, _rx) = service(store);

        let result = service
            .create_short_link(custom("taken", Some(AUTH), None))
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let mut store = MockLinkStore::new();
        store
            .expect_reserve()
            .times(1)
            .returning(|_, _, _| Err(StoreError::Unavailable("connection refused".to_string())));

        let (service, _rx) = service(store);

        let result = service
            .create_short_link(custom("promo", Some(AUTH), None))
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_resolve_records_click() {
        let mut store = MockLinkStore::new();
        store
            .expect_get()
            .withf(|code| code == "abc")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let (service, mut rx) = service(store);

        let target = service
            .resolve_and_record("abc", Some("Mozilla/5.0"), None)
            .await
            .unwrap();

        assert_eq!(target, "https://example.com");
        let event = rx.try_recv().unwrap();
        assert_eq!(event.code, "abc");
        assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_records_nothing() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(1).returning(|_| Ok(None));

        let (service, mut rx) = service(store);

        let result = service.resolve_and_record("missing", None, None).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_store_failure_records_nothing() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(1).returning(|_| {
            Err(StoreError::Timeout {
                operation: "get",
                after: Duration::from_secs(3),
            })
        });

        let (service, mut rx) = service(store);

        let result = service.resolve_and_record("abc", None, None).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_handle_availability() {
        let mut store = MockLinkStore::new();
        store
            .expect_exists()
            .withf(|code| code == "taken")
            .returning(|_| Ok(true));
        store
            .expect_exists()
            .withf(|code| code == "free")
            .returning(|_| Ok(false));

        let (service, _rx) = service(store);

        assert!(!service.is_handle_available("taken").await.unwrap());
        assert!(service.is_handle_available("free").await.unwrap());
        assert!(matches!(
            service.is_handle_available("x").await,
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let (tx, _rx) = mpsc::channel(1);
        let service = LinkService::new(
            Arc::new(MockLinkStore::new()),
            Arc::new(CodeAllocator::new(9)),
            Arc::new(AuthValidator::default()),
            ClickRecorder::new(tx),
            "http",
            "localhost:3000/",
        );

        assert_eq!(service.short_url("abc"), "http://localhost:3000/abc");
    }
}
