use color_eyre::Result;

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// An authenticated session at the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
}

/// Authoritative session source (the remote store's auth API).
#[cfg_attr(test, mockall::automock)]
pub trait SessionProvider: Send + Sync {
    fn current_session(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<Session>>> + Send;

    /// `None` means the credentials were rejected.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>>> + Send;

    /// `None` means the account could not be registered.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>>> + Send;

    fn sign_out(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Durable local mirror of the "is authenticated" flag. Only good for a
/// fast first paint; the session source is authoritative.
#[cfg_attr(test, mockall::automock)]
pub trait AuthCache: Send + Sync {
    fn load(&self) -> bool;
    fn store(&self, authenticated: bool);
    fn clear(&self);
}

// ---------------------------------------------------------------------------
// Outcome enums
// ---------------------------------------------------------------------------

pub enum LoginOutcome {
    Success,
    InvalidCredentials,
}

// ---------------------------------------------------------------------------
// AuthContext
// ---------------------------------------------------------------------------

/// Explicit authentication state passed to the components that need it.
pub struct AuthContext<P, C> {
    provider: P,
    cache: C,
}

impl<P: SessionProvider, C: AuthCache> AuthContext<P, C> {
    pub fn new(provider: P, cache: C) -> Self {
        Self { provider, cache }
    }

    /// Cached flag for immediate display, before [`restore`](Self::restore)
    /// has verified it.
    pub fn cached_hint(&self) -> bool {
        self.cache.load()
    }

    /// Reconcile the cached flag against the authoritative session source.
    /// A cache claiming authentication without a live session is stale and
    /// gets invalidated.
    pub async fn restore(&self) -> Result<bool> {
        let cached = self.cache.load();

        if self.provider.current_session().await?.is_some() {
            return Ok(true);
        }

        if cached {
            self.cache.clear();
        }
        Ok(false)
    }

    /// Sign in, registering the account first if it does not exist yet.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        if self.provider.sign_in(email, password).await?.is_some() {
            self.cache.store(true);
            return Ok(LoginOutcome::Success);
        }

        // First run: the account may not exist at the store yet.
        if self.provider.sign_up(email, password).await?.is_none() {
            return Ok(LoginOutcome::InvalidCredentials);
        }

        match self.provider.sign_in(email, password).await? {
            Some(_) => {
                self.cache.store(true);
                Ok(LoginOutcome::Success)
            }
            None => Ok(LoginOutcome::InvalidCredentials),
        }
    }

    pub async fn logout(&self) -> Result<()> {
        self.provider.sign_out().await?;
        self.cache.clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
