//! Identity resolution: turning reviewer names into principal ids.
//!
//! A name is matched exactly against Graph group display names first, then
//! against user display names. Users whose origin is not a direct principal
//! (for example Azure AD users) are looked up again in the entitlement
//! directory, whose entitlement id is the reference pull requests accept.
//!
//! Directory listings are fetched lazily and kept for the lifetime of the
//! resolver, which is one task run.

use azgit_devops::{
    EntitlementApi, GraphApi, GraphGroup, GraphUser, IdentityRef, SubjectQuery,
};

use crate::error::{Error, Result};

/// Provider a Graph user originates from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Created directly in Azure DevOps.
    Vsts,
    /// Azure Active Directory.
    Aad,
    /// Microsoft account.
    Msa,
    /// On-premises Active Directory.
    Ad,
    /// Any other provider tag.
    Other(String),
}

impl Origin {
    /// Classify an origin tag, ignoring case.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "vsts" => Self::Vsts,
            "aad" => Self::Aad,
            "msa" => Self::Msa,
            "ad" => Self::Ad,
            other => Self::Other(other.to_string()),
        }
    }
}

/// The set of origins whose `originId` is directly usable as a principal id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectOrigins(Vec<Origin>);

impl DirectOrigins {
    /// Build from explicit origins.
    #[must_use]
    pub const fn new(origins: Vec<Origin>) -> Self {
        Self(origins)
    }

    /// Parse a comma-separated list of origin tags; blank input gives the default.
    #[must_use]
    pub fn parse_list(list: &str) -> Self {
        let origins: Vec<Origin> = list
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(Origin::parse)
            .collect();

        if origins.is_empty() {
            Self::default()
        } else {
            Self(origins)
        }
    }

    /// Whether a user with this origin tag resolves directly.
    #[must_use]
    pub fn is_direct(&self, tag: &str) -> bool {
        self.0.contains(&Origin::parse(tag))
    }
}

impl Default for DirectOrigins {
    fn default() -> Self {
        Self(vec![Origin::Vsts])
    }
}

/// One directory list: not fetched yet, fetched, or failed with a message.
type Fetched<T> = Option<std::result::Result<Vec<T>, String>>;

/// Directory listings fetched during one run.
///
/// Each list is fetched on first use and never refreshed. A failed fetch is
/// kept too, so later lookups report the same failure without a new request.
#[derive(Debug, Default)]
pub struct DirectoryCache {
    users: Fetched<GraphUser>,
    groups: Fetched<GraphGroup>,
}

impl DirectoryCache {
    async fn groups<D: GraphApi>(
        &mut self,
        directory: &D,
        query: &SubjectQuery,
    ) -> Result<&[GraphGroup]> {
        cached(&mut self.groups, "group", directory.list_groups(query)).await
    }

    async fn users<D: GraphApi>(
        &mut self,
        directory: &D,
        query: &SubjectQuery,
    ) -> Result<&[GraphUser]> {
        cached(&mut self.users, "user", directory.list_users(query)).await
    }
}

async fn cached<'a, T>(
    slot: &'a mut Fetched<T>,
    directory: &'static str,
    fetch: impl Future<Output = azgit_devops::Result<Vec<T>>>,
) -> Result<&'a [T]> {
    if slot.is_none() {
        *slot = Some(fetch.await.map_err(|e| e.to_string()));
    }

    match slot {
        Some(Ok(list)) => Ok(list.as_slice()),
        Some(Err(message)) => Err(Error::DirectoryUnavailable {
            directory,
            message: message.clone(),
        }),
        None => Ok(&[]),
    }
}

/// Outcome of resolving a batch of names.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Resolved identities, in input order, without duplicate ids.
    pub resolved: Vec<IdentityRef>,
    /// Names that could not be resolved, with the reason.
    pub failures: Vec<(String, Error)>,
}

/// Resolves display names to identity references.
pub struct IdentityResolver<'a, D>
where
    D: GraphApi + EntitlementApi,
{
    directory: &'a D,
    query: SubjectQuery,
    direct_origins: DirectOrigins,
    cache: DirectoryCache,
}

impl<'a, D> IdentityResolver<'a, D>
where
    D: GraphApi + EntitlementApi,
{
    /// Create a resolver over the whole organization.
    pub fn new(directory: &'a D) -> Self {
        Self {
            directory,
            query: SubjectQuery::default(),
            direct_origins: DirectOrigins::default(),
            cache: DirectoryCache::default(),
        }
    }

    /// Restrict directory listings to a scope descriptor.
    #[must_use]
    pub fn with_scope(mut self, scope_descriptor: impl Into<String>) -> Self {
        self.query = SubjectQuery::scoped(scope_descriptor);
        self
    }

    /// Set which user origins resolve directly through their origin id.
    #[must_use]
    pub fn with_direct_origins(mut self, origins: DirectOrigins) -> Self {
        self.direct_origins = origins;
        self
    }

    /// Resolve one display name.
    ///
    /// The returned reference carries `name` as its display name.
    ///
    /// # Errors
    /// - [`Error::IdentityNotFound`] if no group or user has this name
    /// - [`Error::EntitlementNotFound`] / [`Error::EntitlementLookup`] if the
    ///   user needs an entitlement and none could be found
    /// - [`Error::DirectoryUnavailable`] if a directory listing failed, now
    ///   or earlier in the run
    pub async fn resolve(&mut self, name: &str) -> Result<IdentityRef> {
        let groups = self.cache.groups(self.directory, &self.query).await?;
        if let Some(group) = groups.iter().find(|g| g.display_name == name) {
            return Ok(IdentityRef::new(group.origin_id.clone(), name));
        }

        let users = self.cache.users(self.directory, &self.query).await?;
        let Some(user) = users.iter().find(|u| u.display_name == name) else {
            return Err(Error::IdentityNotFound(name.to_string()));
        };

        if self.direct_origins.is_direct(&user.origin) {
            return Ok(IdentityRef::new(user.origin_id.clone(), name));
        }

        self.resolve_entitlement(name).await
    }

    /// Resolve names one at a time, collecting failures instead of stopping.
    pub async fn resolve_all(&mut self, names: &[String]) -> Resolution {
        let mut resolution = Resolution::default();

        for name in names {
            match self.resolve(name).await {
                Ok(identity) => {
                    if !resolution.resolved.iter().any(|r| r.id == identity.id) {
                        resolution.resolved.push(identity);
                    }
                }
                Err(e) => resolution.failures.push((name.clone(), e)),
            }
        }

        resolution
    }

    async fn resolve_entitlement(&self, name: &str) -> Result<IdentityRef> {
        let entitlements = self
            .directory
            .search_user_entitlements(Some(name))
            .await
            .map_err(|source| Error::EntitlementLookup {
                name: name.to_string(),
                source,
            })?;

        entitlements
            .into_iter()
            .find(|e| e.user.display_name == name)
            .map(|e| IdentityRef::new(e.id, name))
            .ok_or_else(|| Error::EntitlementNotFound(name.to_string()))
    }
}
