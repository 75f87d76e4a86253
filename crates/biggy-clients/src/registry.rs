//! Lazily constructed, memoized service clients for one owning context
//!
//! Each named client is built on first access and the same instance is
//! handed out afterwards. Construction runs while the registry holds the
//! entry for that name, so concurrent first accesses still construct once.
//! A factory must therefore not access the registry it is called from.

use crate::algolia::AlgoliaClient;
use crate::catalog::CatalogClient;
use crate::checkout::CheckoutClient;
use crate::context::{InstanceOptions, IoContext};
use crate::error::{ClientError, Result};
use crate::rewriter::RewriterClient;
use crate::search::BiggySearchClient;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The closed set of clients a registry can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceName {
    Search,
    Algolia,
    Checkout,
    Rewriter,
    Catalog,
}

impl ServiceName {
    pub const ALL: [Self; 5] = [
        Self::Search,
        Self::Algolia,
        Self::Checkout,
        Self::Rewriter,
        Self::Catalog,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Algolia => "algolia",
            Self::Checkout => "checkout",
            Self::Rewriter => "rewriter",
            Self::Catalog => "catalog",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client the registry knows how to construct
///
/// Construction reads the context but performs no I/O.
pub trait ServiceClient: Send + Sync + Sized + 'static {
    const NAME: ServiceName;

    /// Build the client for `context`
    ///
    /// # Errors
    /// Returns the client's construction error, typically missing configuration
    fn new(context: &IoContext, options: &InstanceOptions) -> Result<Self>;
}

type Instance = Arc<dyn Any + Send + Sync>;

/// Memo table from service name to constructed client
pub(crate) struct ClientRegistry {
    context: Arc<IoContext>,
    options: InstanceOptions,
    instances: DashMap<ServiceName, Instance>,
}

impl ClientRegistry {
    pub(crate) fn new(context: Arc<IoContext>, options: InstanceOptions) -> Self {
        Self {
            context,
            options,
            instances: DashMap::new(),
        }
    }

    pub(crate) fn context(&self) -> &IoContext {
        &self.context
    }

    /// Return the client stored under `name`, constructing it with `factory`
    /// on first access
    ///
    /// A failed construction stores nothing, so the next access tries again.
    ///
    /// # Errors
    /// Returns the factory's error, or `ClientError::ClientTypeMismatch` when
    /// `name` already holds a client of another type
    pub(crate) fn get_or_create<T, F>(&self, name: ServiceName, factory: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce(&IoContext, &InstanceOptions) -> Result<T>,
    {
        let instance = match self.instances.entry(name) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                let client: Instance = Arc::new(factory(&self.context, &self.options)?);
                tracing::debug!(
                    service = %name,
                    account = self.context.account(),
                    "Constructed service client"
                );
                Arc::clone(entry.insert(client).value())
            }
        };

        instance
            .downcast::<T>()
            .map_err(|_| ClientError::ClientTypeMismatch(name))
    }

    /// Return the client of type `T` under its own name
    ///
    /// # Errors
    /// Returns the client's construction error
    pub(crate) fn get<T: ServiceClient>(&self) -> Result<Arc<T>> {
        self.get_or_create(T::NAME, T::new)
    }

    /// Whether `name` has been constructed already
    pub(crate) fn is_constructed(&self, name: ServiceName) -> bool {
        self.instances.contains_key(&name)
    }
}

impl fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constructed: Vec<ServiceName> = ServiceName::ALL
            .into_iter()
            .filter(|name| self.is_constructed(*name))
            .collect();

        f.debug_struct("ClientRegistry")
            .field("account", &self.context.account())
            .field("constructed", &constructed)
            .finish_non_exhaustive()
    }
}

/// Accessors for every service client of one owning context
///
/// The registry behind the accessors is not reachable from outside the
/// crate, so no caller can store a foreign value under a service name:
///
/// ```compile_fail
/// use biggy_clients::{Clients, IoContext};
///
/// let clients = Clients::new(IoContext::new("storetheme", "master"));
/// let _ = clients.registry();
/// ```
#[derive(Debug)]
pub struct Clients {
    registry: ClientRegistry,
}

impl Clients {
    pub fn new(context: IoContext) -> Self {
        Self::with_options(context, InstanceOptions::default())
    }

    pub fn with_options(context: IoContext, options: InstanceOptions) -> Self {
        Self {
            registry: ClientRegistry::new(Arc::new(context), options),
        }
    }

    pub fn context(&self) -> &IoContext {
        self.registry.context()
    }

    /// # Errors
    /// Returns the construction error of [`BiggySearchClient::new`]
    pub fn search(&self) -> Result<Arc<BiggySearchClient>> {
        self.registry.get()
    }

    /// # Errors
    /// Returns the construction error of [`AlgoliaClient::new`]
    pub fn algolia(&self) -> Result<Arc<AlgoliaClient>> {
        self.registry.get()
    }

    /// # Errors
    /// Returns the construction error of [`CheckoutClient::new`]
    pub fn checkout(&self) -> Result<Arc<CheckoutClient>> {
        self.registry.get()
    }

    /// # Errors
    /// Returns the construction error of [`RewriterClient::new`]
    pub fn rewriter(&self) -> Result<Arc<RewriterClient>> {
        self.registry.get()
    }

    /// # Errors
    /// Returns the construction error of [`CatalogClient::new`]
    pub fn catalog(&self) -> Result<Arc<CatalogClient>> {
        self.registry.get()
    }
}
