//! Execution context handed to every command

use crate::system::System;
use anyhow::{Result, anyhow};
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation signal
///
/// Clones share the same flag. The dispatcher checks it before starting each
/// command; commands may poll it while they run.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Capabilities available to a running command
///
/// Holds the [`System`] plus any number of typed services registered by the
/// host (database handles, settings, ...), looked up by type.
pub struct CommandContext<'a> {
    system: &'a dyn System,
    services: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    cancellation: CancellationToken,
}

impl<'a> CommandContext<'a> {
    /// Create a context with no services and a fresh cancellation token
    #[must_use]
    pub fn new(system: &'a dyn System) -> Self {
        Self {
            system,
            services: HashMap::new(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Register a service (builder pattern). A later service of the same type
    /// replaces the earlier one.
    #[must_use]
    pub fn with_service<T: Any + Send + Sync>(mut self, service: T) -> Self {
        self.services.insert(TypeId::of::<T>(), Box::new(service));
        self
    }

    /// Use an existing cancellation token (builder pattern)
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Look up a service by type
    #[must_use]
    pub fn service<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.services
            .get(&TypeId::of::<T>())
            .and_then(|service| (**service).downcast_ref::<T>())
    }

    /// Look up a service by type, failing when it was never registered
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing type
    pub fn require<T: Any + Send + Sync>(&self) -> Result<&T> {
        self.service::<T>()
            .ok_or_else(|| anyhow!("Service not registered: {}", type_name::<T>()))
    }

    #[must_use]
    pub fn system(&self) -> &dyn System {
        self.system
    }

    #[must_use]
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}

impl fmt::Debug for CommandContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("services", &self.services.len())
            .field("cancellation", &self.cancellation)
            .finish_non_exhaustive()
    }
}
