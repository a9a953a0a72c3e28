//! Endpoint registry
//!
//! Endpoints are registered once at startup and never removed. Identifiers
//! are handed out sequentially from 1, so the identifier doubles as a
//! table index.

use core::fmt;
use core::num::NonZeroU8;

use heapless::Vec;

use crate::config::{EndpointConfig, EndpointSettings};
use crate::error::{Error, Result};

/// Default registry capacity
pub const MAX_ENDPOINTS: usize = 8;

/// Handle for a registered endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointId(NonZeroU8);

impl EndpointId {
    /// Wrap a raw identifier; zero is never issued
    pub const fn new(raw: u8) -> Option<Self> {
        match NonZeroU8::new(raw) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    pub const fn get(self) -> u8 {
        self.0.get()
    }

    const fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ep{}", self.get())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EndpointId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ep{}", self.get())
    }
}

/// Fixed-capacity endpoint table
#[derive(Debug)]
pub struct Registry<const N: usize = MAX_ENDPOINTS> {
    endpoints: Vec<EndpointConfig, N>,
}

impl<const N: usize> Default for Registry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Registry<N> {
    pub const fn new() -> Self {
        Self { endpoints: Vec::new() }
    }

    /// Take ownership of `config` and assign it the next identifier
    pub fn register(&mut self, config: EndpointConfig) -> Result<EndpointId> {
        let next = u8::try_from(self.endpoints.len() + 1)
            .ok()
            .and_then(EndpointId::new)
            .ok_or(Error::CapacityExceeded)?;
        self.endpoints
            .push(config)
            .map_err(|_| Error::CapacityExceeded)?;
        Ok(next)
    }

    pub fn get(&self, id: EndpointId) -> Result<&EndpointConfig> {
        self.endpoints.get(id.index()).ok_or(Error::UnknownEndpoint)
    }

    pub fn get_mut(&mut self, id: EndpointId) -> Result<&mut EndpointConfig> {
        self.endpoints
            .get_mut(id.index())
            .ok_or(Error::UnknownEndpoint)
    }

    /// Copy of the endpoint's engine settings
    pub fn settings(&self, id: EndpointId) -> Result<EndpointSettings> {
        self.get(id).map(|e| e.settings)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.endpoints.is_full()
    }
}
