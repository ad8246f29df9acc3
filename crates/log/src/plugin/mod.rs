//! Plugin factories
//!
//! Every pluggable capability (writers, formatters, loggers) is a [`Factory`]
//! addressed by a capability type and a name. A factory never sees raw
//! configuration: it receives a [`Decoder`] and pulls its settings through
//! [`Decoder::decode`].
//!
//! ```
//! use std::sync::Arc;
//! use fanlog::plugin::{self, Decoder, Factory};
//! use fanlog::LogResult;
//!
//! struct Audit;
//!
//! impl Factory for Audit {
//!     fn type_name(&self) -> &str {
//!         "audit"
//!     }
//!
//!     fn setup(&self, _name: &str, _decoder: &mut dyn Decoder) -> LogResult<()> {
//!         Ok(())
//!     }
//! }
//!
//! plugin::register("trail", Arc::new(Audit));
//! assert!(plugin::get("audit", "trail").is_some());
//! ```

mod registry;

use std::any::Any;

use crate::core::{LogError, LogResult};

pub use registry::{PluginRegistry, get, register};

/// Capability type of logger factories
pub const LOG_PLUGIN_TYPE: &str = "log";
/// Capability type of formatter factories
pub const FORMATTER_PLUGIN_TYPE: &str = "formatter";

/// A named builder for one capability
pub trait Factory: Send + Sync {
    /// Capability type this factory is registered under
    fn type_name(&self) -> &str;

    /// Build the capability from the configuration carried by `decoder`
    ///
    /// `name` is the name the factory was resolved by. Results are handed back
    /// through the concrete decoder type the factory expects.
    fn setup(&self, name: &str, decoder: &mut dyn Decoder) -> LogResult<()>;
}

/// Carrier of one piece of configuration into a [`Factory`]
pub trait Decoder: Any + Send {
    /// Fill `cfg` with this decoder's configuration
    ///
    /// Fails with [`LogError::InvalidDecoderConfig`] if `cfg` is not the type
    /// the decoder holds.
    fn decode(&self, cfg: &mut dyn Any) -> LogResult<()>;
}

/// Recover the concrete decoder a factory was built for
pub fn downcast_decoder<T: Decoder>(decoder: &mut dyn Decoder) -> LogResult<&mut T> {
    let any: &mut dyn Any = decoder;
    any.downcast_mut::<T>().ok_or(LogError::InvalidDecoderType)
}
