//! The serializer handle.

use crate::config::SerializerConfig;
use crate::date_format::DateFormat;
use crate::error::{FixedWidthError, Result};

/// Encodes and decodes fixed-width records under one configuration.
///
/// The configuration is captured when the serializer is built and cannot
/// change afterwards; every operation takes `&self`, so a serializer can be
/// shared freely between threads. Build a new serializer to use different
/// options.
///
/// ```
/// use fixedwidth::{FixedWidthSerializer, SerializerConfig};
///
/// let csv_like = FixedWidthSerializer::with_config(
///     SerializerConfig::new().with_delimiter(","),
/// )
/// .unwrap();
/// assert_eq!(csv_like.config().delimiter(), Some(","));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedWidthSerializer {
    pub(crate) config: SerializerConfig,
    pub(crate) default_date_format: Option<DateFormat>,
}

impl FixedWidthSerializer {
    /// Creates a serializer with the default configuration.
    pub fn new() -> Self {
        FixedWidthSerializer::default()
    }

    /// Creates a serializer from a configuration.
    ///
    /// Fails when `default_date_format` is not a usable pattern.
    pub fn with_config(config: SerializerConfig) -> Result<Self> {
        let default_date_format = config
            .default_date_format
            .as_deref()
            .map(DateFormat::compile)
            .transpose()
            .map_err(|reason| FixedWidthError::Configuration {
                record: "SerializerConfig",
                field: "default_date_format",
                reason,
            })?;

        Ok(FixedWidthSerializer {
            config,
            default_date_format,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub(crate) fn delimiter(&self) -> Option<&str> {
        self.config.delimiter()
    }
}
