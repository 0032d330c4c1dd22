use crate::{error::ConfigError, predicate::CoercionId};
use serde::Deserialize;

///
/// PredicateConfig
///
/// Construction-time policy for predicates built through
/// `PredicateBuilder::from_config`. Every field has a default, so an empty
/// document is a valid config.
///
/// ```toml
/// coercion = "numeric_widen"   # strict | numeric_widen | text_casefold
/// ```
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PredicateConfig {
    pub coercion: CoercionId,
}

impl PredicateConfig {
    /// Parse a config from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(source)?;

        Ok(config)
    }
}
