//! # Schema Model
//!
//! `SolarnetSchema` wraps the resolved, layered schema document: keyword
//! metadata lookup, default-value materialization, requirement-level
//! queries, and attribute templates. A schema is built once and read-only
//! thereafter; it is supplied by reference to every validation call.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use solarnet_core::{DataType, Header, RequirementLevel, SolarnetError};

use crate::merge::merge_layer;

/// The packaged default schema, embedded at build time.
pub const DEFAULT_ATTR_SCHEMA: &str = include_str!("../data/SOLARNET_attr_schema.yaml");

/// Condition keys evaluated for conditional requirements.
pub const OBSERVATORY_TYPE_KEY: &str = "OBS_TYPE";
pub const INSTRUMENT_TYPE_KEY: &str = "INST_TYP";

/// Metadata for one keyword in the schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSpec {
    /// Declared semantic type; an unrecognized name is kept as
    /// `DataType::Unknown` and reported at validation time.
    pub data_type: Option<DataType>,
    /// Default value, coerced into `default_attributes()`.
    pub default: Option<Value>,
    pub description: Option<String>,
    /// Short human-readable name; used as the template comment.
    pub human_readable: Option<String>,
    pub required: Option<RequirementLevel>,
    /// Enumerated acceptable values, equality-compared against raw card
    /// values.
    pub valid_values: Option<Vec<Value>>,
    /// Full-match regex for keyword families; consulted when the literal
    /// keyword name is absent from a header.
    pub pattern: Option<String>,
    /// The standard this keyword comes from (FITS, SOLARNET, ...).
    pub origin: Option<String>,
}

/// A rule adding required keywords when `condition_key` equals
/// `condition_value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalRequirement {
    pub condition_key: String,
    pub condition_value: Value,
    pub required_attributes: Vec<String>,
}

/// The resolved SOLARNET keyword schema.
///
/// Constructed once from the packaged defaults plus optional override
/// layers (latest-priority ordering), then immutable. Iteration order is
/// the schema document order throughout.
#[derive(Debug, Clone)]
pub struct SolarnetSchema {
    attributes: Vec<(String, AttributeSpec)>,
    index: HashMap<String, usize>,
    conditional_requirements: Vec<ConditionalRequirement>,
    default_attributes: Header,
}

impl SolarnetSchema {
    /// Build a schema from the packaged defaults and override layer files,
    /// applied in order (last layer wins on scalar conflicts).
    ///
    /// # Errors
    ///
    /// - `Configuration` if `use_defaults` is false and `layer_paths` is
    ///   empty: there would be no schema content at all.
    /// - `Io` / `Parse` if a layer file cannot be read or parsed.
    /// - `Schema` if the resolved document lacks an `attribute_key`
    ///   section or an entry does not deserialize.
    pub fn new<P: AsRef<Path>>(
        use_defaults: bool,
        layer_paths: &[P],
    ) -> Result<Self, SolarnetError> {
        let mut layers = Vec::with_capacity(layer_paths.len());
        for path in layer_paths {
            layers.push(load_yaml_file(path.as_ref())?);
        }
        Self::from_documents(use_defaults, layers)
    }

    /// Build a schema from the packaged defaults alone.
    pub fn with_defaults() -> Result<Self, SolarnetError> {
        Self::from_documents(true, Vec::new())
    }

    /// Build a schema from already-parsed layer documents.
    pub fn from_documents(
        use_defaults: bool,
        layers: Vec<Value>,
    ) -> Result<Self, SolarnetError> {
        if !use_defaults && layers.is_empty() {
            return Err(SolarnetError::Configuration(
                "not enough information to create a schema: either use the \
                 packaged defaults or provide alternative schema layers"
                    .to_string(),
            ));
        }

        let mut resolved = Value::Object(serde_json::Map::new());
        if use_defaults {
            let defaults = parse_yaml(DEFAULT_ATTR_SCHEMA, "<packaged default schema>")?;
            merge_layer(&mut resolved, &defaults);
        }
        for layer in &layers {
            merge_layer(&mut resolved, layer);
        }

        Self::from_resolved(&resolved)
    }

    fn from_resolved(resolved: &Value) -> Result<Self, SolarnetError> {
        let Some(attribute_key) = resolved.get("attribute_key") else {
            return Err(SolarnetError::Schema(
                "schema document has no attribute_key section".to_string(),
            ));
        };
        let Some(attribute_map) = attribute_key.as_object() else {
            return Err(SolarnetError::Schema(
                "attribute_key section must be a mapping".to_string(),
            ));
        };

        let mut attributes = Vec::with_capacity(attribute_map.len());
        let mut index = HashMap::with_capacity(attribute_map.len());
        for (name, value) in attribute_map {
            let spec: AttributeSpec =
                serde_json::from_value(value.clone()).map_err(|e| {
                    SolarnetError::Schema(format!("invalid attribute spec for '{name}': {e}"))
                })?;
            index.insert(name.clone(), attributes.len());
            attributes.push((name.clone(), spec));
        }

        let conditional_requirements = match resolved.get("conditional_requirements") {
            Some(section) => serde_json::from_value(section.clone()).map_err(|e| {
                SolarnetError::Schema(format!("invalid conditional_requirements section: {e}"))
            })?,
            None => Vec::new(),
        };

        let default_attributes = materialize_defaults(&attributes);

        Ok(SolarnetSchema {
            attributes,
            index,
            conditional_requirements,
            default_attributes,
        })
    }

    /// All keyword specs, in schema document order.
    pub fn attribute_key(&self) -> impl Iterator<Item = (&str, &AttributeSpec)> {
        self.attributes.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Spec for one keyword, if known.
    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.index.get(name).map(|&i| &self.attributes[i].1)
    }

    /// Spec for one keyword; unknown names fail with `NotFound`.
    pub fn attribute_info(&self, name: &str) -> Result<&AttributeSpec, SolarnetError> {
        self.attribute(name).ok_or_else(|| SolarnetError::NotFound {
            attribute: name.to_string(),
        })
    }

    /// The conditional-requirement rules, in schema document order.
    pub fn conditional_requirements(&self) -> &[ConditionalRequirement] {
        &self.conditional_requirements
    }

    /// Header of keywords with a non-null default, each coerced to its
    /// declared type (dates serialize to ISO-8601 strings).
    pub fn default_attributes(&self) -> &Header {
        &self.default_attributes
    }

    /// Keywords required for a header with the given HDU role.
    pub fn required_keywords(
        &self,
        is_primary: bool,
        is_obs: bool,
    ) -> impl Iterator<Item = (&str, &AttributeSpec)> {
        self.attribute_key().filter(move |(_, spec)| {
            spec.required
                .is_some_and(|level| level.applies_to(is_primary, is_obs))
        })
    }

    /// Keywords at the `optional` requirement level.
    pub fn optional_keywords(&self) -> impl Iterator<Item = (&str, &AttributeSpec)> {
        self.attribute_key()
            .filter(|(_, spec)| spec.required == Some(RequirementLevel::Optional))
    }

    /// Template of attributes for a header with the given role: defaults,
    /// then null placeholders for every required keyword, then the
    /// keywords added by matching conditional requirements. Placeholders
    /// carry the keyword's human-readable name as their comment.
    pub fn attribute_template(
        &self,
        is_primary: bool,
        is_obs: bool,
        observatory_type: Option<&str>,
        instrument_type: Option<&str>,
    ) -> Header {
        let mut template = self.default_attributes.clone();
        for (name, spec) in self.required_keywords(is_primary, is_obs) {
            if !template.contains_key(name) {
                template.set(name, Value::Null, spec.human_readable.as_deref());
            }
        }
        for rule in &self.conditional_requirements {
            let condition_value = rule.condition_value.as_str();
            let matches = match rule.condition_key.as_str() {
                OBSERVATORY_TYPE_KEY => {
                    observatory_type.is_some() && observatory_type == condition_value
                }
                INSTRUMENT_TYPE_KEY => {
                    instrument_type.is_some() && instrument_type == condition_value
                }
                _ => false,
            };
            if !matches {
                continue;
            }
            for name in &rule.required_attributes {
                if !template.contains_key(name) {
                    template.set(name.as_str(), Value::Null, self.comment(name));
                }
            }
        }
        template
    }

    /// Human-readable name for a keyword; `None` (not an error) when the
    /// keyword is unknown or has none.
    pub fn comment(&self, keyword: &str) -> Option<&str> {
        self.attribute(keyword)?.human_readable.as_deref()
    }
}

/// Build the default-attribute header. Coercion failures are logged and
/// degrade to the raw value: default materialization must never abort
/// schema construction.
fn materialize_defaults(attributes: &[(String, AttributeSpec)]) -> Header {
    let mut header = Header::new();
    for (name, spec) in attributes {
        let Some(default) = spec.default.as_ref().filter(|v| !v.is_null()) else {
            continue;
        };
        let value = match &spec.data_type {
            Some(data_type) => match data_type.coerce(default) {
                Ok(coerced) => coerced,
                Err(reason) => {
                    tracing::warn!(
                        keyword = %name,
                        data_type = %data_type,
                        %reason,
                        "default value does not coerce to its declared type; keeping raw value"
                    );
                    default.clone()
                }
            },
            None => default.clone(),
        };
        header.set(name.as_str(), value, spec.human_readable.as_deref());
    }
    header
}

/// Parse a YAML schema document into the JSON value model.
pub fn parse_yaml(text: &str, origin: &str) -> Result<Value, SolarnetError> {
    serde_yaml::from_str(text).map_err(|e| SolarnetError::Parse {
        path: origin.to_string(),
        reason: format!("invalid YAML: {e}"),
    })
}

/// Load one schema layer from a file path.
pub fn load_yaml_file(path: &Path) -> Result<Value, SolarnetError> {
    let text = std::fs::read_to_string(path)?;
    parse_yaml(&text, &path.display().to_string())
}
