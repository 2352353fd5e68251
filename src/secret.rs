//! Integration secret store configuration.
//!
//! On the wire the secret is an untyped object discriminated by its `type`
//! key. Terraform exposes one optional block per secret store. In between,
//! [`SecretConfig`] is decoded once at the API boundary.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde_json::{Map, Value as JsonValue};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::ProviderError;

const TYPE_KEY: &str = "type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SecretType {
    Aws,
    Gcp,
    Azure,
    Kubernetes,
    HashicorpVault,
    Apono,
}

impl SecretType {
    /// Name of the Terraform block for this secret store.
    pub fn block_name(&self) -> &'static str {
        match self {
            SecretType::Aws => "aws_secret",
            SecretType::Gcp => "gcp_secret",
            SecretType::Azure => "azure_secret",
            SecretType::Kubernetes => "kubernetes_secret",
            SecretType::HashicorpVault => "hashicorp_vault_secret",
            SecretType::Apono => "apono_secret",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AwsSecret {
    pub region: String,
    pub secret_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GcpSecret {
    pub project: String,
    pub secret_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AzureSecret {
    pub vault_url: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KubernetesSecret {
    pub namespace: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashicorpVaultSecret {
    pub secret_engine: String,
    pub path: String,
}

/// Credentials stored by the access-management service itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AponoSecret {
    pub params: BTreeMap<String, String>,
}

/// A decoded secret store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SecretConfig {
    Aws(AwsSecret),
    Gcp(GcpSecret),
    Azure(AzureSecret),
    Kubernetes(KubernetesSecret),
    HashicorpVault(HashicorpVaultSecret),
    Apono(AponoSecret),
}

impl SecretConfig {
    pub fn secret_type(&self) -> SecretType {
        match self {
            SecretConfig::Aws(_) => SecretType::Aws,
            SecretConfig::Gcp(_) => SecretType::Gcp,
            SecretConfig::Azure(_) => SecretType::Azure,
            SecretConfig::Kubernetes(_) => SecretType::Kubernetes,
            SecretConfig::HashicorpVault(_) => SecretType::HashicorpVault,
            SecretConfig::Apono(_) => SecretType::Apono,
        }
    }

    /// Encode as `{"type": "<TYPE>", <fields>…}`.
    pub fn to_wire(&self) -> Map<String, JsonValue> {
        let mut map = Map::new();
        map.insert(
            TYPE_KEY.to_string(),
            JsonValue::String(self.secret_type().to_string()),
        );
        let fields: Vec<(&str, &str)> = match self {
            SecretConfig::Aws(s) => vec![("region", s.region.as_str()), ("secret_id", s.secret_id.as_str())],
            SecretConfig::Gcp(s) => vec![("project", s.project.as_str()), ("secret_id", s.secret_id.as_str())],
            SecretConfig::Azure(s) => vec![("vault_url", s.vault_url.as_str()), ("name", s.name.as_str())],
            SecretConfig::Kubernetes(s) => {
                vec![("namespace", s.namespace.as_str()), ("name", s.name.as_str())]
            }
            SecretConfig::HashicorpVault(s) => {
                vec![("secret_engine", s.secret_engine.as_str()), ("path", s.path.as_str())]
            }
            SecretConfig::Apono(s) => s
                .params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
        };
        for (key, value) in fields {
            map.insert(key.to_string(), JsonValue::String(value.to_string()));
        }
        map
    }

    /// Decode a non-empty wire object.
    pub fn from_wire(raw: &Map<String, JsonValue>) -> Result<Self, ProviderError> {
        let type_name = match raw.get(TYPE_KEY) {
            Some(JsonValue::String(t)) => t.as_str(),
            Some(other) => return Err(ProviderError::UnknownSecretType(other.to_string())),
            None => return Err(ProviderError::UnknownSecretType(String::new())),
        };
        let secret_type: SecretType = type_name
            .parse()
            .map_err(|_| ProviderError::UnknownSecretType(type_name.to_string()))?;

        let field = |name: &str| -> Result<String, ProviderError> {
            match raw.get(name) {
                Some(JsonValue::String(v)) => Ok(v.clone()),
                _ => Err(ProviderError::InvalidSecretConfig {
                    secret_type: secret_type.to_string(),
                    field: name.to_string(),
                }),
            }
        };

        Ok(match secret_type {
            SecretType::Aws => SecretConfig::Aws(AwsSecret {
                region: field("region")?,
                secret_id: field("secret_id")?,
            }),
            SecretType::Gcp => SecretConfig::Gcp(GcpSecret {
                project: field("project")?,
                secret_id: field("secret_id")?,
            }),
            SecretType::Azure => SecretConfig::Azure(AzureSecret {
                vault_url: field("vault_url")?,
                name: field("name")?,
            }),
            SecretType::Kubernetes => SecretConfig::Kubernetes(KubernetesSecret {
                namespace: field("namespace")?,
                name: field("name")?,
            }),
            SecretType::HashicorpVault => SecretConfig::HashicorpVault(HashicorpVaultSecret {
                secret_engine: field("secret_engine")?,
                path: field("path")?,
            }),
            SecretType::Apono => SecretConfig::Apono(AponoSecret {
                params: raw
                    .iter()
                    .filter(|(k, _)| k.as_str() != TYPE_KEY)
                    .map(|(k, v)| (k.clone(), json_to_text(v)))
                    .collect(),
            }),
        })
    }
}

/// Strings as-is, anything else as its JSON text.
pub(crate) fn json_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The Terraform side: at most one block may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SecretConfigModel {
    pub aws: Option<AwsSecret>,
    pub gcp: Option<GcpSecret>,
    pub azure: Option<AzureSecret>,
    pub kubernetes: Option<KubernetesSecret>,
    pub hashicorp_vault: Option<HashicorpVaultSecret>,
    pub apono: Option<AponoSecret>,
}

impl SecretConfigModel {
    pub fn is_empty(&self) -> bool {
        self.populated().is_empty()
    }

    /// Reject configurations with more than one secret block.
    pub fn validate(&self) -> Result<(), ProviderError> {
        let populated = self.populated();
        if populated.len() > 1 {
            return Err(ProviderError::AmbiguousConfiguration(format!(
                "only one secret block may be set, found: {}",
                populated.iter().map(|t| t.block_name()).join(", ")
            )));
        }
        Ok(())
    }

    /// The first populated block, in declaration order.
    pub fn to_config(&self) -> Option<SecretConfig> {
        self.aws
            .clone()
            .map(SecretConfig::Aws)
            .or_else(|| self.gcp.clone().map(SecretConfig::Gcp))
            .or_else(|| self.azure.clone().map(SecretConfig::Azure))
            .or_else(|| self.kubernetes.clone().map(SecretConfig::Kubernetes))
            .or_else(|| self.hashicorp_vault.clone().map(SecretConfig::HashicorpVault))
            .or_else(|| self.apono.clone().map(SecretConfig::Apono))
    }

    fn populated(&self) -> Vec<SecretType> {
        SecretType::iter()
            .filter(|t| match t {
                SecretType::Aws => self.aws.is_some(),
                SecretType::Gcp => self.gcp.is_some(),
                SecretType::Azure => self.azure.is_some(),
                SecretType::Kubernetes => self.kubernetes.is_some(),
                SecretType::HashicorpVault => self.hashicorp_vault.is_some(),
                SecretType::Apono => self.apono.is_some(),
            })
            .collect()
    }
}

impl From<SecretConfig> for SecretConfigModel {
    fn from(config: SecretConfig) -> Self {
        let mut model = SecretConfigModel::default();
        match config {
            SecretConfig::Aws(s) => model.aws = Some(s),
            SecretConfig::Gcp(s) => model.gcp = Some(s),
            SecretConfig::Azure(s) => model.azure = Some(s),
            SecretConfig::Kubernetes(s) => model.kubernetes = Some(s),
            SecretConfig::HashicorpVault(s) => model.hashicorp_vault = Some(s),
            SecretConfig::Apono(s) => model.apono = Some(s),
        }
        model
    }
}

/// Wire form of the configured secret, `None` when no block is set.
pub fn secret_config_to_api(model: &SecretConfigModel) -> Option<Map<String, JsonValue>> {
    model.to_config().map(|config| config.to_wire())
}

/// Decode the wire secret; absent or empty maps mean no secret.
pub fn secret_config_from_api(
    raw: Option<&Map<String, JsonValue>>,
) -> Result<SecretConfigModel, ProviderError> {
    match raw {
        None => Ok(SecretConfigModel::default()),
        Some(map) if map.is_empty() => Ok(SecretConfigModel::default()),
        Some(map) => SecretConfig::from_wire(map).map(SecretConfigModel::from),
    }
}
