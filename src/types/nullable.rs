//! Tri-state wire fields for PATCH payloads.
//!
//! `Unset` is left out of the serialized body, `Null` is sent as `null`, and
//! `Value` is sent as the value. Struct fields using this type must carry
//! `#[serde(default, skip_serializing_if = "Nullable::is_unset")]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Nullable<T> {
    Unset,
    Null,
    Value(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Unset
    }
}

impl<T> Nullable<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Nullable::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Nullable::Null)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Nullable::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Nullable<U> {
        match self {
            Nullable::Unset => Nullable::Unset,
            Nullable::Null => Nullable::Null,
            Nullable::Value(v) => Nullable::Value(f(v)),
        }
    }

    /// Derive a PATCH field from the planned value and the prior state.
    ///
    /// Known plans are converted with `convert`. Unknown plans are left out.
    /// A null plan clears the field only when the prior state held a value,
    /// so attributes the user never managed are not blanked server-side.
    pub fn for_update<P, Q, E, F>(
        plan: &Value<P>,
        prior: Option<&Value<Q>>,
        convert: F,
    ) -> Result<Nullable<T>, E>
    where
        F: FnOnce(&P) -> Result<T, E>,
    {
        match plan {
            Value::Known(v) => convert(v).map(Nullable::Value),
            Value::Unknown => Ok(Nullable::Unset),
            Value::Null => match prior {
                Some(Value::Known(_)) => Ok(Nullable::Null),
                _ => Ok(Nullable::Unset),
            },
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Nullable::Value(v) => ser.serialize_some(v),
            Nullable::Unset | Nullable::Null => ser.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(de)? {
            Some(v) => Nullable::Value(v),
            None => Nullable::Null,
        })
    }
}
