//! Typed flag definitions and per-kind value coercion.

use std::fmt;

use serde::Serialize;

use crate::error::{FlagError, Result};

const TRUTHY: [&str; 6] = ["true", "True", "TRUE", "t", "T", "1"];
const FALSY: [&str; 6] = ["false", "False", "FALSE", "f", "F", "0"];

/// The value type a flag accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    Int,
    Bool,
    String,
}

impl FlagKind {
    /// Placeholder shown after the flag token in usage and help text.
    ///
    /// Boolean flags take no value, so they have none.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::Int => Some("<int>"),
            Self::Bool => None,
            Self::String => Some("<string>"),
        }
    }

    /// Whether the flag consumes the following token as its value.
    pub fn takes_value(self) -> bool {
        match self {
            Self::Int | Self::String => true,
            Self::Bool => false,
        }
    }

    /// Convert a raw token into a value of this kind.
    ///
    /// `flag` is only used to build the error.
    pub fn coerce(self, flag: &str, token: &str) -> Result<FlagValue> {
        let invalid = || FlagError::InvalidValue {
            flag: flag.to_string(),
            value: token.to_string(),
            kind: self,
        };
        match self {
            Self::Int => token
                .parse::<i64>()
                .map(FlagValue::Int)
                .map_err(|_| invalid()),
            Self::Bool => {
                if TRUTHY.contains(&token) {
                    Ok(FlagValue::Bool(true))
                } else if FALSY.contains(&token) {
                    Ok(FlagValue::Bool(false))
                } else {
                    Err(invalid())
                }
            }
            Self::String => Ok(FlagValue::Str(token.to_string())),
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "int",
            Self::Bool => "bool",
            Self::String => "string",
        })
    }
}

/// A concrete, assigned flag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl FlagValue {
    pub fn kind(&self) -> FlagKind {
        match self {
            Self::Int(_) => FlagKind::Int,
            Self::Bool(_) => FlagKind::Bool,
            Self::Str(_) => FlagKind::String,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for FlagValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FlagValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for FlagValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for FlagValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Declaration of one flag plus the slot its parsed value lands in.
///
/// Specs are required unless [`FlagSpec::optional`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    name: String,
    aliases: Vec<String>,
    description: String,
    kind: FlagKind,
    required: bool,
    default: Option<FlagValue>,
    value: Option<FlagValue>,
}

impl FlagSpec {
    pub fn new(kind: FlagKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: description.into(),
            kind,
            required: true,
            default: None,
            value: None,
        }
    }

    pub fn int(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(FlagKind::Int, name, description)
    }

    pub fn bool(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(FlagKind::Bool, name, description)
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(FlagKind::String, name, description)
    }

    /// Add one alternative token for this flag.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Default used when the flag is optional and absent from the tokens.
    ///
    /// A string default for an int or bool flag is coerced when the flag is
    /// registered.
    pub fn default(mut self, value: impl Into<FlagValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn optional(self) -> Self {
        self.required(false)
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases_list(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_optional(&self) -> bool {
        !self.required
    }

    /// The effective default; bool flags fall back to `false`.
    pub fn default_value(&self) -> Option<&FlagValue> {
        const FALSE: &FlagValue = &FlagValue::Bool(false);
        match (&self.default, self.kind) {
            (Some(v), _) => Some(v),
            (None, FlagKind::Bool) => Some(FALSE),
            (None, _) => None,
        }
    }

    /// Whether `token` is this flag's name or one of its aliases.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }

    /// Name followed by aliases, in declaration order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// The assigned value.
    ///
    /// Fails with [`FlagError::Unset`] until a parse assigned one.
    pub fn value(&self) -> Result<&FlagValue> {
        self.value.as_ref().ok_or_else(|| FlagError::Unset {
            flag: self.name.clone(),
        })
    }

    pub fn as_int(&self) -> Result<i64> {
        let value = self.value()?;
        value.as_int().ok_or_else(|| self.wrong_kind(FlagKind::Int))
    }

    pub fn as_bool(&self) -> Result<bool> {
        let value = self.value()?;
        value.as_bool().ok_or_else(|| self.wrong_kind(FlagKind::Bool))
    }

    pub fn as_str(&self) -> Result<&str> {
        let value = self.value()?;
        value.as_str().ok_or_else(|| self.wrong_kind(FlagKind::String))
    }

    /// Store a value; it must be of this flag's kind.
    pub fn assign(&mut self, value: FlagValue) -> Result<()> {
        if value.kind() != self.kind {
            return Err(FlagError::WrongKind {
                flag: self.name.clone(),
                expected: self.kind,
                found: value.kind(),
            });
        }
        self.value = Some(value);
        Ok(())
    }

    /// Coerce `token` and store it.
    pub fn assign_token(&mut self, token: &str) -> Result<()> {
        let value = self.kind.coerce(&self.name, token)?;
        self.assign(value)
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Bring an explicit default to this flag's kind.
    pub(crate) fn normalize_default(&mut self) -> Result<()> {
        let Some(default) = self.default.take() else {
            return Ok(());
        };
        let normalized = match default {
            FlagValue::Str(token) if self.kind != FlagKind::String => {
                self.kind.coerce(&self.name, &token)?
            }
            other if other.kind() == self.kind => other,
            other => {
                return Err(FlagError::InvalidValue {
                    flag: self.name.clone(),
                    value: other.to_string(),
                    kind: self.kind,
                });
            }
        };
        self.default = Some(normalized);
        Ok(())
    }

    fn wrong_kind(&self, found: FlagKind) -> FlagError {
        FlagError::WrongKind {
            flag: self.name.clone(),
            expected: self.kind,
            found,
        }
    }
}
