//! Ordered flag declarations with name/alias uniqueness and the help flag.

use crate::error::{FlagError, Result};
use crate::flag::FlagSpec;
use crate::parser::{ParsedFlags, Parser};

pub const DEFAULT_HELP_NAME: &str = "-h";
pub const DEFAULT_HELP_ALIAS: &str = "--help";
pub const DEFAULT_HELP_DESCRIPTION: &str = "Prints this help message.";

/// The flags a program accepts, in display order.
///
/// When a help flag is designated it always sits at position 0.
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    description: String,
    flags: Vec<FlagSpec>,
    has_help: bool,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose help text starts with `description`.
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Add a flag.
    ///
    /// Fails with [`FlagError::DuplicateFlag`] when its name or an alias is
    /// already taken, and with [`FlagError::InvalidValue`] when its default
    /// cannot be brought to the flag's kind.
    pub fn register(&mut self, mut spec: FlagSpec) -> Result<()> {
        self.check_available(&spec)?;
        spec.normalize_default()?;
        tracing::debug!(flag = spec.name(), kind = %spec.kind(), "registered flag");
        self.flags.push(spec);
        Ok(())
    }

    /// Register a caller-defined help flag and move it to the front.
    ///
    /// Replaces any help flag designated earlier.
    pub fn set_help_flag<I, S>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        aliases: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let spec = FlagSpec::bool(name, description)
            .aliases(aliases)
            .default(false)
            .optional();

        let previous = self.has_help.then(|| self.flags.remove(0));
        if let Err(err) = self.check_available(&spec) {
            if let Some(previous) = previous {
                self.flags.insert(0, previous);
            }
            return Err(err);
        }
        self.install_help(spec)
    }

    /// Add the implicit `-h`/`--help` flag unless a help flag exists.
    ///
    /// Calling this repeatedly is harmless. If the caller registered plain
    /// flags that already use `-h` or `--help`, no help flag is added.
    pub fn ensure_help_flag(&mut self) -> Result<()> {
        if self.has_help {
            return Ok(());
        }
        if self.find(DEFAULT_HELP_NAME).is_some() || self.find(DEFAULT_HELP_ALIAS).is_some() {
            tracing::debug!("help tokens taken by caller flags; not adding implicit help flag");
            return Ok(());
        }
        let spec = FlagSpec::bool(DEFAULT_HELP_NAME, DEFAULT_HELP_DESCRIPTION)
            .alias(DEFAULT_HELP_ALIAS)
            .optional();
        self.install_help(spec)
    }

    fn install_help(&mut self, mut spec: FlagSpec) -> Result<()> {
        self.check_available(&spec)?;
        spec.normalize_default()?;
        self.flags.insert(0, spec);
        self.has_help = true;
        Ok(())
    }

    /// The designated help flag, if any.
    pub fn help_flag(&self) -> Option<&FlagSpec> {
        if self.has_help {
            self.flags.first()
        } else {
            None
        }
    }

    /// Look up a flag by its name or any alias.
    pub fn find(&self, token: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| f.matches(token))
    }

    /// Look up a flag by canonical name only.
    pub fn get(&self, name: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| f.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlagSpec> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn has_required(&self) -> bool {
        self.flags.iter().any(FlagSpec::is_required)
    }

    pub fn has_optional(&self) -> bool {
        self.flags.iter().any(FlagSpec::is_optional)
    }

    /// Whether any flag still holds a value from a parse.
    pub fn is_populated(&self) -> bool {
        self.flags.iter().any(FlagSpec::is_set)
    }

    /// Forget every parsed value so the registry can be parsed again.
    pub fn reset(&mut self) {
        for flag in &mut self.flags {
            flag.clear();
        }
    }

    /// Parse `args` with default options, writing diagnostics to stdout.
    pub fn parse<I, T>(&mut self, args: I) -> Result<ParsedFlags>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Parser::new(self).parse(args)
    }

    pub(crate) fn position(&self, token: &str) -> Option<usize> {
        self.flags.iter().position(|f| f.matches(token))
    }

    pub(crate) fn flags_mut(&mut self) -> &mut [FlagSpec] {
        &mut self.flags
    }

    fn check_available(&self, spec: &FlagSpec) -> Result<()> {
        let tokens: Vec<&str> = spec.tokens().collect();
        for (i, token) in tokens.iter().enumerate() {
            if let Some(existing) = self.find(token) {
                return Err(FlagError::DuplicateFlag {
                    token: (*token).to_string(),
                    existing: existing.name().to_string(),
                });
            }
            if tokens[..i].contains(token) {
                return Err(FlagError::DuplicateFlag {
                    token: (*token).to_string(),
                    existing: spec.name().to_string(),
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FlagRegistry {
    type Item = &'a FlagSpec;
    type IntoIter = std::slice::Iter<'a, FlagSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}
