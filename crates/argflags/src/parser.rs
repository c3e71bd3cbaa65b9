//! Token scanning, default filling and required-flag checks.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::distance::Metric;
use crate::error::{FlagError, Result, Warning};
use crate::flag::{FlagKind, FlagValue};
use crate::help;
use crate::registry::FlagRegistry;
use crate::sink::{DiagnosticSink, StdoutSink};
use crate::suggest::{self, SuggestOptions};

/// Knobs for a parse.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub suggest: SuggestOptions,
    /// Add the implicit `-h`/`--help` flag when none is designated.
    pub auto_help: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            suggest: SuggestOptions::default(),
            auto_help: true,
        }
    }
}

impl ParseOptions {
    pub fn tolerance(mut self, tolerance: usize) -> Self {
        self.suggest.tolerance = tolerance;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.suggest.limit = limit;
        self
    }

    pub fn metric(mut self, metric: Metric) -> Self {
        self.suggest.metric = metric;
        self
    }

    pub fn auto_help(mut self, enabled: bool) -> Self {
        self.auto_help = enabled;
        self
    }
}

/// Values produced by a successful parse, keyed by canonical flag name.
///
/// Entries follow registry order. Serializes as a plain map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFlags {
    values: IndexMap<String, FlagValue>,
    explicit: HashSet<String>,
    warnings: Vec<Warning>,
    help_requested: bool,
}

impl ParsedFlags {
    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn int(&self, name: &str) -> Result<i64> {
        let value = self.value(name)?;
        value
            .as_int()
            .ok_or_else(|| wrong_kind(name, value, FlagKind::Int))
    }

    pub fn bool(&self, name: &str) -> Result<bool> {
        let value = self.value(name)?;
        value
            .as_bool()
            .ok_or_else(|| wrong_kind(name, value, FlagKind::Bool))
    }

    pub fn string(&self, name: &str) -> Result<&str> {
        let value = self.value(name)?;
        value
            .as_str()
            .ok_or_else(|| wrong_kind(name, value, FlagKind::String))
    }

    /// Whether the flag appeared in the tokens, as opposed to taking its default.
    pub fn is_explicit(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    /// Whether the help flag was passed.
    pub fn help_requested(&self) -> bool {
        self.help_requested
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FlagValue> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_map(self) -> IndexMap<String, FlagValue> {
        self.values
    }

    fn value(&self, name: &str) -> Result<&FlagValue> {
        self.values.get(name).ok_or_else(|| FlagError::UnknownFlag {
            name: name.to_string(),
        })
    }
}

impl Serialize for ParsedFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a ParsedFlags {
    type Item = (&'a String, &'a FlagValue);
    type IntoIter = indexmap::map::Iter<'a, String, FlagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

fn wrong_kind(name: &str, value: &FlagValue, requested: FlagKind) -> FlagError {
    FlagError::WrongKind {
        flag: name.to_string(),
        expected: value.kind(),
        found: requested,
    }
}

/// Parses tokens against a registry, writing diagnostics to a sink.
///
/// ```
/// use argflags::{FlagRegistry, FlagSpec, Parser};
///
/// let mut registry = FlagRegistry::new();
/// registry.register(FlagSpec::string("-n", "Name").alias("--name"))?;
///
/// let mut diagnostics = String::new();
/// let parsed = Parser::new(&mut registry)
///     .with_sink(&mut diagnostics)
///     .parse(["greet", "--name", "Ada"])?;
/// assert_eq!(parsed.string("-n")?, "Ada");
/// # Ok::<(), argflags::FlagError>(())
/// ```
pub struct Parser<'r, S = StdoutSink> {
    registry: &'r mut FlagRegistry,
    sink: S,
    options: ParseOptions,
}

impl<'r> Parser<'r, StdoutSink> {
    pub fn new(registry: &'r mut FlagRegistry) -> Self {
        Self {
            registry,
            sink: StdoutSink,
            options: ParseOptions::default(),
        }
    }
}

impl<'r, S: DiagnosticSink> Parser<'r, S> {
    pub fn with_sink<T: DiagnosticSink>(self, sink: T) -> Parser<'r, T> {
        Parser {
            registry: self.registry,
            sink,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse `args`, whose first element is the program path.
    ///
    /// On failure every value assigned so far is cleared again, so a failed
    /// parse leaves the registry as it was.
    pub fn parse<I, T>(&mut self, args: I) -> Result<ParsedFlags>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        let Some((program, tokens)) = args.split_first() else {
            return Err(FlagError::MissingProgramName);
        };
        if self.registry.is_populated() {
            return Err(FlagError::AlreadyParsed);
        }

        let result = self.run(program, tokens);
        if result.is_err() {
            self.registry.reset();
        }
        result
    }

    fn run(&mut self, program: &str, tokens: &[String]) -> Result<ParsedFlags> {
        if self.options.auto_help {
            self.registry.ensure_help_flag()?;
        }
        tracing::debug!(
            program,
            args = ?tokens,
            flags = self.registry.len(),
            "parsing arguments"
        );

        let mut seen = vec![false; self.registry.len()];
        let mut warnings = Vec::new();

        let mut i = 0usize;
        while i < tokens.len() {
            let token = tokens[i].as_str();
            let Some(idx) = self.registry.position(token) else {
                return Err(self.unknown_token(token));
            };

            let flag = &mut self.registry.flags_mut()[idx];
            if flag.kind().takes_value() {
                let Some(value) = tokens.get(i + 1) else {
                    return Err(FlagError::MissingValue {
                        flag: token.to_string(),
                    });
                };
                flag.assign_token(value)?;
                i += 2;
            } else {
                flag.assign(FlagValue::Bool(true))?;
                i += 1;
            }
            tracing::debug!(flag = flag.name(), token, "matched flag");

            if seen[idx] {
                let warning = Warning::DuplicateAssignment {
                    flag: flag.name().to_string(),
                    token: token.to_string(),
                };
                tracing::warn!("{warning}");
                warnings.push(warning);
            }
            seen[idx] = true;
        }

        let mut missing = Vec::new();
        for (flag, _) in self
            .registry
            .flags_mut()
            .iter_mut()
            .zip(&seen)
            .filter(|(_, seen)| !**seen)
        {
            match flag.default_value().cloned() {
                Some(default) if flag.is_optional() => flag.assign(default)?,
                _ if flag.is_required() => missing.push(flag.name().to_string()),
                _ => {}
            }
        }

        let help_requested = self
            .registry
            .help_flag()
            .is_some_and(|f| f.as_bool() == Ok(true));
        if help_requested || (tokens.is_empty() && self.registry.has_required()) {
            let text = help::help(&*self.registry, program);
            self.sink.write(&text);
        }

        if !missing.is_empty() {
            tracing::debug!(?missing, "required flags not supplied");
            return Err(FlagError::MissingRequiredFlags { flags: missing });
        }

        let mut values = IndexMap::with_capacity(self.registry.len());
        let mut explicit = HashSet::new();
        for (flag, seen) in self.registry.iter().zip(&seen) {
            if let Ok(value) = flag.value() {
                values.insert(flag.name().to_string(), value.clone());
            }
            if *seen {
                explicit.insert(flag.name().to_string());
            }
        }

        Ok(ParsedFlags {
            values,
            explicit,
            warnings,
            help_requested,
        })
    }

    fn unknown_token(&mut self, token: &str) -> FlagError {
        let candidates = suggest::find_closest(token, self.registry.iter(), &self.options.suggest);
        let suggestions: Vec<String> = candidates
            .iter()
            .map(|c| c.flag.name().to_string())
            .collect();

        if !candidates.is_empty() {
            let mut text = format!("Unexpected flag `{token}`. Maybe you meant:\n");
            for candidate in &candidates {
                text.push_str(&help::describe_flag(candidate.flag));
                text.push('\n');
            }
            self.sink.write(&text);
        }
        tracing::debug!(token, ?suggestions, "unknown token");

        FlagError::UnknownToken {
            token: token.to_string(),
            suggestions,
        }
    }
}
