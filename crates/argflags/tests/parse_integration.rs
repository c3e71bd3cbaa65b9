use anyhow::{Context, Result, bail};
use argflags::{FlagError, FlagRegistry, FlagSpec, FlagValue, ParseOptions, Parser, Warning};
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn greeter() -> Result<FlagRegistry> {
    let mut registry = FlagRegistry::with_description("Greets a person a few times.");
    registry.register(FlagSpec::string("-n", "The name to be greeted!").alias("--name"))?;
    registry.register(
        FlagSpec::int("-c", "How many times to greet!")
            .alias("--count")
            .default(1)
            .optional(),
    )?;
    registry.register(FlagSpec::bool("--flag", "Adds some flair.").optional())?;
    Ok(registry)
}

#[test]
fn round_trip_produces_every_flag() -> Result<()> {
    init_tracing();
    let mut registry = greeter()?;
    let mut out = String::new();
    let parsed = Parser::new(&mut registry)
        .with_sink(&mut out)
        .parse(["prog", "-n", "Ada", "-c", "3"])?;

    let json = serde_json::to_value(&parsed)?;
    assert_eq!(
        json,
        serde_json::json!({ "-h": false, "-n": "Ada", "-c": 3, "--flag": false })
    );
    assert_eq!(parsed.len(), 4);
    assert!(out.is_empty(), "unexpected diagnostics:\n{out}");
    Ok(())
}

#[test]
fn no_arguments_reports_missing_and_shows_help() -> Result<()> {
    init_tracing();
    let mut registry = greeter()?;
    let mut out = String::new();
    let err = Parser::new(&mut registry)
        .with_sink(&mut out)
        .parse(["./target/debug/prog"])
        .err()
        .context("parse should fail without -n")?;

    let FlagError::MissingRequiredFlags { flags } = err else {
        bail!("expected MissingRequiredFlags, got {err:?}");
    };
    assert_eq!(flags, ["-n"]);
    assert!(
        out.contains("USAGE: prog -n <string> [OPTIONAL-FLAGS]"),
        "help missing usage line:\n{out}"
    );
    assert!(out.contains("Greets a person a few times."));
    assert!(out.contains("[default: 1]"));
    Ok(())
}

#[test]
fn typo_gets_a_suggestion() -> Result<()> {
    init_tracing();
    let mut registry = greeter()?;
    let mut out = String::new();
    let err = Parser::new(&mut registry)
        .with_sink(&mut out)
        .parse(["prog", "-nn", "Ada"])
        .err()
        .context("parse should reject -nn")?;

    assert!(matches!(err, FlagError::UnknownToken { ref token, .. } if token == "-nn"));
    assert!(out.contains("Maybe you meant:"), "no suggestion:\n{out}");
    assert!(out.contains("-n <string>"));
    Ok(())
}

#[test]
fn repeated_switch_is_a_warning() -> Result<()> {
    init_tracing();
    let mut registry = FlagRegistry::new();
    registry.register(FlagSpec::bool("--flag", "A switch.").optional())?;
    let parsed = Parser::new(&mut registry)
        .with_sink(String::new())
        .parse(["prog", "--flag", "--flag"])?;

    assert_eq!(parsed.get("--flag"), Some(&FlagValue::Bool(true)));
    assert!(matches!(
        parsed.warnings(),
        [Warning::DuplicateAssignment { flag, .. }] if flag == "--flag"
    ));
    Ok(())
}

#[test]
fn custom_help_flag_and_reuse() -> Result<()> {
    init_tracing();
    let mut registry = greeter()?;
    registry.set_help_flag("-?", "Show this text.", ["--usage"])?;

    let mut out = String::new();
    let parsed = Parser::new(&mut registry)
        .with_sink(&mut out)
        .parse(["prog", "-n", "Ada", "--usage"])?;
    assert!(parsed.help_requested());
    assert!(out.lines().nth(2).is_some_and(|l| l.contains("[-?]")));
    assert!(registry.find("-h").is_none());

    registry.reset();
    let parsed = Parser::new(&mut registry)
        .with_sink(String::new())
        .with_options(ParseOptions::default().tolerance(0))
        .parse(vec!["prog".to_string(), "--name".to_string(), "Grace".to_string()])?;
    assert_eq!(parsed.string("-n")?, "Grace");
    assert!(!parsed.help_requested());
    Ok(())
}

#[test]
fn bool_default_given_as_text() -> Result<()> {
    init_tracing();
    let mut registry = FlagRegistry::new();
    registry.register(FlagSpec::bool("--color", "Colorize.").default("TRUE").optional())?;
    let parsed = Parser::new(&mut registry)
        .with_sink(String::new())
        .parse(["prog"])?;
    assert!(parsed.bool("--color")?);

    let err = FlagRegistry::new()
        .register(FlagSpec::bool("--x", "x").default("maybe"))
        .err()
        .context("invalid bool default should be rejected")?;
    assert!(matches!(err, FlagError::InvalidValue { .. }));
    Ok(())
}
