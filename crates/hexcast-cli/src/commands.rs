//! Subcommand implementations. Each returns the text to print.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use hexcast_geometry::{rotated_canonical_variants, Direction, Pattern, SegmentSet};
use hexcast_handlers::{format_rational, parse_rational, GenerateContext, SpecialValue};
use hexcast_numbers::{
    DecomposedNumber, DecomposerConfig, LiteralTable, NumberDecomposer, StrokeSearch,
};
use hexcast_registry::{PatternRegistry, RegistryBuilder, ShorthandTarget};
use hexcast_reveal::{IotaPrinter, RevealParser};
use serde::Serialize;
use tracing::{debug, info};

/// Registry and literal table shared by every command.
pub struct Session {
    registry: PatternRegistry,
    table: Arc<LiteralTable>,
}

impl Session {
    pub fn load(literals: Option<&Path>, patterns: Option<&Path>, bound: i64) -> Result<Self> {
        let table = match literals {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("opening literal table {}", path.display()))?;
                LiteralTable::from_json_reader(BufReader::new(file))
                    .with_context(|| format!("reading literal table {}", path.display()))?
            }
            None => LiteralTable::generate(bound),
        };

        let mut builder = RegistryBuilder::with_builtins();
        if let Some(path) = patterns {
            let file = File::open(path)
                .with_context(|| format!("opening pattern metadata {}", path.display()))?;
            builder
                .extend_from_json(BufReader::new(file))
                .with_context(|| format!("reading pattern metadata {}", path.display()))?;
        }
        let registry = builder.build().context("building pattern registry")?;

        info!(
            patterns = registry.len(),
            literal_bound = table.bound(),
            "session ready"
        );
        Ok(Self {
            registry,
            table: Arc::new(table),
        })
    }

    fn decomposer(&self, oracle_timeout: Option<Duration>) -> NumberDecomposer {
        let decomposer = NumberDecomposer::new(self.table.clone());
        match oracle_timeout {
            Some(timeout) => decomposer
                .with_oracle(Arc::new(StrokeSearch::default()))
                .with_config(DecomposerConfig::default().with_oracle_timeout(timeout)),
            None => decomposer,
        }
    }

    fn describe(&self, pattern: &Pattern) -> String {
        match self.registry.identify(pattern).label() {
            Some(label) => format!("{label}\n{pattern}"),
            None => format!("Unknown pattern\n{pattern}"),
        }
    }

    fn render(&self, number: &DecomposedNumber) -> String {
        let mut lines = vec![format!(
            "{} = {}",
            format_rational(number.value()),
            number.equation()
        )];
        for pattern in number.patterns() {
            let label = self.registry.identify(pattern).label().unwrap_or_default();
            lines.push(format!("  {:<24} {label}", pattern.to_string()));
        }
        lines.join("\n")
    }

    pub async fn lookup(&self, text: &str, oracle_timeout: Duration) -> Result<String> {
        let shorthand = self
            .registry
            .lookup_by_shorthand(text)
            .with_context(|| format!("nothing matches `{text}`"))?;

        match shorthand.target {
            ShorthandTarget::Pattern(info) => Ok(format!(
                "{} ({})\n{}",
                info.display_name(),
                info.id,
                info.pattern
            )),
            ShorthandTarget::Raw(pattern) => Ok(self.describe(&pattern)),
            ShorthandTarget::Special(info) => {
                let Some(argument) = shorthand.argument else {
                    return Ok(format!(
                        "{} ({}) takes an argument: `{}: <value>`",
                        info.display_name, info.id, info.name
                    ));
                };
                let ctx = GenerateContext::new().with_literals(&*self.table);
                match info.generate(&argument, &ctx) {
                    Ok((value, pattern)) => Ok(format!("{}\n{pattern}", info.label(&value))),
                    Err(hexcast_handlers::Error::NoLiteral(missing)) => {
                        let Some(SpecialValue::Number(target)) = info.parse_argument(&argument) else {
                            bail!("no literal for {missing}");
                        };
                        debug!(%target, "outside the literal table, decomposing");
                        let number = self
                            .decomposer(Some(oracle_timeout))
                            .decompose(&target)
                            .await?;
                        Ok(self.render(&number))
                    }
                    Err(err) => {
                        Err(err).with_context(|| format!("generating {}", info.display_name))
                    }
                }
            }
        }
    }

    pub fn identify(&self, direction: &str, signature: &str) -> Result<String> {
        let pattern = parse_pattern(direction, signature)?;
        Ok(self.describe(&pattern))
    }

    pub async fn decompose(&self, value: &str, oracle_timeout: Option<Duration>) -> Result<String> {
        let target = parse_rational(value).with_context(|| format!("`{value}` is not a number"))?;
        let number = self
            .decomposer(oracle_timeout)
            .decompose(&target)
            .await
            .with_context(|| format!("decomposing {value}"))?;
        Ok(self.render(&number))
    }

    pub fn reveal(&self, source: &str, inline: bool) -> Result<String> {
        let iota = RevealParser::new(&self.registry)
            .with_literals(&*self.table)
            .parse(source)
            .context("parsing iota dump")?;
        let printer = IotaPrinter::new().with_registry(&self.registry);
        Ok(if inline {
            printer.inline(&iota)
        } else {
            printer.pretty(&iota)
        })
    }
}

fn parse_pattern(direction: &str, signature: &str) -> Result<Pattern> {
    let start: Direction = direction.parse()?;
    Ok(Pattern::new(start, signature.to_ascii_lowercase())?)
}

/// File contents, or all of standard input.
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("reading standard input")?;
            Ok(source)
        }
    }
}

#[derive(Serialize)]
struct SegmentExport {
    pattern: String,
    segments: SegmentSet,
    variants: [SegmentSet; 6],
}

/// Canonical segments of a pattern and of its six rotations, as JSON.
pub fn segments(direction: &str, signature: &str) -> Result<String> {
    let pattern = parse_pattern(direction, signature)?;
    let segments = pattern.segments().canonicalize();
    let export = SegmentExport {
        pattern: pattern.to_string(),
        variants: rotated_canonical_variants(&segments),
        segments,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}
