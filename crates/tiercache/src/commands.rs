//! Script commands for driving a cache chain

use anyhow::{anyhow, bail, Context, Result};
use std::io::{BufRead, Write};
use std::str::SplitWhitespace;
use tiercache_core::{CacheChain, LevelConfig};
use tracing::warn;

/// One line of a command script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddLevel { capacity: i64, policy: String },
    RemoveLevel(usize),
    Put { key: String, value: String },
    Get(String),
    List,
    Stats,
}

impl Command {
    /// Parse a single line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();

        let command = match name.to_lowercase().as_str() {
            "add-level" => {
                let capacity = next_arg(&mut parts, name, "capacity")?;
                let policy = next_arg(&mut parts, name, "policy")?;
                Command::AddLevel {
                    capacity: capacity
                        .parse()
                        .with_context(|| format!("invalid capacity: {}", capacity))?,
                    policy,
                }
            }
            "remove-level" => {
                let index = next_arg(&mut parts, name, "index")?;
                Command::RemoveLevel(
                    index
                        .parse()
                        .with_context(|| format!("invalid level index: {}", index))?,
                )
            }
            "put" => {
                let key = next_arg(&mut parts, name, "key")?;
                let rest: Vec<&str> = parts.collect();
                if rest.is_empty() {
                    bail!("put requires <value>");
                }
                Command::Put {
                    key,
                    value: rest.join(" "),
                }
            }
            "get" => Command::Get(next_arg(&mut parts, name, "key")?),
            "list" => Command::List,
            "stats" => Command::Stats,
            other => bail!("unknown command: {}", other),
        };

        Ok(Some(command))
    }

    /// Run against the chain, writing any output. Cache errors are reported
    /// to `out` and do not abort; only I/O failures are returned.
    pub fn execute<W: Write>(self, chain: &mut CacheChain, out: &mut W, json: bool) -> Result<()> {
        match self {
            Command::AddLevel { capacity, policy } => {
                if let Err(e) = chain.add_level_from_config(&LevelConfig::new(capacity, policy)) {
                    writeln!(out, "error: {}", e)?;
                }
            }
            Command::RemoveLevel(index) => {
                if let Err(e) = chain.remove_level(index) {
                    writeln!(out, "error: {}", e)?;
                }
            }
            Command::Put { key, value } => chain.put(key, value),
            Command::Get(key) => match chain.get(&key) {
                Some(value) => writeln!(out, "{}", value)?,
                None => writeln!(out, "(not found)")?,
            },
            Command::List => {
                let contents = chain.list_contents();
                if json {
                    writeln!(out, "{}", serde_json::to_string(&contents)?)?;
                } else {
                    for level in &contents {
                        writeln!(out, "{}", level)?;
                    }
                }
            }
            Command::Stats => {
                if json {
                    let levels: Vec<_> = chain.levels().iter().map(|l| *l.stats()).collect();
                    let body = serde_json::json!({ "chain": chain.stats(), "levels": levels });
                    writeln!(out, "{}", body)?;
                } else {
                    writeln!(out, "Chain: {}", chain.stats())?;
                    for (index, level) in chain.levels().iter().enumerate() {
                        writeln!(out, "Level {}: {}", index + 1, level.stats())?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn next_arg(parts: &mut SplitWhitespace<'_>, command: &str, what: &str) -> Result<String> {
    parts
        .next()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("{} requires <{}>", command, what))
}

/// Execute every command from `input`, returning the number of lines that
/// failed to parse
pub fn run_script<R: BufRead, W: Write>(
    chain: &mut CacheChain,
    input: R,
    out: &mut W,
    json: bool,
) -> Result<usize> {
    let mut rejected = 0;

    for (number, line) in input.lines().enumerate() {
        let line = line.context("Failed to read command")?;
        match Command::parse(&line) {
            Ok(Some(command)) => command.execute(chain, out, json)?,
            Ok(None) => {}
            Err(e) => {
                rejected += 1;
                warn!("Skipping line {}: {}", number + 1, e);
                writeln!(out, "line {}: {}", number + 1, e)?;
            }
        }
    }

    Ok(rejected)
}
