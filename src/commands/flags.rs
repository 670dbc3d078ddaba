// imgtool/src/commands/flags.rs
use crate::core::{ImgToolError, Result};
use std::collections::HashMap;

/// Splits a command line on whitespace, keeping single- or double-quoted runs together.
///
/// `#` has no special meaning, so `#FFFFFF` survives as a word.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(ImgToolError::InvalidFlagValue(format!(
            "unterminated {} quote",
            q
        )));
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// `--flag value`
    Value,
    /// `--flag`
    Switch,
}

/// Flags collected into `name -> values` before any validation, so order and repetition
/// never drive control flow.
#[derive(Debug, Default)]
pub struct FlagMap {
    values: HashMap<&'static str, Vec<String>>,
    switches: HashMap<&'static str, usize>,
    pub positionals: Vec<String>,
}

impl FlagMap {
    pub fn parse(tokens: &[String], known: &[(&'static str, Arity)]) -> Result<Self> {
        let mut map = FlagMap::default();
        let mut iter = tokens.iter();

        while let Some(token) = iter.next() {
            let Some(body) = token.strip_prefix("--") else {
                map.positionals.push(token.clone());
                continue;
            };

            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (body, None),
            };

            let (name, arity) = known
                .iter()
                .find(|(flag, _)| *flag == name)
                .copied()
                .ok_or_else(|| ImgToolError::InvalidFlagValue(format!("unknown flag --{}", name)))?;

            match arity {
                Arity::Switch => {
                    if inline.is_some() {
                        return Err(ImgToolError::InvalidFlagValue(format!(
                            "--{} does not take a value",
                            name
                        )));
                    }
                    *map.switches.entry(name).or_default() += 1;
                }
                Arity::Value => {
                    let value = match inline {
                        Some(value) => value,
                        None => iter.next().cloned().ok_or_else(|| {
                            ImgToolError::InvalidFlagValue(format!("--{} requires a value", name))
                        })?,
                    };
                    map.values.entry(name).or_default().push(value);
                }
            }
        }

        Ok(map)
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.get(name).copied().unwrap_or(0) > 0
    }

    /// Every value given for a repeatable flag, in order.
    pub fn all(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The value of a flag that may appear at most once.
    pub fn single(&self, name: &str) -> Result<Option<&str>> {
        match self.all(name) {
            [] => Ok(None),
            [value] => Ok(Some(value.as_str())),
            _ => Err(ImgToolError::InvalidFlagValue(format!(
                "--{} given more than once",
                name
            ))),
        }
    }

    pub fn required(&self, name: &str) -> Result<&str> {
        self.single(name)?
            .ok_or_else(|| ImgToolError::InvalidFlagValue(format!("--{} is required", name)))
    }
}

pub fn parse_size(value: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ImgToolError::InvalidFlagValue(format!(
            "size must be a positive integer, got '{}'",
            value
        ))),
    }
}

pub fn parse_tolerance(value: &str) -> Result<u8> {
    value.trim().parse::<u8>().map_err(|_| {
        ImgToolError::InvalidFlagValue(format!(
            "tolerance must be an integer between 0 and 255, got '{}'",
            value
        ))
    })
}
