//! Text prompts and parsing of player input
//!
//! Parsing is kept apart from reading so it can be tested without a terminal.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use azul_engine::{Color, Destination, DrawSource, BOARD_SIZE};

/// Print `prompt` and read one trimmed line. `None` on end of input.
pub fn prompt_line(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> Result<Option<String>> {
    writeln!(output, "{prompt}")?;
    output.flush()?;

    let mut answer = String::new();
    let read = input
        .read_line(&mut answer)
        .with_context(|| format!("failed to read the response for '{prompt}'"))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(answer.trim().to_string()))
}

/// `center` / `c`, or a factory number as `3`, `f3` or `factory 3`
pub fn parse_source(answer: &str) -> Result<DrawSource> {
    let answer = answer.trim().to_ascii_lowercase();
    if answer == "center" || answer == "c" {
        return Ok(DrawSource::Center);
    }
    let number = answer
        .strip_prefix("factory")
        .or_else(|| answer.strip_prefix('f'))
        .unwrap_or(&answer)
        .trim();
    match number.parse::<usize>() {
        Ok(n) => Ok(DrawSource::Factory(n)),
        Err(_) => bail!("'{answer}' is neither 'center' nor a factory number"),
    }
}

pub fn parse_color(answer: &str) -> Result<Color> {
    answer.parse::<Color>().map_err(anyhow::Error::msg)
}

/// `floor`, or a pattern line numbered from 1
pub fn parse_destination(answer: &str) -> Result<Destination> {
    let answer = answer.trim().to_ascii_lowercase();
    if answer == "floor" {
        return Ok(Destination::Floor);
    }
    let line: usize = answer
        .strip_prefix("line")
        .unwrap_or(&answer)
        .trim()
        .parse()
        .with_context(|| format!("'{answer}' is neither 'floor' nor a line number"))?;
    if !(1..=BOARD_SIZE).contains(&line) {
        bail!("pattern lines are numbered 1 to {BOARD_SIZE}");
    }
    Ok(Destination::PatternLine(line - 1))
}
