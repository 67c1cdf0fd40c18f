use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use sapper_core::Coord2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Mark(Coord2),
    Start(Coord2),
    Reset,
    Level(String),
    Levels,
    Json,
    Show,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
commands:
  r ROW COL   reveal a cell (starts a match when idle)
  m ROW COL   cycle flag / question mark
  s ROW COL   start a fresh match at a cell
  n           reset to idle
  l LEVEL     select a level
  levels      list levels
  json        print the snapshot as JSON
  p           print the board
  h           this help
  q           quit";

fn parse_coords<'a>(mut parts: impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let mut next = |axis: &str| -> anyhow::Result<u8> {
        let text = parts.next().ok_or_else(|| anyhow!("missing {axis}"))?;
        text.parse().with_context(|| format!("invalid {axis}: {text:?}"))
    };
    let row = next("row")?;
    let col = next("column")?;
    Ok((row, col))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(Self::Show);
        };

        let command = match word {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut parts)?),
            "m" | "mark" => Self::Mark(parse_coords(&mut parts)?),
            "s" | "start" => Self::Start(parse_coords(&mut parts)?),
            "n" | "new" | "reset" => Self::Reset,
            "l" | "level" => {
                let id = parts.next().ok_or_else(|| anyhow!("missing level"))?;
                Self::Level(id.to_owned())
            }
            "levels" => Self::Levels,
            "json" => Self::Json,
            "p" | "print" => Self::Show,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command {other:?}, try 'h'"),
        };

        if parts.next().is_some() {
            bail!("too many arguments");
        }
        Ok(command)
    }
}
