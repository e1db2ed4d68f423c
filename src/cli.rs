//! Command-line parsing.

use std::path::PathBuf;

use crate::content::{KnowledgeLevel, VoterType};

/// Flags that override the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub content_file: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub sample: bool,
    pub seed: Option<u64>,
    pub mute: bool,
    pub location: Option<String>,
    pub topics: Vec<String>,
    pub knowledge: Option<KnowledgeLevel>,
    pub voter_type: Option<VoterType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Overrides),
    Help,
    Version,
}

pub const USAGE: &str = "\
Ballot Bird - a ballot-measure quiz you fly through

Usage: ballotbird [options]

Options:
  --content FILE     Load chapters from a JSON file
  --endpoint URL     Request chapters from a content service
  --sample           Play the built-in sample chapters
  --seed N           Seed obstacle placement
  --mute             Never ring the terminal bell
  --location TEXT    Your state or city
  --topics A,B       Topics you care about
  --level LEVEL      beginner, intermediate or expert
  --voter TYPE       first_time, occasional or regular
  --version          Show version information
  --help             Show this help message

Controls: Space, Enter, Up or a mouse click to flap. Esc or q quits.";

/// Parse arguments, excluding the program name.
pub fn parse_args<I, S>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut overrides = Overrides::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-v" => return Ok(Command::Version),
            "--content" => overrides.content_file = Some(PathBuf::from(value("--content")?)),
            "--endpoint" => overrides.endpoint = Some(value("--endpoint")?),
            "--sample" => overrides.sample = true,
            "--mute" => overrides.mute = true,
            "--seed" => {
                let raw = value("--seed")?;
                let seed = raw
                    .parse()
                    .map_err(|_| format!("invalid seed: {}", raw))?;
                overrides.seed = Some(seed);
            }
            "--location" => overrides.location = Some(value("--location")?),
            "--topics" => {
                overrides.topics = value("--topics")?
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect();
            }
            "--level" => {
                let raw = value("--level")?;
                let level = KnowledgeLevel::parse(&raw)
                    .ok_or_else(|| format!("unknown knowledge level: {}", raw))?;
                overrides.knowledge = Some(level);
            }
            "--voter" => {
                let raw = value("--voter")?;
                let voter = VoterType::parse(&raw)
                    .ok_or_else(|| format!("unknown voter type: {}", raw))?;
                overrides.voter_type = Some(voter);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(Command::Run(overrides))
}
