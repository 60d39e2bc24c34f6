//! Read-eval-print loop.

use std::io::Write;

use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};

use pokedex_core::error::Result;

use crate::commands::{Command, Flow, Session};

const PROMPT: &str = "Pokedex > ";

/// Trims, lower-cases and splits a line into words.
pub fn clean_input(text: &str) -> Vec<String> {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// Prompts on stdout and runs commands until `exit` or end of input.
///
/// Command errors are reported and the loop carries on; only terminal I/O
/// errors end it early.
pub async fn run(session: &mut Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{PROMPT}");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let command = match Command::parse(&clean_input(&line)) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e.to_string().red());
                continue;
            }
        };

        match session.execute(command).await {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("  hello  world  ", &["hello", "world"] ; "surrounding spaces")]
    #[test_case("foo", &["foo"] ; "single word")]
    #[test_case("   ", &[] ; "only spaces")]
    #[test_case("", &[] ; "empty")]
    #[test_case("bar   baz qux", &["bar", "baz", "qux"] ; "repeated spaces")]
    #[test_case("\tfoo\tbar\nbaz  ", &["foo", "bar", "baz"] ; "tabs and newlines")]
    #[test_case("Catch PIKACHU", &["catch", "pikachu"] ; "mixed case")]
    fn test_clean_input(input: &str, expected: &[&str]) {
        assert_eq!(clean_input(input), expected);
    }
}
