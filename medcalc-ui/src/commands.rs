//! Line commands typed at the calculator prompt.
//!
//! Each line is split on whitespace and parsed with clap, so every command
//! gets the usual argument validation and error messages.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use medcalc_core::ParamEdit;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::utils::parse_decimal;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Invalid(#[from] clap::Error),
}

impl CommandError {
    /// True when clap only wants to print usage, not report a mistake.
    pub fn is_usage(&self) -> bool {
        match self {
            CommandError::Invalid(e) => matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Debug, Parser)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct CommandLine {
    #[command(subcommand)]
    command: CommandArgs,
}

#[derive(Debug, Subcommand)]
enum CommandArgs {
    /// Projection start year
    Year { value: String },
    /// Insurance plan name (may contain spaces)
    Plan {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Age of the insured
    Age { value: u32 },
    /// Annual deductible
    Deductible {
        #[arg(value_parser = parse_decimal, allow_negative_numbers = true)]
        value: Decimal,
    },
    /// Number of years to project
    #[command(alias = "horizon")]
    Years {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        value: u32,
    },
    /// Apply inflation compounding
    Inflation { state: Toggle },
    /// Annual inflation in percent
    InflationRate {
        #[arg(value_parser = parse_decimal, allow_negative_numbers = true)]
        value: Decimal,
    },
    /// Currency conversion multiplier
    CurrencyRate {
        #[arg(value_parser = parse_decimal)]
        value: Decimal,
    },
    /// Title bar color
    Color { name: String },
    /// Send the current inputs again
    Retry,
    /// Print the current screen
    Show,
    /// Leave for the tool portal
    Back,
    /// Change the log filter
    LogLevel { filter: String },
    Help,
    #[command(alias = "exit")]
    Quit,
}

/// A parsed prompt command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit(ParamEdit),
    Color(String),
    Retry,
    Show,
    Back,
    LogLevel(String),
    Help,
    Quit,
}

impl From<CommandArgs> for Command {
    fn from(args: CommandArgs) -> Self {
        match args {
            CommandArgs::Year { value } => Command::Edit(ParamEdit::Year(value)),
            CommandArgs::Plan { words } => Command::Edit(ParamEdit::Plan(words.join(" "))),
            CommandArgs::Age { value } => Command::Edit(ParamEdit::Age(value)),
            CommandArgs::Deductible { value } => Command::Edit(ParamEdit::Deductible(value)),
            CommandArgs::Years { value } => Command::Edit(ParamEdit::NumberOfYears(value)),
            CommandArgs::Inflation { state } => {
                Command::Edit(ParamEdit::InflationEnabled(state == Toggle::On))
            }
            CommandArgs::InflationRate { value } => Command::Edit(ParamEdit::InflationRate(value)),
            CommandArgs::CurrencyRate { value } => Command::Edit(ParamEdit::CurrencyRate(value)),
            CommandArgs::Color { name } => Command::Color(name),
            CommandArgs::Retry => Command::Retry,
            CommandArgs::Show => Command::Show,
            CommandArgs::Back => Command::Back,
            CommandArgs::LogLevel { filter } => Command::LogLevel(filter),
            CommandArgs::Help => Command::Help,
            CommandArgs::Quit => Command::Quit,
        }
    }
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    let parsed = CommandLine::try_parse_from(words)?;
    Ok(Some(parsed.command.into()))
}

/// Command summary printed by `help`.
pub fn help_text() -> String {
    CommandLine::command()
        .name("commands")
        .render_help()
        .to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn parse(line: &str) -> Command {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn projection_edits() {
        assert_eq!(parse("year 2026"), Command::Edit(ParamEdit::Year("2026".into())));
        assert_eq!(parse("age 41"), Command::Edit(ParamEdit::Age(41)));
        assert_eq!(
            parse("deductible 22,800"),
            Command::Edit(ParamEdit::Deductible(dec!(22800)))
        );
        assert_eq!(parse("years 20"), Command::Edit(ParamEdit::NumberOfYears(20)));
        assert_eq!(parse("horizon 5"), Command::Edit(ParamEdit::NumberOfYears(5)));
    }

    #[test]
    fn plan_joins_words() {
        assert_eq!(
            parse("plan Smart   Plus"),
            Command::Edit(ParamEdit::Plan("Smart Plus".into()))
        );
    }

    #[test]
    fn display_edits() {
        assert_eq!(
            parse("inflation off"),
            Command::Edit(ParamEdit::InflationEnabled(false))
        );
        assert_eq!(
            parse("inflation on"),
            Command::Edit(ParamEdit::InflationEnabled(true))
        );
        assert_eq!(
            parse("inflation-rate 4.5"),
            Command::Edit(ParamEdit::InflationRate(dec!(4.5)))
        );
        assert_eq!(
            parse("currency-rate 7.85"),
            Command::Edit(ParamEdit::CurrencyRate(dec!(7.85)))
        );
    }

    #[test]
    fn negative_deductible_is_forwarded() {
        assert_eq!(
            parse("deductible -100"),
            Command::Edit(ParamEdit::Deductible(dec!(-100)))
        );
    }

    #[test]
    fn other_commands() {
        assert_eq!(parse("color blue"), Command::Color("blue".into()));
        assert_eq!(parse("retry"), Command::Retry);
        assert_eq!(parse("show"), Command::Show);
        assert_eq!(parse("back"), Command::Back);
        assert_eq!(parse("log-level debug"), Command::LogLevel("debug".into()));
        assert_eq!(parse("help"), Command::Help);
        assert_eq!(parse("exit"), Command::Quit);
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert!(parse_line("age forty").is_err());
        assert!(parse_line("age -1").is_err());
        assert!(parse_line("years 0").is_err());
        assert!(parse_line("deductible lots").is_err());
        assert!(parse_line("inflation maybe").is_err());
        assert!(parse_line("teleport").is_err());
        assert!(parse_line("age").is_err());
    }

    #[test]
    fn help_lists_commands() {
        let help = help_text();

        assert!(help.contains("inflation-rate"));
        assert!(help.contains("retry"));
    }

    #[test]
    fn error_message_names_the_problem() {
        let err = parse_line("age forty").unwrap_err();

        assert!(!err.is_usage());
        assert!(err.to_string().contains("forty"));
    }
}
