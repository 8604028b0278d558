use thiserror::Error;

use crate::models::{filter::Selection, part::PartId};
use crate::services::cart_service::parse_quantity;

pub const SHELL_HELP: &str = "\
list                 show parts matching the current filters
search <text>        filter by name or article (empty clears)
brand <name|all>     filter by brand
category <name|all>  filter by category
reset                clear all filters
brands | categories  show filter options
add <id>             add one unit to the cart
qty <id> <n>         set quantity (0 or less removes)
inc <id> | dec <id>  change quantity by one
rm <id>              remove from cart
cart                 show the cart
clear                empty the cart
help                 show this help
quit                 leave the shell";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShellParseError {
    #[error("Empty input")]
    Empty,
    #[error("Unknown command: {0} (type 'help')")]
    UnknownCommand(String),
    #[error("Missing argument for '{command}': {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("Invalid part id: {0}")]
    InvalidId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Search(String),
    Brand(Selection),
    Category(Selection),
    Reset,
    Brands,
    Categories,
    Add(PartId),
    Quantity(PartId, i64),
    Increment(PartId),
    Decrement(PartId),
    Remove(PartId),
    Cart,
    Clear,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, ShellParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ShellParseError::Empty);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "list" | "ls" => Ok(ShellCommand::List),
            "search" | "find" => Ok(ShellCommand::Search(rest.to_string())),
            "brand" => Ok(ShellCommand::Brand(Selection::from(rest))),
            "category" | "cat" => Ok(ShellCommand::Category(Selection::from(rest))),
            "reset" => Ok(ShellCommand::Reset),
            "brands" => Ok(ShellCommand::Brands),
            "categories" => Ok(ShellCommand::Categories),
            "add" => Ok(ShellCommand::Add(parse_id("add", rest)?)),
            "qty" => {
                let (id, quantity) = match rest.split_once(char::is_whitespace) {
                    Some((id, quantity)) => (id, quantity),
                    None => {
                        return Err(ShellParseError::MissingArgument {
                            command: "qty",
                            expected: "<id> <n>",
                        })
                    }
                };
                Ok(ShellCommand::Quantity(parse_id("qty", id)?, parse_quantity(quantity)))
            }
            "inc" | "+" => Ok(ShellCommand::Increment(parse_id("inc", rest)?)),
            "dec" | "-" => Ok(ShellCommand::Decrement(parse_id("dec", rest)?)),
            "rm" | "remove" => Ok(ShellCommand::Remove(parse_id("rm", rest)?)),
            "cart" => Ok(ShellCommand::Cart),
            "clear" => Ok(ShellCommand::Clear),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(ShellParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_id(command: &'static str, raw: &str) -> Result<PartId, ShellParseError> {
    if raw.is_empty() {
        return Err(ShellParseError::MissingArgument {
            command,
            expected: "<id>",
        });
    }
    raw.parse::<u32>()
        .map(PartId)
        .map_err(|_| ShellParseError::InvalidId(raw.to_string()))
}
