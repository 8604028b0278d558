use autoparts_store::cli::shell::{ShellCommand, ShellParseError};
use autoparts_store::models::{filter::Selection, part::PartId};

#[test]
fn test_parse_filter_commands() {
    assert_eq!(ShellCommand::parse("list"), Ok(ShellCommand::List));
    assert_eq!(
        ShellCommand::parse("search  oil filter "),
        Ok(ShellCommand::Search("oil filter".to_string()))
    );
    assert_eq!(ShellCommand::parse("search"), Ok(ShellCommand::Search(String::new())));
    assert_eq!(
        ShellCommand::parse("brand Bosch"),
        Ok(ShellCommand::Brand(Selection::only("Bosch")))
    );
    assert_eq!(ShellCommand::parse("brand all"), Ok(ShellCommand::Brand(Selection::All)));
    assert_eq!(
        ShellCommand::parse("category Фильтры"),
        Ok(ShellCommand::Category(Selection::only("Фильтры")))
    );
    assert_eq!(ShellCommand::parse("RESET"), Ok(ShellCommand::Reset));
}

#[test]
fn test_parse_cart_commands() {
    assert_eq!(ShellCommand::parse("add 3"), Ok(ShellCommand::Add(PartId(3))));
    assert_eq!(ShellCommand::parse("inc 3"), Ok(ShellCommand::Increment(PartId(3))));
    assert_eq!(ShellCommand::parse("dec 3"), Ok(ShellCommand::Decrement(PartId(3))));
    assert_eq!(ShellCommand::parse("rm 3"), Ok(ShellCommand::Remove(PartId(3))));
    assert_eq!(ShellCommand::parse("qty 3 5"), Ok(ShellCommand::Quantity(PartId(3), 5)));
    assert_eq!(ShellCommand::parse("quit"), Ok(ShellCommand::Quit));
}

#[test]
fn test_non_numeric_quantity_becomes_zero() {
    assert_eq!(ShellCommand::parse("qty 3 lots"), Ok(ShellCommand::Quantity(PartId(3), 0)));
    assert_eq!(ShellCommand::parse("qty 3 2.5"), Ok(ShellCommand::Quantity(PartId(3), 2)));
}

#[test]
fn test_parse_errors() {
    assert_eq!(ShellCommand::parse("   "), Err(ShellParseError::Empty));
    assert_eq!(
        ShellCommand::parse("buy 1"),
        Err(ShellParseError::UnknownCommand("buy".to_string()))
    );
    assert!(matches!(
        ShellCommand::parse("add"),
        Err(ShellParseError::MissingArgument { command: "add", .. })
    ));
    assert!(matches!(
        ShellCommand::parse("qty 3"),
        Err(ShellParseError::MissingArgument { command: "qty", .. })
    ));
    assert_eq!(
        ShellCommand::parse("add x1"),
        Err(ShellParseError::InvalidId("x1".to_string()))
    );
}
