//! Interactive shell: one line in, one event out.

use std::str::FromStr;

use catalog_lib::api::query::FilterSet;
use catalog_lib::model::Field;
use catalog_lib::view::Event;

pub const HELP: &str = "\
commands:
  filter KEY=VALUE...   set filters (name, status, species, type, gender)
  clear                 drop all filters
  page N | next | prev  go to a page
  size N                change rows per page
  sort FIELD            sort by name, status, species or gender (repeat to flip)
  open ID | close       expand or collapse a row
  options               list filter values
  reload                refetch the current page
  help | quit";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    Next,
    Prev,
    Options,
    Help,
    Quit,
}

/// Parses a shell line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str, current: &FilterSet) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "filter" | "f" => Command::Event(Event::SubmitFilters(filters(&rest, current)?)),
        "clear" => Command::Event(Event::ClearFilters),
        "page" | "p" => Command::Event(Event::ChangePage(number(&rest, "page")?)),
        "next" | "n" => Command::Next,
        "prev" => Command::Prev,
        "size" => Command::Event(Event::ChangePageSize(number(&rest, "size")?)),
        "sort" | "s" => {
            let field = single(&rest, "sort")?;
            let field = Field::from_str(field).map_err(|e| e.to_string())?;
            Command::Event(Event::ClickSortHeader(field))
        }
        "open" | "o" => Command::Event(Event::ToggleRow(number(&rest, "open")?)),
        "close" => Command::Event(Event::CloseDetail),
        "options" => Command::Options,
        "reload" => Command::Event(Event::Reload),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command `{other}`, try `help`")),
    };
    Ok(Some(command))
}

/// Builds a filter set on top of `current`; `key=` clears one field.
fn filters(args: &[&str], current: &FilterSet) -> Result<FilterSet, String> {
    let mut filters = current.clone();
    let line = args.join(" ");

    // Values may contain spaces, so split on the keys instead of on words.
    let mut pending: Option<(Field, String)> = None;
    for word in line.split(' ') {
        match word.split_once('=').map(|(k, v)| (Field::from_str(k), v)) {
            Some((Ok(field), value)) => {
                if let Some((field, value)) = pending.take() {
                    filters.set(field, value.trim());
                }
                pending = Some((field, value.to_string()));
            }
            _ => match pending.as_mut() {
                Some((_, value)) => {
                    value.push(' ');
                    value.push_str(word);
                }
                None => return Err(format!("expected KEY=VALUE, got `{word}`")),
            },
        }
    }
    match pending {
        Some((field, value)) => filters.set(field, value.trim()),
        None => return Err("filter needs at least one KEY=VALUE".to_string()),
    }
    Ok(filters)
}

fn single<'a>(args: &[&'a str], command: &str) -> Result<&'a str, String> {
    match args {
        [value] => Ok(value),
        _ => Err(format!("usage: {command} VALUE")),
    }
}

fn number<T: FromStr>(args: &[&str], command: &str) -> Result<T, String> {
    single(args, command)?
        .parse()
        .map_err(|_| format!("usage: {command} NUMBER"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str) -> Result<Option<Command>, String> {
        parse(line, &FilterSet::new())
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(run("   ").unwrap(), None);
        assert_eq!(run("page 3").unwrap(), Some(Command::Event(Event::ChangePage(3))));
        assert_eq!(run("size 50").unwrap(), Some(Command::Event(Event::ChangePageSize(50))));
        assert_eq!(run("open 7").unwrap(), Some(Command::Event(Event::ToggleRow(7))));
        assert_eq!(
            run("sort Species").unwrap(),
            Some(Command::Event(Event::ClickSortHeader(Field::Species)))
        );
        assert_eq!(run("n").unwrap(), Some(Command::Next));
        assert_eq!(run("QUIT").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_bad_input() {
        assert!(run("page two").is_err());
        assert!(run("page").is_err());
        assert!(run("sort planet").is_err());
        assert!(run("teleport").is_err());
        assert!(run("filter rick").is_err());
    }

    #[test]
    fn test_filter_values_with_spaces() {
        let Some(Command::Event(Event::SubmitFilters(filters))) =
            run("filter name=Rick Sanchez status=alive").unwrap()
        else {
            panic!("expected filters");
        };
        assert_eq!(filters.get(Field::Name), "Rick Sanchez");
        assert_eq!(filters.get(Field::Status), "alive");
    }

    #[test]
    fn test_filter_builds_on_current() {
        let current = FilterSet::new().with(Field::Gender, "Female").with(Field::Name, "Beth");
        let Some(Command::Event(Event::SubmitFilters(filters))) =
            parse("filter species=Human name=", &current).unwrap()
        else {
            panic!("expected filters");
        };
        assert_eq!(filters.get(Field::Gender), "Female");
        assert_eq!(filters.get(Field::Species), "Human");
        assert_eq!(filters.get(Field::Name), "");
    }
}
