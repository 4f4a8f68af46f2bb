//! Interactive line-oriented session over stdin.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use wdbc_core::{Session, schema};

use crate::display;
use crate::submit;

const HELP: &str = "\
Commands:
  set <feature> [value]     edit one feature by key, name or index; no value unsets it
  paste <text>              30 values as a JSON array or CSV row
  random                    fill every feature with a plausible random value
  clear                     unset every feature and forget the last result
  endpoint [url]            show or change the prediction endpoint
  show                      print the vector and the last outcome
  predict                   submit the vector
  help                      this text
  quit                      leave";

/// One parsed shell line.
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Set { field: &'a str, value: &'a str },
    Paste(&'a str),
    Random,
    Clear,
    Endpoint(Option<&'a str>),
    Show,
    Predict,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Option<Command<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let cmd = match verb {
        "set" if schema::index_of(rest).is_some() => Command::Set {
            field: rest,
            value: "",
        },
        "set" => {
            let (field, value) = match rest.rsplit_once(char::is_whitespace) {
                Some((field, value)) => (field.trim(), value.trim()),
                None => (rest, ""),
            };
            Command::Set { field, value }
        }
        "paste" => Command::Paste(rest),
        "random" => Command::Random,
        "clear" => Command::Clear,
        "endpoint" => Command::Endpoint((!rest.is_empty()).then_some(rest)),
        "show" => Command::Show,
        "predict" => Command::Predict,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other),
    };
    Some(cmd)
}

/// Run the shell until `quit` or end of input.
pub async fn run(mut session: Session, base_url: &str) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("wdbc shell, endpoint {}. Type `help` for commands.", session.endpoint());
    loop {
        print!("wdbc> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(cmd) = parse_command(&line) else {
            continue;
        };

        match cmd {
            Command::Set { field, value } => {
                let edited = match field.parse::<usize>() {
                    Ok(index) => session.edit_index(index, value),
                    Err(_) => session.edit(field, value),
                };
                if let Err(e) = edited {
                    println!("Rejected: {e}");
                }
            }
            Command::Paste(text) => match session.paste(text) {
                Ok(()) => println!("Loaded {} values.", wdbc_core::FEATURE_COUNT),
                Err(e) => println!("Error: {e}"),
            },
            Command::Random => {
                session.fill_random();
                display::print_vector_card(session.vector())?;
            }
            Command::Clear => {
                session.clear();
                println!("Cleared.");
            }
            Command::Endpoint(None) => println!("{}", session.endpoint()),
            Command::Endpoint(Some(url)) => {
                if let Err(e) = session.set_endpoint(url) {
                    println!("Error: {e}");
                }
            }
            Command::Show => {
                display::print_vector_card(session.vector())?;
                display::print_outcome(session.last());
            }
            Command::Predict => match submit::submit(&mut session, base_url).await {
                Ok(()) => display::print_outcome(session.last()),
                Err(e) => println!("Cannot submit: {e}"),
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Unknown(verb) => println!("Unknown command `{verb}`; try `help`."),
        }
    }
    Ok(())
}
