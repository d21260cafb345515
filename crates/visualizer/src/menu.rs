use anyhow::{anyhow, bail, Context, Result};
use std::str::FromStr;

use traversal::phase::DepthFirstOrder;
use traversal::tree::NodeName;

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Add a child under the node with this label
    Add(NodeName),
    /// Add this many children under randomly picked nodes
    Random(usize),
    Traverse(DepthFirstOrder),
    BreadthFirst,
    Reset,
    Cancel,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  add <name>        add a child under node <name>
  random <count>    add <count> children under random nodes
  preorder          play a preorder traversal
  inorder           play an inorder traversal
  postorder         play a postorder traversal
  bfs               play a breadth-first exploration
  reset             clear all highlights
  cancel            stop every pending traversal
  show              print the tree
  help              print this message
  quit              exit";

fn argument<'a>(command: &str, words: &mut impl Iterator<Item = &'a str>) -> Result<&'a str> {
    let arg = words
        .next()
        .ok_or_else(|| anyhow!("`{command}` expects an argument"))?;
    if words.next().is_some() {
        bail!("`{command}` takes a single argument");
    }
    Ok(arg)
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            bail!("empty command");
        };
        let head = head.to_ascii_lowercase();

        let command = match head.as_str() {
            "add" => {
                let arg = argument(&head, &mut words)?;
                let name = arg
                    .parse::<u32>()
                    .with_context(|| format!("Invalid node name {arg:?}"))?;
                Command::Add(NodeName(name))
            }
            "random" => {
                let arg = argument(&head, &mut words)?;
                let count = arg
                    .parse::<usize>()
                    .with_context(|| format!("Invalid node count {arg:?}"))?;
                Command::Random(count)
            }
            "bfs" | "breadth-first" => Command::BreadthFirst,
            "reset" => Command::Reset,
            "cancel" => Command::Cancel,
            "show" | "tree" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => match DepthFirstOrder::from_str(other) {
                Ok(order) => Command::Traverse(order),
                Err(_) => bail!("Unknown command {other:?}, try `help`"),
            },
        };

        if !matches!(command, Command::Add(_) | Command::Random(_)) && words.next().is_some() {
            bail!("`{head}` takes no arguments");
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_commands() {
        assert_eq!("add 3".parse::<Command>().unwrap(), Command::Add(NodeName(3)));
        assert_eq!("random 5".parse::<Command>().unwrap(), Command::Random(5));
        assert_eq!(
            "  InOrder ".parse::<Command>().unwrap(),
            Command::Traverse(DepthFirstOrder::Inorder)
        );
        assert_eq!(
            "post".parse::<Command>().unwrap(),
            Command::Traverse(DepthFirstOrder::Postorder)
        );
        assert_eq!("bfs".parse::<Command>().unwrap(), Command::BreadthFirst);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Command>().is_err());
        assert!("add".parse::<Command>().is_err());
        assert!("add one".parse::<Command>().is_err());
        assert!("add 1 2".parse::<Command>().is_err());
        assert!("show 1".parse::<Command>().is_err());

        let err = "levelorder".parse::<Command>().unwrap_err();
        assert!(err.to_string().contains("Unknown command"));
    }
}
