/// Available commands and autocomplete logic

#[derive(Debug, Clone)]
pub struct Command {
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

/// All available commands
pub const COMMANDS: &[Command] = &[
  Command {
    name: "habits",
    aliases: &["h", "habit"],
    description: "Habits and streaks",
  },
  Command {
    name: "notifications",
    aliases: &["n", "notifs", "inbox"],
    description: "Recent notifications",
  },
  Command {
    name: "trash",
    aliases: &["t", "deleted", "bin"],
    description: "Deleted tasks and notes",
  },
  Command {
    name: "workouts",
    aliases: &["w", "workout", "saved"],
    description: "Saved workouts",
  },
  Command {
    name: "reload",
    aliases: &["refresh", "rl"],
    description: "Revalidate everything cached",
  },
  Command {
    name: "quit",
    aliases: &["q", "exit"],
    description: "Exit dayboard",
  },
];

/// Get autocomplete suggestions for a given input
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let input_lower = input.trim().to_lowercase();

  if input_lower.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut matches: Vec<(&Command, u32)> = COMMANDS
    .iter()
    .filter_map(|cmd| match_rank(cmd, &input_lower).map(|rank| (cmd, rank)))
    .collect();

  // Sort by rank, stable so ties keep declaration order
  matches.sort_by_key(|(_, rank)| *rank);

  matches.into_iter().map(|(cmd, _)| cmd).collect()
}

/// Lower is better; None means no match.
fn match_rank(cmd: &Command, input: &str) -> Option<u32> {
  if cmd.name == input {
    Some(0)
  } else if cmd.aliases.contains(&input) {
    Some(1)
  } else if cmd.name.starts_with(input) {
    Some(2)
  } else if cmd.aliases.iter().any(|a| a.starts_with(input)) {
    Some(3)
  } else if cmd.name.contains(input) {
    Some(4)
  } else if cmd.aliases.iter().any(|a| a.contains(input)) {
    Some(5)
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_input_returns_all() {
    let suggestions = get_suggestions("");
    assert_eq!(suggestions.len(), COMMANDS.len());
  }

  #[test]
  fn test_exact_match() {
    let suggestions = get_suggestions("trash");
    assert_eq!(suggestions[0].name, "trash");
  }

  #[test]
  fn test_alias_match() {
    let suggestions = get_suggestions("n");
    assert_eq!(suggestions[0].name, "notifications");
  }

  #[test]
  fn test_prefix_match() {
    let suggestions = get_suggestions("wor");
    assert_eq!(suggestions[0].name, "workouts");
  }

  #[test]
  fn test_fuzzy_match() {
    let suggestions = get_suggestions("bit");
    assert_eq!(suggestions[0].name, "habits");
  }

  #[test]
  fn test_no_match() {
    assert!(get_suggestions("zzz").is_empty());
  }
}
