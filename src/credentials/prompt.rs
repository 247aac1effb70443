use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Line that ends multi-line input
pub const END_OF_TEXT: &str = ".";

/// Prompt for a single line of input and return it trimmed
pub fn prompt_line(label: &str) -> Result<String> {
    print!("{}: ", label);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt with a pre-filled value; empty input keeps it
pub fn prompt_line_with_default(label: &str, current: &str) -> Result<String> {
    let input = prompt_line(&format!("{} [{}]", label, current))?;
    if input.is_empty() {
        Ok(current.to_string())
    } else {
        Ok(input)
    }
}

/// Read multi-line text until a line holding only "." or end of input.
pub fn prompt_text(label: &str) -> Result<String> {
    println!("{} (end with a line containing only \"{}\"):", label, END_OF_TEXT);
    read_text(std::io::stdin().lock())
}

fn read_text(reader: impl BufRead) -> Result<String> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read input")?;
        if line.trim_end() == END_OF_TEXT {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n").trim_end().to_string())
}

/// Prompt for a password without echoing it
pub fn prompt_secret(label: &str) -> Result<String> {
    let secret = rpassword::prompt_password(format!("{}: ", label))
        .context("Failed to read password from terminal")?;
    Ok(secret.trim().to_string())
}

/// Yes/no confirmation, defaulting to no
pub fn confirm(message: &str) -> Result<bool> {
    confirm_or(message, false)
}

/// Yes/no confirmation; empty input takes `default_yes`
pub fn confirm_or(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt_line(&format!("{} [{}]", message, hint))?.to_lowercase();
    Ok(parse_yes_no(&input, default_yes))
}

fn parse_yes_no(input: &str, default_yes: bool) -> bool {
    match input.trim() {
        "" => default_yes,
        "y" | "yes" | "예" | "네" => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_text_stops_at_dot() {
        let input = Cursor::new("첫 줄\n둘째 줄\n.\n무시됨\n");
        assert_eq!(read_text(input).unwrap(), "첫 줄\n둘째 줄");
    }

    #[test]
    fn test_read_text_until_eof() {
        let input = Cursor::new("한 줄뿐\n\n");
        assert_eq!(read_text(input).unwrap(), "한 줄뿐");
    }

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("", true));
        assert!(!parse_yes_no("", false));
        assert!(parse_yes_no("yes", false));
        assert!(parse_yes_no("네", false));
        assert!(!parse_yes_no("n", true));
    }

    #[test]
    fn test_read_text_empty() {
        assert_eq!(read_text(Cursor::new(".\n")).unwrap(), "");
    }
}
