//! Module `parser`
//!
//! Decodes the first control-connection message into a typed [`Command`].
//! Parsing never fails; unrecognized input maps to `Command::Invalid` and
//! the session layer decides how to answer.

use crate::protocol::commands::Command;

/// Parses a raw command buffer as received from the control connection.
///
/// The effective command is the bytes before the first NUL terminator, if
/// any. `-l` requests a directory listing. A buffer longer than three bytes
/// whose first two bytes are `-g` requests the file named from offset 3
/// onward. The byte at offset 2 is deliberately not inspected, so `-gXname`
/// requests `name` just as `-g name` does; deployed clients rely on this
/// permissive form and tightening it would break wire compatibility.
pub fn parse_command(raw: &[u8]) -> Command {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let command = &raw[..end];

    if command == b"-l" {
        Command::List
    } else if command.len() > 3 && command.starts_with(b"-g") {
        Command::Get(String::from_utf8_lossy(&command[3..]).into_owned())
    } else {
        Command::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_command(b"-l"), Command::List);
        assert_eq!(parse_command(b"-l\0"), Command::List);
    }

    #[test]
    fn test_parse_get() {
        assert_eq!(
            parse_command(b"-g file.txt"),
            Command::Get("file.txt".to_string())
        );
        assert_eq!(parse_command(b"-g a"), Command::Get("a".to_string()));
        assert_eq!(
            parse_command(b"-g ../secret\0"),
            Command::Get("../secret".to_string())
        );
    }

    #[test]
    fn test_parse_get_ignores_separator_byte() {
        assert_eq!(parse_command(b"-gXname"), Command::Get("name".to_string()));
        assert_eq!(parse_command(b"-gab"), Command::Get("b".to_string()));
    }

    #[test]
    fn test_parse_get_too_short() {
        assert_eq!(parse_command(b"-g"), Command::Invalid);
        assert_eq!(parse_command(b"-g "), Command::Invalid);
        assert_eq!(parse_command(b"-gx"), Command::Invalid);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_command(b""), Command::Invalid);
        assert_eq!(parse_command(b"-x"), Command::Invalid);
        assert_eq!(parse_command(b"-l extra"), Command::Invalid);
        assert_eq!(parse_command(b"LIST"), Command::Invalid);
        assert_eq!(parse_command(b"get file"), Command::Invalid);
    }

    #[test]
    fn test_parse_stops_at_nul() {
        assert_eq!(parse_command(b"-l\0garbage"), Command::List);
        assert_eq!(
            parse_command(b"-g name\0trailing"),
            Command::Get("name".to_string())
        );
    }
}
