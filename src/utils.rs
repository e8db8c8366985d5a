use std::time::Duration;

pub fn to_millis(duration: Duration) -> u64 {
    (duration.as_secs() * 1_000) + (duration.subsec_nanos() / 1_000_000) as u64
}

/// Parses a single-byte CSV delimiter such as `,` or `\t`.
pub fn parse_delimiter(delimiter: &str) -> Option<u8> {
    match delimiter {
        "\\t" | "tab" => Some(b'\t'),
        _ if delimiter.len() == 1 => Some(delimiter.as_bytes()[0]),
        _ => None,
    }
}


#[cfg(test)]
mod tests {

    use std::time::Duration;

    use crate::utils;

    #[test]
    fn millis() {
        assert_eq!(utils::to_millis(Duration::from_micros(2_345_678)), 2_345);
    }

    #[test]
    fn delimiters() {
        assert_eq!(utils::parse_delimiter(","), Some(b','));
        assert_eq!(utils::parse_delimiter("\\t"), Some(b'\t'));
        assert_eq!(utils::parse_delimiter("tab"), Some(b'\t'));
        assert_eq!(utils::parse_delimiter(";;"), None);
        assert_eq!(utils::parse_delimiter(""), None);
    }
}
