/// Collapse line breaks so a message fits on one report line.
/// `\r\n`, `\n` and `\r` each become a single space.
pub fn one_line(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Make a value safe to place between tab delimiters.
pub fn one_field(s: &str) -> String {
    one_line(s).replace('\t', " ")
}
