// Line-level tokenizer for the splitux.cfg format

/// One meaningful line of the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniLine<'a> {
    /// `[Section]`, lowercased
    Section(String),
    /// `key=value`, key lowercased, both sides trimmed
    Entry { key: String, value: &'a str },
}

/// Tokenize a single line. Blank lines, `#`/`;` comments and lines without
/// `=` yield `None`.
pub fn parse_line(line: &str) -> Option<IniLine<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
        return None;
    }

    if let Some(section) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return Some(IniLine::Section(section.trim().to_lowercase()));
    }

    let (key, value) = trimmed.split_once('=')?;
    Some(IniLine::Entry {
        key: key.trim().to_lowercase(),
        value: value.trim(),
    })
}
