use super::locale::Locale;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("file is not valid UTF-8")]
    InvalidUtf8,
    #[error("line {line}: key file does not start with a group")]
    EntryOutsideGroup { line: usize },
    #[error("line {line}: invalid group name `{name}`")]
    InvalidGroupName { line: usize, name: String },
    #[error("line {line}: invalid key name `{key}`")]
    InvalidKey { line: usize, key: String },
    #[error("line {line}: `{content}` is not a key-value pair, group, or comment")]
    InvalidLine { line: usize, content: String },
}

/// A key file (`.desktop` style) that keeps comments, blank lines, ordering
/// and translations of everything it does not modify.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFile {
    preamble: Vec<String>,
    groups: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Group {
    name: String,
    lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// Comments and blank lines, kept verbatim.
    Comment(String),
    Entry(Entry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    locale: Option<String>,
    value: String,
    /// Original text of the line while the entry is untouched.
    raw: Option<String>,
}

impl Entry {
    fn matches(&self, key: &str, locale: Option<&str>) -> bool {
        self.key == key && self.locale.as_deref() == locale
    }

    fn render(&self) -> String {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }
        match &self.locale {
            Some(locale) => format!("{}[{}]={}", self.key, locale, self.value),
            None => format!("{}={}", self.key, self.value),
        }
    }
}

impl KeyFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut file = KeyFile::new();
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                match file.groups.last_mut() {
                    Some(group) => group.lines.push(Line::Comment(line.to_string())),
                    None => file.preamble.push(line.to_string()),
                }
                continue;
            }
            if trimmed.starts_with('[') {
                let name = parse_group_header(trimmed.trim_end()).ok_or_else(|| {
                    ParseError::InvalidGroupName {
                        line: line_no,
                        name: trimmed.trim_end().to_string(),
                    }
                })?;
                file.groups.push(Group {
                    name: name.to_string(),
                    lines: Vec::new(),
                });
                continue;
            }
            let Some((raw_key, raw_value)) = line.split_once('=') else {
                return Err(ParseError::InvalidLine {
                    line: line_no,
                    content: line.to_string(),
                });
            };
            let (key, locale) =
                split_key(raw_key.trim()).ok_or_else(|| ParseError::InvalidKey {
                    line: line_no,
                    key: raw_key.trim().to_string(),
                })?;
            let Some(group) = file.groups.last_mut() else {
                return Err(ParseError::EntryOutsideGroup { line: line_no });
            };
            group.lines.push(Line::Entry(Entry {
                key: key.to_string(),
                locale: locale.map(str::to_string),
                value: raw_value.trim_start().to_string(),
                raw: Some(line.to_string()),
            }));
        }
        Ok(file)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)?;
        Self::parse(text)
    }

    /// Serializes the file. Untouched lines come back exactly as they were read.
    pub fn to_data(&self) -> String {
        let mut out = String::new();
        for line in &self.preamble {
            out.push_str(line);
            out.push('\n');
        }
        for group in &self.groups {
            out.push('[');
            out.push_str(&group.name);
            out.push_str("]\n");
            for line in &group.lines {
                match line {
                    Line::Comment(text) => out.push_str(text),
                    Line::Entry(entry) => out.push_str(&entry.render()),
                }
                out.push('\n');
            }
        }
        out
    }

    pub fn group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for group in &self.groups {
            if !names.contains(&group.name.as_str()) {
                names.push(&group.name);
            }
        }
        names
    }

    /// Untranslated keys of `group`, in file order, without duplicates.
    pub fn keys(&self, group: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for entry in self.entries(group) {
            if entry.locale.is_none() && !keys.contains(&entry.key.as_str()) {
                keys.push(&entry.key);
            }
        }
        keys
    }

    /// The raw (still escaped) value of `key`.
    pub fn value(&self, group: &str, key: &str) -> Option<&str> {
        self.lookup(group, key, None)
    }

    pub fn string(&self, group: &str, key: &str) -> Option<String> {
        self.value(group, key).map(unescape)
    }

    /// Looks up the best translation of `key` for `locale`, falling back to
    /// the untranslated value.
    pub fn locale_string(&self, group: &str, key: &str, locale: Option<&Locale>) -> Option<String> {
        if let Some(locale) = locale {
            for candidate in locale.candidates() {
                if let Some(value) = self.lookup(group, key, Some(&candidate)) {
                    return Some(unescape(value));
                }
            }
        }
        self.string(group, key)
    }

    pub fn boolean(&self, group: &str, key: &str) -> Option<bool> {
        match self.value(group, key)?.trim_end() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    pub fn set_value(&mut self, group: &str, key: &str, value: &str) {
        self.store(group, key, None, value.to_string());
    }

    pub fn set_string(&mut self, group: &str, key: &str, value: &str) {
        self.store(group, key, None, escape(value));
    }

    /// Writes `Key[locale]` when a translation locale is active, the plain
    /// key otherwise.
    pub fn set_locale_string(
        &mut self,
        group: &str,
        key: &str,
        locale: Option<&Locale>,
        value: &str,
    ) {
        let suffix = locale.map(Locale::key_suffix);
        self.store(group, key, suffix, escape(value));
    }

    pub fn set_boolean(&mut self, group: &str, key: &str, value: bool) {
        self.set_value(group, key, if value { "true" } else { "false" });
    }

    fn entries(&self, group: &str) -> Vec<&Entry> {
        self.groups
            .iter()
            .filter(|g| g.name == group)
            .flat_map(|g| g.lines.iter())
            .filter_map(|line| match line {
                Line::Entry(entry) => Some(entry),
                Line::Comment(_) => None,
            })
            .collect()
    }

    fn lookup(&self, group: &str, key: &str, locale: Option<&str>) -> Option<&str> {
        self.entries(group)
            .into_iter()
            .filter(|entry| entry.matches(key, locale))
            .last()
            .map(|entry| entry.value.as_str())
    }

    fn store(&mut self, group: &str, key: &str, locale: Option<String>, value: String) {
        let existing = self
            .groups
            .iter_mut()
            .filter(|g| g.name == group)
            .flat_map(|g| g.lines.iter_mut())
            .filter_map(|line| match line {
                Line::Entry(entry) if entry.matches(key, locale.as_deref()) => Some(entry),
                _ => None,
            })
            .last();
        if let Some(entry) = existing {
            // A line read from disk that unescapes to the same text stays verbatim.
            if entry.raw.is_none() || unescape(&entry.value) != unescape(&value) {
                entry.value = value;
                entry.raw = None;
            }
            return;
        }

        let entry = Line::Entry(Entry {
            key: key.to_string(),
            locale,
            value,
            raw: None,
        });
        let group_idx = match self.groups.iter().position(|g| g.name == group) {
            Some(idx) => idx,
            None => {
                self.push_group(group);
                self.groups.len() - 1
            }
        };
        let lines = &mut self.groups[group_idx].lines;
        let insert_at = lines
            .iter()
            .rposition(|line| matches!(line, Line::Entry(_)))
            .map(|idx| idx + 1)
            .unwrap_or(0);
        lines.insert(insert_at, entry);
    }

    fn push_group(&mut self, name: &str) {
        let needs_separator = match self.groups.last() {
            Some(prev) => !matches!(prev.lines.last(), Some(Line::Comment(text)) if text.trim().is_empty()),
            None => false,
        };
        if needs_separator {
            if let Some(prev) = self.groups.last_mut() {
                prev.lines.push(Line::Comment(String::new()));
            }
        }
        self.groups.push(Group {
            name: name.to_string(),
            lines: Vec::new(),
        });
    }
}

fn parse_group_header(line: &str) -> Option<&str> {
    let name = line.strip_prefix('[')?.strip_suffix(']')?;
    let valid = !name.is_empty()
        && !name
            .chars()
            .any(|ch| ch == '[' || ch == ']' || ch.is_control());
    valid.then_some(name)
}

fn split_key(raw: &str) -> Option<(&str, Option<&str>)> {
    let (key, locale) = match raw.find('[') {
        Some(open) => {
            let locale = raw[open + 1..].strip_suffix(']')?;
            if locale.is_empty() || locale.contains('[') || locale.contains(']') {
                return None;
            }
            (&raw[..open], Some(locale))
        }
        None => (raw, None),
    };
    let valid = !key.is_empty()
        && !key
            .chars()
            .any(|ch| ch == ']' || ch.is_whitespace() || ch.is_control());
    valid.then_some((key, locale))
}

pub(crate) fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (idx, ch) in value.chars().enumerate() {
        match ch {
            ' ' if idx == 0 => out.push_str("\\s"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

pub(crate) fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
