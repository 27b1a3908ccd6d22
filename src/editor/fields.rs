use super::mode::EditMode;
use crate::desktop_entry::{
    KeyFile, Locale, DESKTOP_GROUP, KEY_COMMENT, KEY_EXEC, KEY_ICON, KEY_NAME,
    KEY_STARTUP_NOTIFY, KEY_TERMINAL, KEY_URL,
};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Name,
    Comment,
    Command,
    Url,
    Icon,
    Terminal,
    StartupNotify,
}

const APPLICATION_FIELDS: [EditorField; 6] = [
    EditorField::Name,
    EditorField::Comment,
    EditorField::Command,
    EditorField::Icon,
    EditorField::Terminal,
    EditorField::StartupNotify,
];

const LINK_FIELDS: [EditorField; 4] = [
    EditorField::Name,
    EditorField::Comment,
    EditorField::Url,
    EditorField::Icon,
];

pub fn fields_for_mode(mode: EditMode) -> &'static [EditorField] {
    match mode {
        EditMode::Application => &APPLICATION_FIELDS,
        EditMode::Link => &LINK_FIELDS,
    }
}

impl EditorField {
    pub fn label(self) -> &'static str {
        match self {
            EditorField::Name => "Name",
            EditorField::Comment => "Comment",
            EditorField::Command => "Command",
            EditorField::Url => "URL",
            EditorField::Icon => "Icon",
            EditorField::Terminal => "Run in terminal",
            EditorField::StartupNotify => "Use startup notification",
        }
    }

    pub fn is_toggle(self) -> bool {
        matches!(self, EditorField::Terminal | EditorField::StartupNotify)
    }
}

/// Strips a file extension from icon names that were saved as file names.
/// Absolute paths are left untouched.
pub fn normalize_icon(value: &str) -> String {
    if Path::new(value).is_absolute() {
        return value.to_string();
    }
    match value.rfind('.') {
        Some(idx) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

/// Editable values of one desktop entry. Absent keys read as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorFields {
    pub mode: EditMode,
    pub name: String,
    pub comment: String,
    pub icon: String,
    pub command: String,
    pub url: String,
    pub terminal: bool,
    pub startup_notify: bool,
}

impl EditorFields {
    pub fn empty(mode: EditMode) -> Self {
        Self {
            mode,
            name: String::new(),
            comment: String::new(),
            icon: String::new(),
            command: String::new(),
            url: String::new(),
            terminal: false,
            startup_notify: false,
        }
    }

    pub fn populate(entry: &KeyFile, mode: EditMode, locale: Option<&Locale>) -> Self {
        let localized = |key: &str| {
            entry
                .locale_string(DESKTOP_GROUP, key, locale)
                .unwrap_or_default()
        };
        let mut fields = Self::empty(mode);
        fields.name = localized(KEY_NAME);
        fields.comment = localized(KEY_COMMENT);
        fields.icon = normalize_icon(&localized(KEY_ICON));
        match mode {
            EditMode::Application => {
                fields.command = entry.string(DESKTOP_GROUP, KEY_EXEC).unwrap_or_default();
                fields.startup_notify = entry
                    .boolean(DESKTOP_GROUP, KEY_STARTUP_NOTIFY)
                    .unwrap_or(false);
                fields.terminal = entry.boolean(DESKTOP_GROUP, KEY_TERMINAL).unwrap_or(false);
            }
            EditMode::Link => {
                fields.url = entry.string(DESKTOP_GROUP, KEY_URL).unwrap_or_default();
            }
        }
        fields
    }

    /// Writes the values back. Only the keys of the current mode are touched.
    pub fn apply(&self, entry: &mut KeyFile, locale: Option<&Locale>) {
        entry.set_locale_string(DESKTOP_GROUP, KEY_NAME, locale, &self.name);
        entry.set_locale_string(DESKTOP_GROUP, KEY_ICON, locale, &self.icon);
        entry.set_locale_string(DESKTOP_GROUP, KEY_COMMENT, locale, &self.comment);
        match self.mode {
            EditMode::Application => {
                entry.set_string(DESKTOP_GROUP, KEY_EXEC, &self.command);
                entry.set_boolean(DESKTOP_GROUP, KEY_TERMINAL, self.terminal);
                entry.set_boolean(DESKTOP_GROUP, KEY_STARTUP_NOTIFY, self.startup_notify);
            }
            EditMode::Link => {
                entry.set_string(DESKTOP_GROUP, KEY_URL, &self.url);
            }
        }
    }

    /// A launcher needs a name and a command, a link a name and a URL.
    pub fn is_complete(&self) -> bool {
        let target = match self.mode {
            EditMode::Application => &self.command,
            EditMode::Link => &self.url,
        };
        !self.name.is_empty() && !target.is_empty()
    }

    pub fn text(&self, field: EditorField) -> Option<&str> {
        match field {
            EditorField::Name => Some(&self.name),
            EditorField::Comment => Some(&self.comment),
            EditorField::Command => Some(&self.command),
            EditorField::Url => Some(&self.url),
            EditorField::Icon => Some(&self.icon),
            EditorField::Terminal | EditorField::StartupNotify => None,
        }
    }

    pub fn flag(&self, field: EditorField) -> Option<bool> {
        match field {
            EditorField::Terminal => Some(self.terminal),
            EditorField::StartupNotify => Some(self.startup_notify),
            _ => None,
        }
    }
}

type CompleteObserver = Box<dyn FnMut(bool)>;

/// Owns the editable values and keeps one observer informed about whether
/// they are complete enough to be saved.
pub struct EditorPresenter {
    fields: EditorFields,
    complete_observer: Option<CompleteObserver>,
}

impl EditorPresenter {
    pub fn new(fields: EditorFields) -> Self {
        Self {
            fields,
            complete_observer: None,
        }
    }

    pub fn fields(&self) -> &EditorFields {
        &self.fields
    }

    pub fn mode(&self) -> EditMode {
        self.fields.mode
    }

    pub fn is_complete(&self) -> bool {
        self.fields.is_complete()
    }

    /// Registers the observer, replacing any previous one, and syncs it with
    /// the current state right away.
    pub fn observe_complete(&mut self, observer: impl FnMut(bool) + 'static) {
        let mut observer: CompleteObserver = Box::new(observer);
        observer(self.is_complete());
        self.complete_observer = Some(observer);
    }

    pub fn set_text(&mut self, field: EditorField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            EditorField::Name => &mut self.fields.name,
            EditorField::Comment => &mut self.fields.comment,
            EditorField::Command => &mut self.fields.command,
            EditorField::Url => &mut self.fields.url,
            EditorField::Icon => &mut self.fields.icon,
            EditorField::Terminal | EditorField::StartupNotify => return,
        };
        *slot = value;
        self.notify_complete();
    }

    pub fn toggle(&mut self, field: EditorField) {
        match field {
            EditorField::Terminal => self.fields.terminal = !self.fields.terminal,
            EditorField::StartupNotify => {
                self.fields.startup_notify = !self.fields.startup_notify
            }
            _ => return,
        }
        self.notify_complete();
    }

    fn notify_complete(&mut self) {
        let complete = self.fields.is_complete();
        if let Some(observer) = self.complete_observer.as_mut() {
            observer(complete);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const LAUNCHER: &str = "[Desktop Entry]\n\
Type=Application\n\
Name=Files\n\
Name[de]=Dateien\n\
Comment=Browse files\n\
Icon=system-file-manager.png\n\
Exec=thunar %F\n\
Terminal=true\n";

    #[test]
    fn icon_normalization_strips_extensions_of_relative_names() {
        assert_eq!(normalize_icon("myapp.png"), "myapp");
        assert_eq!(
            normalize_icon("/usr/share/icons/myapp.png"),
            "/usr/share/icons/myapp.png"
        );
        assert_eq!(normalize_icon("myapp"), "myapp");
        assert_eq!(normalize_icon(""), "");
    }

    #[test]
    fn populate_reads_localized_and_mode_specific_values() {
        let entry = KeyFile::parse(LAUNCHER).expect("parse");
        let de = Locale::parse("de_DE.UTF-8").expect("locale");
        let fields = EditorFields::populate(&entry, EditMode::Application, Some(&de));
        assert_eq!(fields.name, "Dateien");
        assert_eq!(fields.comment, "Browse files");
        assert_eq!(fields.icon, "system-file-manager");
        assert_eq!(fields.command, "thunar %F");
        assert!(fields.terminal);
        assert!(!fields.startup_notify);
        assert_eq!(fields.url, "");
    }

    #[test]
    fn populate_uses_empty_strings_for_absent_keys() {
        let entry = KeyFile::parse("[Desktop Entry]\nType=Link\n").expect("parse");
        let fields = EditorFields::populate(&entry, EditMode::Link, None);
        assert_eq!(fields, EditorFields::empty(EditMode::Link));
    }

    #[test]
    fn apply_writes_only_keys_of_the_current_mode() {
        let mut entry = KeyFile::parse("[Desktop Entry]\nType=Link\nName=Old\n").expect("parse");
        let mut fields = EditorFields::populate(&entry, EditMode::Link, None);
        fields.name = "Docs".to_string();
        fields.url = "https://docs.example.org".to_string();
        fields.command = "ignored".to_string();
        fields.apply(&mut entry, None);
        assert_eq!(
            entry.to_data(),
            "[Desktop Entry]\nType=Link\nName=Docs\nIcon=\nComment=\nURL=https://docs.example.org\n"
        );
    }

    #[test]
    fn apply_writes_translation_when_locale_is_active() {
        let mut entry = KeyFile::parse(LAUNCHER).expect("parse");
        let de = Locale::parse("de_DE").expect("locale");
        let mut fields = EditorFields::populate(&entry, EditMode::Application, Some(&de));
        fields.name = "Dateimanager".to_string();
        fields.startup_notify = true;
        fields.apply(&mut entry, Some(&de));
        assert_eq!(entry.string(DESKTOP_GROUP, KEY_NAME).as_deref(), Some("Files"));
        assert!(entry.to_data().contains("Terminal=true\nName[de_DE]=Dateimanager\n"));
        assert_eq!(
            entry.locale_string(DESKTOP_GROUP, KEY_NAME, Some(&de)).as_deref(),
            Some("Dateimanager")
        );
        assert_eq!(entry.boolean(DESKTOP_GROUP, KEY_STARTUP_NOTIFY), Some(true));
    }

    #[test]
    fn completeness_depends_on_mode() {
        let mut fields = EditorFields::empty(EditMode::Application);
        fields.name = "Tool".to_string();
        assert!(!fields.is_complete());
        fields.command = "tool".to_string();
        assert!(fields.is_complete());

        let mut link = EditorFields::empty(EditMode::Link);
        link.name = "Site".to_string();
        link.command = "ignored".to_string();
        assert!(!link.is_complete());
        link.url = "https://example.org".to_string();
        assert!(link.is_complete());
    }

    #[test]
    fn observer_is_synced_and_called_on_every_edit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut presenter = EditorPresenter::new(EditorFields::empty(EditMode::Link));
        let sink = Rc::clone(&seen);
        presenter.observe_complete(move |complete| sink.borrow_mut().push(complete));

        presenter.set_text(EditorField::Name, "Site");
        presenter.set_text(EditorField::Url, "https://example.org");
        presenter.set_text(EditorField::Comment, "still complete");
        presenter.set_text(EditorField::Name, "");
        presenter.toggle(EditorField::Name);

        assert_eq!(*seen.borrow(), vec![false, false, true, true, false]);
        assert_eq!(presenter.fields().comment, "still complete");
    }

    #[test]
    fn toggles_only_affect_boolean_fields() {
        let mut presenter = EditorPresenter::new(EditorFields::empty(EditMode::Application));
        presenter.toggle(EditorField::Terminal);
        presenter.set_text(EditorField::StartupNotify, "ignored");
        assert!(presenter.fields().terminal);
        assert!(!presenter.fields().startup_notify);
        assert_eq!(fields_for_mode(EditMode::Link).len(), 4);
        assert!(EditorField::Terminal.is_toggle());
    }
}
