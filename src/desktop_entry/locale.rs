/// A POSIX locale name split into `lang_COUNTRY.ENCODING@MODIFIER`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    pub lang: String,
    pub country: Option<String>,
    pub encoding: Option<String>,
    pub modifier: Option<String>,
}

const LOCALE_ENV_VARS: [&str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

impl Locale {
    /// Parses a locale name. `C` and `POSIX` (with or without an encoding)
    /// mean "no translation" and yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let (rest, modifier) = match raw.split_once('@') {
            Some((rest, modifier)) => (rest, non_empty(modifier)),
            None => (raw, None),
        };
        let (rest, encoding) = match rest.split_once('.') {
            Some((rest, encoding)) => (rest, non_empty(encoding)),
            None => (rest, None),
        };
        let (lang, country) = match rest.split_once('_') {
            Some((lang, country)) => (lang, non_empty(country)),
            None => (rest, None),
        };
        if lang.is_empty() || lang == "C" || lang == "POSIX" {
            return None;
        }
        Some(Self {
            lang: lang.to_string(),
            country,
            encoding,
            modifier,
        })
    }

    /// The message locale of the running process.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves the message locale the way the C library does: the first
    /// non-empty variable among `LANGUAGE` (first list element), `LC_ALL`,
    /// `LC_MESSAGES` and `LANG` decides.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        for name in LOCALE_ENV_VARS {
            let Some(value) = lookup(name) else {
                continue;
            };
            let value = if name == "LANGUAGE" {
                value.split(':').next().unwrap_or_default().to_string()
            } else {
                value
            };
            if value.trim().is_empty() {
                continue;
            }
            return Self::parse(&value);
        }
        None
    }

    /// Locale suffixes to try, most specific first.
    pub fn candidates(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(4);
        if let (Some(country), Some(modifier)) = (&self.country, &self.modifier) {
            out.push(format!("{}_{}@{}", self.lang, country, modifier));
        }
        if let Some(country) = &self.country {
            out.push(format!("{}_{}", self.lang, country));
        }
        if let Some(modifier) = &self.modifier {
            out.push(format!("{}@{}", self.lang, modifier));
        }
        out.push(self.lang.clone());
        out
    }

    /// The suffix written between brackets in `Key[suffix]`; the encoding is
    /// never part of it.
    pub fn key_suffix(&self) -> String {
        let mut suffix = self.lang.clone();
        if let Some(country) = &self.country {
            suffix.push('_');
            suffix.push_str(country);
        }
        if let Some(modifier) = &self.modifier {
            suffix.push('@');
            suffix.push_str(modifier);
        }
        suffix
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_components() {
        let locale = Locale::parse("sr_YU.UTF-8@Latn").expect("locale");
        assert_eq!(locale.lang, "sr");
        assert_eq!(locale.country.as_deref(), Some("YU"));
        assert_eq!(locale.encoding.as_deref(), Some("UTF-8"));
        assert_eq!(locale.modifier.as_deref(), Some("Latn"));
        assert_eq!(locale.key_suffix(), "sr_YU@Latn");
    }

    #[test]
    fn c_and_posix_mean_untranslated() {
        assert_eq!(Locale::parse("C"), None);
        assert_eq!(Locale::parse("C.UTF-8"), None);
        assert_eq!(Locale::parse("POSIX"), None);
        assert_eq!(Locale::parse(""), None);
    }

    #[test]
    fn candidates_follow_matching_order() {
        let locale = Locale::parse("sr_YU@Latn").expect("locale");
        assert_eq!(
            locale.candidates(),
            vec!["sr_YU@Latn", "sr_YU", "sr@Latn", "sr"]
        );
        let plain = Locale::parse("de_DE.UTF-8").expect("locale");
        assert_eq!(plain.candidates(), vec!["de_DE", "de"]);
    }

    #[test]
    fn environment_precedence_skips_empty_values() {
        let locale = Locale::from_lookup(|name| match name {
            "LANGUAGE" => Some(String::new()),
            "LC_ALL" => None,
            "LC_MESSAGES" => Some("fr_FR.UTF-8".to_string()),
            "LANG" => Some("de_DE.UTF-8".to_string()),
            _ => None,
        })
        .expect("locale");
        assert_eq!(locale.key_suffix(), "fr_FR");

        let language_list = Locale::from_lookup(|name| match name {
            "LANGUAGE" => Some("pt_BR:pt:en".to_string()),
            "LANG" => Some("de_DE.UTF-8".to_string()),
            _ => None,
        })
        .expect("locale");
        assert_eq!(language_list.key_suffix(), "pt_BR");

        assert_eq!(
            Locale::from_lookup(|name| (name == "LANG").then(|| "C.UTF-8".to_string())),
            None
        );
    }
}
