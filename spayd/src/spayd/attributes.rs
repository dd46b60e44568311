use crate::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;

static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| {
    // (?:^|\*) - начало строки или разделитель
    // KEY - заглавные латинские буквы, цифры и '-'
    // VALUE - всё до следующей '*', двоеточия внутри значения допустимы
    Regex::new(r"(?:^|\*)(?P<key>[A-Z0-9-]+):(?P<value>[^*]*)").unwrap()
});

/// Атрибуты строки SPD (`KEY:VALUE`) в порядке появления.
///
/// В отличие от обычной map, повторная вставка ключа это ошибка, а не перезапись.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaydAttributes {
    entries: Vec<(String, String)>,
}

impl SpaydAttributes {
    /// Разбирает всё, что идёт после заголовка `SPD*1.0*`:
    /// `key1:value1*key2:value2*...`
    ///
    /// Значения обрезаются по краям. Записи, не подходящие под грамматику, пропускаются.
    pub fn tokenize(body: &str) -> Result<Self, ParseError> {
        let mut attrs = SpaydAttributes::default();

        for caps in ATTRIBUTE_RE.captures_iter(body) {
            let key = &caps["key"];
            let value = caps["value"].trim();
            attrs.insert(key, value)?;
        }

        Ok(attrs)
    }

    /// Добавляет атрибут, если такого ключа ещё нет
    pub fn insert(&mut self, key: &str, value: &str) -> Result<(), ParseError> {
        if self.get(key).is_some() {
            return Err(ParseError::DuplicateKey(key.to_string()));
        }

        self.entries.push((key.to_string(), value.to_string()));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}
