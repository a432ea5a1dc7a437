//! Fixed-width context windows around trigger lemmas.

/// Number of tokens on each side of the trigger.
pub const HALF_WIDTH: usize = 2;

/// `[w-2, w-1, trigger, w+1, w+2]`; out-of-range slots are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow(pub [String; 5]);

impl ContextWindow {
    pub fn before2(&self) -> &str {
        &self.0[0]
    }

    pub fn before1(&self) -> &str {
        &self.0[1]
    }

    pub fn trigger(&self) -> &str {
        &self.0[2]
    }

    pub fn after1(&self) -> &str {
        &self.0[3]
    }

    pub fn after2(&self) -> &str {
        &self.0[4]
    }
}

/// Street-type trigger words: street, avenue, highway. They only match after
/// going through the same [`Lemmatizer`](super::Lemmatizer) as the text.
pub const STREET_TRIGGER_WORDS: &[&str] = &["улица", "проспект", "шоссе"];

pub const METRO_TRIGGER_WORDS: &[&str] = &["метро"];

/// Emit one window per token of the lemmatized `sentence` that equals a trigger.
///
/// Tokens are split on single spaces, exactly as the lemmatizer joins them.
pub fn windows<S: AsRef<str>>(sentence: &str, triggers: &[S]) -> Vec<ContextWindow> {
    let tokens: Vec<&str> = if sentence.is_empty() {
        Vec::new()
    } else {
        sentence.split(' ').collect()
    };
    let slot = |i: isize| -> String {
        if i < 0 {
            return String::new();
        }
        tokens.get(i as usize).map(|t| t.to_string()).unwrap_or_default()
    };

    let mut out = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if !triggers.iter().any(|t| t.as_ref() == *token) {
            continue;
        }
        let i = i as isize;
        let h = HALF_WIDTH as isize;
        out.push(ContextWindow([
            slot(i - h),
            slot(i - 1),
            slot(i),
            slot(i + 1),
            slot(i + h),
        ]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const STREET: &[&str] = &["улица", "проспект", "шосс"];
    const METRO: &[&str] = &["метр"];

    fn w(parts: [&str; 5]) -> ContextWindow {
        ContextWindow(parts.map(String::from))
    }

    #[test]
    fn test_no_triggers() {
        assert!(windows("столкновение два автомобиль", STREET).is_empty());
        assert!(windows("", STREET).is_empty());
    }

    #[test]
    fn test_centered_window() {
        let got = windows("на невский проспект у дом", STREET);
        assert_eq!(got, vec![w(["на", "невский", "проспект", "у", "дом"])]);
    }

    #[test]
    fn test_boundary_slots_are_empty() {
        let got = windows("улица", STREET);
        assert_eq!(got, vec![w(["", "", "улица", "", ""])]);

        let got = windows("садовый улица", STREET);
        assert_eq!(got, vec![w(["", "садовый", "улица", "", ""])]);

        let got = windows("метр маяковский", METRO);
        assert_eq!(got, vec![w(["", "", "метр", "маяковский", ""])]);
    }

    #[test]
    fn test_multiple_overlapping_windows() {
        let got = windows("невский проспект и садовый улица", STREET);
        assert_eq!(
            got,
            vec![
                w(["", "невский", "проспект", "и", "садовый"]),
                w(["и", "садовый", "улица", "", ""]),
            ]
        );
        assert_eq!(got[1].before1(), "садовый");
        assert_eq!(got[0].after2(), "садовый");
    }

    #[test]
    fn test_exact_match_only() {
        assert!(windows("улицы метро", STREET).is_empty());
        assert!(windows("улицы метро", METRO).is_empty());
    }
}
