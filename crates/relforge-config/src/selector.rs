/// Table selection by name patterns, where `*` matches any run of characters.
///
/// No patterns selects every table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSelector {
    patterns: Vec<String>,
}

impl TableSelector {
    pub fn new(patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, table: &str) -> bool {
        self.is_all() || self.patterns.iter().any(|p| glob_match(p, table))
    }

    /// The names in `tables` this selector accepts, in their original order.
    pub fn select<'a, I>(&self, tables: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tables.into_iter().filter(|t| self.matches(t)).collect()
    }
}

fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some((star_p, star_t)) = star {
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|c| *c == '*')
}
