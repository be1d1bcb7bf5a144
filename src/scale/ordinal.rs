use std::collections::HashMap;

use crate::foundation::color::Color;

/// Categorical scale assigning colors to names by domain position.
///
/// Position `i` in the domain receives `range[i % range.len()]`, so the range cycles when the
/// domain is longer. [`OrdinalScale::set_domain`] discards every previous assignment.
#[derive(Clone, Debug, Default)]
pub struct OrdinalScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    range: Vec<Color>,
}

impl OrdinalScale {
    /// Empty scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the domain. Duplicates keep their first position.
    pub fn set_domain<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain.clear();
        self.index.clear();
        for name in names {
            self.push(name.into());
        }
        self
    }

    /// Replace the range.
    pub fn set_range(&mut self, colors: impl Into<Vec<Color>>) -> &mut Self {
        self.range = colors.into();
        self
    }

    /// Domain in assignment order.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Color for a known name; `None` for names outside the domain or an empty range.
    pub fn get(&self, name: &str) -> Option<Color> {
        let i = *self.index.get(name)?;
        self.color_at(i)
    }

    /// Color for `name`, appending it to the domain first when unknown.
    pub fn get_or_insert(&mut self, name: &str) -> Option<Color> {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => self.push(name.to_owned()),
        };
        self.color_at(i)
    }

    fn push(&mut self, name: String) -> usize {
        if let Some(&i) = self.index.get(&name) {
            return i;
        }
        let i = self.domain.len();
        self.index.insert(name.clone(), i);
        self.domain.push(name);
        i
    }

    fn color_at(&self, i: usize) -> Option<Color> {
        if self.range.is_empty() {
            return None;
        }
        Some(self.range[i % self.range.len()])
    }
}
