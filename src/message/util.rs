/// Iterator over the whitespace-delimited tokens of a string that can hand
/// back whatever it has not consumed yet.
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    #[inline]
    pub fn new(s: &'a str) -> Self {
        Self { rest: s }
    }

    /// Unconsumed input with its leading whitespace removed.
    #[inline]
    pub fn remainder(&self) -> &'a str {
        self.rest.trim_start()
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let s = self.rest.trim_start();
        if s.is_empty() {
            self.rest = s;
            return None;
        }
        let end = s.find(char::is_whitespace).unwrap_or(s.len());
        let (token, rest) = s.split_at(end);
        self.rest = rest;
        Some(token)
    }
}

pub trait TokensExt {
    fn tokens(&self) -> Tokens<'_>;
}

impl TokensExt for str {
    #[inline]
    fn tokens(&self) -> Tokens<'_> {
        Tokens::new(self)
    }
}
