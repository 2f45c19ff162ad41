/// Splits a line on a delimiter set.
///
/// Runs of delimiters count as one separator, and leading or trailing
/// delimiters never yield empty tokens. Once exhausted it keeps returning
/// `None`.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a [u8],
    delimiters: &'a [u8],
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a [u8], delimiters: &'a [u8]) -> Self {
        Self {
            rest: line,
            delimiters,
        }
    }

    /// A cursor with nothing left to yield.
    pub fn empty() -> Self {
        Self {
            rest: &[],
            delimiters: &[],
        }
    }

    fn is_delimiter(&self, byte: u8) -> bool {
        self.delimiters.contains(&byte)
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let start = self.rest.iter().position(|&b| !self.is_delimiter(b));
        let Some(start) = start else {
            self.rest = &[];
            return None;
        };
        let rest = &self.rest[start..];

        match rest.iter().position(|&b| self.is_delimiter(b)) {
            Some(end) => {
                self.rest = &rest[end + 1..];
                Some(&rest[..end])
            }
            None => {
                self.rest = &[];
                Some(rest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split<'a>(line: &'a [u8], delimiters: &'a [u8]) -> Vec<&'a [u8]> {
        Tokens::new(line, delimiters).collect()
    }

    #[test]
    fn splits_on_single_delimiter() {
        assert_eq!(split(b"SET X 1", b" "), [&b"SET"[..], b"X", b"1"]);
    }

    #[test]
    fn collapses_runs_and_edges() {
        assert_eq!(split(b"  a  b ", b" "), [&b"a"[..], b"b"]);
        assert!(split(b"   ", b" ").is_empty());
        assert!(split(b"", b" ").is_empty());
    }

    #[test]
    fn any_byte_of_the_set_separates() {
        assert_eq!(split(b"a,b;c", b",;"), [&b"a"[..], b"b", b"c"]);
    }

    #[test]
    fn empty_delimiter_set_yields_whole_line() {
        assert_eq!(split(b"a b", b""), [&b"a b"[..]]);
    }

    #[test]
    fn stays_exhausted() {
        let mut tokens = Tokens::new(b"x", b" ");
        assert_eq!(tokens.next(), Some(&b"x"[..]));
        assert_eq!(tokens.next(), None);
        assert_eq!(tokens.next(), None);
        assert_eq!(Tokens::empty().next(), None);
    }
}
