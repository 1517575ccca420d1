//! Offset to line mapping.

/// Start offsets of every line in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build the index. `\n`, `\r\n` and a lone `\r` all end a line.
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    line_starts.push(i + 2);
                    i += 2;
                    continue;
                }
                b'\r' | b'\n' => line_starts.push(i + 1),
                _ => {}
            }
            i += 1;
        }
        Self { line_starts }
    }

    /// 0-based line containing `offset`. Offsets past the end map to the
    /// last line.
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_of() {
        let index = LineIndex::new("class A\n{\n  void M() {}\n}\n");
        assert_eq!(index.line_of(0), 0);
        assert_eq!(index.line_of(7), 0);
        assert_eq!(index.line_of(8), 1);
        assert_eq!(index.line_of(12), 2);
        assert_eq!(index.line_count(), 5);
    }

    #[test]
    fn test_crlf_and_lone_cr() {
        let index = LineIndex::new("a\r\nb\rc");
        assert_eq!(index.line_of(0), 0);
        assert_eq!(index.line_of(3), 1);
        assert_eq!(index.line_of(5), 2);
    }

    #[test]
    fn test_empty_text() {
        let index = LineIndex::default();
        assert_eq!(index.line_of(0), 0);
        assert_eq!(index.line_of(100), 0);
    }
}
