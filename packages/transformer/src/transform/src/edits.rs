use crate::extractor::ListRemoval;

/// Replace `start..end` of the original text with `text`. `start == end` inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: u32,
    pub end: u32,
    pub text: String,
}

impl Edit {
    pub fn is_insertion(&self) -> bool {
        self.start == self.end
    }

    fn conflicts_with(&self, other: &Edit) -> bool {
        match (self.is_insertion(), other.is_insertion()) {
            (true, true) => false,
            (true, false) => other.start < self.start && self.start < other.end,
            (false, true) => self.start < other.start && other.start < self.end,
            (false, false) => self.start < other.end && other.start < self.end,
        }
    }
}

/// Non-overlapping edits against one text. Insertions at the same offset keep the
/// order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSet {
    edits: Vec<Edit>,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, at: u32, text: impl Into<String>) {
        self.push(Edit {
            start: at,
            end: at,
            text: text.into(),
        });
    }

    pub fn remove(&mut self, start: u32, end: u32) {
        self.push(Edit {
            start,
            end,
            text: String::new(),
        });
    }

    pub fn replace(&mut self, start: u32, end: u32, text: impl Into<String>) {
        self.push(Edit {
            start,
            end,
            text: text.into(),
        });
    }

    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edit> {
        self.edits.iter()
    }

    /// First pair of edits within this set that overlap.
    pub fn first_conflict(&self) -> Option<(u32, u32)> {
        for (i, a) in self.edits.iter().enumerate() {
            for b in &self.edits[i + 1..] {
                if a != b && a.conflicts_with(b) {
                    return Some((b.start, b.end));
                }
            }
        }
        None
    }

    /// Add every edit of `other`, or none of them. Exact duplicates are dropped, so
    /// two functions sharing a props interface can both ask for the same removal.
    pub fn merge(&mut self, other: EditSet) -> Result<(), (u32, u32)> {
        let mut merged = self.edits.clone();
        for edit in other.edits {
            if merged.contains(&edit) {
                continue;
            }
            if let Some(conflict) = merged.iter().find(|e| e.conflicts_with(&edit)) {
                return Err((conflict.start.min(edit.start), conflict.end.max(edit.end)));
            }
            merged.push(edit);
        }
        self.edits = merged;
        Ok(())
    }

    pub fn apply(&self, text: &str) -> String {
        let mut order: Vec<&Edit> = self.edits.iter().collect();
        order.sort_by_key(|e| (e.start, e.end));

        let mut output = String::with_capacity(text.len() + 256);
        let mut cursor = 0usize;
        for edit in order {
            let start = edit.start as usize;
            if start > cursor {
                output.push_str(&text[cursor..start]);
            }
            output.push_str(&edit.text);
            cursor = cursor.max(edit.end as usize);
        }
        if cursor < text.len() {
            output.push_str(&text[cursor..]);
        }
        output
    }
}

/// Offset just past a `,` or `;` that follows `end`, allowing blanks in between.
fn skip_separator(text: &str, end: u32) -> u32 {
    let bytes = text.as_bytes();
    let mut i = end as usize;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    if i < bytes.len() && (bytes[i] == b',' || bytes[i] == b';') {
        (i + 1) as u32
    } else {
        end
    }
}

/// Start of the line containing `start` when only blanks precede it there.
fn line_start_if_leading(text: &str, start: u32) -> u32 {
    let bytes = text.as_bytes();
    let mut i = start as usize;
    while i > 0 && (bytes[i - 1] == b' ' || bytes[i - 1] == b'\t') {
        i -= 1;
    }
    if i > 0 && bytes[i - 1] == b'\n' {
        i as u32
    } else {
        start
    }
}

/// Byte ranges that drop `list.removed` together with their separators. Each run of
/// consecutive removed elements becomes one range: up to the next kept element when
/// there is one, otherwise from the end of the previous kept element.
pub fn list_removal_ranges(text: &str, list: &ListRemoval) -> Vec<(u32, u32)> {
    let elements = &list.elements;
    let mut ranges = Vec::new();
    let mut i = 0;
    while i < elements.len() {
        if !list.removed.contains(&i) {
            i += 1;
            continue;
        }
        let first = i;
        while i < elements.len() && list.removed.contains(&i) {
            i += 1;
        }
        let last = i - 1;

        let range = if i < elements.len() {
            (elements[first].start, elements[i].start)
        } else if first > 0 {
            (elements[first - 1].end, skip_separator(text, elements[last].end))
        } else {
            let mut end = skip_separator(text, elements[last].end);
            let start = line_start_if_leading(text, elements[first].start);
            if start != elements[first].start && text.as_bytes().get(end as usize) == Some(&b'\n') {
                end += 1;
            }
            (start, end)
        };
        ranges.push(range);
    }
    ranges
}
