use std::collections::HashMap;
use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use super::{Annotation, AnnotationId, AnnotationSet};

/// Convert a zero-based index to a base-26 label: A, B, ..., Z, AA, AB, ...
fn index_to_base26_label(mut n: usize) -> String {
    let mut result = String::new();
    loop {
        let remainder = n % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

struct IncludedSpan {
    annotation: Annotation,
    /// Attribute whose value names the id of a linked span in the same set.
    link_attribute: Option<String>,
}

/// Renders a text with underlines for selected annotations.
///
/// ```text
/// John said he left
/// ╰──╯[A] NP[0,4)#1
///           ╰╯NP[10,12)#2 {REF="1"}
///             └─REF─>[A]
/// ```
pub struct AnnotationSetDisplay<'a> {
    text: &'a str,
    included: Vec<IncludedSpan>,
}

impl<'a> AnnotationSetDisplay<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            included: Vec::new(),
        }
    }

    /// Include every annotation of the set.
    pub fn include(&mut self, set: &AnnotationSet) {
        for annotation in set.iter() {
            self.included.push(IncludedSpan {
                annotation: annotation.clone(),
                link_attribute: None,
            });
        }
    }

    /// Include every annotation and draw arrows for the id stored under `attribute`.
    pub fn include_with_links(&mut self, set: &AnnotationSet, attribute: &str) {
        for annotation in set.iter() {
            self.included.push(IncludedSpan {
                annotation: annotation.clone(),
                link_attribute: Some(attribute.to_string()),
            });
        }
    }

    /// Takes self
    pub fn with(mut self, set: &AnnotationSet) -> Self {
        self.include(set);
        self
    }

    /// Takes self, draws links
    pub fn with_links(mut self, set: &AnnotationSet, attribute: &str) -> Self {
        self.include_with_links(set, attribute);
        self
    }

    fn link_target(&self, span: &IncludedSpan) -> Option<(String, AnnotationId)> {
        let attribute = span.link_attribute.as_ref()?;
        let id = span.annotation.attribute(attribute)?.parse().ok()?;
        Some((attribute.clone(), id))
    }

    /// Labels for included spans that are targets of a drawn link.
    fn build_span_labels(&self) -> HashMap<AnnotationId, String> {
        let included_ids: Vec<AnnotationId> =
            self.included.iter().map(|s| s.annotation.id()).collect();
        let mut targets: Vec<AnnotationId> = self
            .included
            .iter()
            .filter_map(|span| self.link_target(span).map(|(_, id)| id))
            .filter(|id| included_ids.contains(id))
            .collect();
        targets.sort_by_key(|id| {
            self.included
                .iter()
                .position(|s| s.annotation.id() == *id)
                .unwrap_or(usize::MAX)
        });
        targets.dedup();

        targets
            .into_iter()
            .enumerate()
            .map(|(i, id)| (id, format!("[{}]", index_to_base26_label(i))))
            .collect()
    }

    /// Display column of a byte offset.
    fn column(&self, offset: usize) -> usize {
        let clamped = offset.min(self.text.len());
        match self.text.get(..clamped) {
            Some(prefix) => UnicodeWidthStr::width(prefix),
            None => clamped,
        }
    }
}

impl<'a> std::fmt::Display for AnnotationSetDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let opening_line: String = self
            .text
            .chars()
            .map(|c| if c == '\n' || c == '\t' || c == '\r' { ' ' } else { c })
            .collect();
        f.write_str(&opening_line)?;

        let span_labels = self.build_span_labels();

        for span in self.included.iter() {
            f.write_char('\n')?;

            let start_col = self.column(span.annotation.start());
            let end_col = self.column(span.annotation.end());
            for _ in 0..start_col {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;
            for _ in (start_col + 1)..end_col.saturating_sub(1) {
                f.write_char('─')?;
            }
            if end_col.saturating_sub(start_col) > 1 {
                f.write_char('╯')?;
            }

            if let Some(label) = span_labels.get(&span.annotation.id()) {
                write!(f, "{} ", label)?;
            }

            write!(f, "{}", span.annotation)?;

            if let Some((attribute, target)) = self.link_target(span) {
                f.write_char('\n')?;
                for _ in 0..start_col + 2 {
                    f.write_char(' ')?;
                }
                let target_str = span_labels
                    .get(&target)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", target));
                write!(f, "└─{}─>{}", attribute, target_str)?;
            }
        }

        Ok(())
    }
}
