//! Property tests for offset resolution and span construction.

use cmark_spans_core::link_refs::{link_ref_spans, LinkRefStyle};
use cmark_spans_core::positions::{lines_inclusive, LineCol, LineIndex};
use cmark_spans_core::refine::refine;
use cmark_spans_core::{merge_spans, Role, Span};
use proptest::prelude::*;

const ROLES: [Role; 13] = [
    Role::CodeBlock,
    Role::CodeSpan,
    Role::Emphasis,
    Role::StrongEmphasis,
    Role::Heading,
    Role::BlockQuote,
    Role::Link,
    Role::ListItem,
    Role::ListNumber,
    Role::ListBullet,
    Role::HtmlBlock,
    Role::ThematicBreak,
    Role::LinkRef,
];

/// Markdown-ish text with every line terminator style.
fn markdown_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("\n"),
            Just("\r\n"),
            Just("\r"),
            Just(" "),
            Just("\t"),
            Just("`"),
            Just("#"),
            Just("*"),
            Just("-"),
            Just("1."),
            Just("[a]:"),
            Just("x"),
            Just("é"),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn first_position_is_zero(text in markdown_text()) {
        let index = LineIndex::new(&text);
        if !text.is_empty() {
            prop_assert_eq!(index.resolve(LineCol::new(1, 1)).unwrap(), 0);
        }
        prop_assert_eq!(index.line_start(1).unwrap(), 0);
    }

    #[test]
    fn next_line_starts_after_previous_lines(text in markdown_text()) {
        let index = LineIndex::new(&text);
        let lines: Vec<&str> = lines_inclusive(&text).map(|(_, line)| line).collect();
        for n in 0..=lines.len() {
            let expected: usize = lines[..n].iter().map(|l| l.len()).sum();
            prop_assert_eq!(index.line_start(n + 1).unwrap(), expected);
        }
    }

    #[test]
    fn lines_cover_the_whole_text(text in markdown_text()) {
        let joined: String = lines_inclusive(&text).map(|(_, line)| line).collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn refined_spans_stay_in_bounds(
        text in markdown_text(),
        a in 0usize..64,
        b in 0usize..64,
        role_index in 0usize..ROLES.len(),
    ) {
        let boundaries: Vec<usize> = (0..=text.len())
            .filter(|&i| text.is_char_boundary(i))
            .collect();
        let mut start = boundaries[a % boundaries.len()];
        let mut end = boundaries[b % boundaries.len()];
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }

        let refined = refine(ROLES[role_index], &text, start, end);
        prop_assert!(refined.start <= refined.end);
        prop_assert!(refined.end <= text.len());

        let span = Span::new(refined.role, refined.start, refined.end, &text).unwrap();
        prop_assert_eq!(span.text(), &text[span.start()..span.end()]);
    }

    #[test]
    fn refinement_is_deterministic(text in markdown_text(), role_index in 0usize..ROLES.len()) {
        let role = ROLES[role_index];
        prop_assert_eq!(refine(role, &text, 0, text.len()), refine(role, &text, 0, text.len()));
    }

    #[test]
    fn link_ref_spans_match_their_text(text in markdown_text()) {
        for style in [LinkRefStyle::Label, LinkRefStyle::Line] {
            let spans = link_ref_spans(&text, style).unwrap();
            for span in &spans {
                prop_assert!(span.start() <= span.end());
                prop_assert!(span.end() <= text.len());
                prop_assert_eq!(span.text(), &text[span.start()..span.end()]);
            }
        }
    }

    #[test]
    fn merged_tokens_are_ordered(text in markdown_text()) {
        let labels = link_ref_spans(&text, LinkRefStyle::Label).unwrap();
        let lines = link_ref_spans(&text, LinkRefStyle::Line).unwrap();
        let expected = labels.len() + lines.len();

        let tokens = merge_spans(lines, labels);
        prop_assert_eq!(tokens.len(), expected);
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].start() <= pair[1].start());
            if pair[0].start() == pair[1].start() {
                // Whole-line spans were merged first and must stay first.
                prop_assert!(!(pair[0].role() == Role::Link && pair[1].role() == Role::LinkRef));
            }
        }
    }
}
