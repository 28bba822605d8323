use glr_trace_analyzer::parser::{
    classify_line, open_trace, BoundaryKind, RuleSite, TraceEvent, TraceLines,
};
use glr_trace_analyzer::utils::config::TokenExtraction;
use std::io::Write;
use tempfile::NamedTempFile;

fn classify(line: &str) -> Option<TraceEvent> {
    classify_line(line, TokenExtraction::Positional)
}

#[test]
fn test_bison_style_lines() {
    let cases = [
        (
            "Next token is token PUNC_SEMI (12.30: )",
            Some(TraceEvent::Token(Some("PUNC_SEMI".to_string()))),
        ),
        (
            "Splitting off stack 12 from 3.",
            Some(TraceEvent::Split {
                stack: 12,
                parent: Some(3),
            }),
        ),
        (
            "Stack 5 Stack 5 dies.",
            Some(TraceEvent::Death { stack: 5 }),
        ),
        (
            "Rename stack 3 -> 1.",
            Some(TraceEvent::Rename { from: 3, to: 1 }),
        ),
        (
            "Reduced stack 2 by rule 118 (line 902); action deferred.  Now in state 44.",
            Some(TraceEvent::Reduction {
                stack: 2,
                site: RuleSite::new(118, 902),
            }),
        ),
        (
            "Cleanup: discarding lookahead token $end ()",
            Some(TraceEvent::Boundary(BoundaryKind::Cleanup)),
        ),
        ("Reading a token", None),
        ("Now at end of input.", None),
        ("Stack 0 Entering state 0", None),
    ];

    for (line, expected) in cases {
        assert_eq!(classify(line), expected, "line: {}", line);
    }
}

#[test]
fn test_each_line_yields_one_event() {
    // Contains both a split phrase and a death phrase; split wins
    assert_eq!(
        classify("Splitting off stack 4 from 2; Stack 2 dies"),
        Some(TraceEvent::Split {
            stack: 4,
            parent: Some(2)
        })
    );
}

#[test]
fn test_named_extraction_differs_only_on_glued_locations() {
    let glued = "Next token is token ID(1.5)";
    let spaced = "Next token is token ID (1.5)";

    assert_eq!(
        classify_line(glued, TokenExtraction::Named),
        Some(TraceEvent::Token(Some("ID".to_string())))
    );
    assert_eq!(
        classify_line(glued, TokenExtraction::Positional),
        Some(TraceEvent::Token(Some("ID(1.5)".to_string())))
    );
    assert_eq!(
        classify_line(spaced, TokenExtraction::Named),
        classify_line(spaced, TokenExtraction::Positional)
    );
}

#[test]
fn test_read_trace_file_with_bad_bytes() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"Next token is token A (1.1)\r\n").unwrap();
    file.write_all(b"\xfe\xff junk\n").unwrap();
    file.write_all(b"Splitting off stack 1 from 0").unwrap();

    let lines: Vec<String> = TraceLines::new(open_trace(file.path()).unwrap())
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Next token is token A (1.1)");
    assert_eq!(lines[2], "Splitting off stack 1 from 0");
}
