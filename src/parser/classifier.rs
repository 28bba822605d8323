//! Line classifier for GLR debug output.
//!
//! Turns one raw trace line into at most one [`TraceEvent`]. Classification
//! is tried in a fixed order and the first matching rule wins:
//!
//! 1. `Next token is token ...`
//! 2. `... Splitting off stack N [from P] ...`
//! 3. `... Stack N ... dies ...`
//! 4. `Rename stack A -> B`
//! 5. `Reduced stack N by rule R (line L)`
//! 6. `Cleanup:`, `[PASS]`, `[FAIL]`
//!
//! Lines that match a rule's trigger but not its full shape are skipped,
//! never reported as errors.

use super::event::{BoundaryKind, RuleSite, StackId, TraceEvent};
use crate::utils::config::TokenExtraction;
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

const TOKEN_PREFIX: &str = "Next token is token";
const SPLIT_MARKER: &str = "Splitting off stack";
const RENAME_PREFIX: &str = "Rename stack";
const REDUCED_PREFIX: &str = "Reduced stack";
const CLEANUP_PREFIX: &str = "Cleanup:";
const PASS_PREFIX: &str = "[PASS]";
const FAIL_PREFIX: &str = "[FAIL]";

/// Zero-based whitespace field holding the token symbol
const TOKEN_FIELD_INDEX: usize = 4;

static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Next token is token\s+(?P<token>[^\s(]+)").unwrap());

static SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Splitting off stack (?P<stack>\d+)(?: from (?P<parent>\d+))?").unwrap()
});

static DEATH_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"Stack (?P<stack>\d+)").unwrap());

static RENAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Rename stack (?P<from>\d+) -> (?P<to>\d+)").unwrap());

static REDUCED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Reduced stack (?P<stack>\d+) by rule (?P<rule>\d+) \(line (?P<line>\d+)\)")
        .unwrap()
});

/// Classify a single trace line
///
/// **Public** - main entry point for line classification
///
/// The line is trimmed before matching. Returns `None` for unrecognized or
/// malformed lines.
pub fn classify_line(line: &str, extraction: TokenExtraction) -> Option<TraceEvent> {
    let line = line.trim();

    if line.starts_with(TOKEN_PREFIX) {
        return Some(TraceEvent::Token(extract_token(line, extraction)));
    }

    if line.contains(SPLIT_MARKER) {
        return parse_split(line);
    }

    if line.contains("Stack ") && line.contains("dies") {
        return parse_death(line);
    }

    if line.starts_with(RENAME_PREFIX) {
        return parse_rename(line);
    }

    if line.starts_with(REDUCED_PREFIX) {
        return parse_reduction(line);
    }

    boundary_kind(line).map(TraceEvent::Boundary)
}

/// Pull the lookahead symbol out of a `Next token is token` line
///
/// `Positional` reproduces the historical behavior of taking the fifth
/// whitespace field verbatim, so `ID(1.5)` stays glued together. `Named`
/// stops at the opening parenthesis.
pub fn extract_token(line: &str, extraction: TokenExtraction) -> Option<String> {
    let token = match extraction {
        TokenExtraction::Positional => line
            .split_whitespace()
            .nth(TOKEN_FIELD_INDEX)
            .map(str::to_string),
        TokenExtraction::Named => TOKEN_REGEX
            .captures(line)
            .map(|caps| caps["token"].to_string()),
    };

    if token.is_none() {
        trace!("Token announcement without a symbol: {}", line);
    }

    token
}

fn parse_split(line: &str) -> Option<TraceEvent> {
    let Some(caps) = SPLIT_REGEX.captures(line) else {
        trace!("Skipping malformed split line: {}", line);
        return None;
    };

    let stack = parse_id(&caps["stack"])?;
    let parent = caps.name("parent").and_then(|m| parse_id(m.as_str()));

    Some(TraceEvent::Split { stack, parent })
}

fn parse_death(line: &str) -> Option<TraceEvent> {
    let caps = DEATH_REGEX.captures(line)?;
    let stack = parse_id(&caps["stack"])?;
    Some(TraceEvent::Death { stack })
}

fn parse_rename(line: &str) -> Option<TraceEvent> {
    let Some(caps) = RENAME_REGEX.captures(line) else {
        trace!("Skipping malformed rename line: {}", line);
        return None;
    };

    Some(TraceEvent::Rename {
        from: parse_id(&caps["from"])?,
        to: parse_id(&caps["to"])?,
    })
}

fn parse_reduction(line: &str) -> Option<TraceEvent> {
    let Some(caps) = REDUCED_REGEX.captures(line) else {
        trace!("Skipping malformed reduction line: {}", line);
        return None;
    };

    let stack = parse_id(&caps["stack"])?;
    let rule = caps["rule"].parse().ok()?;
    let line_no = caps["line"].parse().ok()?;

    Some(TraceEvent::Reduction {
        stack,
        site: RuleSite::new(rule, line_no),
    })
}

fn boundary_kind(line: &str) -> Option<BoundaryKind> {
    if line.starts_with(CLEANUP_PREFIX) {
        Some(BoundaryKind::Cleanup)
    } else if line.starts_with(PASS_PREFIX) {
        Some(BoundaryKind::Pass)
    } else if line.starts_with(FAIL_PREFIX) {
        Some(BoundaryKind::Fail)
    } else {
        None
    }
}

// Digit runs too long for u64 are treated as malformed.
fn parse_id(digits: &str) -> Option<StackId> {
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> Option<TraceEvent> {
        classify_line(line, TokenExtraction::Positional)
    }

    #[test]
    fn test_token_positional() {
        assert_eq!(
            classify("Next token is token IDENTIFIER (1.5: )"),
            Some(TraceEvent::Token(Some("IDENTIFIER".to_string())))
        );
    }

    #[test]
    fn test_token_too_short_clears() {
        assert_eq!(classify("Next token is token"), Some(TraceEvent::Token(None)));
    }

    #[test]
    fn test_token_named_stops_at_paren() {
        let line = "Next token is token ID(1.5)";
        assert_eq!(
            extract_token(line, TokenExtraction::Positional),
            Some("ID(1.5)".to_string())
        );
        assert_eq!(
            extract_token(line, TokenExtraction::Named),
            Some("ID".to_string())
        );
    }

    #[test]
    fn test_split_with_and_without_parent() {
        assert_eq!(
            classify("Splitting off stack 3 from 1."),
            Some(TraceEvent::Split {
                stack: 3,
                parent: Some(1)
            })
        );
        assert_eq!(
            classify("Splitting off stack 7"),
            Some(TraceEvent::Split {
                stack: 7,
                parent: None
            })
        );
    }

    #[test]
    fn test_split_without_id_is_skipped() {
        assert_eq!(classify("Splitting off stack ???"), None);
    }

    #[test]
    fn test_death() {
        assert_eq!(
            classify("Stack 4 Stack 4 dies."),
            Some(TraceEvent::Death { stack: 4 })
        );
    }

    #[test]
    fn test_rename_and_reduction() {
        assert_eq!(
            classify("Rename stack 2 -> 5."),
            Some(TraceEvent::Rename { from: 2, to: 5 })
        );
        assert_eq!(
            classify("Reduced stack 1 by rule 42 (line 310); action deferred."),
            Some(TraceEvent::Reduction {
                stack: 1,
                site: RuleSite::new(42, 310)
            })
        );
        assert_eq!(classify("Reduced stack 1 by rule x"), None);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(
            classify("Cleanup: popping token ';' ()"),
            Some(TraceEvent::Boundary(BoundaryKind::Cleanup))
        );
        assert_eq!(
            classify("[PASS] test/a.js - no syntax errors detected."),
            Some(TraceEvent::Boundary(BoundaryKind::Pass))
        );
        assert_eq!(
            classify("[FAIL] test/b.js"),
            Some(TraceEvent::Boundary(BoundaryKind::Fail))
        );
    }

    #[test]
    fn test_leading_whitespace_is_trimmed() {
        assert_eq!(
            classify("   Rename stack 1 -> 0."),
            Some(TraceEvent::Rename { from: 1, to: 0 })
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(classify("Entering state 17"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("Stack 3 survives"), None);
    }

    #[test]
    fn test_oversized_id_is_skipped() {
        assert_eq!(classify("Splitting off stack 99999999999999999999999 from 0"), None);
    }
}
