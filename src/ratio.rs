//! Split ratio parsing
//!
//! A split configuration is a comma-separated list of tokens, one per page:
//!
//! - `h1:1` splits the page into two strips of equal width
//! - `h35:36:37` splits the page into three strips of widths 35/108, 36/108, 37/108
//! - anything else (`1`, `x`, the empty string) leaves the page as it is
//!
//! The last token applies to every page beyond the end of the list.

use std::str::FromStr;
use crate::error::{Error, Result};

/// Leading character of a token that asks for a horizontal split
pub const SPLIT_MARKER: char = 'h';

/// Ratios governing how one source page is divided
///
/// Ratios are strictly positive and sum to 1.0 (up to floating-point rounding).
#[derive(Debug, Clone, PartialEq)]
pub struct PageRule(Vec<f64>);

impl PageRule {
    /// The rule that keeps a page whole
    pub fn no_split() -> Self {
        PageRule(vec![1.0])
    }

    pub fn ratios(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this rule produces more than one output page
    pub fn is_split(&self) -> bool {
        self.0.len() > 1
    }
}

/// Parse a single token into a [`PageRule`]
///
/// Supported formats:
/// - `"h<a>:<b>[:<c>...]"` → one ratio per weight, each weight divided by the total
/// - anything not starting with `h` → `[1.0]` (the content is not inspected)
///
/// Weights must be positive decimal integers. Whitespace around a weight and a
/// leading `+` are tolerated.
pub fn parse_page_rule(token: &str) -> Result<PageRule> {
    let Some(weights) = token.strip_prefix(SPLIT_MARKER) else {
        return Ok(PageRule::no_split());
    };

    let weights = weights
        .split(':')
        .map(|piece| parse_weight(token, piece))
        .collect::<Result<Vec<u64>>>()?;

    let total: u64 = weights.iter().sum();
    let ratios = weights
        .iter()
        .map(|&w| w as f64 / total as f64)
        .collect();

    Ok(PageRule(ratios))
}

fn parse_weight(token: &str, piece: &str) -> Result<u64> {
    let piece = piece.trim();
    if piece.is_empty() {
        return Err(invalid(token, "empty weight"));
    }

    // u32 keeps the sum of any realistic number of weights inside u64
    let weight: u32 = piece
        .parse()
        .map_err(|_| invalid(token, &format!("'{}' is not a positive integer", piece)))?;

    if weight == 0 {
        return Err(invalid(token, "weights must be greater than zero"));
    }

    Ok(u64::from(weight))
}

fn invalid(token: &str, reason: &str) -> Error {
    Error::InvalidSplitToken {
        token: token.to_string(),
        reason: reason.to_string(),
    }
}

/// Ordered per-page rules parsed from a split configuration
///
/// Never empty: splitting any string on `,` yields at least one token.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSpec {
    rules: Vec<PageRule>,
}

impl SplitSpec {
    pub fn rules(&self) -> &[PageRule] {
        &self.rules
    }

    /// Rule for a 0-based page index, reusing the last rule past the end
    pub fn rule_for_page(&self, index: usize) -> &PageRule {
        let last = self.rules.len() - 1;
        &self.rules[index.min(last)]
    }

    /// Number of pages produced from a source with `source_pages` pages
    pub fn output_page_count(&self, source_pages: usize) -> usize {
        (0..source_pages)
            .map(|i| self.rule_for_page(i).len().max(1))
            .sum()
    }
}

impl Default for SplitSpec {
    fn default() -> Self {
        Self {
            rules: vec![PageRule::no_split()],
        }
    }
}

impl FromStr for SplitSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_split_spec(s)
    }
}

/// Parse a comma-separated split configuration such as `"h1:1,1,h35:36:37"`
pub fn parse_split_spec(spec: &str) -> Result<SplitSpec> {
    let rules = spec
        .split(',')
        .map(parse_page_rule)
        .collect::<Result<Vec<_>>>()?;

    Ok(SplitSpec { rules })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ratios(rule: &PageRule, expected: &[f64]) {
        assert_eq!(rule.len(), expected.len(), "ratio count for {:?}", rule);
        for (got, want) in rule.ratios().iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "expected {}, got {}", want, got);
        }
    }

    #[test]
    fn test_parse_equal_halves() {
        let rule = parse_page_rule("h1:1").unwrap();
        assert_ratios(&rule, &[0.5, 0.5]);
        assert!(rule.is_split());
    }

    #[test]
    fn test_parse_weighted_thirds() {
        let rule = parse_page_rule("h35:36:37").unwrap();
        assert_ratios(&rule, &[35.0 / 108.0, 36.0 / 108.0, 37.0 / 108.0]);

        let sum: f64 = rule.ratios().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_marker_tokens_do_not_split() {
        for token in ["1", "x", "", "H1:1", " h1:1", "v2:1", "garbage:::"] {
            let rule = parse_page_rule(token).unwrap();
            assert_eq!(rule, PageRule::no_split(), "token {:?}", token);
            assert!(!rule.is_split());
        }
    }

    #[test]
    fn test_single_weight_is_no_split() {
        let rule = parse_page_rule("h7").unwrap();
        assert_ratios(&rule, &[1.0]);
        assert!(!rule.is_split());
    }

    #[test]
    fn test_weights_tolerate_whitespace_and_plus() {
        let rule = parse_page_rule("h 1 :+3").unwrap();
        assert_ratios(&rule, &[0.25, 0.75]);
    }

    #[test]
    fn test_malformed_tokens_fail() {
        for token in ["h1:abc", "h", "h1:", "h:1", "h1::2", "h0:1", "h-1:2", "h1.5:2"] {
            let result = parse_page_rule(token);
            assert!(
                matches!(result, Err(Error::InvalidSplitToken { .. })),
                "token {:?} should fail, got {:?}",
                token,
                result
            );
        }
    }

    #[test]
    fn test_error_mentions_token() {
        let err = parse_page_rule("h1:abc").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("h1:abc"), "message: {}", message);
        assert!(message.contains("abc"), "message: {}", message);
    }

    #[test]
    fn test_parse_split_spec_in_order() {
        let spec = parse_split_spec("h1:1,1,h35:36:37").unwrap();
        assert_eq!(spec.rules().len(), 3);
        assert_eq!(spec.rules()[0].len(), 2);
        assert_eq!(spec.rules()[1], PageRule::no_split());
        assert_eq!(spec.rules()[2].len(), 3);
    }

    #[test]
    fn test_empty_config_is_single_no_split_rule() {
        let spec = parse_split_spec("").unwrap();
        assert_eq!(spec, SplitSpec::default());
        assert_eq!(spec.output_page_count(4), 4);
    }

    #[test]
    fn test_malformed_piece_fails_whole_spec() {
        let result = parse_split_spec("h1:1,1,h2:x");
        assert!(matches!(result, Err(Error::InvalidSplitToken { ref token, .. }) if token == "h2:x"));
    }

    #[test]
    fn test_rule_for_page_carries_forward() {
        let spec: SplitSpec = "h1:1,1,h1:2:3".parse().unwrap();
        assert_eq!(spec.rule_for_page(0).len(), 2);
        assert_eq!(spec.rule_for_page(1).len(), 1);
        for page in 2..10 {
            assert_eq!(spec.rule_for_page(page), &spec.rules()[2], "page {}", page);
        }
    }

    #[test]
    fn test_output_page_count() {
        let spec = parse_split_spec("h1:1,1,h35:36:37").unwrap();
        // 2 + 1 + 3 + 3 + 3
        assert_eq!(spec.output_page_count(5), 12);
        assert_eq!(spec.output_page_count(1), 2);
        assert_eq!(spec.output_page_count(0), 0);
    }

    #[test]
    fn test_large_weights_do_not_overflow() {
        let rule = parse_page_rule("h4294967295:4294967295").unwrap();
        assert_ratios(&rule, &[0.5, 0.5]);
    }
}
