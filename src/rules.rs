use crate::errors::Result;
use regex::{Captures, Regex};
use std::borrow::Cow;

// The seven print-call shapes, in required application order.
const DEBUG_SINGLE: &str = r"print\('DEBUG: ([^']+)'\);";
const DEBUG_SINGLE_INTERP: &str = r"print\('DEBUG: ([^:]+): \$([^']+)'\);";
const ERROR_IN_METHOD: &str = r"print\('DEBUG: Error in ([^:]+): \$e'\);";
const ERROR_SINGLE: &str = r"print\('DEBUG: ([^:]+Error[^:]*): \$e'\);";
const ERROR_DOUBLE: &str = r#"print\("([^:]+Error[^:]*): \$e"\);"#;
const DEBUG_DOUBLE: &str = r#"print\("([^"]+)"\);"#;
const DEBUG_DOUBLE_INTERP: &str = r#"print\("([^:]+): \$([^"]+)"\);"#;

/// One rewrite rule: a print-call shape and a builder that produces the
/// replacement `Logger` call for a match.
///
/// `defer_to` holds the shapes of later, more specific rules. A match that
/// one of them also claims is left untouched so the later rule can rewrite
/// it; this keeps the rules disjoint in effect while preserving their fixed
/// application order. Without it, rule (a) would swallow every single-quoted
/// `DEBUG:` print and the error-classifying rules (c)/(d) would never fire.
pub struct RewriteRule {
    pub name: &'static str,
    pattern: Regex,
    defer_to: Vec<Regex>,
    build: fn(&Captures, &str) -> String,
}

fn debug_msg(caps: &Captures, tag: &str) -> String {
    format!("Logger.d('{tag}', '{}');", &caps[1])
}

fn debug_msg_interp(caps: &Captures, tag: &str) -> String {
    format!("Logger.d('{tag}', '{}: ${}');", &caps[1], &caps[2])
}

fn error_in_method(caps: &Captures, tag: &str) -> String {
    format!("Logger.e('{tag}', 'Error in {}', e);", &caps[1])
}

fn error_msg(caps: &Captures, tag: &str) -> String {
    format!("Logger.e('{tag}', '{}', e);", &caps[1])
}

/// Compiles the seven rewrite rules in their required application order.
///
/// Rules are applied strictly sequentially, each against the output of all
/// prior rules, and each as a global non-overlapping replace. The
/// `Logger.d(...)` / `Logger.e(...)` output tokens match none of the input
/// shapes, so a second pass over migrated text is a no-op.
pub fn rewrite_rules() -> Result<Vec<RewriteRule>> {
    Ok(vec![
        // (a) print('DEBUG: msg');
        RewriteRule {
            name: "debug_single_quoted",
            pattern: Regex::new(DEBUG_SINGLE)?,
            // (c)/(d) shapes are a subset of (b)'s, so deferring to (b)
            // covers all interpolation tails.
            defer_to: vec![Regex::new(DEBUG_SINGLE_INTERP)?],
            build: debug_msg,
        },
        // (b) print('DEBUG: msg: $var');
        RewriteRule {
            name: "debug_single_quoted_interp",
            pattern: Regex::new(DEBUG_SINGLE_INTERP)?,
            defer_to: vec![Regex::new(ERROR_IN_METHOD)?, Regex::new(ERROR_SINGLE)?],
            build: debug_msg_interp,
        },
        // (c) print('DEBUG: Error in method: $e');
        RewriteRule {
            name: "error_in_method",
            pattern: Regex::new(ERROR_IN_METHOD)?,
            defer_to: vec![],
            build: error_in_method,
        },
        // (d) print('DEBUG: ...Error...: $e');
        RewriteRule {
            name: "error_message_single_quoted",
            pattern: Regex::new(ERROR_SINGLE)?,
            defer_to: vec![],
            build: error_msg,
        },
        // (e) print("...Error...: $e");
        RewriteRule {
            name: "error_message_double_quoted",
            pattern: Regex::new(ERROR_DOUBLE)?,
            defer_to: vec![],
            build: error_msg,
        },
        // (f) print("msg");
        RewriteRule {
            name: "debug_double_quoted",
            pattern: Regex::new(DEBUG_DOUBLE)?,
            defer_to: vec![],
            build: debug_msg,
        },
        // (g) print("msg: $var"); almost always consumed by (f) first,
        // kept so the shape list stays complete
        RewriteRule {
            name: "debug_double_quoted_interp",
            pattern: Regex::new(DEBUG_DOUBLE_INTERP)?,
            defer_to: vec![],
            build: debug_msg_interp,
        },
    ])
}

/// Applies all rules in order against the full content, returning the
/// rewritten text and the number of substitutions made.
pub fn apply_rules(rules: &[RewriteRule], content: &str, tag: &str) -> (String, usize) {
    let mut text = Cow::Borrowed(content);
    let mut total = 0;

    for rule in rules {
        let mut changes = 0;
        let replaced = rule.pattern.replace_all(text.as_ref(), |caps: &Captures| {
            if rule.defer_to.iter().any(|re| re.is_match(&caps[0])) {
                caps[0].to_string()
            } else {
                changes += 1;
                (rule.build)(caps, tag)
            }
        });
        if changes > 0 {
            let owned = replaced.into_owned();
            text = Cow::Owned(owned);
            total += changes;
        }
    }

    (text.into_owned(), total)
}
