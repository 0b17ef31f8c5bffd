//! Structural validation of parsed grammars.
//!
//! These checks run as part of language construction, between JSON
//! deserialization and the final [`Language`](crate::load::Language) object.
//! Hard violations (an empty rule table, undefined symbol references,
//! malformed external tokens) fail the load; soft findings (unreachable
//! rules, inconsistent precedence) are reported through [`log`].

use crate::grammar::{Grammar, Rule, RuleType};
use std::collections::{HashMap, HashSet};

/// A structural rule violation found while checking a grammar.
#[derive(Debug)]
pub struct ValidationError {
    /// The descriptive human-readable error message.
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Performs structural validation of a parsed [`Grammar`].
///
/// Passes, in order:
///
/// - The rule table must be non-empty.
/// - Every referenced symbol must be defined, counting external tokens.
/// - Every terminal rule must carry its literal or pattern source.
/// - External tokens must be named symbols (the scanner matches by index,
///   so anonymous or pattern externals cannot correspond to scanner slots).
/// - Unreachable rules are logged as warnings.
/// - Conflicting precedence levels are logged as warnings.
///
/// # Errors
///
/// Returns a [`ValidationError`] on the first hard violation.
pub fn validate(grammar: &Grammar) -> Result<(), ValidationError> {
    if grammar.rules.is_empty() {
        return Err(ValidationError::new("grammar has no rules"));
    }

    check_undefined_symbols(grammar)?;
    check_terminals(grammar)?;
    check_external_tokens(grammar)?;

    // Soft findings only below this point
    check_unreachable_rules(grammar);
    check_precedence(grammar);

    Ok(())
}

fn check_undefined_symbols(grammar: &Grammar) -> Result<(), ValidationError> {
    let mut defined: HashSet<&str> = grammar.rules.keys().map(String::as_str).collect();
    defined.extend(grammar.external_names());

    for (rule_name, rule) in &grammar.rules {
        check_rule_symbols(rule, &defined, rule_name)?;
    }

    Ok(())
}

fn check_rule_symbols(
    rule: &Rule,
    defined: &HashSet<&str>,
    context: &str,
) -> Result<(), ValidationError> {
    match rule.rule_type {
        RuleType::Symbol => {
            if let Some(name) = &rule.name {
                if !defined.contains(name.as_str()) {
                    return Err(ValidationError::new(format!(
                        "undefined symbol '{name}' referenced in rule '{context}'"
                    )));
                }
            }
        }

        RuleType::Choice | RuleType::Seq => {
            for member in rule.members.as_deref().unwrap_or_default() {
                check_rule_symbols(member, defined, context)?;
            }
        }

        RuleType::Repeat
        | RuleType::Repeat1
        | RuleType::Prec
        | RuleType::PrecLeft
        | RuleType::PrecRight
        | RuleType::PrecDynamic
        | RuleType::Field
        | RuleType::Alias
        | RuleType::Token
        | RuleType::ImmediateToken => {
            if let Some(content) = &rule.content {
                check_rule_symbols(content, defined, context)?;
            }
        }

        RuleType::Blank | RuleType::String | RuleType::Pattern | RuleType::Reserved => {
            // terminals / others: nothing to traverse
        }
    }
    Ok(())
}

fn check_terminals(grammar: &Grammar) -> Result<(), ValidationError> {
    for (rule_name, rule) in &grammar.rules {
        check_rule_terminals(rule, rule_name)?;
    }
    Ok(())
}

fn check_rule_terminals(rule: &Rule, context: &str) -> Result<(), ValidationError> {
    if rule.is_terminal() {
        let source = rule.string_value().or_else(|| rule.pattern_value());
        if source.is_none() {
            return Err(ValidationError::new(format!(
                "{} terminal in rule '{context}' has no source text",
                rule.type_name()
            )));
        }
    }

    for member in rule.members.as_deref().unwrap_or_default() {
        check_rule_terminals(member, context)?;
    }
    if let Some(content) = &rule.content {
        check_rule_terminals(content, context)?;
    }
    Ok(())
}

fn check_external_tokens(grammar: &Grammar) -> Result<(), ValidationError> {
    for (index, external) in grammar
        .externals
        .as_deref()
        .unwrap_or_default()
        .iter()
        .enumerate()
    {
        match external.rule_type {
            RuleType::Symbol if external.name.is_some() => {}
            RuleType::String => {}
            _ => {
                return Err(ValidationError::new(format!(
                    "external token #{index} is a {} rule, expected a named SYMBOL or STRING",
                    external.type_name()
                )));
            }
        }
    }
    Ok(())
}

fn check_unreachable_rules(grammar: &Grammar) {
    // FreeMarker's root rule is "template"; fall back to an arbitrary rule
    // for fixtures that name theirs differently.
    let entry_point = if grammar.rules.contains_key("template") {
        "template"
    } else if let Some(first) = grammar.rules.keys().next() {
        first
    } else {
        return;
    };

    let mut reachable = HashSet::new();
    let mut to_visit = vec![entry_point.to_string()];

    while let Some(rule_name) = to_visit.pop() {
        if !reachable.insert(rule_name.clone()) {
            continue; // Already visited
        }

        if let Some(rule) = grammar.rules.get(&rule_name) {
            collect_referenced_symbols(rule, &mut to_visit);
        }
    }

    for rule_name in grammar.rules.keys() {
        let inline_contains = grammar
            .inline
            .as_ref()
            .is_some_and(|v| v.contains(rule_name));

        if !reachable.contains(rule_name) && !inline_contains {
            log::warn!("unreachable rule '{rule_name}'");
        }
    }
}

fn collect_referenced_symbols(rule: &Rule, symbols: &mut Vec<String>) {
    match rule.rule_type {
        RuleType::Symbol => {
            if let Some(name) = &rule.name {
                symbols.push(name.clone());
            }
        }

        RuleType::Choice | RuleType::Seq => {
            for member in rule.members.as_deref().unwrap_or_default() {
                collect_referenced_symbols(member, symbols);
            }
        }

        RuleType::Repeat
        | RuleType::Repeat1
        | RuleType::Prec
        | RuleType::PrecLeft
        | RuleType::PrecRight
        | RuleType::PrecDynamic
        | RuleType::Field
        | RuleType::Alias
        | RuleType::Token
        | RuleType::ImmediateToken => {
            if let Some(content) = &rule.content {
                collect_referenced_symbols(content, symbols);
            }
        }

        RuleType::Blank | RuleType::String | RuleType::Pattern | RuleType::Reserved => {
            // nothing to collect
        }
    }
}

fn check_precedence(grammar: &Grammar) {
    let mut prec_levels: HashMap<String, Vec<i32>> = HashMap::new();

    for (rule_name, rule) in &grammar.rules {
        collect_precedence_levels(rule, &mut prec_levels, rule_name);
    }

    for (rule, levels) in &prec_levels {
        if levels.len() > 1 {
            log::warn!("rule '{rule}' has multiple precedence levels: {levels:?}");
        }
    }
}

fn collect_precedence_levels(rule: &Rule, levels: &mut HashMap<String, Vec<i32>>, context: &str) {
    match rule.rule_type {
        RuleType::Prec | RuleType::PrecLeft | RuleType::PrecRight | RuleType::PrecDynamic => {
            if let Some(p) = rule.precedence() {
                levels.entry(context.to_string()).or_default().push(p);
            }
            if let Some(content) = &rule.content {
                collect_precedence_levels(content, levels, context);
            }
        }

        RuleType::Choice | RuleType::Seq => {
            for member in rule.members.as_deref().unwrap_or_default() {
                collect_precedence_levels(member, levels, context);
            }
        }

        RuleType::Repeat | RuleType::Repeat1 | RuleType::Field | RuleType::Alias => {
            if let Some(content) = &rule.content {
                collect_precedence_levels(content, levels, context);
            }
        }

        _ => {}
    }
}
