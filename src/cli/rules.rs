//! Listing of the built-in rules

use crate::ast::NodeType;
use crate::rules::builtin::builtin_rules;

/// What `jsweep rules` shows for one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    pub name: String,
    pub target: NodeType,
    pub description: String,
}

pub fn list_rules() -> Vec<RuleInfo> {
    builtin_rules()
        .iter()
        .map(|rule| RuleInfo {
            name: rule.name().to_string(),
            target: rule.target(),
            description: rule.description().to_string(),
        })
        .collect()
}

/// One rule per line: name, target node type, description.
pub fn render_rule_list(rules: &[RuleInfo]) -> String {
    let width = rules.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let mut out = String::from("BUILT-IN RULES\n\n");
    for rule in rules {
        out.push_str(&format!(
            "  {:<width$}  [{}]\n      {}\n",
            rule.name,
            rule.target,
            rule.description,
            width = width
        ));
    }
    out.push_str("\nDisable a rule with --disable '<name>' or \"disabled_rules\" in a config file.\n");
    out
}
