//! Briefing synthesis.
//!
//! Renders the whole contract collection into the natural-language document
//! handed to the language model as its system instruction. This text is the
//! entire prompt surface: the model sees nothing else besides the user's
//! literal message, so the format here is pinned and deterministic.

use crate::types::ContractView;

const INSTRUCTIONS: &str = "You are the assistant for a contract tracker. \
Answer questions using only the contract records below. Match a person by \
their client name or by the contract title; if several records could match, \
name each candidate. When asked about pay, cite the salary exactly as \
written, in Indian rupees. When asked about timing or renewals, state the \
days remaining and the contract status. If no record answers the question, \
say the tracker has no matching contract.";

/// Render the full briefing: one instruction paragraph, then one block per
/// contract enumerating every field.
pub fn render_briefing(views: &[ContractView]) -> String {
    let mut out = String::from(INSTRUCTIONS);
    out.push_str("\n\n");

    if views.is_empty() {
        out.push_str("The tracker currently has no contracts.\n");
        return out;
    }

    for view in views {
        out.push_str(&render_contract(view));
        out.push('\n');
    }
    out
}

fn render_contract(view: &ContractView) -> String {
    let c = &view.contract;
    let mut out = format!("Contract #{}: {}\n", c.id, c.title);
    out.push_str(&format!("  Company: {}\n", c.company));
    out.push_str(&format!("  Client: {}\n", c.client_name));
    out.push_str(&format!("  Type: {}\n", c.contract_type));
    out.push_str(&format!("  Period: {} to {}\n", c.start_date, c.end_date));
    out.push_str(&format!(
        "  Status: {} ({})\n",
        view.status,
        remaining_phrase(view.days_remaining)
    ));
    if let Some(salary) = c.salary {
        out.push_str(&format!("  Salary: {}\n", format_inr(salary)));
    }
    if let Some(notes) = &c.notes {
        out.push_str(&format!("  Notes: {}\n", notes));
    }
    out
}

fn remaining_phrase(days: i64) -> String {
    match days {
        d if d < -1 => format!("ended {} days ago", -d),
        -1 => "ended yesterday".to_string(),
        0 => "ends today".to_string(),
        1 => "1 day remaining".to_string(),
        d => format!("{} days remaining", d),
    }
}

/// Format an amount as INR with Indian digit grouping: the last three
/// digits form one group, every group above that has two.
pub fn format_inr(amount: f64) -> String {
    let total_paise = (amount * 100.0).round() as i64;
    let sign = if total_paise < 0 { "-" } else { "" };
    let rupees = (total_paise / 100).unsigned_abs();
    let paise = (total_paise % 100).unsigned_abs();

    let grouped = group_indian(&rupees.to_string());
    if paise == 0 {
        format!("{}₹{}", sign, grouped)
    } else {
        format!("{}₹{}.{:02}", sign, grouped, paise)
    }
}

fn group_indian(digits: &str) -> String {
    let n = digits.len();
    if n <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(n - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut i = head.len();
    while i > 0 {
        let start = i.saturating_sub(2);
        groups.push(&head[start..i]);
        i = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
