//! Default approval letter, used when a PI approves without writing one

use chrono::{DateTime, Utc};
use srat_types::{Request, User};

/// Render the standard approval letter for `request`, signed off by `approver`.
pub fn default_approval_letter(request: &Request, approver: &User, at: DateTime<Utc>) -> String {
    let mut letter = String::new();
    letter.push_str("APPROVAL LETTER\n\n");
    letter.push_str(&format!("Date: {}\n", at.format("%Y-%m-%d")));
    letter.push_str(&format!("Request: {}\n", request.id));
    letter.push_str(&format!("Requested by: {}\n", request.created_by_name));
    letter.push_str(&format!("Funder: {}\n", request.funder));
    letter.push_str(&format!("Program: {}\n\n", request.program));

    letter.push_str("Items:\n");
    for item in &request.items {
        letter.push_str(&format!("  - {}: {}\n", item.category, item.amount));
    }
    letter.push_str(&format!("Total: {}\n\n", request.total()));

    letter.push_str(&format!(
        "The above expenses are approved for reimbursement and forwarded to Finance.\n\n{} ({})\n",
        approver.name, approver.role
    ));
    letter
}
