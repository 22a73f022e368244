use crate::domain::department::Department;

use super::types::CategoryRule;

/// Ordered rule table. The first rule whose pattern occurs in a page id wins,
/// so more specific patterns must precede the generic ones they contain.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule { pattern: "pricing", department: Department::Sales, base_score: 5.0, category: "Pricing" },
    CategoryRule { pattern: "quote", department: Department::Sales, base_score: 4.0, category: "Quotes" },
    CategoryRule { pattern: "product", department: Department::Sales, base_score: 3.0, category: "Products" },
    CategoryRule { pattern: "billing", department: Department::Billing, base_score: 5.0, category: "Billing" },
    CategoryRule { pattern: "invoice", department: Department::Billing, base_score: 4.0, category: "Invoices" },
    CategoryRule { pattern: "payment", department: Department::Billing, base_score: 4.0, category: "Payments" },
    CategoryRule { pattern: "refund", department: Department::Billing, base_score: 3.0, category: "Refunds" },
    CategoryRule { pattern: "tech", department: Department::Tech, base_score: 4.0, category: "Technical help" },
    CategoryRule { pattern: "faq-software", department: Department::Tech, base_score: 3.0, category: "Software FAQ" },
    CategoryRule { pattern: "faq-hardware", department: Department::Tech, base_score: 3.0, category: "Hardware FAQ" },
    CategoryRule { pattern: "install", department: Department::Tech, base_score: 3.0, category: "Installation" },
    CategoryRule { pattern: "account", department: Department::Support, base_score: 3.0, category: "Account" },
    CategoryRule { pattern: "warranty", department: Department::Support, base_score: 3.0, category: "Warranty" },
    CategoryRule { pattern: "faq", department: Department::Support, base_score: 2.0, category: "General FAQ" },
    CategoryRule { pattern: "contact", department: Department::Support, base_score: 1.0, category: "Contact" },
];

// General has no entry; it falls through to GENERIC_REASON.
const REASONS: &[(Department, &str)] = &[
    (Department::Sales, "You've been exploring pricing and product pages"),
    (Department::Support, "You've been browsing account and general help topics"),
    (Department::Tech, "You've been looking at technical help and software guides"),
    (Department::Billing, "You've been reviewing billing, invoice, and payment pages"),
];

pub const GENERIC_REASON: &str = "Based on your overall browsing history";

/// First rule in priority order whose pattern occurs in `page`.
pub fn match_rule(page: &str) -> Option<&'static CategoryRule> {
    CATEGORY_RULES.iter().find(|rule| rule.matches(page))
}

pub fn reason_for(department: Department) -> &'static str {
    REASONS
        .iter()
        .find(|(candidate, _)| *candidate == department)
        .map(|(_, reason)| *reason)
        .unwrap_or(GENERIC_REASON)
}
