//! Ingestion-boundary adapter for historical role spellings.
//!
//! Older user records carry looser role fields: upper-case department
//! names ("OPERATIONS"), coarse department labels where the new model
//! has manager/executive splits, mixed case. This is the single,
//! auditable translation table; it maps spellings only and never
//! re-creates the old permission semantics.

use crate::role::Role;

/// Alias spellings accepted in addition to the canonical tokens.
/// Compared after trimming and ASCII case-folding.
const ALIASES: &[(&str, Role)] = &[
    ("superadmin", Role::SuperAdmin),
    ("root", Role::SuperAdmin),
    ("administrator", Role::Admin),
    ("sales", Role::SalesExecutive),
    ("sales_exec", Role::SalesExecutive),
    ("operations", Role::OpsExecutive),
    ("ops", Role::OpsExecutive),
    ("ops_exec", Role::OpsExecutive),
    ("operations_manager", Role::OpsManager),
    ("operations_lead", Role::OpsLead),
    ("cs", Role::CustomerService),
    ("support", Role::CustomerService),
    ("qc", Role::QcExecutive),
    ("quality", Role::QcExecutive),
    ("accounts", Role::Accountant),
    ("accounting", Role::Accountant),
    ("compliance", Role::ComplianceOfficer),
    ("hr", Role::HrManager),
    ("partner", Role::Agent),
    ("customer", Role::Client),
];

/// Translate a raw role field from an external user record into the
/// canonical enumeration. Unknown spellings yield `None`; the caller
/// decides what an unmapped record means (fail closed downstream).
pub fn map_legacy_role(raw: &str) -> Option<Role> {
    let normalized = raw.trim().to_ascii_lowercase();
    if let Some(role) = Role::parse(&normalized) {
        return Some(role);
    }
    let mapped = ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, role)| *role);
    if mapped.is_none() {
        tracing::warn!(raw, "unmapped legacy role spelling");
    }
    mapped
}
