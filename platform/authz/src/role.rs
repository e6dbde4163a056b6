use serde::{Deserialize, Serialize};

/// Closed set of roles recognized by the suite.
///
/// Roles exist only at definition time; there is no dynamic role creation.
/// A role's privilege level and permission grants live in
/// [`crate::PolicySet`], not here — this type only carries identity,
/// spelling, and display data.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    SalesManager,
    SalesExecutive,
    OpsManager,
    OpsExecutive,
    OpsLead,
    CustomerService,
    QcExecutive,
    Accountant,
    ComplianceOfficer,
    HrManager,
    Agent,
    Client,
}

/// Display label for role spellings that fail to parse.
pub const UNKNOWN_ROLE_LABEL: &str = "Unknown Role";

impl Role {
    /// Every recognized role, in descending privilege order.
    pub const ALL: [Role; 14] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::OpsManager,
        Role::SalesManager,
        Role::HrManager,
        Role::ComplianceOfficer,
        Role::OpsLead,
        Role::Accountant,
        Role::OpsExecutive,
        Role::SalesExecutive,
        Role::QcExecutive,
        Role::CustomerService,
        Role::Agent,
        Role::Client,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::SalesManager => "sales_manager",
            Role::SalesExecutive => "sales_executive",
            Role::OpsManager => "ops_manager",
            Role::OpsExecutive => "ops_executive",
            Role::OpsLead => "ops_lead",
            Role::CustomerService => "customer_service",
            Role::QcExecutive => "qc_executive",
            Role::Accountant => "accountant",
            Role::ComplianceOfficer => "compliance_officer",
            Role::HrManager => "hr_manager",
            Role::Agent => "agent",
            Role::Client => "client",
        }
    }

    /// Parse the canonical snake_case spelling. Looser historical
    /// spellings go through [`crate::map_legacy_role`] instead.
    pub fn parse(value: &str) -> Option<Self> {
        Role::ALL.into_iter().find(|role| role.as_str() == value)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Administrator",
            Role::Admin => "Administrator",
            Role::SalesManager => "Sales Manager",
            Role::SalesExecutive => "Sales Executive",
            Role::OpsManager => "Operations Manager",
            Role::OpsExecutive => "Operations Executive",
            Role::OpsLead => "Operations Lead",
            Role::CustomerService => "Customer Service",
            Role::QcExecutive => "QC Executive",
            Role::Accountant => "Accountant",
            Role::ComplianceOfficer => "Compliance Officer",
            Role::HrManager => "HR Manager",
            Role::Agent => "Agent",
            Role::Client => "Client",
        }
    }

    /// Whether this role belongs to the administrative category.
    ///
    /// A distinguished product category, not "top of the hierarchy":
    /// managers outrank most staff but are never admins.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }
}

/// Display label for a raw role field; unknown spellings get the
/// generic fallback rather than an error.
pub fn display_name_for(value: &str) -> &'static str {
    Role::parse(value).map_or(UNKNOWN_ROLE_LABEL, Role::display_name)
}
