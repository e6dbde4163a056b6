//! Shared role/permission policy core.
//!
//! One set of tables answers "what can role X do" for both the server
//! and the UI, so the two can never disagree about a gated action. The
//! crate is a pure resolver over immutable configuration: no I/O, no
//! mutation after construction, every query total and failing closed.
//! Who holds which role, and how sessions are established, are outside
//! this crate.
//!
//! ```
//! use platform_authz::{Permission, PolicySet, Role};
//!
//! let policy = PolicySet::builtin();
//! policy.validate().expect("shipped tables are coherent");
//!
//! assert!(policy.has_permission(Role::OpsManager, Permission::ServiceRequestsAssign));
//! assert!(!policy.check("client", "system:manage_settings"));
//! let caps = policy.capabilities(Role::SalesManager);
//! assert!(caps.leads.read && !caps.services.create);
//! ```

mod capability;
mod legacy;
mod permission;
mod policy;
mod role;

pub use capability::{
    ClientCapabilities, ComplianceCapabilities, DocumentCapabilities, IncidentCapabilities,
    InvoiceCapabilities, LeadCapabilities, ReportCapabilities, RoleCapabilities,
    ServiceCapabilities, ServiceRequestCapabilities, SystemCapabilities, TaskCapabilities,
    TenantCapabilities, UserCapabilities, WorkflowCapabilities,
};
pub use legacy::map_legacy_role;
pub use permission::{Permission, catalog};
pub use policy::{PolicyError, PolicySet};
pub use role::{Role, UNKNOWN_ROLE_LABEL, display_name_for};
