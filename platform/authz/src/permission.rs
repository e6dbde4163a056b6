use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single checkable grant, spelled `"<resource>:<action>"` on the wire.
///
/// The enum is the compile-time symbol table: internal call sites name
/// variants (or the [`catalog`] slices) and cannot typo a token. Strings
/// only appear at the ingestion boundary, where an unknown token parses
/// to `None` and therefore matches no role.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Permission {
    // services
    ServicesView,
    ServicesCreate,
    ServicesUpdate,
    ServicesDelete,
    ServicesConfigure,
    ServicesManageWorkflows,
    // workflows
    WorkflowsView,
    WorkflowsCreate,
    WorkflowsUpdate,
    WorkflowsDelete,
    WorkflowsManageTemplates,
    // tasks
    TasksViewOwn,
    TasksViewAll,
    TasksCreate,
    TasksUpdate,
    TasksAssign,
    TasksComplete,
    TasksDelete,
    // service_requests
    ServiceRequestsViewOwn,
    ServiceRequestsViewAssigned,
    ServiceRequestsViewAll,
    ServiceRequestsCreate,
    ServiceRequestsUpdate,
    ServiceRequestsAssign,
    ServiceRequestsEscalate,
    ServiceRequestsClose,
    // clients
    ClientsViewOwn,
    ClientsViewAll,
    ClientsCreate,
    ClientsUpdate,
    ClientsDelete,
    ClientsOnboard,
    // leads
    LeadsViewOwn,
    LeadsViewTeam,
    LeadsViewAll,
    LeadsCreate,
    LeadsUpdate,
    LeadsDelete,
    LeadsConvert,
    // documents
    DocumentsViewOwn,
    DocumentsViewAll,
    DocumentsUpload,
    DocumentsVerify,
    DocumentsDelete,
    // invoices
    InvoicesViewOwn,
    InvoicesViewAll,
    InvoicesCreate,
    InvoicesUpdate,
    InvoicesSend,
    InvoicesRecordPayment,
    // compliance
    ComplianceViewCalendar,
    ComplianceManageCalendar,
    ComplianceFileReturns,
    ComplianceViewReports,
    // users
    UsersView,
    UsersCreate,
    UsersUpdate,
    UsersDelete,
    UsersAssignRoles,
    // tenants
    TenantsView,
    TenantsCreate,
    TenantsUpdate,
    TenantsSuspend,
    TenantsManageFeatures,
    // incidents
    IncidentsView,
    IncidentsCreate,
    IncidentsUpdate,
    IncidentsResolve,
    IncidentsManage,
    // reports
    ReportsViewOwn,
    ReportsViewTeam,
    ReportsViewAll,
    ReportsExport,
    // system
    SystemManageSettings,
    SystemViewAuditLogs,
    SystemManageFeatureFlags,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::ServicesView => "services:view",
            Permission::ServicesCreate => "services:create",
            Permission::ServicesUpdate => "services:update",
            Permission::ServicesDelete => "services:delete",
            Permission::ServicesConfigure => "services:configure",
            Permission::ServicesManageWorkflows => "services:manage_workflows",
            Permission::WorkflowsView => "workflows:view",
            Permission::WorkflowsCreate => "workflows:create",
            Permission::WorkflowsUpdate => "workflows:update",
            Permission::WorkflowsDelete => "workflows:delete",
            Permission::WorkflowsManageTemplates => "workflows:manage_templates",
            Permission::TasksViewOwn => "tasks:view_own",
            Permission::TasksViewAll => "tasks:view_all",
            Permission::TasksCreate => "tasks:create",
            Permission::TasksUpdate => "tasks:update",
            Permission::TasksAssign => "tasks:assign",
            Permission::TasksComplete => "tasks:complete",
            Permission::TasksDelete => "tasks:delete",
            Permission::ServiceRequestsViewOwn => "service_requests:view_own",
            Permission::ServiceRequestsViewAssigned => "service_requests:view_assigned",
            Permission::ServiceRequestsViewAll => "service_requests:view_all",
            Permission::ServiceRequestsCreate => "service_requests:create",
            Permission::ServiceRequestsUpdate => "service_requests:update",
            Permission::ServiceRequestsAssign => "service_requests:assign",
            Permission::ServiceRequestsEscalate => "service_requests:escalate",
            Permission::ServiceRequestsClose => "service_requests:close",
            Permission::ClientsViewOwn => "clients:view_own",
            Permission::ClientsViewAll => "clients:view_all",
            Permission::ClientsCreate => "clients:create",
            Permission::ClientsUpdate => "clients:update",
            Permission::ClientsDelete => "clients:delete",
            Permission::ClientsOnboard => "clients:onboard",
            Permission::LeadsViewOwn => "leads:view_own",
            Permission::LeadsViewTeam => "leads:view_team",
            Permission::LeadsViewAll => "leads:view_all",
            Permission::LeadsCreate => "leads:create",
            Permission::LeadsUpdate => "leads:update",
            Permission::LeadsDelete => "leads:delete",
            Permission::LeadsConvert => "leads:convert",
            Permission::DocumentsViewOwn => "documents:view_own",
            Permission::DocumentsViewAll => "documents:view_all",
            Permission::DocumentsUpload => "documents:upload",
            Permission::DocumentsVerify => "documents:verify",
            Permission::DocumentsDelete => "documents:delete",
            Permission::InvoicesViewOwn => "invoices:view_own",
            Permission::InvoicesViewAll => "invoices:view_all",
            Permission::InvoicesCreate => "invoices:create",
            Permission::InvoicesUpdate => "invoices:update",
            Permission::InvoicesSend => "invoices:send",
            Permission::InvoicesRecordPayment => "invoices:record_payment",
            Permission::ComplianceViewCalendar => "compliance:view_calendar",
            Permission::ComplianceManageCalendar => "compliance:manage_calendar",
            Permission::ComplianceFileReturns => "compliance:file_returns",
            Permission::ComplianceViewReports => "compliance:view_reports",
            Permission::UsersView => "users:view",
            Permission::UsersCreate => "users:create",
            Permission::UsersUpdate => "users:update",
            Permission::UsersDelete => "users:delete",
            Permission::UsersAssignRoles => "users:assign_roles",
            Permission::TenantsView => "tenants:view",
            Permission::TenantsCreate => "tenants:create",
            Permission::TenantsUpdate => "tenants:update",
            Permission::TenantsSuspend => "tenants:suspend",
            Permission::TenantsManageFeatures => "tenants:manage_features",
            Permission::IncidentsView => "incidents:view",
            Permission::IncidentsCreate => "incidents:create",
            Permission::IncidentsUpdate => "incidents:update",
            Permission::IncidentsResolve => "incidents:resolve",
            Permission::IncidentsManage => "incidents:manage",
            Permission::ReportsViewOwn => "reports:view_own",
            Permission::ReportsViewTeam => "reports:view_team",
            Permission::ReportsViewAll => "reports:view_all",
            Permission::ReportsExport => "reports:export",
            Permission::SystemManageSettings => "system:manage_settings",
            Permission::SystemViewAuditLogs => "system:view_audit_logs",
            Permission::SystemManageFeatureFlags => "system:manage_feature_flags",
        }
    }

    /// Parse a wire token. Unknown tokens are not an error; they simply
    /// name no permission and will match no role.
    pub fn parse(token: &str) -> Option<Self> {
        Permission::all().find(|perm| perm.as_str() == token)
    }

    /// Every permission in the catalog, resource by resource.
    pub fn all() -> impl Iterator<Item = Permission> {
        catalog::RESOURCES
            .iter()
            .flat_map(|(_, perms)| perms.iter().copied())
    }

    pub fn resource(self) -> &'static str {
        self.as_str().split_once(':').map(|(r, _)| r).unwrap_or("")
    }

    pub fn action(self) -> &'static str {
        self.as_str().split_once(':').map(|(_, a)| a).unwrap_or("")
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TokenVisitor;

        impl Visitor<'_> for TokenVisitor {
            type Value = Permission;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a `resource:action` permission token")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Permission, E> {
                Permission::parse(value)
                    .ok_or_else(|| E::custom(format!("unknown permission token {value:?}")))
            }
        }

        deserializer.deserialize_str(TokenVisitor)
    }
}

/// Per-resource constant slices, the building blocks of the
/// role-permission map. The grouping is organizational; at runtime only
/// the token itself carries meaning.
pub mod catalog {
    use super::Permission;
    use super::Permission::*;

    pub const SERVICES: &[Permission] = &[
        ServicesView,
        ServicesCreate,
        ServicesUpdate,
        ServicesDelete,
        ServicesConfigure,
        ServicesManageWorkflows,
    ];

    pub const WORKFLOWS: &[Permission] = &[
        WorkflowsView,
        WorkflowsCreate,
        WorkflowsUpdate,
        WorkflowsDelete,
        WorkflowsManageTemplates,
    ];

    pub const TASKS: &[Permission] = &[
        TasksViewOwn,
        TasksViewAll,
        TasksCreate,
        TasksUpdate,
        TasksAssign,
        TasksComplete,
        TasksDelete,
    ];

    pub const SERVICE_REQUESTS: &[Permission] = &[
        ServiceRequestsViewOwn,
        ServiceRequestsViewAssigned,
        ServiceRequestsViewAll,
        ServiceRequestsCreate,
        ServiceRequestsUpdate,
        ServiceRequestsAssign,
        ServiceRequestsEscalate,
        ServiceRequestsClose,
    ];

    pub const CLIENTS: &[Permission] = &[
        ClientsViewOwn,
        ClientsViewAll,
        ClientsCreate,
        ClientsUpdate,
        ClientsDelete,
        ClientsOnboard,
    ];

    pub const LEADS: &[Permission] = &[
        LeadsViewOwn,
        LeadsViewTeam,
        LeadsViewAll,
        LeadsCreate,
        LeadsUpdate,
        LeadsDelete,
        LeadsConvert,
    ];

    pub const DOCUMENTS: &[Permission] = &[
        DocumentsViewOwn,
        DocumentsViewAll,
        DocumentsUpload,
        DocumentsVerify,
        DocumentsDelete,
    ];

    pub const INVOICES: &[Permission] = &[
        InvoicesViewOwn,
        InvoicesViewAll,
        InvoicesCreate,
        InvoicesUpdate,
        InvoicesSend,
        InvoicesRecordPayment,
    ];

    pub const COMPLIANCE: &[Permission] = &[
        ComplianceViewCalendar,
        ComplianceManageCalendar,
        ComplianceFileReturns,
        ComplianceViewReports,
    ];

    pub const USERS: &[Permission] = &[
        UsersView,
        UsersCreate,
        UsersUpdate,
        UsersDelete,
        UsersAssignRoles,
    ];

    pub const TENANTS: &[Permission] = &[
        TenantsView,
        TenantsCreate,
        TenantsUpdate,
        TenantsSuspend,
        TenantsManageFeatures,
    ];

    pub const INCIDENTS: &[Permission] = &[
        IncidentsView,
        IncidentsCreate,
        IncidentsUpdate,
        IncidentsResolve,
        IncidentsManage,
    ];

    pub const REPORTS: &[Permission] = &[
        ReportsViewOwn,
        ReportsViewTeam,
        ReportsViewAll,
        ReportsExport,
    ];

    pub const SYSTEM: &[Permission] = &[
        SystemManageSettings,
        SystemViewAuditLogs,
        SystemManageFeatureFlags,
    ];

    /// The whole catalog, keyed by resource name.
    pub const RESOURCES: &[(&str, &[Permission])] = &[
        ("services", SERVICES),
        ("workflows", WORKFLOWS),
        ("tasks", TASKS),
        ("service_requests", SERVICE_REQUESTS),
        ("clients", CLIENTS),
        ("leads", LEADS),
        ("documents", DOCUMENTS),
        ("invoices", INVOICES),
        ("compliance", COMPLIANCE),
        ("users", USERS),
        ("tenants", TENANTS),
        ("incidents", INCIDENTS),
        ("reports", REPORTS),
        ("system", SYSTEM),
    ];
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn tokens_are_unique_across_the_catalog() {
        let all: Vec<Permission> = Permission::all().collect();
        let unique: BTreeSet<&str> = all.iter().map(|p| p.as_str()).collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn tokens_round_trip_and_namespace_correctly() {
        for (resource, perms) in catalog::RESOURCES {
            for perm in *perms {
                assert_eq!(Permission::parse(perm.as_str()), Some(*perm));
                assert_eq!(perm.resource(), *resource);
                assert!(!perm.action().is_empty());
            }
        }
    }

    #[test]
    fn unknown_tokens_parse_to_none() {
        assert_eq!(Permission::parse("bogus:permission"), None);
        assert_eq!(Permission::parse("services"), None);
        assert_eq!(Permission::parse(""), None);
    }

    #[test]
    fn serde_uses_the_wire_token() {
        let json = serde_json::to_string(&Permission::DocumentsViewOwn).unwrap();
        assert_eq!(json, "\"documents:view_own\"");
        let back: Permission = serde_json::from_str("\"leads:view_team\"").unwrap();
        assert_eq!(back, Permission::LeadsViewTeam);
        assert!(serde_json::from_str::<Permission>("\"nope:nope\"").is_err());
    }
}
