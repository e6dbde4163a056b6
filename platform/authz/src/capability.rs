//! Derived per-resource capability views.
//!
//! Every boolean here is computed from [`PolicySet::has_permission`] at
//! call time; nothing is stored or independently maintained, so the
//! capability view cannot drift from the grant tables. The structs
//! serialize camelCase for UI consumption.

use serde::Serialize;

use crate::permission::Permission;
use crate::policy::PolicySet;
use crate::role::Role;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCapabilities {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    pub configure: bool,
    pub manage_workflows: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowCapabilities {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    pub manage_templates: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCapabilities {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    pub assign: bool,
    pub complete: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestCapabilities {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub assign: bool,
    pub escalate: bool,
    pub close: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCapabilities {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    pub onboard: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadCapabilities {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    pub convert: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCapabilities {
    pub read: bool,
    pub upload: bool,
    pub verify: bool,
    pub delete: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceCapabilities {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub send: bool,
    pub record_payment: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCapabilities {
    pub view_calendar: bool,
    pub manage_calendar: bool,
    pub file_returns: bool,
    pub view_reports: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCapabilities {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    pub assign_roles: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantCapabilities {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub suspend: bool,
    pub manage_features: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentCapabilities {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub resolve: bool,
    pub manage: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCapabilities {
    pub read: bool,
    pub export: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemCapabilities {
    pub manage_settings: bool,
    pub view_audit_logs: bool,
    pub manage_feature_flags: bool,
}

/// The full per-resource capability matrix for one role.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCapabilities {
    pub services: ServiceCapabilities,
    pub workflows: WorkflowCapabilities,
    pub tasks: TaskCapabilities,
    pub service_requests: ServiceRequestCapabilities,
    pub clients: ClientCapabilities,
    pub leads: LeadCapabilities,
    pub documents: DocumentCapabilities,
    pub invoices: InvoiceCapabilities,
    pub compliance: ComplianceCapabilities,
    pub users: UserCapabilities,
    pub tenants: TenantCapabilities,
    pub incidents: IncidentCapabilities,
    pub reports: ReportCapabilities,
    pub system: SystemCapabilities,
}

impl PolicySet {
    /// Materialize the capability matrix for `role`. Cheap to
    /// recompute; callers may memoize externally if they care.
    pub fn capabilities(&self, role: Role) -> RoleCapabilities {
        let has = |perm: Permission| self.has_permission(role, perm);

        RoleCapabilities {
            services: ServiceCapabilities {
                create: has(Permission::ServicesCreate),
                read: has(Permission::ServicesView),
                update: has(Permission::ServicesUpdate),
                delete: has(Permission::ServicesDelete),
                configure: has(Permission::ServicesConfigure),
                manage_workflows: has(Permission::ServicesManageWorkflows),
            },
            workflows: WorkflowCapabilities {
                create: has(Permission::WorkflowsCreate),
                read: has(Permission::WorkflowsView),
                update: has(Permission::WorkflowsUpdate),
                delete: has(Permission::WorkflowsDelete),
                manage_templates: has(Permission::WorkflowsManageTemplates),
            },
            tasks: TaskCapabilities {
                create: has(Permission::TasksCreate),
                read: has(Permission::TasksViewOwn) || has(Permission::TasksViewAll),
                update: has(Permission::TasksUpdate),
                delete: has(Permission::TasksDelete),
                assign: has(Permission::TasksAssign),
                complete: has(Permission::TasksComplete),
            },
            service_requests: ServiceRequestCapabilities {
                create: has(Permission::ServiceRequestsCreate),
                read: has(Permission::ServiceRequestsViewOwn)
                    || has(Permission::ServiceRequestsViewAssigned)
                    || has(Permission::ServiceRequestsViewAll),
                update: has(Permission::ServiceRequestsUpdate),
                assign: has(Permission::ServiceRequestsAssign),
                escalate: has(Permission::ServiceRequestsEscalate),
                close: has(Permission::ServiceRequestsClose),
            },
            clients: ClientCapabilities {
                create: has(Permission::ClientsCreate),
                read: has(Permission::ClientsViewOwn) || has(Permission::ClientsViewAll),
                update: has(Permission::ClientsUpdate),
                delete: has(Permission::ClientsDelete),
                onboard: has(Permission::ClientsOnboard),
            },
            leads: LeadCapabilities {
                create: has(Permission::LeadsCreate),
                read: has(Permission::LeadsViewOwn)
                    || has(Permission::LeadsViewTeam)
                    || has(Permission::LeadsViewAll),
                update: has(Permission::LeadsUpdate),
                delete: has(Permission::LeadsDelete),
                convert: has(Permission::LeadsConvert),
            },
            documents: DocumentCapabilities {
                read: has(Permission::DocumentsViewOwn) || has(Permission::DocumentsViewAll),
                upload: has(Permission::DocumentsUpload),
                verify: has(Permission::DocumentsVerify),
                delete: has(Permission::DocumentsDelete),
            },
            invoices: InvoiceCapabilities {
                create: has(Permission::InvoicesCreate),
                read: has(Permission::InvoicesViewOwn) || has(Permission::InvoicesViewAll),
                update: has(Permission::InvoicesUpdate),
                send: has(Permission::InvoicesSend),
                record_payment: has(Permission::InvoicesRecordPayment),
            },
            compliance: ComplianceCapabilities {
                view_calendar: has(Permission::ComplianceViewCalendar),
                manage_calendar: has(Permission::ComplianceManageCalendar),
                file_returns: has(Permission::ComplianceFileReturns),
                view_reports: has(Permission::ComplianceViewReports),
            },
            users: UserCapabilities {
                create: has(Permission::UsersCreate),
                read: has(Permission::UsersView),
                update: has(Permission::UsersUpdate),
                delete: has(Permission::UsersDelete),
                assign_roles: has(Permission::UsersAssignRoles),
            },
            tenants: TenantCapabilities {
                create: has(Permission::TenantsCreate),
                read: has(Permission::TenantsView),
                update: has(Permission::TenantsUpdate),
                suspend: has(Permission::TenantsSuspend),
                manage_features: has(Permission::TenantsManageFeatures),
            },
            incidents: IncidentCapabilities {
                create: has(Permission::IncidentsCreate),
                read: has(Permission::IncidentsView),
                update: has(Permission::IncidentsUpdate),
                resolve: has(Permission::IncidentsResolve),
                manage: has(Permission::IncidentsManage),
            },
            reports: ReportCapabilities {
                read: has(Permission::ReportsViewOwn)
                    || has(Permission::ReportsViewTeam)
                    || has(Permission::ReportsViewAll),
                export: has(Permission::ReportsExport),
            },
            system: SystemCapabilities {
                manage_settings: has(Permission::SystemManageSettings),
                view_audit_logs: has(Permission::SystemViewAuditLogs),
                manage_feature_flags: has(Permission::SystemManageFeatureFlags),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_matrix_is_all_true() {
        let caps = PolicySet::builtin().capabilities(Role::SuperAdmin);
        let json = serde_json::to_value(caps).unwrap();
        fn all_true(value: &serde_json::Value) -> bool {
            match value {
                serde_json::Value::Bool(b) => *b,
                serde_json::Value::Object(map) => map.values().all(all_true),
                _ => false,
            }
        }
        assert!(all_true(&json));
    }

    #[test]
    fn read_flags_or_combine_view_variants() {
        let policy = PolicySet::builtin();
        // Client only holds the "own" document variant.
        let caps = policy.capabilities(Role::Client);
        assert!(caps.documents.read);
        assert!(!policy.has_permission(Role::Client, Permission::DocumentsViewAll));
        // QC only holds the "all" variant.
        let caps = policy.capabilities(Role::QcExecutive);
        assert!(caps.documents.read);
        assert!(!policy.has_permission(Role::QcExecutive, Permission::DocumentsViewOwn));
    }

    #[test]
    fn matrix_serializes_camel_case() {
        let caps = PolicySet::builtin().capabilities(Role::OpsManager);
        let json = serde_json::to_value(caps).unwrap();
        assert_eq!(json["services"]["manageWorkflows"], true);
        assert_eq!(json["serviceRequests"]["assign"], true);
    }
}
