use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::permission::{Permission, catalog};
use crate::role::Role;

/// A configuration defect in a policy set. Surfaced by
/// [`PolicySet::validate`] at startup; never raised by query calls.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum PolicyError {
    #[error("role {role} has no hierarchy level")]
    MissingLevel { role: &'static str },
    #[error("role {role} has no grant entry")]
    MissingGrants { role: &'static str },
    #[error("super_admin is missing {permission} held by {role}")]
    SupersetViolation {
        role: &'static str,
        permission: &'static str,
    },
}

static EMPTY_GRANTS: BTreeSet<Permission> = BTreeSet::new();

/// Immutable role/permission tables plus the query surface over them.
///
/// Constructed once at startup and passed by reference, never an
/// ambient global, so tests substitute fixtures and different
/// deployments can in principle run different tables without
/// cross-contamination. Every query is total and fails closed: a role
/// missing from the tables behaves as "no permissions, level 0".
#[derive(Clone, Debug)]
pub struct PolicySet {
    levels: BTreeMap<Role, u32>,
    grants: BTreeMap<Role, BTreeSet<Permission>>,
}

impl Default for PolicySet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PolicySet {
    /// Assemble a policy from explicit tables. Callers that want the
    /// shipped product policy use [`PolicySet::builtin`].
    pub fn new(
        levels: BTreeMap<Role, u32>,
        grants: BTreeMap<Role, BTreeSet<Permission>>,
    ) -> Self {
        Self { levels, grants }
    }

    /// The shipped product policy.
    ///
    /// Grants are composed from catalog slices plus explicit
    /// exclusions, never hand-listed per role, so a permission added
    /// to a resource flows to every role holding that resource.
    pub fn builtin() -> Self {
        let mut grants: BTreeMap<Role, BTreeSet<Permission>> = BTreeMap::new();

        let everything: BTreeSet<Permission> = Permission::all().collect();

        // Admin is everything minus platform-owner actions, which keeps
        // the super_admin superset strict.
        let admin = without(
            everything.clone(),
            &[
                Permission::UsersDelete,
                Permission::TenantsCreate,
                Permission::TenantsSuspend,
            ],
        );

        let ops_manager = compose(&[
            catalog::SERVICES,
            catalog::WORKFLOWS,
            catalog::TASKS,
            catalog::SERVICE_REQUESTS,
            &[
                Permission::ClientsViewAll,
                Permission::ClientsUpdate,
                Permission::ClientsOnboard,
            ],
            &[
                Permission::DocumentsViewAll,
                Permission::DocumentsUpload,
                Permission::DocumentsVerify,
            ],
            &[
                Permission::IncidentsView,
                Permission::IncidentsCreate,
                Permission::IncidentsUpdate,
                Permission::IncidentsResolve,
            ],
            &[
                Permission::ReportsViewTeam,
                Permission::ReportsViewAll,
                Permission::ReportsExport,
            ],
            &[
                Permission::ComplianceViewCalendar,
                Permission::ComplianceViewReports,
            ],
        ]);

        // Sales management sees the service catalog but never mutates it.
        let sales_manager = compose(&[
            catalog::LEADS,
            &[Permission::ServicesView],
            &[
                Permission::ClientsViewAll,
                Permission::ClientsCreate,
                Permission::ClientsUpdate,
                Permission::ClientsOnboard,
            ],
            &[
                Permission::TasksViewAll,
                Permission::TasksCreate,
                Permission::TasksUpdate,
                Permission::TasksAssign,
                Permission::TasksComplete,
            ],
            &[
                Permission::ServiceRequestsViewAll,
                Permission::ServiceRequestsCreate,
            ],
            &[Permission::DocumentsViewAll, Permission::DocumentsUpload],
            &[
                Permission::InvoicesViewAll,
                Permission::InvoicesCreate,
                Permission::InvoicesSend,
            ],
            &[
                Permission::ReportsViewTeam,
                Permission::ReportsViewAll,
                Permission::ReportsExport,
            ],
        ]);

        let hr_manager = compose(&[
            &[
                Permission::UsersView,
                Permission::UsersCreate,
                Permission::UsersUpdate,
            ],
            &[
                Permission::TasksViewOwn,
                Permission::TasksCreate,
                Permission::TasksUpdate,
                Permission::TasksComplete,
            ],
            &[
                Permission::DocumentsViewOwn,
                Permission::DocumentsViewAll,
                Permission::DocumentsUpload,
            ],
            &[Permission::ReportsViewTeam, Permission::ReportsExport],
        ]);

        let compliance_officer = compose(&[
            catalog::COMPLIANCE,
            &[
                Permission::DocumentsViewAll,
                Permission::DocumentsUpload,
                Permission::DocumentsVerify,
            ],
            &[
                Permission::IncidentsView,
                Permission::IncidentsCreate,
                Permission::IncidentsUpdate,
                Permission::IncidentsResolve,
                Permission::IncidentsManage,
            ],
            &[Permission::ClientsViewAll],
            &[Permission::ServiceRequestsViewAll],
            &[Permission::ReportsViewAll, Permission::ReportsExport],
            &[Permission::SystemViewAuditLogs],
        ]);

        let ops_lead = compose(&[
            &[Permission::ServicesView, Permission::WorkflowsView],
            &[
                Permission::TasksViewAll,
                Permission::TasksCreate,
                Permission::TasksUpdate,
                Permission::TasksAssign,
                Permission::TasksComplete,
            ],
            &[
                Permission::ServiceRequestsViewAssigned,
                Permission::ServiceRequestsViewAll,
                Permission::ServiceRequestsCreate,
                Permission::ServiceRequestsUpdate,
                Permission::ServiceRequestsAssign,
                Permission::ServiceRequestsEscalate,
            ],
            &[Permission::ClientsViewAll],
            &[Permission::DocumentsViewAll, Permission::DocumentsUpload],
            &[Permission::IncidentsView, Permission::IncidentsCreate],
            &[Permission::ReportsViewTeam],
        ]);

        let accountant = compose(&[
            catalog::INVOICES,
            &[
                Permission::ComplianceViewCalendar,
                Permission::ComplianceFileReturns,
                Permission::ComplianceViewReports,
            ],
            &[Permission::ClientsViewAll],
            &[Permission::DocumentsViewAll, Permission::DocumentsUpload],
            &[Permission::TasksViewOwn, Permission::TasksComplete],
            &[Permission::ReportsViewAll, Permission::ReportsExport],
        ]);

        // Executives see assigned work; routing it is lead/manager
        // authority.
        let ops_executive = compose(&[
            &[Permission::ServicesView, Permission::WorkflowsView],
            &[
                Permission::ServiceRequestsViewOwn,
                Permission::ServiceRequestsViewAssigned,
                Permission::ServiceRequestsCreate,
                Permission::ServiceRequestsUpdate,
                Permission::ServiceRequestsEscalate,
            ],
            &[
                Permission::TasksViewOwn,
                Permission::TasksUpdate,
                Permission::TasksComplete,
            ],
            &[Permission::ClientsViewAll],
            &[Permission::DocumentsViewOwn, Permission::DocumentsUpload],
            &[Permission::IncidentsCreate],
            &[Permission::ReportsViewOwn],
        ]);

        let sales_executive = compose(&[
            &[
                Permission::LeadsViewOwn,
                Permission::LeadsViewTeam,
                Permission::LeadsCreate,
                Permission::LeadsUpdate,
                Permission::LeadsConvert,
            ],
            &[Permission::ServicesView],
            &[
                Permission::ClientsViewOwn,
                Permission::ClientsCreate,
                Permission::ClientsUpdate,
                Permission::ClientsOnboard,
            ],
            &[
                Permission::TasksViewOwn,
                Permission::TasksCreate,
                Permission::TasksUpdate,
                Permission::TasksComplete,
            ],
            &[Permission::DocumentsViewOwn, Permission::DocumentsUpload],
            &[Permission::InvoicesViewOwn],
            &[Permission::ReportsViewOwn],
        ]);

        let qc_executive = compose(&[
            &[Permission::DocumentsViewAll, Permission::DocumentsVerify],
            &[Permission::ServiceRequestsViewAll],
            &[Permission::TasksViewOwn, Permission::TasksComplete],
            &[Permission::IncidentsView, Permission::IncidentsCreate],
            &[Permission::ReportsViewOwn],
        ]);

        let customer_service = compose(&[
            &[Permission::ServicesView],
            &[
                Permission::ServiceRequestsViewAll,
                Permission::ServiceRequestsCreate,
                Permission::ServiceRequestsUpdate,
            ],
            &[Permission::ClientsViewAll],
            &[
                Permission::TasksViewOwn,
                Permission::TasksCreate,
                Permission::TasksComplete,
            ],
            &[Permission::DocumentsViewOwn, Permission::DocumentsUpload],
            &[Permission::IncidentsView, Permission::IncidentsCreate],
            &[Permission::ReportsViewOwn],
        ]);

        let agent = compose(&[
            &[Permission::ServicesView],
            &[Permission::LeadsViewOwn, Permission::LeadsCreate],
            &[
                Permission::ClientsViewOwn,
                Permission::ClientsCreate,
                Permission::ClientsOnboard,
            ],
            &[
                Permission::ServiceRequestsViewOwn,
                Permission::ServiceRequestsCreate,
            ],
            &[Permission::DocumentsViewOwn, Permission::DocumentsUpload],
            &[Permission::TasksViewOwn],
            &[Permission::InvoicesViewOwn],
            &[Permission::ReportsViewOwn],
        ]);

        let client = compose(&[
            &[Permission::ServicesView],
            &[
                Permission::ServiceRequestsViewOwn,
                Permission::ServiceRequestsCreate,
            ],
            &[Permission::DocumentsViewOwn, Permission::DocumentsUpload],
            &[Permission::InvoicesViewOwn],
            &[Permission::ComplianceViewCalendar],
        ]);

        grants.insert(Role::SuperAdmin, everything);
        grants.insert(Role::Admin, admin);
        grants.insert(Role::OpsManager, ops_manager);
        grants.insert(Role::SalesManager, sales_manager);
        grants.insert(Role::HrManager, hr_manager);
        grants.insert(Role::ComplianceOfficer, compliance_officer);
        grants.insert(Role::OpsLead, ops_lead);
        grants.insert(Role::Accountant, accountant);
        grants.insert(Role::OpsExecutive, ops_executive);
        grants.insert(Role::SalesExecutive, sales_executive);
        grants.insert(Role::QcExecutive, qc_executive);
        grants.insert(Role::CustomerService, customer_service);
        grants.insert(Role::Agent, agent);
        grants.insert(Role::Client, client);

        let levels = Role::ALL
            .into_iter()
            .map(|role| (role, builtin_level(role)))
            .collect();

        Self { levels, grants }
    }

    /// Check the structural invariants: every role has exactly one
    /// level and one grant entry, and super_admin holds every grant
    /// any other role holds.
    pub fn validate(&self) -> Result<(), PolicyError> {
        for role in Role::ALL {
            if !self.levels.contains_key(&role) {
                return Err(PolicyError::MissingLevel {
                    role: role.as_str(),
                });
            }
            if !self.grants.contains_key(&role) {
                return Err(PolicyError::MissingGrants {
                    role: role.as_str(),
                });
            }
        }
        let top = self.permissions_for_role(Role::SuperAdmin);
        for role in Role::ALL {
            if role == Role::SuperAdmin {
                continue;
            }
            for perm in self.permissions_for_role(role) {
                if !top.contains(perm) {
                    return Err(PolicyError::SupersetViolation {
                        role: role.as_str(),
                        permission: perm.as_str(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The grant set for a role. A role with no entry (a configuration
    /// defect caught by [`validate`](Self::validate)) reads as empty.
    pub fn permissions_for_role(&self, role: Role) -> &BTreeSet<Permission> {
        self.grants.get(&role).unwrap_or(&EMPTY_GRANTS)
    }

    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        self.permissions_for_role(role).contains(&permission)
    }

    /// True iff at least one of `permissions` is granted. Vacuously
    /// false for an empty list.
    pub fn has_any_permission(&self, role: Role, permissions: &[Permission]) -> bool {
        permissions.iter().any(|perm| self.has_permission(role, *perm))
    }

    /// True iff every one of `permissions` is granted. Vacuously true
    /// for an empty list, mirroring quantifier semantics over an empty
    /// domain.
    pub fn has_all_permissions(&self, role: Role, permissions: &[Permission]) -> bool {
        permissions.iter().all(|perm| self.has_permission(role, *perm))
    }

    /// Deduplicated union of the grant sets of several roles, for
    /// users holding more than one role.
    pub fn permissions_for_roles(&self, roles: &[Role]) -> BTreeSet<Permission> {
        roles
            .iter()
            .flat_map(|role| self.permissions_for_role(*role).iter().copied())
            .collect()
    }

    /// Hierarchy level for a role; 0 for a role missing from the
    /// table, which loses every `>=` comparison.
    pub fn role_level(&self, role: Role) -> u32 {
        self.levels.get(&role).copied().unwrap_or(0)
    }

    /// `>=` comparison on levels. Reflexive by construction.
    pub fn has_equal_or_higher_role(&self, candidate: Role, required: Role) -> bool {
        self.role_level(candidate) >= self.role_level(required)
    }

    /// Whether the role holds any mutating service permission.
    pub fn can_manage_services(&self, role: Role) -> bool {
        self.has_any_permission(
            role,
            &[
                Permission::ServicesCreate,
                Permission::ServicesUpdate,
                Permission::ServicesDelete,
            ],
        )
    }

    /// Whether the role holds any mutating workflow permission.
    pub fn can_manage_workflows(&self, role: Role) -> bool {
        self.has_any_permission(
            role,
            &[
                Permission::WorkflowsCreate,
                Permission::WorkflowsUpdate,
                Permission::WorkflowsDelete,
                Permission::WorkflowsManageTemplates,
            ],
        )
    }

    /// String-boundary check for callers holding raw session values.
    /// Unknown role spellings or permission tokens fail closed.
    pub fn check(&self, role: &str, permission: &str) -> bool {
        let Some(role) = Role::parse(role) else {
            tracing::debug!(role, "permission check against unknown role");
            return false;
        };
        let Some(permission) = Permission::parse(permission) else {
            tracing::debug!(token = permission, "unknown permission token");
            return false;
        };
        self.has_permission(role, permission)
    }

    /// String-boundary level lookup; unknown spellings read as 0.
    pub fn role_level_token(&self, role: &str) -> u32 {
        Role::parse(role).map_or(0, |role| self.role_level(role))
    }
}

fn builtin_level(role: Role) -> u32 {
    match role {
        Role::SuperAdmin => 100,
        Role::Admin => 90,
        Role::OpsManager => 85,
        Role::SalesManager => 80,
        Role::HrManager => 78,
        Role::ComplianceOfficer => 75,
        Role::OpsLead => 70,
        Role::Accountant => 68,
        Role::OpsExecutive => 65,
        Role::SalesExecutive => 60,
        Role::QcExecutive => 55,
        Role::CustomerService => 50,
        Role::Agent => 40,
        Role::Client => 10,
    }
}

fn compose(parts: &[&[Permission]]) -> BTreeSet<Permission> {
    parts
        .iter()
        .flat_map(|slice| slice.iter().copied())
        .collect()
}

fn without(mut set: BTreeSet<Permission>, excluded: &[Permission]) -> BTreeSet<Permission> {
    for perm in excluded {
        set.remove(perm);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_policy_validates() {
        PolicySet::builtin().validate().expect("builtin policy");
    }

    #[test]
    fn quantifier_edge_cases() {
        let policy = PolicySet::builtin();
        for role in Role::ALL {
            assert!(!policy.has_any_permission(role, &[]));
            assert!(policy.has_all_permissions(role, &[]));
        }
    }

    #[test]
    fn admin_exclusions_hold() {
        let policy = PolicySet::builtin();
        assert!(policy.has_permission(Role::Admin, Permission::UsersCreate));
        assert!(policy.has_permission(Role::Admin, Permission::UsersUpdate));
        assert!(!policy.has_permission(Role::Admin, Permission::UsersDelete));
        assert!(!policy.has_permission(Role::Admin, Permission::TenantsSuspend));
        assert!(policy.has_permission(Role::SuperAdmin, Permission::UsersDelete));
    }

    #[test]
    fn string_boundary_fails_closed() {
        let policy = PolicySet::builtin();
        assert!(policy.check("admin", "users:view"));
        assert!(!policy.check("ADMIN", "users:view"));
        assert!(!policy.check("admin", "users:teleport"));
        assert_eq!(policy.role_level_token("nonsense"), 0);
    }

    #[test]
    fn missing_entries_are_configuration_defects() {
        let mut levels = BTreeMap::new();
        let mut grants = BTreeMap::new();
        for role in Role::ALL {
            levels.insert(role, 1);
            grants.insert(role, BTreeSet::new());
        }
        levels.remove(&Role::Agent);
        let policy = PolicySet::new(levels, grants);
        assert_eq!(
            policy.validate(),
            Err(PolicyError::MissingLevel { role: "agent" })
        );
        // Queries still fail closed rather than panic.
        assert_eq!(policy.role_level(Role::Agent), 0);
        assert!(!policy.has_permission(Role::Agent, Permission::ServicesView));
    }

    #[test]
    fn superset_violation_is_reported() {
        let mut levels = BTreeMap::new();
        let mut grants = BTreeMap::new();
        for role in Role::ALL {
            levels.insert(role, 1);
            grants.insert(role, BTreeSet::new());
        }
        grants.insert(
            Role::Client,
            [Permission::SystemManageSettings].into_iter().collect(),
        );
        let policy = PolicySet::new(levels, grants);
        assert_eq!(
            policy.validate(),
            Err(PolicyError::SupersetViolation {
                role: "client",
                permission: "system:manage_settings",
            })
        );
    }
}
