//! Structural properties of the shipped policy tables.

use platform_authz::{Permission, PolicySet, Role, display_name_for};

#[test]
fn every_role_is_fully_registered() {
    let policy = PolicySet::builtin();
    policy.validate().expect("builtin tables are coherent");
    for role in Role::ALL {
        assert!(
            policy.role_level(role) > 0,
            "{} has no hierarchy level",
            role.as_str()
        );
        assert!(
            !policy.permissions_for_role(role).is_empty(),
            "{} has an empty grant set",
            role.as_str()
        );
    }
}

#[test]
fn super_admin_is_a_strict_superset_of_every_role() {
    let policy = PolicySet::builtin();
    let top = policy.permissions_for_role(Role::SuperAdmin);
    for role in Role::ALL {
        if role == Role::SuperAdmin {
            continue;
        }
        let grants = policy.permissions_for_role(role);
        assert!(
            grants.is_subset(top),
            "{} holds grants super_admin lacks",
            role.as_str()
        );
        assert!(grants.len() < top.len(), "{} ties super_admin", role.as_str());
    }
}

#[test]
fn quantifiers_over_an_empty_list() {
    let policy = PolicySet::builtin();
    for role in Role::ALL {
        assert!(!policy.has_any_permission(role, &[]));
        assert!(policy.has_all_permissions(role, &[]));
    }
}

#[test]
fn unknown_inputs_fail_closed() {
    let policy = PolicySet::builtin();
    assert!(!policy.check("astronaut", "services:view"));
    assert!(!policy.check("admin", "bogus:permission"));
    assert_eq!(policy.role_level_token("astronaut"), 0);
    assert_eq!(display_name_for("astronaut"), "Unknown Role");
}

#[test]
fn low_privilege_roles_never_hold_admin_only_grants() {
    let policy = PolicySet::builtin();
    let admin_only = [
        Permission::UsersCreate,
        Permission::UsersDelete,
        Permission::UsersAssignRoles,
        Permission::TenantsCreate,
        Permission::TenantsSuspend,
        Permission::TenantsManageFeatures,
        Permission::SystemManageSettings,
        Permission::SystemManageFeatureFlags,
        Permission::ServicesDelete,
    ];
    let low_privilege = [
        Role::SalesExecutive,
        Role::OpsExecutive,
        Role::OpsLead,
        Role::CustomerService,
        Role::QcExecutive,
        Role::Accountant,
        Role::Agent,
        Role::Client,
    ];
    for role in low_privilege {
        for perm in admin_only {
            assert!(
                !policy.has_permission(role, perm),
                "{} unexpectedly holds {}",
                role.as_str(),
                perm
            );
        }
    }
    // Named escalation checks from the product requirements.
    assert!(!policy.has_permission(Role::Client, Permission::UsersCreate));
    assert!(!policy.has_permission(Role::Client, Permission::SystemManageSettings));
    assert!(!policy.has_permission(Role::Agent, Permission::ServicesCreate));
}

#[test]
fn hierarchy_comparisons_are_reflexive_and_ordered() {
    let policy = PolicySet::builtin();
    for role in Role::ALL {
        assert!(policy.has_equal_or_higher_role(role, role));
    }
    assert!(policy.has_equal_or_higher_role(Role::SuperAdmin, Role::Admin));
    assert!(!policy.has_equal_or_higher_role(Role::Client, Role::Admin));
    assert!(policy.has_equal_or_higher_role(Role::OpsManager, Role::OpsLead));
    assert!(policy.has_equal_or_higher_role(Role::OpsLead, Role::OpsExecutive));
    assert!(policy.has_equal_or_higher_role(Role::SalesManager, Role::SalesExecutive));
    assert!(policy.has_equal_or_higher_role(Role::Agent, Role::Client));
}

#[test]
fn admin_category_excludes_managers() {
    assert!(Role::SuperAdmin.is_admin());
    assert!(Role::Admin.is_admin());
    assert!(!Role::OpsManager.is_admin());
    assert!(!Role::SalesManager.is_admin());
    assert!(!Role::HrManager.is_admin());
    assert!(!Role::ComplianceOfficer.is_admin());
}

#[test]
fn multi_role_union_deduplicates() {
    let policy = PolicySet::builtin();
    let union = policy.permissions_for_roles(&[Role::Admin, Role::SuperAdmin]);
    // Admin is a subset of super_admin, so the union is exactly the
    // super_admin set and carries no repeats by construction.
    assert_eq!(&union, policy.permissions_for_role(Role::SuperAdmin));

    let disjointish = policy.permissions_for_roles(&[Role::SalesExecutive, Role::Accountant]);
    let expected = policy
        .permissions_for_role(Role::SalesExecutive)
        .union(policy.permissions_for_role(Role::Accountant))
        .count();
    assert_eq!(disjointish.len(), expected);

    assert!(policy.permissions_for_roles(&[]).is_empty());
}

#[test]
fn capability_matrix_agrees_with_direct_checks() {
    let policy = PolicySet::builtin();
    for role in [Role::OpsLead, Role::Accountant, Role::Client] {
        let caps = policy.capabilities(role);
        assert_eq!(
            caps.services.create,
            policy.has_permission(role, Permission::ServicesCreate)
        );
        assert_eq!(
            caps.tasks.read,
            policy.has_permission(role, Permission::TasksViewOwn)
                || policy.has_permission(role, Permission::TasksViewAll)
        );
        assert_eq!(
            caps.service_requests.assign,
            policy.has_permission(role, Permission::ServiceRequestsAssign)
        );
        assert_eq!(
            caps.invoices.read,
            policy.has_permission(role, Permission::InvoicesViewOwn)
                || policy.has_permission(role, Permission::InvoicesViewAll)
        );
        assert_eq!(
            caps.system.manage_settings,
            policy.has_permission(role, Permission::SystemManageSettings)
        );
    }
}

#[test]
fn manage_predicates_are_derived_from_grants() {
    let policy = PolicySet::builtin();
    let mutating_services = [
        Permission::ServicesCreate,
        Permission::ServicesUpdate,
        Permission::ServicesDelete,
    ];
    let mutating_workflows = [
        Permission::WorkflowsCreate,
        Permission::WorkflowsUpdate,
        Permission::WorkflowsDelete,
        Permission::WorkflowsManageTemplates,
    ];
    for role in Role::ALL {
        assert_eq!(
            policy.can_manage_services(role),
            policy.has_any_permission(role, &mutating_services)
        );
        assert_eq!(
            policy.can_manage_workflows(role),
            policy.has_any_permission(role, &mutating_workflows)
        );
    }
    assert!(policy.can_manage_services(Role::OpsManager));
    assert!(!policy.can_manage_services(Role::SalesManager));
}

#[test]
fn substituted_tables_drive_every_query() {
    let policy = suite_tests::two_tier_fixture();
    assert!(policy.has_permission(Role::Client, Permission::ServicesView));
    assert!(!policy.has_permission(Role::Client, Permission::ServicesCreate));
    assert!(policy.permissions_for_role(Role::OpsManager).is_empty());
    assert!(policy.has_equal_or_higher_role(Role::Client, Role::OpsManager));
    assert!(!policy.capabilities(Role::OpsManager).services.read);
    policy.validate().expect("fixture satisfies the superset law");
}
