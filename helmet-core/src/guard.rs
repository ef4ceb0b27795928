//! Route guard: decides what a page request gets based on the session

use crate::session::{SessionStatus, LOGIN_PATH};

/// Where an authenticated user lands by default
pub const LANDING_PATH: &str = "/analysis";

/// Pages grouped by who may see them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageGroup {
    /// Visible to everyone
    Public,
    /// Only for visitors who are not logged in (login, register)
    PublicOnly,
    /// Only for logged-in users
    Protected,
}

impl PageGroup {
    /// Classify a request path
    pub fn for_path(path: &str) -> Self {
        let path = path.trim_end_matches('/');
        match path {
            "" => PageGroup::Public,
            "/login" | "/register" => PageGroup::PublicOnly,
            "/analysis" | "/alerts" | "/drivers" => PageGroup::Protected,
            p if p.starts_with("/drivers/") => PageGroup::Protected,
            _ => PageGroup::Public,
        }
    }
}

/// Outcome of guarding one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not known yet; show a neutral placeholder
    Placeholder(&'static str),
    /// Send the visitor elsewhere
    Redirect(&'static str),
    /// Show the requested page
    Render,
}

/// Decide what a request for a page in `group` should get
pub fn evaluate(group: PageGroup, status: &SessionStatus) -> GuardDecision {
    match (group, status) {
        (PageGroup::Public, _) => GuardDecision::Render,
        (PageGroup::Protected, SessionStatus::Loading) => {
            GuardDecision::Placeholder("Checking authentication...")
        }
        (PageGroup::Protected, SessionStatus::Absent) => GuardDecision::Redirect(LOGIN_PATH),
        (PageGroup::Protected, SessionStatus::Active(_)) => GuardDecision::Render,
        (PageGroup::PublicOnly, SessionStatus::Loading) => GuardDecision::Placeholder("Loading..."),
        (PageGroup::PublicOnly, SessionStatus::Absent) => GuardDecision::Render,
        (PageGroup::PublicOnly, SessionStatus::Active(_)) => GuardDecision::Redirect(LANDING_PATH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthUser;

    #[test]
    fn test_path_groups() {
        assert_eq!(PageGroup::for_path("/"), PageGroup::Public);
        assert_eq!(PageGroup::for_path("/login"), PageGroup::PublicOnly);
        assert_eq!(PageGroup::for_path("/register/"), PageGroup::PublicOnly);
        assert_eq!(PageGroup::for_path("/alerts"), PageGroup::Protected);
        assert_eq!(PageGroup::for_path("/drivers/%231122589"), PageGroup::Protected);
    }

    #[test]
    fn test_decision_table() {
        let active = SessionStatus::Active(AuthUser::new("Ada", "ada@example.com"));

        assert_eq!(
            evaluate(PageGroup::Protected, &SessionStatus::Loading),
            GuardDecision::Placeholder("Checking authentication...")
        );
        assert_eq!(
            evaluate(PageGroup::Protected, &SessionStatus::Absent),
            GuardDecision::Redirect("/login")
        );
        assert_eq!(evaluate(PageGroup::Protected, &active), GuardDecision::Render);

        assert_eq!(
            evaluate(PageGroup::PublicOnly, &SessionStatus::Loading),
            GuardDecision::Placeholder("Loading...")
        );
        assert_eq!(
            evaluate(PageGroup::PublicOnly, &SessionStatus::Absent),
            GuardDecision::Render
        );
        assert_eq!(
            evaluate(PageGroup::PublicOnly, &active),
            GuardDecision::Redirect("/analysis")
        );

        for status in [SessionStatus::Loading, SessionStatus::Absent, active] {
            assert_eq!(evaluate(PageGroup::Public, &status), GuardDecision::Render);
        }
    }
}
