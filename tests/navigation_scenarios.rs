mod common;

use std::sync::Arc;
use std::time::Duration;

use active_tracker_nav::accessors::AccessorError;
use active_tracker_nav::config::NavigationConfig;
use active_tracker_nav::models::Identity;
use active_tracker_nav::navigation::{
    AccessorFailurePolicy, DocumentTitle, NavigationError, Navigator, RouteConfig, RouteTable,
    default_routes,
};
use active_tracker_nav::session::{AuthEvent, SessionStore};
use common::{Answer, ScriptedAccessor, navigator_with};
use uuid::Uuid;

fn config() -> NavigationConfig {
    NavigationConfig::default()
}

// Request /create while signed out: the login route is resolved instead.
#[tokio::test]
async fn scenario_protected_route_signed_out_redirects_to_login() {
    let (navigator, document) = navigator_with(ScriptedAccessor::new(Answer::SignedOut), &config());

    let navigation = navigator.navigate("/create").await.expect("navigation resolves");

    assert_eq!(navigation.route.name, "login");
    assert_eq!(navigation.route.path, "/login");
    assert_eq!(navigation.redirected_from.as_deref(), Some("/create"));
    assert_eq!(document.get(), "Login | Active Tracker");
}

#[tokio::test]
async fn scenario_protected_route_signed_in_proceeds() {
    let (navigator, document) = navigator_with(ScriptedAccessor::new(Answer::SignedIn), &config());

    let navigation = navigator.navigate("/create").await.expect("navigation resolves");

    assert_eq!(navigation.route.name, "create");
    assert!(!navigation.was_redirected());
    assert_eq!(document.get(), "Create Workout | Active Tracker");
}

#[tokio::test]
async fn scenario_public_param_route_signed_out() {
    let (navigator, document) = navigator_with(ScriptedAccessor::new(Answer::SignedOut), &config());

    let navigation = navigator
        .navigate("/view-workout/42")
        .await
        .expect("navigation resolves");

    assert_eq!(navigation.route.name, "view-workout");
    assert_eq!(
        navigation.route.params.get("workoutId").map(String::as_str),
        Some("42")
    );
    assert!(!navigation.was_redirected());
    assert_eq!(document.get(), "View Workout | Active Tracker");
}

// The accessor is not consulted for public routes, so even a failing one
// cannot change the outcome.
#[tokio::test]
async fn scenario_home_succeeds_without_accessor() {
    let accessor = ScriptedAccessor::new(Answer::Fails);
    let config = NavigationConfig {
        on_accessor_error: AccessorFailurePolicy::Abort,
        ..NavigationConfig::default()
    };
    let (navigator, document) = navigator_with(accessor.clone(), &config);

    let navigation = navigator.navigate("/").await.expect("navigation resolves");

    assert_eq!(navigation.route.name, "home");
    assert_eq!(document.get(), "Home | Active Tracker");
    assert_eq!(accessor.calls(), 0);
}

#[tokio::test]
async fn public_routes_succeed_for_any_accessor_answer() {
    for answer in [Answer::SignedIn, Answer::SignedOut, Answer::Fails] {
        for path in ["/", "/login", "/register", "/view-workout/7"] {
            let (navigator, _) = navigator_with(ScriptedAccessor::new(answer), &config());
            let navigation = navigator.navigate(path).await.expect("navigation resolves");
            assert!(
                !navigation.was_redirected(),
                "{} was redirected with {:?}",
                path,
                answer
            );
        }
    }
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (navigator, document) = navigator_with(ScriptedAccessor::new(Answer::SignedIn), &config());
    assert!(matches!(
        navigator.navigate("/workouts").await,
        Err(NavigationError::NotFound(_))
    ));
    assert_eq!(document.get(), "");
}

#[tokio::test]
async fn failing_accessor_is_denied_by_default() {
    let (navigator, document) = navigator_with(ScriptedAccessor::new(Answer::Fails), &config());
    let navigation = navigator.navigate("/create").await.expect("navigation resolves");
    assert_eq!(navigation.route.name, "login");
    assert_eq!(document.get(), "Login | Active Tracker");
}

#[tokio::test]
async fn failing_accessor_can_abort_or_allow() {
    let abort = NavigationConfig {
        on_accessor_error: AccessorFailurePolicy::Abort,
        ..NavigationConfig::default()
    };
    let (navigator, _) = navigator_with(ScriptedAccessor::new(Answer::Fails), &abort);
    assert!(matches!(
        navigator.navigate("/create").await,
        Err(NavigationError::AccessorFailed(AccessorError::Decode(_)))
    ));

    let allow = NavigationConfig {
        on_accessor_error: AccessorFailurePolicy::Allow,
        ..NavigationConfig::default()
    };
    let (navigator, _) = navigator_with(ScriptedAccessor::new(Answer::Fails), &allow);
    let navigation = navigator.navigate("/create").await.expect("navigation resolves");
    assert_eq!(navigation.route.name, "create");
}

#[tokio::test]
async fn app_name_is_configurable() {
    let config = NavigationConfig {
        app_name: "Tracker".to_string(),
        ..NavigationConfig::default()
    };
    let (navigator, document) = navigator_with(ScriptedAccessor::new(Answer::SignedOut), &config);
    navigator.navigate("/register").await.expect("navigation resolves");
    assert_eq!(document.get(), "Register | Tracker");
}

// A newer navigation cancels one still waiting on the accessor; the stale one
// neither redirects nor touches the title.
#[tokio::test]
async fn superseded_navigation_is_cancelled() {
    let accessor = ScriptedAccessor::delayed(Answer::SignedOut, Duration::from_millis(50));
    let (navigator, document) = navigator_with(accessor, &config());

    let (first, second) = tokio::join!(navigator.navigate("/create"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        navigator.navigate("/view-workout/3").await
    });

    assert!(matches!(first, Err(NavigationError::Superseded(path)) if path == "/create"));
    let second = second.expect("newest navigation resolves");
    assert_eq!(second.route.name, "view-workout");
    assert_eq!(document.get(), "View Workout | Active Tracker");
}

// The session store, fed by auth events, gates the pipeline directly.
#[tokio::test]
async fn session_store_gates_navigation() {
    let store = Arc::new(SessionStore::new());
    let (navigator, _) = navigator_with(store.clone(), &config());

    let navigation = navigator.navigate("/create").await.unwrap();
    assert_eq!(navigation.route.name, "login");

    store.set_identity(Some(Identity::new(Uuid::new_v4(), None)));
    let navigation = navigator.navigate("/create").await.unwrap();
    assert_eq!(navigation.route.name, "create");

    store.apply_auth_event(AuthEvent::SignedOut, None);
    let navigation = navigator.navigate("/create").await.unwrap();
    assert_eq!(navigation.route.name, "login");
}

// A default child (`path: ""`) under a protected parent inherits the
// protection through the matched chain.
#[tokio::test]
async fn default_child_of_protected_parent_requires_login() {
    let mut routes = default_routes();
    routes.push(RouteConfig {
        path: "/account".to_string(),
        name: "account".to_string(),
        view: "AccountLayout".to_string(),
        lazy: false,
        title: "Account".to_string(),
        auth_required: true,
        children: vec![RouteConfig {
            path: String::new(),
            name: "account-home".to_string(),
            view: "AccountHomeView".to_string(),
            lazy: true,
            title: "My Account".to_string(),
            auth_required: false,
            children: Vec::new(),
        }],
    });
    let table = Arc::new(RouteTable::new(&routes, "login").expect("default child is valid"));

    for (answer, expected, title) in [
        (Answer::SignedOut, "login", "Login | Active Tracker"),
        (Answer::SignedIn, "account-home", "My Account | Active Tracker"),
    ] {
        let document = Arc::new(DocumentTitle::new());
        let navigator = Navigator::standard(
            table.clone(),
            ScriptedAccessor::new(answer),
            document.clone(),
            &config(),
        );
        let navigation = navigator.navigate("/account").await.expect("navigation resolves");
        assert_eq!(navigation.route.name, expected);
        assert_eq!(document.get(), title);
    }
}
