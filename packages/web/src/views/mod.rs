use ui::Destination;

use crate::Route;

mod auth_callback;
pub use auth_callback::AuthCallback;

mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod my_page;
pub use my_page::MyPage;

/// Route a shared view asked to open.
pub(crate) fn route_for(destination: Destination) -> Route {
    match destination {
        Destination::Home => Route::Home {},
        Destination::Login => Route::Login {},
        Destination::MyPage => Route::MyPage {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_match_destination_paths() {
        for destination in [Destination::Home, Destination::Login, Destination::MyPage] {
            assert_eq!(route_for(destination).to_string(), destination.path());
        }
    }
}
