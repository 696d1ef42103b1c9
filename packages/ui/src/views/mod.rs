mod auth_callback;
pub use auth_callback::AuthCallbackView;

mod home;
pub use home::HomeView;

mod login;
pub use login::LoginView;

mod my_page;
pub use my_page::MyPageView;
