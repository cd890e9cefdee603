mod login;
mod logout;
mod password_reset;

pub use login::login_handler;
pub use logout::logout_handler;
pub use password_reset::password_reset_handler;
