//! Route paths shared by views and the launchers' `Route` enums.

pub const HOME: &str = "/";
pub const PLAZA: &str = "/plaza";
pub const ACHIEVEMENTS: &str = "/achievements";
pub const INVITE: &str = "/invite";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const SETTINGS: &str = "/settings";

pub fn report(session_id: &str) -> String {
    format!("/report/{session_id}")
}
