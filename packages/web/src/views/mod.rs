mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod board;
pub use board::Board;

mod dashboard;
pub use dashboard::Dashboard;
