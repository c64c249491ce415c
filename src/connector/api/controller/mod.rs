pub mod check_controller;
pub mod groups_controller;
pub mod import_controller;
pub mod init_controller;
pub mod surveys_controller;

pub use check_controller::CheckController;
pub use groups_controller::GroupsController;
pub use import_controller::ImportController;
pub use init_controller::InitController;
pub use surveys_controller::SurveysController;
