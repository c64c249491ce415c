use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{
    CheckController, GroupsController, ImportController, InitController, SurveysController,
};

pub struct Router<'a> {
    init_controller: InitController<'a>,
    import_controller: ImportController<'a>,
    groups_controller: GroupsController<'a>,
    surveys_controller: SurveysController<'a>,
    check_controller: CheckController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            init_controller: InitController::new(container),
            import_controller: ImportController::new(container),
            groups_controller: GroupsController::new(container),
            surveys_controller: SurveysController::new(container),
            check_controller: CheckController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Init => self.init_controller.init(),
            Commands::Import { file } => self.import_controller.import(file).await,
            Commands::Groups { format } => self.groups_controller.list(format).await,
            Commands::Surveys { group_id, format } => {
                self.surveys_controller.list(group_id, format).await
            }
            Commands::Check {
                group_id,
                fingerprint,
                format,
            } => {
                self.check_controller
                    .check(group_id, fingerprint, format)
                    .await
            }
        }
    }
}
