use anyhow::Result;

use super::super::Container;

pub struct InitController<'a> {
    container: &'a Container,
}

impl<'a> InitController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// The schema is created when the container opens the store for writing.
    pub fn init(&self) -> Result<String> {
        Ok(format!(
            "Survey store ready at {}",
            self.container.db_path().display()
        ))
    }
}
