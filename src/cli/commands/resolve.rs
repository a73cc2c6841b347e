//! Resolve command implementation.

use crate::cli::args::ResolveArgs;
use crate::engine::Engine;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

pub struct ResolveCommand<'a> {
    engine: &'a Engine,
    args: ResolveArgs,
}

impl<'a> ResolveCommand<'a> {
    pub fn new(engine: &'a Engine, args: ResolveArgs) -> Self {
        Self { engine, args }
    }
}

impl Command for ResolveCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.message(&self.engine.resolve(self.args.module.trim()));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::empty_engine;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;

    fn resolve(module: &str) -> String {
        let (engine, _) = empty_engine(MockRunner::new());
        let mut ui = MockUI::new();
        let args = ResolveArgs {
            module: module.to_string(),
        };
        ResolveCommand::new(&engine, args).execute(&mut ui).unwrap();
        ui.messages()[0].clone()
    }

    #[test]
    fn curated_module_maps_to_package() {
        assert_eq!(resolve("cv2"), "opencv-python");
    }

    #[test]
    fn unknown_module_is_its_own_package() {
        assert_eq!(resolve("MyThing"), "MyThing");
    }
}
