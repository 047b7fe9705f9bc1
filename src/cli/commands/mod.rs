pub mod report;
pub mod system;
pub mod transaction;

use super::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let definitions = transaction::definitions()
        .into_iter()
        .chain(report::definitions())
        .chain(system::definitions());
    for entry in definitions {
        registry.register(entry);
    }
    registry.alias("quit", "exit");
}
