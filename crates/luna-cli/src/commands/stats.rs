use luna_core::storage::Database;

use super::{print_json, CommandResult};

pub fn run() -> CommandResult {
    let db = Database::open()?;
    print_json(&db.stats()?)
}
