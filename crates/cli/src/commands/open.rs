use storefront_core::Route;

use super::list::{self, ListArgs};
use super::{show, CommandResult, Session};

/// Dispatches a UI path (`/` or `/product/{id}`) to the matching view.
pub fn run(session: &Session, path: &str) -> CommandResult {
    match Route::parse(path) {
        Ok(Route::List) => list::run(session, ListArgs { page: 1, ..ListArgs::default() }),
        Ok(Route::Detail(id)) => show::run(session, id),
        Err(error) => CommandResult::failure("open", "bad_request", error.to_string(), 2),
    }
}
