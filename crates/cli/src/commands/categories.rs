use super::{CommandResult, Session};

pub fn run(session: &Session) -> CommandResult {
    match session.loaded_list_view("categories") {
        Ok(view) => CommandResult::success_with(
            "categories",
            format!("{} categories", view.categories().len()),
            view.categories(),
        ),
        Err(result) => result,
    }
}
