use storefront_core::{ApplicationError, DetailState, ProductId};

use super::{CommandResult, Session};

pub fn run(session: &Session, id: ProductId) -> CommandResult {
    let detail = session.detail_view();
    match session.runtime.block_on(detail.load(id)) {
        Ok(DetailState::Found(product)) => {
            CommandResult::success_with("show", format!("product {id}"), &product)
        }
        Ok(DetailState::NotFound(id)) => {
            CommandResult::from_error("show", ApplicationError::NotFound(id))
        }
        Err(error) => CommandResult::from_error("show", error),
    }
}
