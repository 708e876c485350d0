use storefront_core::{FormField, ListView, SubmitOutcome};

use super::{CommandResult, Session};

#[derive(Debug, Clone, Default, clap::Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, help = "Decimal price, at least 0.01")]
    pub price: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, help = "Must be one of the categories already in the catalog")]
    pub category: String,
    #[arg(long)]
    pub image: Option<String>,
}

pub fn run(session: &Session, args: CreateArgs) -> CommandResult {
    let mut view = match session.loaded_list_view("create") {
        Ok(view) => view,
        Err(result) => return result,
    };

    let form = view.form_mut();
    form.set(FormField::Title, args.title);
    form.set(FormField::Price, args.price);
    form.set(FormField::Description, args.description);
    form.set(FormField::Category, args.category);
    if let Some(image) = args.image {
        form.set(FormField::Image, image);
    }

    submit(session, &mut view, "create")
}

/// Submits the view's form and reports the created or updated product.
pub(crate) fn submit(session: &Session, view: &mut ListView, command: &str) -> CommandResult {
    match session.runtime.block_on(view.submit_form()) {
        Ok(SubmitOutcome::Created(product)) => CommandResult::success_with(
            command,
            notification_message(view, "product created"),
            &product,
        ),
        Ok(SubmitOutcome::Updated(id)) => CommandResult::success_with(
            command,
            notification_message(view, "product updated"),
            session.store.get_by_id(id),
        ),
        Err(error) => CommandResult::from_error(command, error),
    }
}

fn notification_message(view: &ListView, fallback: &str) -> String {
    view.notification()
        .map(|notification| notification.message.clone())
        .unwrap_or_else(|| fallback.to_string())
}
