use storefront_core::{FormField, ProductId};

use super::create::submit;
use super::{CommandResult, Session};

#[derive(Debug, Clone, clap::Args)]
pub struct UpdateArgs {
    pub id: ProductId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, help = "Image URL; an empty value removes the image")]
    pub image: Option<String>,
}

pub fn run(session: &Session, args: UpdateArgs) -> CommandResult {
    let mut view = match session.loaded_list_view("update") {
        Ok(view) => view,
        Err(result) => return result,
    };

    if let Err(error) = view.begin_edit(args.id) {
        return CommandResult::from_error("update", error);
    }

    // Unset flags keep the product's current values.
    let form = view.form_mut();
    let fields = [
        (FormField::Title, args.title),
        (FormField::Price, args.price),
        (FormField::Description, args.description),
        (FormField::Category, args.category),
        (FormField::Image, args.image),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            form.set(field, value);
        }
    }

    submit(session, &mut view, "update")
}
