use std::io::{self, BufRead, Write};

use storefront_core::{
    DeleteOutcome, DetailState, FormField, ListView, Product, ProductId, Route, SubmitOutcome,
    ViewError,
};
use tracing::debug;

use super::delete::confirm_from;
use super::{CommandResult, Session};

const HELP: &str = "\
commands:
  list                      show the current page
  search [text]             filter by title (empty clears)
  category <name|all>       filter by category
  next | prev | page <n>    move between pages
  categories                list known categories
  show <id>                 product details
  open <path>               open `/` or `/product/<id>`
  add                       start a new product form
  edit <id>                 load a product into the form
  set <field> <value>       fill title, price, description, category or image
  form                      show the form
  save                      submit the form
  cancel                    clear the form
  delete <id>               delete after confirmation
  reload                    refetch the catalog
  help                      this text
  quit                      leave";

enum Step {
    Continue,
    Quit,
}

pub fn run(session: &Session) -> CommandResult {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_with_io(session, &mut input, &mut output)
}

/// Runs the interactive session until `quit` or end of input.
pub fn run_with_io(
    session: &Session,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> CommandResult {
    let mut view = match session.loaded_list_view("browse") {
        Ok(view) => view,
        Err(result) => return result,
    };

    let mut executed = 0usize;
    let result = (|| -> io::Result<()> {
        writeln!(output, "{}", render_page(&view))?;
        let mut line = String::new();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let command = line.trim();
            if command.is_empty() {
                continue;
            }

            executed += 1;
            debug!(event_name = "cli.browse.command", command, "browse command");
            match execute(session, &mut view, command, input, output)? {
                Step::Continue => {}
                Step::Quit => return Ok(()),
            }
        }
    })();

    match result {
        Ok(()) => CommandResult::success_with(
            "browse",
            "browse session ended",
            serde_json::json!({ "commands": executed }),
        ),
        Err(error) => CommandResult::failure("browse", "io", error.to_string(), 5),
    }
}

fn execute(
    session: &Session,
    view: &mut ListView,
    command: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> io::Result<Step> {
    let (verb, rest) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
    let rest = rest.trim();

    match verb {
        "quit" | "exit" => return Ok(Step::Quit),
        "help" => writeln!(output, "{HELP}")?,
        "list" => writeln!(output, "{}", render_page(view))?,
        "search" => {
            view.set_search_text(rest);
            writeln!(output, "{}", render_page(view))?;
        }
        "category" => {
            view.set_category(rest);
            writeln!(output, "{}", render_page(view))?;
        }
        "next" => {
            if view.has_next_page() {
                view.next_page();
                writeln!(output, "{}", render_page(view))?;
            } else {
                writeln!(output, "already on the last page")?;
            }
        }
        "prev" => {
            view.prev_page();
            writeln!(output, "{}", render_page(view))?;
        }
        "page" => match rest.parse::<usize>() {
            Ok(page) => {
                view.go_to_page(page);
                writeln!(output, "{}", render_page(view))?;
            }
            Err(_) => writeln!(output, "usage: page <n>")?,
        },
        "categories" => writeln!(output, "{}", view.categories().join(", "))?,
        "show" => match rest.parse::<ProductId>() {
            Ok(id) => show(session, view, id, output)?,
            Err(_) => writeln!(output, "usage: show <id>")?,
        },
        "open" => match Route::parse(rest) {
            Ok(Route::List) => writeln!(output, "{}", render_page(view))?,
            Ok(Route::Detail(id)) => show(session, view, id, output)?,
            Err(error) => writeln!(output, "error: {error}")?,
        },
        "add" => {
            view.reset_form();
            writeln!(output, "new product form; fill it with `set`, then `save`")?;
        }
        "edit" => match rest.parse::<ProductId>() {
            Ok(id) => match view.begin_edit(id) {
                Ok(()) => writeln!(output, "editing product {id}\n{}", render_form(view))?,
                Err(error) => writeln!(output, "error: {error}")?,
            },
            Err(_) => writeln!(output, "usage: edit <id>")?,
        },
        "set" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            match FormField::parse(name) {
                Some(field) => view.form_mut().set(field, value.trim()),
                None => writeln!(output, "unknown field `{name}`")?,
            }
        }
        "form" => writeln!(output, "{}", render_form(view))?,
        "cancel" => {
            view.reset_form();
            writeln!(output, "form cleared")?;
        }
        "save" => match session.runtime.block_on(view.submit_form()) {
            Ok(SubmitOutcome::Created(product)) => {
                notify(view, output)?;
                writeln!(output, "{}", render_row(&product))?;
            }
            Ok(SubmitOutcome::Updated(_)) => notify(view, output)?,
            Err(ViewError::Form(errors)) => {
                for error in errors.errors() {
                    writeln!(output, "{}: {}", error.field.as_str(), error.kind.code())?;
                }
            }
            Err(error) => writeln!(output, "error: {error}")?,
        },
        "delete" => match rest.parse::<ProductId>() {
            Ok(id) => {
                let confirm = |prompt: &str| confirm_from(prompt, input, output);
                match session.runtime.block_on(view.delete_product(id, confirm)) {
                    Ok(DeleteOutcome::Deleted) => notify(view, output)?,
                    Ok(DeleteOutcome::Cancelled) => writeln!(output, "delete cancelled")?,
                    Err(error) => writeln!(output, "error: {error}")?,
                }
            }
            Err(_) => writeln!(output, "usage: delete <id>")?,
        },
        "reload" => match session.runtime.block_on(view.reload()) {
            Ok(()) => writeln!(output, "{}", render_page(view))?,
            Err(error) => writeln!(output, "error: {error}")?,
        },
        other => writeln!(output, "unknown command `{other}`; try `help`")?,
    }

    Ok(Step::Continue)
}

fn show(
    session: &Session,
    view: &mut ListView,
    id: ProductId,
    output: &mut dyn Write,
) -> io::Result<()> {
    match session.runtime.block_on(session.detail_view().load(id)) {
        Ok(DetailState::Found(product)) => {
            // A miss refetches into the shared cache.
            view.refresh();
            writeln!(
                output,
                "#{} {}\nprice: {}\ncategory: {}\n{}",
                product.id, product.title, product.price, product.category, product.description
            )?;
            if let Some(image) = &product.image {
                writeln!(output, "image: {image}")?;
            }
            Ok(())
        }
        Ok(DetailState::NotFound(id)) => {
            view.refresh();
            writeln!(output, "Product not found (id {id})")
        }
        Err(error) => writeln!(output, "error: {error}"),
    }
}

fn notify(view: &mut ListView, output: &mut dyn Write) -> io::Result<()> {
    if let Some(notification) = view.notification() {
        writeln!(output, "{}: {}", notification.title, notification.message)?;
    }
    view.dismiss_notification();
    Ok(())
}

fn render_page(view: &ListView) -> String {
    let mut lines = vec![format!(
        "page {}/{} ({} products, category: {})",
        view.current_page(),
        view.total_pages().max(1),
        view.filtered_count(),
        view.filter().category.as_str()
    )];
    if view.visible_products().is_empty() {
        lines.push("  no products".to_string());
    }
    lines.extend(view.visible_products().iter().map(render_row));
    lines.join("\n")
}

fn render_row(product: &Product) -> String {
    format!("  [{}] {} - {} ({})", product.id, product.title, product.price, product.category)
}

fn render_form(view: &ListView) -> String {
    let form = view.form();
    let mode = if view.is_editing() { "edit" } else { "new" };
    format!(
        "form ({mode}):\n  title: {}\n  price: {}\n  description: {}\n  category: {}\n  image: {}",
        form.title, form.price, form.description, form.category, form.image
    )
}
