use std::io::{self, BufRead, Write};

use storefront_core::{DeleteOutcome, ProductId};

use super::{CommandResult, Session};

#[derive(Debug, Clone, clap::Args)]
pub struct DeleteArgs {
    pub id: ProductId,
    #[arg(long, help = "Skip the confirmation prompt")]
    pub yes: bool,
}

pub fn run(session: &Session, args: DeleteArgs) -> CommandResult {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_with_input(session, args, &mut input, &mut io::stderr())
}

/// Same as [`run`] with the confirmation read from `input` and the prompt written to `prompt_out`.
pub fn run_with_input(
    session: &Session,
    args: DeleteArgs,
    input: &mut dyn BufRead,
    prompt_out: &mut dyn Write,
) -> CommandResult {
    let mut view = match session.loaded_list_view("delete") {
        Ok(view) => view,
        Err(result) => return result,
    };

    let confirm = |prompt: &str| args.yes || confirm_from(prompt, input, prompt_out);
    match session.runtime.block_on(view.delete_product(args.id, confirm)) {
        Ok(DeleteOutcome::Deleted) => {
            let message = view
                .notification()
                .map(|notification| notification.message.clone())
                .unwrap_or_else(|| "product deleted".to_string());
            CommandResult::success("delete", message)
        }
        Ok(DeleteOutcome::Cancelled) => CommandResult::success("delete", "delete cancelled"),
        Err(error) => CommandResult::from_error("delete", error),
    }
}

/// Writes `prompt [y/N]` and accepts `y` or `yes`.
pub(crate) fn confirm_from(prompt: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> bool {
    if write!(out, "{prompt} [y/N] ").and_then(|()| out.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
