use std::env;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use serde_json::Value;
use storefront_cli::commands::create::CreateArgs;
use storefront_cli::commands::delete::DeleteArgs;
use storefront_cli::commands::list::ListArgs;
use storefront_cli::commands::update::UpdateArgs;
use storefront_cli::commands::{
    browse, categories, config, create, delete, doctor, list, open, show, update, GlobalArgs,
    Session,
};
use storefront_core::config::ENV_KEYS;
use storefront_core::ProductId;

fn demo_args() -> GlobalArgs {
    GlobalArgs { demo: true, ..GlobalArgs::default() }
}

fn demo_session(command: &str) -> Session {
    match Session::open(command, &demo_args()) {
        Ok(session) => session,
        Err(result) => panic!("demo session should open: {}", result.output),
    }
}

#[test]
fn list_returns_first_page_of_demo_catalog() {
    with_env(&[], || {
        let session = demo_session("list");
        let result = list::run(&session, ListArgs { page: 1, ..ListArgs::default() });
        assert_eq!(result.exit_code, 0, "{}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "list");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["page"], 1);
        assert_eq!(payload["data"]["page_size"], 5);
        assert_eq!(payload["data"]["total_pages"], 2);
        assert_eq!(payload["data"]["filtered_count"], 10);
        assert_eq!(payload["data"]["has_next_page"], true);
        assert_eq!(payload["data"]["products"].as_array().map(Vec::len), Some(5));
        assert_eq!(
            payload["data"]["categories"],
            serde_json::json!(["men's clothing", "jewelery", "electronics", "women's clothing"])
        );
    });
}

#[test]
fn list_applies_search_category_and_page() {
    with_env(&[], || {
        let session = demo_session("list");
        let result = list::run(
            &session,
            ListArgs { search: Some("JACKET".to_string()), category: None, page: 1 },
        );
        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["filtered_count"], 2);
        assert_eq!(payload["data"]["has_next_page"], false);

        let result = list::run(
            &session,
            ListArgs { search: None, category: Some("jewelery".to_string()), page: 1 },
        );
        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["category"], "jewelery");
        assert_eq!(payload["data"]["filtered_count"], 2);

        let result = list::run(&session, ListArgs { search: None, category: None, page: 2 });
        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["page"], 2);
        assert_eq!(payload["data"]["has_next_page"], false);
        assert_eq!(payload["data"]["products"][0]["id"], 9);
    });
}

#[test]
fn page_size_override_changes_pagination() {
    with_env(&[], || {
        let args = GlobalArgs { page_size: Some(3), ..demo_args() };
        let session = Session::open("list", &args).expect("session");
        let result = list::run(&session, ListArgs { page: 1, ..ListArgs::default() });

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["page_size"], 3);
        assert_eq!(payload["data"]["total_pages"], 4);
    });
}

#[test]
fn show_returns_product_or_not_found() {
    with_env(&[], || {
        let session = demo_session("show");
        let result = show::run(&session, ProductId(9));
        assert_eq!(result.exit_code, 0, "{}", result.output);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["title"], "WD 2TB Elements Portable External Hard Drive");

        let result = show::run(&session, ProductId(999));
        assert_eq!(result.exit_code, 3);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "not_found");
        assert!(payload["correlation_id"].as_str().is_some_and(|id| !id.is_empty()));
    });
}

#[test]
fn open_dispatches_routes() {
    with_env(&[], || {
        let session = demo_session("open");

        let payload = parse_payload(&open::run(&session, "/product/1").output);
        assert_eq!(payload["command"], "show");
        assert_eq!(payload["data"]["id"], 1);

        let payload = parse_payload(&open::run(&session, "/").output);
        assert_eq!(payload["command"], "list");

        let result = open::run(&session, "/cart");
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "bad_request");
    });
}

#[test]
fn categories_are_listed_in_first_seen_order() {
    with_env(&[], || {
        let session = demo_session("categories");
        let payload = parse_payload(&categories::run(&session).output);

        assert_eq!(payload["data"][0], "men's clothing");
        assert_eq!(payload["data"].as_array().map(Vec::len), Some(4));
    });
}

#[test]
fn create_assigns_local_id_and_notifies() {
    with_env(&[], || {
        let session = demo_session("create");
        let result = create::run(
            &session,
            CreateArgs {
                title: "USB Hub".to_string(),
                price: "19.90".to_string(),
                description: "four ports".to_string(),
                category: "electronics".to_string(),
                image: Some("https://example.test/hub.png".to_string()),
            },
        );
        assert_eq!(result.exit_code, 0, "{}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["message"], "Product added successfully");
        assert_eq!(payload["data"]["title"], "USB Hub");
        assert_eq!(payload["data"]["image"], "https://example.test/hub.png");
        assert_ne!(payload["data"]["id"], 21);

        let cached = session.store.cached();
        assert_eq!(cached.len(), 11);
        assert_eq!(cached[0].title, "USB Hub");
    });
}

#[test]
fn create_rejects_unknown_category_without_remote_call() {
    with_env(&[], || {
        let session = demo_session("create");
        let result = create::run(
            &session,
            CreateArgs {
                title: "Rake".to_string(),
                price: "8".to_string(),
                description: "garden rake".to_string(),
                category: "garden".to_string(),
                image: None,
            },
        );

        assert_eq!(result.exit_code, 2);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "bad_request");
        assert!(payload["message"].as_str().is_some_and(|m| m.contains("invalidCategory")));
        assert_eq!(session.store.cached().len(), 10);
    });
}

#[test]
fn update_merges_only_provided_fields() {
    with_env(&[], || {
        let session = demo_session("update");
        let result = update::run(
            &session,
            UpdateArgs {
                id: ProductId(3),
                title: Some("Mens Winter Jacket".to_string()),
                price: None,
                description: None,
                category: None,
                image: None,
            },
        );
        assert_eq!(result.exit_code, 0, "{}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["message"], "Product updated successfully");
        let product = session.store.get_by_id(ProductId(3)).expect("cached product");
        assert_eq!(product.title, "Mens Winter Jacket");
        assert_eq!(product.description, "Great outerwear jacket.");
        assert_eq!(product.category, "men's clothing");
    });
}

#[test]
fn update_with_empty_image_removes_it() {
    with_env(&[], || {
        let session = demo_session("update");
        let edit = |image: &str| UpdateArgs {
            id: ProductId(3),
            title: None,
            price: None,
            description: None,
            category: None,
            image: Some(image.to_string()),
        };

        let result = update::run(&session, edit("https://example.test/jacket.png"));
        assert_eq!(result.exit_code, 0, "{}", result.output);
        let product = session.store.get_by_id(ProductId(3)).expect("cached product");
        assert_eq!(product.image.as_deref(), Some("https://example.test/jacket.png"));

        let result = update::run(&session, edit(""));
        assert_eq!(result.exit_code, 0, "{}", result.output);
        let product = session.store.get_by_id(ProductId(3)).expect("cached product");
        assert_eq!(product.image, None);
        assert_eq!(product.category, "men's clothing");
    });
}

#[test]
fn update_of_unknown_product_is_not_found() {
    with_env(&[], || {
        let session = demo_session("update");
        let result = update::run(
            &session,
            UpdateArgs {
                id: ProductId(404),
                title: Some("Ghost".to_string()),
                price: None,
                description: None,
                category: None,
                image: None,
            },
        );

        assert_eq!(result.exit_code, 3);
        assert_eq!(parse_payload(&result.output)["error_class"], "not_found");
    });
}

#[test]
fn delete_honors_confirmation() {
    with_env(&[], || {
        let session = demo_session("delete");

        let mut declined = Cursor::new("n\n");
        let mut prompt = Vec::new();
        let result = delete::run_with_input(
            &session,
            DeleteArgs { id: ProductId(1), yes: false },
            &mut declined,
            &mut prompt,
        );
        assert_eq!(parse_payload(&result.output)["message"], "delete cancelled");
        assert!(String::from_utf8_lossy(&prompt).contains("Are you sure"));
        assert!(session.store.get_by_id(ProductId(1)).is_some());

        let mut accepted = Cursor::new("yes\n");
        let result = delete::run_with_input(
            &session,
            DeleteArgs { id: ProductId(1), yes: false },
            &mut accepted,
            &mut Vec::<u8>::new(),
        );
        assert_eq!(parse_payload(&result.output)["message"], "Product deleted successfully");
        assert!(session.store.get_by_id(ProductId(1)).is_none());
    });
}

#[test]
fn delete_with_yes_skips_prompt() {
    with_env(&[], || {
        let session = demo_session("delete");
        let mut prompt = Vec::new();
        let result = delete::run_with_input(
            &session,
            DeleteArgs { id: ProductId(2), yes: true },
            &mut Cursor::new(""),
            &mut prompt,
        );

        assert_eq!(result.exit_code, 0, "{}", result.output);
        assert!(prompt.is_empty());
        assert!(session.store.get_by_id(ProductId(2)).is_none());
    });
}

#[test]
fn browse_session_filters_creates_and_deletes() {
    with_env(&[], || {
        let session = demo_session("browse");
        let script = "\
search jacket
category jewelery
category all
search
next
add
set title Silver Ring
set price 12.5
set description plain band
set category jewelery
save
delete 20
y
list
quit
";
        let mut output = Vec::new();
        let result = browse::run_with_io(&session, &mut Cursor::new(script), &mut output);
        assert_eq!(result.exit_code, 0, "{}", result.output);
        assert_eq!(parse_payload(&result.output)["data"]["commands"], 14);

        let transcript = String::from_utf8_lossy(&output);
        assert!(transcript.contains("page 1/1 (2 products, category: all)"), "{transcript}");
        assert!(transcript.contains("page 2/2"), "{transcript}");
        assert!(transcript.contains("Success: Product added successfully"), "{transcript}");
        assert!(transcript.contains("Silver Ring"), "{transcript}");
        assert!(transcript.contains("Success: Product deleted successfully"), "{transcript}");
        assert!(session.store.get_by_id(ProductId(20)).is_none());
    });
}

#[test]
fn browse_save_reports_field_errors() {
    with_env(&[], || {
        let session = demo_session("browse");
        let mut output = Vec::new();
        let result =
            browse::run_with_io(&session, &mut Cursor::new("add\nsave\n"), &mut output);
        assert_eq!(result.exit_code, 0);

        let transcript = String::from_utf8_lossy(&output);
        assert!(transcript.contains("title: required"), "{transcript}");
        assert!(transcript.contains("price: required"), "{transcript}");
        assert_eq!(session.store.cached().len(), 10);
    });
}

#[test]
fn browse_show_reports_missing_product() {
    with_env(&[], || {
        let session = demo_session("browse");
        let mut output = Vec::new();
        browse::run_with_io(
            &session,
            &mut Cursor::new("show 4\nopen /product/5\nquit\n"),
            &mut output,
        );

        let transcript = String::from_utf8_lossy(&output);
        assert!(transcript.contains("Product not found (id 4)"), "{transcript}");
        assert!(transcript.contains("John Hardy Women's Legends Naga Bracelet"), "{transcript}");
    });
}

#[test]
fn config_attributes_values_to_their_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path: PathBuf = dir.path().join("storefront.toml");
    std::fs::write(&path, "[catalog]\npage_size = 8\n").expect("write config");

    with_env(&[("STOREFRONT_API_TIMEOUT_SECS", "12")], || {
        let args = GlobalArgs {
            config: Some(path.clone()),
            api_url: Some("http://localhost:9999".to_string()),
            ..GlobalArgs::default()
        };
        let result = config::run(&args);
        assert_eq!(result.exit_code, 0, "{}", result.output);

        let payload = parse_payload(&result.output);
        let entries = payload["data"]["entries"].as_array().expect("entries");
        let source_of = |key: &str| {
            entries
                .iter()
                .find(|entry| entry["key"] == key)
                .map(|entry| entry["source"].as_str().unwrap_or_default().to_string())
                .expect("entry present")
        };

        assert_eq!(source_of("api.base_url"), "cli (--api-url)");
        assert_eq!(source_of("api.timeout_secs"), "env (STOREFRONT_API_TIMEOUT_SECS)");
        assert!(source_of("catalog.page_size").starts_with("file ("));
        assert_eq!(source_of("logging.level"), "default");
    });
}

#[test]
fn timeout_and_log_level_flags_override_env() {
    with_env(
        &[("STOREFRONT_API_TIMEOUT_SECS", "12"), ("STOREFRONT_LOG_LEVEL", "warn")],
        || {
            let args = GlobalArgs {
                timeout_secs: Some(3),
                log_level: Some("debug".to_string()),
                ..GlobalArgs::default()
            };
            let result = config::run(&args);
            assert_eq!(result.exit_code, 0, "{}", result.output);

            let payload = parse_payload(&result.output);
            let entries = payload["data"]["entries"].as_array().expect("entries");
            let entry = |key: &str| {
                entries.iter().find(|entry| entry["key"] == key).cloned().expect("entry present")
            };

            assert_eq!(entry("api.timeout_secs")["value"], "3");
            assert_eq!(entry("api.timeout_secs")["source"], "cli (--timeout-secs)");
            assert_eq!(entry("logging.level")["value"], "debug");
            assert_eq!(entry("logging.level")["source"], "cli (--log-level)");
        },
    );
}

#[test]
fn missing_explicit_config_file_fails() {
    with_env(&[], || {
        let args = GlobalArgs {
            config: Some(PathBuf::from("/nonexistent/storefront.toml")),
            ..demo_args()
        };
        let result = match Session::open("list", &args) {
            Ok(_) => panic!("session should not open without its config file"),
            Err(result) => result,
        };

        assert_eq!(result.exit_code, 5);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "list");
        assert_eq!(payload["error_class"], "internal");
    });
}

#[test]
fn doctor_passes_in_demo_mode() {
    with_env(&[], || {
        let result = doctor::run(&demo_args(), true);
        assert_eq!(result.exit_code, 0, "{}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "pass");
        assert_eq!(payload["checks"][1]["name"], "api_reachability");
        assert_eq!(payload["checks"][1]["details"], "listed 10 products from in-memory demo catalog");
    });
}

#[test]
fn doctor_skips_api_check_when_config_is_invalid() {
    with_env(&[("STOREFRONT_CATALOG_PAGE_SIZE", "0")], || {
        let result = doctor::run(&demo_args(), true);
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(payload["checks"][0]["status"], "fail");
        assert_eq!(payload["checks"][1]["status"], "skipped");
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid json")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let previous_values: Vec<(&str, Option<String>)> =
        ENV_KEYS.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in ENV_KEYS {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
