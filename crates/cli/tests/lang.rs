//! Language preference survives between invocations.

use stowage_cli::args::{Cli, Command};
use stowage_cli::commands::App;
use stowage_client::api::WarehouseApi;
use stowage_core::locale::{JsonFileStore, Locale, Translator};

use clap::Parser;

fn app_at(path: &std::path::Path) -> App<JsonFileStore> {
    let prefs = JsonFileStore::new(path);
    let translator = Translator::load(&prefs).unwrap();
    App {
        api: WarehouseApi::new("http://127.0.0.1:1"),
        translator,
        prefs,
    }
}

#[tokio::test]
async fn language_choice_is_restored_on_next_start() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut first = app_at(&path);
    assert_eq!(first.translator.locale(), Locale::En);

    let Cli { command } = Cli::try_parse_from(["stowage", "lang", "ar"]).unwrap();
    let out = first.run(command).await.unwrap();
    assert_eq!(out, "تم تغيير اللغة إلى العربية");

    let second = app_at(&path);
    assert_eq!(second.translator.locale(), Locale::Ar);
    assert!(second.translator.locale().is_rtl());
}

#[tokio::test]
async fn toggle_without_code_flips_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut app = app_at(&path);
    app.run(Command::Lang { locale: None }).await.unwrap();
    app.run(Command::Lang { locale: None }).await.unwrap();

    assert_eq!(app_at(&path).translator.locale(), Locale::En);
}
