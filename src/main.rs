// Entrypoint for the CLI application.
// - Keeps `main` small: load configuration, create an API client and
//   hand it to the menu loop.
// - A missing API key surfaces here as a fatal startup error.

use coinrates_cli::{api::ApiClient, config::Config, ui::main_menu};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let api = ApiClient::new(&config)?;

    // Start the interactive menu. This call blocks until the user
    // picks the exit option.
    main_menu(api)?;
    Ok(())
}
