// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive menu.
//
// Module responsibilities:
// - `config`: Loads the access key and base URL once at startup.
// - `api`: Encapsulates HTTP interactions with the coinlayer rates
//   API (live, historical, conversion-scoped live) behind a typed
//   response and a tagged error.
// - `rates`: Pure input validation and cross-rate arithmetic.
// - `ui`: Implements the numbered menu loop and delegates requests
//   to `api`.
//
// Keeping this separation makes it easier to test the query logic
// without a network round trip.
pub mod api;
pub mod config;
pub mod rates;
pub mod ui;
