// Library root
// -----------
// This crate exposes the pieces of the business card so the binary
// (`main.rs`) only has to wire them together.
//
// Module responsibilities:
// - `config`: the immutable card configuration (defaults + JSON file).
// - `card`: renders the banner and the boxed profile card.
// - `console`: output sink, typed-out messages and the spinner.
// - `actions`: menu choices, the menu itself and the action handlers.
// - `ui`: the greeting screen and the interactive menu loop.
// - `opener` / `fetch`: the side effects (open a URL, download a file).
// - `error`: typed errors for actions, menus and configuration.
pub mod actions;
pub mod card;
pub mod config;
pub mod console;
pub mod error;
pub mod fetch;
pub mod opener;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;
