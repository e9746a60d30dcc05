// Library root
// -----------
// The binary (`main.rs`) only parses arguments and reports errors; everything
// else lives here so it can be tested without a terminal.
//
// Module responsibilities:
// - `config`: the JSON config file holding the API key and display type.
// - `api`: blocking HTTP calls to the search and credits endpoints and the
//   wire types they decode into.
// - `render`: bordered-table and tab-aligned plain output of records.
// - `ui`: configure prompts, the request spinner and error printing.
// - `cli`: clap definitions and command dispatch.
// - `error`: the `LookupError` taxonomy.
// - `logging`: tracing subscriber setup.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod ui;

pub use error::LookupError;
