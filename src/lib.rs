/*!
# Inventory Spreadsheet Front End

A small web application for viewing and editing a product inventory that
lives in one remote Google spreadsheet ("loja_dados").

## Overview

The remote sheet is the only store. Every page load fetches the whole
sheet through the spreadsheet HTTP API, normalizes a handful of columns
and hands the table to a browser-side editor; saving clears the sheet and
rewrites it from the edited table, header row first.

## Architecture

Three parts, composed linearly:

- **Session establishment** - a service-account credential (read from the
  process environment) is exchanged for a bearer token, the spreadsheet is
  resolved by title through the Drive API, and the first sheet's title is
  picked up. Each load or save builds its own session; nothing is pooled.
- **Load + normalize** - all values come down as one grid. The header row
  names the columns; the essential columns {Code, Product, Quantity} are
  synthesized empty when absent, Quantity is coerced to a number (invalid
  values become 0) and Code to a trimmed string without the ".0" artifact
  of upstream numeric formatting. Any failure degrades to an empty table
  with the five canonical columns {Code, Product, Quantity, Price, EAN}.
- **Save** - a destructive whole-table overwrite: clear, then write the
  header and every row as-is. Last writer wins; there is no locking and no
  version token.

## Modules

- **config**: secrets surface and the fixed spreadsheet title and scopes
- **credentials**: service-account JSON, JWT minting, token exchange
- **sheets**: the session handle and the raw wire operations
- **table**: the in-memory table and its normalization rules
- **loader**: the fail-soft public load operation
- **saving**: the clear-and-rewrite public save operation
- **app**: axum routes and the embedded editor page
*/

pub mod app;
pub mod config;
pub mod credentials;
pub mod error;
pub mod loader;
pub mod saving;
pub mod sheets;
pub mod table;

pub use error::SheetError;
pub use loader::load_inventory;
pub use saving::save_inventory;
pub use table::Table;
