//! # triodos2ynab
//!
//! Converts a Triodos bank CSV export (semicolon-delimited, ISO-8859-1,
//! free-form preamble, German column names) into the 6-column CSV format
//! the YNAB4 budgeting tool imports.
//!
//! ## Design Principles
//!
//! - **Pass-through amounts**: `Umsatz` values are copied verbatim, never
//!   parsed or reformatted
//! - **Fatal on malformed schema**: a missing required column aborts the run
//! - **Degrade on missing data**: no header line means empty output, an
//!   unresolvable payee becomes `?`
//! - **One pipeline, two export variants**: payee resolution is selected by
//!   a strategy flag instead of duplicating the pipeline
//!
//! ## Example
//!
//! ```no_run
//! use std::io::Cursor;
//! use triodos2ynab::{Converter, PayeeStrategy};
//!
//! let export = b"Buchungstag; ;Umsatz;Vorgang/Verwendungszweck;Kundenreferenz;Valuta;Konto-Nr.;IBAN;BLZ;BIC\n";
//! let converter = Converter::new(PayeeStrategy::Direct).unwrap();
//! converter.convert(Cursor::new(&export[..]), std::io::stdout()).unwrap();
//! ```

pub mod converter;
pub mod error;
pub mod header;
pub mod latin1;
pub mod record;

pub use converter::{Converter, PayeeStrategy, Summary};
pub use error::{ConvertError, Result};
pub use header::HeaderLocator;
pub use record::{BudgetRow, Flow, LedgerRecord};
