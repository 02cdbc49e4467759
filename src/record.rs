//! Row models for the bank export and the budget import file.

use serde::Deserialize;

/// `Kundenreferenz` values marking the opening/closing balance rows the bank
/// inserts around the real transactions.
const BALANCE_SENTINELS: [&str; 2] = ["Anfangssaldo", "Endsaldo"];

/// One transaction row as exported by the bank.
///
/// Field names are resolved against the header line once by the CSV reader;
/// a missing required column fails deserialization of the first record, which
/// aborts the run. The two payee columns are optional because each export
/// variant carries only one of them.
#[derive(Debug, Deserialize)]
pub struct LedgerRecord {
    /// Booking date, `DD.MM.YYYY`.
    #[serde(rename = "Buchungstag")]
    pub booking_date: String,

    /// Direction flag: `H` (Haben, credit) or `S` (Soll, debit). The bank
    /// exports this column under a single-space header name.
    #[serde(rename = " ")]
    pub direction: String,

    /// Locale-formatted amount string, passed through unparsed.
    #[serde(rename = "Umsatz")]
    pub amount: String,

    /// Free-text purpose; may contain embedded newlines, and in one export
    /// variant carries the payee name on its second line.
    #[serde(rename = "Vorgang/Verwendungszweck")]
    pub purpose: String,

    /// Reference code; balance sentinel values appear here.
    #[serde(rename = "Kundenreferenz")]
    pub customer_reference: String,

    /// Value date, folded into the memo when present.
    #[serde(rename = "Valuta")]
    pub value_date: String,

    #[serde(rename = "Konto-Nr.")]
    pub account_number: String,

    #[serde(rename = "IBAN")]
    pub iban: String,

    #[serde(rename = "BLZ")]
    pub bank_code: String,

    #[serde(rename = "BIC")]
    pub bic: String,

    /// Payee column of the first export variant.
    #[serde(rename = "Auftraggeber/Zahlungsempfänger", default)]
    pub originator: Option<String>,

    /// Payee column of the second export variant; often empty for card
    /// transactions.
    #[serde(rename = "Empfänger/Zahlungspflichtiger", default)]
    pub recipient: Option<String>,
}

impl LedgerRecord {
    /// Returns `true` for the opening/closing balance placeholder rows.
    ///
    /// The sentinel alone is not sufficient: a real transaction could carry
    /// the same reference text, so an empty purpose field is required as
    /// confirmation.
    pub fn is_balance_marker(&self) -> bool {
        BALANCE_SENTINELS.contains(&self.customer_reference.as_str()) && self.purpose.is_empty()
    }

    /// The auxiliary columns folded into the memo, in the fixed order
    /// consumers rely on: `Kundenreferenz, Valuta, Konto-Nr., IBAN, BLZ, BIC`.
    pub fn memo_extras(&self) -> [(&'static str, &str); 6] {
        [
            ("Kundenreferenz", self.customer_reference.as_str()),
            ("Valuta", self.value_date.as_str()),
            ("Konto-Nr.", self.account_number.as_str()),
            ("IBAN", self.iban.as_str()),
            ("BLZ", self.bank_code.as_str()),
            ("BIC", self.bic.as_str()),
        ]
    }
}

/// Flow direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// `H` (Haben): money coming into the account.
    Credit,
    /// `S` (Soll): money leaving the account.
    Debit,
}

impl Flow {
    /// Classifies the direction flag. Returns `None` for anything other than
    /// the two documented values so the caller owns the fallback policy.
    pub fn from_flag(flag: &str) -> Option<Flow> {
        match flag {
            "H" => Some(Flow::Credit),
            "S" => Some(Flow::Debit),
            _ => None,
        }
    }
}

/// One row of the budget import file.
///
/// `Category` is not stored: it is always emitted empty, left for the
/// budgeting tool's own categorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetRow {
    pub date: String,
    pub payee: String,
    pub memo: String,
    pub outflow: String,
    pub inflow: String,
}

impl BudgetRow {
    /// The fixed output column set, in emission order.
    pub const HEADER: [&'static str; 6] = ["Date", "Payee", "Category", "Memo", "Outflow", "Inflow"];

    /// Field values in the same order as [`BudgetRow::HEADER`].
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.date,
            &self.payee,
            "",
            &self.memo,
            &self.outflow,
            &self.inflow,
        ]
    }
}
