//! The export-to-budget conversion pipeline.
//!
//! Reads a raw Triodos export, locates the tabular region, and transforms
//! each transaction row into one row of the budget import file. Rows are
//! independent of each other and processed strictly in input order.

use std::io::{Read, Write};

use log::{debug, warn};
use regex::Regex;

use crate::error::Result;
use crate::header::HeaderLocator;
use crate::latin1;
use crate::record::{BudgetRow, Flow, LedgerRecord};

/// Placeholder emitted when no payee can be resolved; the budget tool
/// expects the column to be non-empty.
const MISSING_PAYEE: &str = "?";

/// First-line purpose labels whose following line carries the counterparty
/// name in the second export variant.
const PAYEE_BEARING_LABELS: [&str; 2] = ["Lastschrift", "Überweisungsgutschr."];

/// How the `Payee` output column is filled.
///
/// The bank ships two export layouts with different payee columns; card
/// exports additionally bury the counterparty inside the purpose text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayeeStrategy {
    /// Take `Auftraggeber/Zahlungsempfänger` as-is (first export variant).
    Direct,
    /// Prefer `Empfänger/Zahlungspflichtiger`; when empty, try to pull the
    /// name out of the purpose text (second export variant).
    Heuristic,
}

impl PayeeStrategy {
    fn resolve(&self, record: &LedgerRecord) -> String {
        let column = match self {
            PayeeStrategy::Direct => record.originator.as_deref(),
            PayeeStrategy::Heuristic => record.recipient.as_deref(),
        }
        .unwrap_or("");

        if !column.is_empty() {
            return column.to_string();
        }

        if *self == PayeeStrategy::Heuristic {
            if let Some(name) = payee_from_purpose(&record.purpose) {
                return name.to_string();
            }
        }

        MISSING_PAYEE.to_string()
    }
}

/// Extracts the payee from a multi-line purpose text.
///
/// When the first line is one of the known transaction-type labels, the
/// counterparty name sits on the second line.
fn payee_from_purpose(purpose: &str) -> Option<&str> {
    let mut lines = purpose.lines();
    let first = lines.next()?.trim();
    if PAYEE_BEARING_LABELS.contains(&first) {
        lines.next()
    } else {
        None
    }
}

/// Row counts from one conversion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Data rows written to the output.
    pub written: usize,

    /// Balance marker rows dropped.
    pub dropped: usize,
}

/// The conversion pipeline.
///
/// Construct once with a [`PayeeStrategy`], then run [`Converter::convert`]
/// per input file.
pub struct Converter {
    strategy: PayeeStrategy,
    locator: HeaderLocator,
    line_breaks: Regex,
}

impl Converter {
    pub fn new(strategy: PayeeStrategy) -> Result<Self> {
        Ok(Converter {
            strategy,
            locator: HeaderLocator::new()?,
            line_breaks: Regex::new(r"[\r\n]+")?,
        })
    }

    /// Runs the whole conversion: reads the ISO-8859-1 export from `input`,
    /// writes the UTF-8 budget file to `output`.
    ///
    /// The output header is always written, even when the input contains no
    /// locatable table. A malformed row is fatal and aborts the run; rows
    /// written before it remain in the output.
    pub fn convert<R: Read, W: Write>(&self, mut input: R, output: W) -> Result<Summary> {
        let mut raw = Vec::new();
        input.read_to_end(&mut raw)?;
        let text = latin1::decode(&raw);

        let mut writer = csv::Writer::from_writer(output);
        writer.write_record(BudgetRow::HEADER)?;

        let mut summary = Summary::default();
        if let Some(table) = self.locator.locate(&text) {
            let mut reader = csv::ReaderBuilder::new()
                .delimiter(b';')
                .from_reader(table.as_bytes());

            for (row_idx, result) in reader.deserialize::<LedgerRecord>().enumerate() {
                let row_num = row_idx + 2; // 1-indexed, accounting for header row
                let record = result?;

                match self.transform(&record, row_num) {
                    Some(row) => {
                        writer.write_record(row.fields())?;
                        summary.written += 1;
                    }
                    None => summary.dropped += 1,
                }
            }
        } else {
            debug!("No header line found, producing empty output");
        }

        writer.flush()?;
        Ok(summary)
    }

    /// Transforms one ledger record into at most one budget row.
    fn transform(&self, record: &LedgerRecord, row: usize) -> Option<BudgetRow> {
        if record.is_balance_marker() {
            debug!(
                "Row {}: dropping balance marker {:?}",
                row, record.customer_reference
            );
            return None;
        }

        let flow = Flow::from_flag(&record.direction).unwrap_or_else(|| {
            warn!(
                "Row {}: unrecognized direction flag {:?}, defaulting to outflow",
                row, record.direction
            );
            Flow::Debit
        });
        let (outflow, inflow) = match flow {
            Flow::Credit => ("", record.amount.as_str()),
            Flow::Debit => (record.amount.as_str(), ""),
        };

        let mut memo = record.purpose.clone();
        for (name, value) in record.memo_extras() {
            if !value.is_empty() {
                memo.push_str(&format!("; {}: {}", name, value));
            }
        }

        Some(BudgetRow {
            date: self.sanitize(&record.booking_date.replace('.', "/")),
            payee: self.sanitize(&self.strategy.resolve(record)),
            memo: self.sanitize(&memo),
            outflow: self.sanitize(outflow),
            inflow: self.sanitize(inflow),
        })
    }

    /// Collapses every run of line terminators (Unix or DOS) into a literal
    /// `"; "`. The budget tool cannot handle multi-line values even quoted.
    fn sanitize(&self, field: &str) -> String {
        self.line_breaks.replace_all(field, "; ").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Re-encodes a test fixture as the single-byte encoding the bank uses.
    fn latin1_bytes(s: &str) -> Vec<u8> {
        s.chars().map(|c| c as u8).collect()
    }

    fn convert_with(strategy: PayeeStrategy, input: &str) -> (String, Summary) {
        let converter = Converter::new(strategy).unwrap();
        let mut output = Vec::new();
        let summary = converter
            .convert(Cursor::new(latin1_bytes(input)), &mut output)
            .unwrap();
        (String::from_utf8(output).unwrap(), summary)
    }

    const VARIANT1_HEADER: &str = "Buchungstag; ;Umsatz;Vorgang/Verwendungszweck;Kundenreferenz;Valuta;Konto-Nr.;IBAN;BLZ;BIC;Auftraggeber/Zahlungsempfänger";

    #[test]
    fn test_credit_row_fills_inflow() {
        let input = format!(
            "{}\n12.03.2021;H;250,00;Gehalt;;;;;;;Arbeitgeber AG",
            VARIANT1_HEADER
        );
        let (output, summary) = convert_with(PayeeStrategy::Direct, &input);

        assert_eq!(summary, Summary { written: 1, dropped: 0 });
        assert_eq!(
            output.lines().nth(1).unwrap(),
            "12/03/2021,Arbeitgeber AG,,Gehalt,,\"250,00\""
        );
    }

    #[test]
    fn test_debit_row_fills_outflow() {
        let input = format!(
            "{}\n12.03.2021;S;19,99;Einkauf;;;;;;;Laden GmbH",
            VARIANT1_HEADER
        );
        let (output, _) = convert_with(PayeeStrategy::Direct, &input);

        assert_eq!(
            output.lines().nth(1).unwrap(),
            "12/03/2021,Laden GmbH,,Einkauf,\"19,99\","
        );
    }

    #[test]
    fn test_unknown_flag_defaults_to_outflow() {
        let input = format!(
            "{}\n12.03.2021;X;5,00;Einkauf;;;;;;;Laden GmbH",
            VARIANT1_HEADER
        );
        let (output, _) = convert_with(PayeeStrategy::Direct, &input);

        let row = output.lines().nth(1).unwrap();
        assert!(row.contains(",\"5,00\","));
        assert!(row.ends_with(','));
    }

    #[test]
    fn test_balance_marker_dropped() {
        let input = format!(
            "{}\n01.03.2021;H;100,00;;Anfangssaldo;;;;;;\n12.03.2021;S;5,00;Einkauf;;;;;;;Laden",
            VARIANT1_HEADER
        );
        let (output, summary) = convert_with(PayeeStrategy::Direct, &input);

        assert_eq!(summary, Summary { written: 1, dropped: 1 });
        assert_eq!(output.lines().count(), 2);
        assert!(!output.contains("Anfangssaldo"));
    }

    #[test]
    fn test_memo_aggregation_order_and_format() {
        let input = format!(
            "{}\n12.03.2021;S;5,00;zweck;REF-9;15.03.2021;;DE00123;;GENODEM1GLS;Laden",
            VARIANT1_HEADER
        );
        let (output, _) = convert_with(PayeeStrategy::Direct, &input);

        assert!(output.contains(
            "zweck; Kundenreferenz: REF-9; Valuta: 15.03.2021; IBAN: DE00123; BIC: GENODEM1GLS"
        ));
    }

    #[test]
    fn test_payee_from_purpose_labels() {
        assert_eq!(
            payee_from_purpose("Lastschrift\nACME Corp\nfoo"),
            Some("ACME Corp")
        );
        assert_eq!(
            payee_from_purpose("Überweisungsgutschr.\nACME Corp"),
            Some("ACME Corp")
        );
        assert_eq!(payee_from_purpose("Dauerauftrag\nACME Corp"), None);
        assert_eq!(payee_from_purpose("Lastschrift"), None);
        assert_eq!(payee_from_purpose(""), None);
    }

    #[test]
    fn test_heuristic_strategy_falls_back_to_purpose() {
        let header = "Buchungstag; ;Umsatz;Vorgang/Verwendungszweck;Kundenreferenz;Valuta;Konto-Nr.;IBAN;BLZ;BIC;Empfänger/Zahlungspflichtiger";
        let input = format!(
            "{}\n12.03.2021;S;5,00;\"Lastschrift\nACME Corp\nRest\";;;;;;;",
            header
        );
        let (output, _) = convert_with(PayeeStrategy::Heuristic, &input);

        assert!(output.lines().nth(1).unwrap().contains("ACME Corp"));
    }

    #[test]
    fn test_direct_strategy_never_consults_purpose() {
        let input = format!(
            "{}\n12.03.2021;S;5,00;\"Lastschrift\nACME Corp\";;;;;;;",
            VARIANT1_HEADER
        );
        let (output, _) = convert_with(PayeeStrategy::Direct, &input);

        let row = output.lines().nth(1).unwrap();
        assert!(row.starts_with("12/03/2021,?,"));
    }

    #[test]
    fn test_embedded_newlines_collapsed() {
        let input = format!(
            "{}\n12.03.2021;S;5,00;\"erste Zeile\nzweite Zeile\";;;;;;;Laden",
            VARIANT1_HEADER
        );
        let (output, _) = convert_with(PayeeStrategy::Direct, &input);

        assert!(output.contains("erste Zeile; zweite Zeile"));
        let data_lines = output.lines().count();
        assert_eq!(data_lines, 2);
    }

    #[test]
    fn test_header_always_written() {
        let (output, summary) = convert_with(PayeeStrategy::Direct, "kein Tabellenkopf\n");
        assert_eq!(output.lines().count(), 1);
        assert_eq!(
            output.lines().next().unwrap(),
            "Date,Payee,Category,Memo,Outflow,Inflow"
        );
        assert_eq!(summary, Summary::default());
    }
}
